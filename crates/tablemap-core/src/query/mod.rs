//! Query engine.
//!
//! A [`Query`] is bound to one model name and one catalog snapshot. It
//! renders either a filtered `SELECT` or caller-supplied raw text, runs it
//! through the catalog's row source, and materializes each row through the
//! binding layer.

mod dedup;


use crate::{
    binding::{Model, ModelExt, materialize},
    catalog::Catalog,
    error::Error,
    model::Entity,
    predicate::{Filter, Predicate},
    value::Value,
};
use std::{cell::OnceCell, fmt, sync::Arc};
use tracing::debug;

pub use dedup::DedupMode;

///
/// Rendered
///

#[derive(Clone, Debug, Eq, PartialEq)]
struct Rendered {
    sql: String,
    params: Vec<Value>,
}

///
/// Query
///
/// The rendered text is cached on first use; predicates attached after
/// that are not reflected, so finish building before executing.
///

pub struct Query {
    model: String,
    catalog: Arc<Catalog>,
    filter: Filter,
    raw: Option<Rendered>,
    dedup: Option<DedupMode>,
    rendered: OnceCell<Rendered>,
}

impl Query {
    pub(crate) fn new(model: &str, catalog: Arc<Catalog>) -> Self {
        Self {
            model: model.to_string(),
            catalog,
            filter: Filter::default(),
            raw: None,
            dedup: None,
            rendered: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Replace the predicate list; top-level predicates are AND-joined.
    #[must_use]
    pub fn filter<I, P>(mut self, predicates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Predicate>,
    {
        self.filter = Filter::new(predicates);
        self
    }

    /// Use `sql` verbatim with positional `params`; takes precedence over
    /// any predicate list.
    #[must_use]
    pub fn from_sql<I, V>(mut self, sql: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.raw = Some(Rendered {
            sql: sql.into(),
            params: params.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Override the catalog's deduplication for this query.
    #[must_use]
    pub const fn dedup(mut self, dedup: DedupMode) -> Self {
        self.dedup = Some(dedup);
        self
    }

    ///
    /// RENDERING
    ///

    /// Final query text, rendered once and cached.
    pub fn sql(&self) -> Result<&str, Error> {
        Ok(&self.rendered()?.sql)
    }

    /// Parameters bound to the placeholders of [`Self::sql`], in order.
    pub fn params(&self) -> Result<&[Value], Error> {
        Ok(&self.rendered()?.params)
    }

    fn rendered(&self) -> Result<&Rendered, Error> {
        if let Some(rendered) = self.rendered.get() {
            return Ok(rendered);
        }

        let rendered = match &self.raw {
            Some(raw) => raw.clone(),
            None => {
                let entity = self.entity()?;
                let translation = self.filter.translate(self.catalog.translator())?;

                let mut sql = format!("SELECT * FROM {}", entity.table);
                if !translation.is_empty() {
                    sql.push_str(" WHERE ");
                    sql.push_str(&translation.text);
                }

                Rendered {
                    sql,
                    params: translation.params,
                }
            }
        };

        Ok(self.rendered.get_or_init(|| rendered))
    }

    fn entity(&self) -> Result<&Entity, Error> {
        self.catalog
            .entity(&self.model)
            .ok_or_else(|| Error::entity_not_found(&self.model))
    }

    ///
    /// EXECUTION
    ///

    /// Fetch the record whose single key field equals `key`.
    ///
    /// `Ok(None)` when no row matches; only the first matching row is read.
    #[tracing::instrument(skip_all, fields(model = %self.model))]
    pub fn get(&self, key: impl Into<Value>) -> Result<Option<Box<dyn Model>>, Error> {
        let entity = self.entity()?;
        let key_field = entity.single_key()?;

        let sql = format!(
            "SELECT * FROM {} WHERE {} = {}",
            entity.table,
            key_field.name,
            self.catalog.translator().placeholder(1)
        );
        let params = [key.into()];
        debug!(%sql, "get");

        let mut rows = self.catalog.source().query(&sql, &params)?;
        let columns = rows.columns().to_vec();

        match rows.next_row()? {
            Some(row) => Ok(Some(self.materialize(&columns, row)?)),
            None => Ok(None),
        }
    }

    /// Every matching record in result order, deduplicated on the key field
    /// according to the effective [`DedupMode`].
    #[tracing::instrument(skip_all, fields(model = %self.model))]
    pub fn all(&self) -> Result<Vec<Box<dyn Model>>, Error> {
        let mode = self.dedup.unwrap_or_else(|| self.catalog.dedup());
        let key = match mode {
            DedupMode::None => None,
            DedupMode::Adjacent | DedupMode::Full => {
                let entity = self.entity()?;
                let key = entity.single_key()?;

                Some(entity.logical_name(&key.name).to_string())
            }
        };

        let rendered = self.rendered()?;
        debug!(sql = %rendered.sql, params = rendered.params.len(), ?mode, "all");

        let mut rows = self.catalog.source().query(&rendered.sql, &rendered.params)?;
        let columns = rows.columns().to_vec();
        let mut seen = mode.tracker();
        let mut models = Vec::new();

        while let Some(row) = rows.next_row()? {
            let model = self.materialize(&columns, row)?;

            let keep = key
                .as_deref()
                .is_none_or(|key| seen.admit(model.field(key).string()));
            if keep {
                models.push(model);
            }
        }

        debug!(records = models.len(), "all done");

        Ok(models)
    }

    fn materialize(&self, columns: &[String], row: Vec<Value>) -> Result<Box<dyn Model>, Error> {
        if row.len() != columns.len() {
            return Err(Error::query_invariant(format!(
                "row has {} values for {} columns",
                row.len(),
                columns.len()
            )));
        }

        let constructor = self.catalog.model(&self.model);
        let mut model = constructor(self.model.as_str());
        materialize(&mut *model, &self.catalog, columns, row);

        Ok(model)
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("model", &self.model)
            .field("filter", &self.filter)
            .field("raw", &self.raw)
            .field("dedup", &self.dedup)
            .finish_non_exhaustive()
    }
}
