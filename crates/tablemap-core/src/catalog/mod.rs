//! Entity catalog.
//!
//! Built once through [`CatalogBuilder`] and frozen into an `Arc<Catalog>`.
//! Queries and records hold that snapshot; nothing mutates it afterwards,
//! so concurrent readers need no locking.

mod builder;

#[cfg(test)]
mod tests;

use crate::{
    binding::{Model, Record},
    model::Entity,
    naming::NamingPolicy,
    predicate::Translator,
    query::{DedupMode, Query},
    source::RowSource,
};
use std::{collections::HashMap, fmt, sync::Arc};

pub use builder::CatalogBuilder;

/// Produces a fresh model instance for the given model name.
pub type ModelConstructor = Arc<dyn Fn(&str) -> Box<dyn Model> + Send + Sync>;

///
/// Catalog
///

pub struct Catalog {
    entities: HashMap<String, Entity>,
    models: HashMap<String, ModelConstructor>,
    naming: Arc<dyn NamingPolicy>,
    translator: Arc<dyn Translator>,
    source: Arc<dyn RowSource>,
    schema: String,
    dedup: DedupMode,
}

impl Catalog {
    #[must_use]
    pub fn builder(source: Arc<dyn RowSource>) -> CatalogBuilder {
        CatalogBuilder::new(source)
    }

    ///
    /// ENTITIES
    ///

    /// Entity by normalized name.
    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    /// Normalized entity names, sorted.
    #[must_use]
    pub fn entity_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.entities.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    ///
    /// MODELS
    ///

    /// Constructor for `name`; the dynamic [`Record`] when none was registered.
    #[must_use]
    pub fn model(&self, name: &str) -> ModelConstructor {
        self.models.get(name).cloned().unwrap_or_else(|| {
            let dynamic: ModelConstructor = Arc::new(dynamic_record);
            dynamic
        })
    }

    /// Whether a typed constructor is registered for `name`.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    ///
    /// NAMING
    ///

    /// Physical table name → catalog key.
    #[must_use]
    pub fn trim_table_affixes(&self, table: &str) -> String {
        self.naming.trim_table_affixes(table)
    }

    #[must_use]
    pub fn naming(&self) -> &dyn NamingPolicy {
        self.naming.as_ref()
    }

    #[must_use]
    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }

    #[must_use]
    pub fn source(&self) -> &dyn RowSource {
        self.source.as_ref()
    }

    /// Schema name foreign keys were discovered in.
    #[must_use]
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Default deduplication for queries on this catalog.
    #[must_use]
    pub const fn dedup(&self) -> DedupMode {
        self.dedup
    }

    ///
    /// QUERIES
    ///

    /// Start a query against `model`.
    #[must_use]
    pub fn query(self: &Arc<Self>, model: &str) -> Query {
        Query::new(model, Arc::clone(self))
    }
}

fn dynamic_record(name: &str) -> Box<dyn Model> {
    Box::new(Record::new(name))
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("entities", &self.entity_names())
            .field("models", &self.models.keys().collect::<Vec<_>>())
            .field("schema", &self.schema)
            .field("dedup", &self.dedup)
            .finish_non_exhaustive()
    }
}
