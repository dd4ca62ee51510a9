use crate::{
    binding::Model,
    catalog::{Catalog, ModelConstructor},
    config::{CatalogConfig, ConnectionConfig},
    dialect::DialectAdapter,
    error::Error,
    model::{Entity, EntityField, EntityRelationship},
    naming::NamingPolicy,
    predicate::{StandardTranslator, Translator},
    query::DedupMode,
    source::RowSource,
};
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, warn};

///
/// CatalogBuilder
///
/// Mutable build phase of a [`Catalog`]. Naming must be configured before
/// entities are registered or loaded; entity keys and field prefixes are
/// resolved on entry.
///

pub struct CatalogBuilder {
    entities: HashMap<String, Entity>,
    models: HashMap<String, ModelConstructor>,
    naming: Arc<dyn NamingPolicy>,
    translator: Arc<dyn Translator>,
    source: Arc<dyn RowSource>,
    schema: String,
    dedup: DedupMode,
}

impl CatalogBuilder {
    #[must_use]
    pub fn new(source: Arc<dyn RowSource>) -> Self {
        let config = CatalogConfig::default();

        Self {
            entities: HashMap::new(),
            models: HashMap::new(),
            naming: Arc::new(config.naming()),
            translator: Arc::new(StandardTranslator),
            source,
            schema: config.schema,
            dedup: config.dedup,
        }
    }

    #[must_use]
    pub fn naming(mut self, naming: impl NamingPolicy + 'static) -> Self {
        self.naming = Arc::new(naming);
        self
    }

    #[must_use]
    pub fn translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Arc::new(translator);
        self
    }

    #[must_use]
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    #[must_use]
    pub const fn dedup(mut self, dedup: DedupMode) -> Self {
        self.dedup = dedup;
        self
    }

    /// Apply naming, schema and deduplication settings.
    #[must_use]
    pub fn with_config(self, config: &CatalogConfig) -> Self {
        self.naming(config.naming())
            .schema(&config.schema)
            .dedup(config.dedup)
    }

    /// Fall back to the connection's database when no schema is set.
    #[must_use]
    pub fn with_connection(mut self, connection: &ConnectionConfig) -> Self {
        if self.schema.is_empty() {
            self.schema.clone_from(&connection.database);
        }
        self
    }

    ///
    /// ENTITIES
    ///

    /// Declare an entity by hand; replaces any entity of the same name.
    ///
    /// The catalog key is `entity.name` with table affixes trimmed, and an
    /// empty `table` defaults to the name as given.
    pub fn register_entity(&mut self, mut entity: Entity) -> &mut Self {
        let name = self.naming.trim_table_affixes(&entity.name);

        if entity.table.is_empty() {
            entity.table.clone_from(&entity.name);
        }
        if entity.field_prefix.is_empty() {
            entity.field_prefix = self.naming.field_prefix(&name);
        }
        entity.name.clone_from(&name);

        self.entities.insert(name, entity);
        self
    }

    /// Discover every table, its columns, and the foreign keys in the
    /// configured schema.
    ///
    /// Foreign keys are skipped when no schema is configured. On failure
    /// the entities loaded so far stay registered.
    #[tracing::instrument(skip_all, err, fields(dialect = adapter.name()))]
    pub fn load_entities(&mut self, adapter: &dyn DialectAdapter) -> Result<(), Error> {
        let source = Arc::clone(&self.source);

        let tables = adapter.table_names(source.as_ref())?;
        debug!(tables = tables.len(), "discovered tables");

        for table in tables {
            let columns = adapter.table_columns(source.as_ref(), &table)?;
            let name = self.naming.trim_table_affixes(&table);

            let mut entity =
                Entity::new(&name, &table).with_field_prefix(self.naming.field_prefix(&name));
            for column in columns {
                entity.add_field(EntityField::from(column));
            }

            debug!(entity = %name, %table, fields = entity.fields.len(), "loaded entity");
            self.entities.insert(name, entity);
        }

        if self.schema.is_empty() {
            warn!("no schema configured, skipping foreign key discovery");
            return Ok(());
        }

        for fk in adapter.foreign_keys(source.as_ref(), &self.schema)? {
            let owner = self.naming.trim_table_affixes(&fk.table);

            match self.entities.get_mut(&owner) {
                Some(entity) => entity.add_relationship(EntityRelationship::new(
                    fk.column,
                    fk.referenced_table,
                    fk.referenced_column,
                )),
                None => warn!(
                    table = %fk.table,
                    constraint = %fk.constraint,
                    "foreign key on unknown table"
                ),
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    ///
    /// MODELS
    ///

    /// Register a typed model; its `Default` value is the fresh instance.
    pub fn register_model<T: Model + Default>(&mut self, name: &str) -> &mut Self {
        self.register_model_with(name, |name| {
            let mut model = T::default();
            model.record_mut().set_name(name);
            Box::new(model)
        })
    }

    /// Register a constructor for `name`, replacing any earlier one.
    pub fn register_model_with<F>(&mut self, name: &str, constructor: F) -> &mut Self
    where
        F: Fn(&str) -> Box<dyn Model> + Send + Sync + 'static,
    {
        self.models.insert(name.to_string(), Arc::new(constructor));
        self
    }

    /// Freeze into an immutable catalog.
    #[must_use]
    pub fn build(self) -> Arc<Catalog> {
        debug!(
            entities = self.entities.len(),
            models = self.models.len(),
            "catalog built"
        );

        Arc::new(Catalog {
            entities: self.entities,
            models: self.models,
            naming: self.naming,
            translator: self.translator,
            source: self.source,
            schema: self.schema,
            dedup: self.dedup,
        })
    }
}
