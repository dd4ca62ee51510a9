use crate::{
    error::Error,
    model::{EntityField, EntityRelationship, IndexModel},
    predicate::Selectable,
};
use serde::Serialize;
use std::collections::BTreeMap;

///
/// Entity
/// Catalog representation of one table.
///
/// `fields` is keyed by physical column name. Logical (model-facing) names
/// are the physical names with `field_prefix` stripped; the prefix is
/// resolved from the naming policy when the entity enters the catalog.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Entity {
    /// Normalized name (table affixes stripped); the catalog key.
    pub name: String,
    /// Physical table name used when rendering SQL.
    pub table: String,
    /// Resolved per-model field prefix, e.g. `patient_`.
    pub field_prefix: String,
    pub fields: BTreeMap<String, EntityField>,
    pub relationships: BTreeMap<String, EntityRelationship>,
    pub indexes: Vec<IndexModel>,
}

impl Entity {
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: EntityField) -> Self {
        self.add_field(field);
        self
    }

    #[must_use]
    pub fn with_field_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.field_prefix = prefix.into();
        self
    }

    pub fn add_field(&mut self, field: EntityField) {
        self.fields.insert(field.name.clone(), field);
    }

    #[must_use]
    pub fn field(&self, physical: &str) -> Option<&EntityField> {
        self.fields.get(physical)
    }

    ///
    /// KEYS
    ///

    /// First key field, if any.
    #[must_use]
    pub fn key(&self) -> Option<&EntityField> {
        self.keys().next()
    }

    pub fn keys(&self) -> impl Iterator<Item = &EntityField> {
        self.fields.values().filter(|f| f.key)
    }

    #[must_use]
    pub fn key_count(&self) -> usize {
        self.keys().count()
    }

    /// The entity's only key field.
    ///
    /// Key lookups and key deduplication address exactly one column, so a
    /// missing key is a [`NoKeyError`](crate::error::NoKeyError) and a
    /// composite key is unsupported.
    pub fn single_key(&self) -> Result<&EntityField, Error> {
        let mut keys = self.keys();
        let key = keys.next().ok_or_else(|| Error::no_key(&self.table))?;

        if keys.next().is_some() {
            return Err(Error::query_unsupported(format!(
                "table '{}' has a composite key; single-key operations are not supported",
                self.table
            )));
        }

        Ok(key)
    }

    ///
    /// RELATIONSHIPS
    ///

    /// Insert or replace the relationship keyed by its foreign-key column.
    pub fn add_relationship(&mut self, relationship: EntityRelationship) {
        self.relationships
            .insert(relationship.foreign_key.clone(), relationship);
    }

    #[must_use]
    pub fn relationship(&self, foreign_key: &str) -> Option<&EntityRelationship> {
        self.relationships.get(foreign_key)
    }

    ///
    /// NAMES
    ///

    /// Logical name for a physical column.
    #[must_use]
    pub fn logical_name<'a>(&self, physical: &'a str) -> &'a str {
        physical
            .strip_prefix(self.field_prefix.as_str())
            .unwrap_or(physical)
    }

    /// Physical column for a logical field name.
    ///
    /// Falls back to the given name unchanged when no column maps to it,
    /// so physical names pass straight through.
    #[must_use]
    pub fn translate_model_field(&self, logical: &str) -> String {
        self.fields
            .keys()
            .find(|physical| self.logical_name(physical) == logical)
            .cloned()
            .unwrap_or_else(|| logical.to_string())
    }

    /// Start a comparison on one of this entity's fields, addressed by
    /// logical or physical name.
    #[must_use]
    pub fn col(&self, field: &str) -> Selectable {
        Selectable::new(&self.table, self.translate_model_field(field))
    }
}
