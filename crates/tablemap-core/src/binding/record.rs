use crate::{
    binding::{FieldValue, Model},
    catalog::Catalog,
    value::Value,
};
use std::{collections::HashMap, fmt, sync::Arc};

///
/// Record
///
/// One materialized row. Used on its own as the dynamic model, or embedded
/// in a typed structure that derives `Model`.
///
/// `fields` and `field_mapping` are both keyed by logical field name; the
/// mapping yields the physical column each field was read from.
///

#[derive(Clone, Default)]
pub struct Record {
    pub(crate) name: String,
    pub(crate) fields: HashMap<String, FieldValue>,
    pub(crate) field_mapping: HashMap<String, String>,
    pub(crate) catalog: Option<Arc<Catalog>>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Store a field by hand. Alias slots must name an attribute of the
    /// record's host.
    pub fn insert(
        &mut self,
        logical: impl Into<String>,
        physical: impl Into<String>,
        value: FieldValue,
    ) {
        let logical = logical.into();

        self.field_mapping.insert(logical.clone(), physical.into());
        self.fields.insert(logical, value);
    }

    #[must_use]
    pub fn with_value(
        mut self,
        logical: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        let logical = logical.into();
        self.insert(logical.clone(), logical, FieldValue::Copied(value.into()));
        self
    }

    #[must_use]
    pub fn slot(&self, logical: &str) -> Option<&FieldValue> {
        self.fields.get(logical)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        name.clone_into(&mut self.name);
    }

    pub(crate) fn attach(&mut self, catalog: &Arc<Catalog>) {
        self.catalog = Some(Arc::clone(catalog));
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("field_mapping", &self.field_mapping)
            .field("attached", &self.catalog.is_some())
            .finish()
    }
}

impl Model for Record {
    fn record(&self) -> &Record {
        self
    }

    fn record_mut(&mut self) -> &mut Record {
        self
    }
}
