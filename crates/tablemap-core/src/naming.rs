//! Naming conventions that connect physical schema names to model names.
//!
//! Every string convention the catalog, binding layer, and relationship
//! traversal depend on goes through [`NamingPolicy`], so an alternate scheme
//! is a new policy object rather than a source edit.

use crate::MODEL_PLACEHOLDER;
use convert_case::{Case, Casing};

///
/// NamingPolicy
///

pub trait NamingPolicy: Send + Sync {
    /// Physical table name → catalog key.
    fn trim_table_affixes(&self, table: &str) -> String;

    /// Column prefix shared by every field of `model`.
    fn field_prefix(&self, model: &str) -> String;

    /// Host-structure attribute name for a logical field name.
    fn attribute_name(&self, logical: &str) -> String {
        logical.to_case(Case::Pascal)
    }

    /// Foreign-key column on `model` for the relationship called `short`.
    fn foreign_key(&self, model: &str, short: &str) -> String {
        format!("{model}_{short}")
    }

    /// Column on `target` that refers back to `source` records.
    fn back_reference_key(&self, target: &str, source: &str) -> String {
        format!("{target}_{source}")
    }
}

///
/// ConventionNaming
///
/// Default policy: fixed table prefix/suffix and a field-prefix template in
/// which `{model}` is replaced by the model name.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConventionNaming {
    table_prefix: String,
    table_suffix: String,
    field_prefix_template: String,
}

impl ConventionNaming {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn table_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.table_suffix = suffix.into();
        self
    }

    /// Field-prefix template; `{model}` is substituted per model.
    #[must_use]
    pub fn field_prefix_template(mut self, template: impl Into<String>) -> Self {
        self.field_prefix_template = template.into();
        self
    }

    #[must_use]
    pub fn trim_table_prefix<'a>(&self, name: &'a str) -> &'a str {
        strip_repeated_prefix(name, &self.table_prefix)
    }

    #[must_use]
    pub fn trim_table_suffix<'a>(&self, name: &'a str) -> &'a str {
        strip_repeated_suffix(name, &self.table_suffix)
    }
}

impl NamingPolicy for ConventionNaming {
    // Prefix first, suffix second.
    fn trim_table_affixes(&self, table: &str) -> String {
        self.trim_table_suffix(self.trim_table_prefix(table))
            .to_string()
    }

    fn field_prefix(&self, model: &str) -> String {
        self.field_prefix_template
            .replacen(MODEL_PLACEHOLDER, model, 1)
    }
}

fn strip_repeated_prefix<'a>(mut name: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return name;
    }
    while let Some(rest) = name.strip_prefix(prefix) {
        name = rest;
    }
    name
}

fn strip_repeated_suffix<'a>(mut name: &'a str, suffix: &str) -> &'a str {
    if suffix.is_empty() {
        return name;
    }
    while let Some(rest) = name.strip_suffix(suffix) {
        name = rest;
    }
    name
}
