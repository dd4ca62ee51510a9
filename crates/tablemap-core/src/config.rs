//! Catalog and connection settings.
//!
//! Loading the settings file is the host's job; this module only parses
//! the TOML text it is handed.

use crate::{MODEL_PLACEHOLDER, error::Error, naming::ConventionNaming, query::DedupMode};
use serde::Deserialize;

///
/// CatalogConfig
///
/// ```toml
/// table_suffix = "_data"
/// field_prefix = "{model}_"
/// schema = "zorg"
/// dedup = "adjacent"
/// ```
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub table_prefix: String,
    pub table_suffix: String,
    /// Field-prefix template; `{model}` is replaced by the model name.
    pub field_prefix: String,
    /// Schema (database) name scoping foreign-key discovery.
    pub schema: String,
    pub dedup: DedupMode,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            table_prefix: String::new(),
            table_suffix: String::new(),
            field_prefix: format!("{MODEL_PLACEHOLDER}_"),
            schema: String::new(),
            dedup: DedupMode::default(),
        }
    }
}

impl CatalogConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    /// Naming policy described by the affix settings.
    #[must_use]
    pub fn naming(&self) -> ConventionNaming {
        ConventionNaming::new()
            .table_prefix(&self.table_prefix)
            .table_suffix(&self.table_suffix)
            .field_prefix_template(&self.field_prefix)
    }
}

///
/// ConnectionConfig
///
/// Credentials handed to a dialect adapter to build a driver connection
/// string. The connection itself is opened outside this crate.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: Option<u16>,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl ConnectionConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }
}
