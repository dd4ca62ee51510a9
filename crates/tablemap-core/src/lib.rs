//! Core runtime for tablemap: schema catalog, predicate algebra, query
//! engine, and the binding layer that materializes rows into dynamic or
//! typed records.
#![warn(unreachable_pub)]

extern crate self as tablemap;

// public exports are one module level down
pub mod binding;
pub mod catalog;
pub mod config;
pub mod dialect;
pub mod error;
pub mod model;
pub mod naming;
pub mod predicate;
pub mod query;
pub mod source;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use error::Error;

///
/// CONSTANTS
///

/// Placeholder substituted by the model name inside a field-prefix template.
pub const MODEL_PLACEHOLDER: &str = "{model}";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No dialect adapters, row sources, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        binding::{FieldAccess, FieldType, Model, ModelExt, Record},
        catalog::{Catalog, CatalogBuilder},
        predicate::{Connective, Filter, Predicate, Selectable, and, or},
        query::{DedupMode, Query},
        value::Value,
    };
}
