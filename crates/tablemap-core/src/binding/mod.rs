//! Dynamic field binding.
//!
//! Rows become [`Record`]s: a map of logical field name to [`FieldValue`].
//! When the record is embedded in a typed structure, columns whose names
//! match the structure's attributes are written into those attributes and
//! the record keeps only an alias, so the typed field stays the single
//! source of truth. All host access goes through [`FieldAccess`].

mod access;
mod field;
mod materialize;
mod model;
mod record;


pub use access::{FieldAccess, FieldType, bind_coerced, write_exact};
pub use field::{Field, FieldValue};
pub use model::{AsAny, Model, ModelExt};
pub use record::Record;

pub(crate) use materialize::materialize;
