//! tablemap: a schema-introspecting object-relational mapping layer.
//!
//! Load a [`catalog::Catalog`] from a live database through a dialect
//! adapter, build parameterized queries with the predicate algebra, and
//! read rows back as dynamic [`binding::Record`]s or as typed structs that
//! `#[derive(Model)]`.
//!
//! ```ignore
//! use tablemap::prelude::*;
//!
//! #[derive(Default, Model)]
//! struct Patient {
//!     record: Record,
//!     achternaam: String,
//! }
//!
//! let mut builder = Catalog::builder(source)
//!     .with_config(&config)
//!     .with_connection(&connection);
//! builder.load_entities(&MysqlDialect)?;
//! builder.register_model::<Patient>("patient");
//! let catalog = builder.build();
//!
//! let patient = catalog.query("patient").get("P1")?;
//! ```

pub use tablemap_core::*;

/// Derive macro generating `FieldAccess` and `Model` for a typed record.
pub use tablemap_derive::Model;

pub mod prelude {
    pub use tablemap_core::prelude::*;
    pub use tablemap_derive::Model;
}
