//! Catalog data definitions.
//!
//! Types here are plain data discovered from the database once, at schema
//! load. They never touch the row source again; query-time code reads them
//! through the frozen [`Catalog`](crate::catalog::Catalog).
pub mod entity;
pub mod field;
pub mod index;
pub mod relationship;

pub use entity::Entity;
pub use field::EntityField;
pub use index::IndexModel;
pub use relationship::EntityRelationship;
