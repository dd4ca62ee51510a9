//! Predicate algebra.
//!
//! Trees are pure, entity-independent data; [`translate`] is a stateless
//! visitor that renders a tree into query text plus its positional
//! parameters. Alternate dialects swap the [`Translator`], never the tree.

mod ast;
mod filter;
mod translate;


pub use ast::{
    CompareOp, Comparison, Connective, ConnectiveOp, Operand, Predicate, Selectable, and, or,
};
pub use filter::Filter;
pub use translate::{StandardTranslator, Translation, Translator, translate};
