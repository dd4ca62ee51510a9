//! Row source boundary.
//!
//! The physical driver and connection pool live outside this crate. Core
//! code only ever talks to a [`RowSource`]: parameterized execution that
//! yields a forward-only [`RowSet`]. A row set is released when dropped and
//! must be consumed or dropped before the next query on the same handle.

pub mod memory;

use crate::value::Value;
use thiserror::Error as ThisError;

pub use memory::{MemorySource, ResultTable};

///
/// SourceError
///
/// Driver-level failure reported by a row source.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("row source error: {message}")]
pub struct SourceError {
    pub message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

///
/// RowSource
///

pub trait RowSource: Send + Sync {
    /// Execute `sql` with positional `params` bound to its placeholders.
    fn query(&self, sql: &str, params: &[Value]) -> Result<Box<dyn RowSet + '_>, SourceError>;
}

///
/// RowSet
///
/// Pull-based, single-pass cursor over one result.
///

pub trait RowSet {
    /// Column names in result order.
    fn columns(&self) -> &[String];

    /// Advance to the next row; `None` once the result is exhausted.
    fn next_row(&mut self) -> Result<Option<Vec<Value>>, SourceError>;
}
