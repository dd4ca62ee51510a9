mod parse;

#[cfg(test)]
mod tests;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use parse::{parse_decimal_int, parse_prefixed_int};

///
/// Value
///
/// One column value as exchanged with the row source and stored in records.
///
/// Null  → SQL NULL, renders as the literal text `NULL`.
/// Int   → any signed integer column; narrower widths live on typed fields.
/// Text  → character data.
/// Blob  → binary data.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Value {
    #[default]
    Null,
    Int(i64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Int(_) => ValueKind::Int,
            Self::Text(_) => ValueKind::Text,
            Self::Blob(_) => ValueKind::Blob,
        }
    }

    /// True only for SQL NULL; empty text and zero are values.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Integer view of the value.
    ///
    /// Text and binary are parsed as base-prefixed integers (`0x`, `0o`,
    /// `0b`, leading `0`); anything unparseable, and NULL, yields zero.
    #[must_use]
    pub fn as_int(&self) -> i64 {
        match self {
            Self::Null => 0,
            Self::Int(v) => *v,
            Self::Text(s) => parse_prefixed_int(s).unwrap_or(0),
            Self::Blob(b) => std::str::from_utf8(b)
                .ok()
                .and_then(parse_prefixed_int)
                .unwrap_or(0),
        }
    }

    /// Text view of the value, borrowing where possible.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::Blob(b) => f.write_str(&String::from_utf8_lossy(b)),
        }
    }
}

///
/// ValueKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ValueKind {
    Null,
    Int,
    Text,
    Blob,
}

///
/// Conversions
///

macro_rules! impl_from_int {
    ( $( $ty:ty ),* $(,)? ) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Blob(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Blob(v.to_vec())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
