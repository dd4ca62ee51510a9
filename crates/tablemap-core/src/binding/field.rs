use crate::{binding::FieldAccess, value::Value};
use std::fmt;

///
/// FieldValue
///
/// Storage for one column of one record.
///
/// Copied → a detached copy of the raw row value.
/// Alias  → a view onto the named attribute of the record's typed host;
///          reads and writes go through the host's accessor, so the host
///          field is the only copy.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldValue {
    Copied(Value),
    Alias { attr: String },
}

impl FieldValue {
    #[must_use]
    pub const fn is_alias(&self) -> bool {
        matches!(self, Self::Alias { .. })
    }
}

///
/// Field
///
/// Read view over one record field, resolved against the record's host.
/// A name the record does not hold reads as empty text.
///

#[derive(Clone, Copy)]
pub struct Field<'a> {
    slot: Option<&'a FieldValue>,
    host: Option<&'a dyn FieldAccess>,
}

impl<'a> Field<'a> {
    pub(crate) fn new(slot: Option<&'a FieldValue>, host: Option<&'a dyn FieldAccess>) -> Self {
        Self { slot, host }
    }

    /// Whether the record holds this field at all.
    #[must_use]
    pub const fn exists(&self) -> bool {
        self.slot.is_some()
    }

    #[must_use]
    pub const fn is_alias(&self) -> bool {
        matches!(self.slot, Some(FieldValue::Alias { .. }))
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> Value {
        match self.slot {
            None => Value::Text(String::new()),
            Some(FieldValue::Copied(v)) => v.clone(),
            Some(FieldValue::Alias { attr }) => self
                .host
                .and_then(|host| host.read_field(attr))
                .unwrap_or_default(),
        }
    }

    /// Text rendering: integers in decimal, text and binary as-is, NULL as
    /// the literal `NULL`.
    #[must_use]
    pub fn string(&self) -> String {
        self.get().to_string()
    }

    /// Integer view; zero whenever the value does not parse.
    #[must_use]
    pub fn int(&self) -> i64 {
        self.get().as_int()
    }

    /// True only for SQL NULL.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.get().is_null()
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("slot", &self.slot)
            .field("value", &self.get())
            .finish()
    }
}

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
