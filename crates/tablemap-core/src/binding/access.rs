use crate::value::{Value, ValueKind, parse_decimal_int};

///
/// FieldAccess
///
/// Get/set-by-name capability of a typed record. The binding layer reaches
/// host fields only through this trait; `#[derive(Model)]` generates it.
///
/// Attribute names are the upper-camel forms the naming policy derives
/// from logical field names (`achternaam` → `Achternaam`).
///

pub trait FieldAccess {
    /// Every attribute the host exposes.
    fn attribute_names(&self) -> &'static [&'static str];

    fn has_attribute(&self, attr: &str) -> bool {
        self.attribute_names().contains(&attr)
    }

    /// Current value of an attribute, `None` if the host has no such field.
    fn read_field(&self, attr: &str) -> Option<Value>;

    /// Store a value of a compatible kind. Integer widths convert exactly;
    /// anything else leaves the field untouched and returns false.
    fn write_field(&mut self, attr: &str, value: &Value) -> bool;

    /// Store a raw row value, coercing it to the field's declared kind.
    /// Returns false only when the host has no such field.
    fn bind_field(&mut self, attr: &str, value: &Value) -> bool;
}

///
/// FieldType
///
/// Scalar kinds a typed record field may declare.
///

pub trait FieldType: Sized {
    fn kind() -> ValueKind;

    fn to_value(&self) -> Value;

    /// Exact conversion; `None` when the value's kind does not fit.
    #[must_use]
    fn from_value(value: &Value) -> Option<Self>;

    /// Bind-time conversion of a raw driver value. Never fails: unparseable
    /// or out-of-range integers become zero.
    #[must_use]
    fn coerce_from(value: &Value) -> Self;
}

/// Exact write used by generated [`FieldAccess::write_field`] arms.
pub fn write_exact<T: FieldType>(slot: &mut T, value: &Value) -> bool {
    match T::from_value(value) {
        Some(v) => {
            *slot = v;
            true
        }
        None => false,
    }
}

/// Coercing write used by generated [`FieldAccess::bind_field`] arms.
pub fn bind_coerced<T: FieldType>(slot: &mut T, value: &Value) {
    *slot = T::coerce_from(value);
}

// raw value as text, the way a driver hands it to a typed scan target
fn raw_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// impl_field_type_int
macro_rules! impl_field_type_int {
    ( $( $ty:ty ),* $(,)? ) => {
        $(
            impl FieldType for $ty {
                fn kind() -> ValueKind {
                    ValueKind::Int
                }

                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Int(v) => (*v).try_into().ok(),
                        _ => None,
                    }
                }

                fn coerce_from(value: &Value) -> Self {
                    let wide = match value {
                        Value::Int(v) => Some(*v),
                        other => parse_decimal_int(&raw_text(other)),
                    };

                    wide.and_then(|v| v.try_into().ok()).unwrap_or(0)
                }
            }
        )*
    };
}

impl_field_type_int!(i8, i16, i32, i64);

impl FieldType for String {
    fn kind() -> ValueKind {
        ValueKind::Text
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }

    fn coerce_from(value: &Value) -> Self {
        raw_text(value)
    }
}

impl FieldType for Vec<u8> {
    fn kind() -> ValueKind {
        ValueKind::Blob
    }

    fn to_value(&self) -> Value {
        Value::Blob(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Blob(v) => Some(v.clone()),
            _ => None,
        }
    }

    fn coerce_from(value: &Value) -> Self {
        match value {
            Value::Blob(v) => v.clone(),
            other => raw_text(other).into_bytes(),
        }
    }
}

impl<T: FieldType> FieldType for Option<T> {
    fn kind() -> ValueKind {
        T::kind()
    }

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return Some(None);
        }

        T::from_value(value).map(Some)
    }

    fn coerce_from(value: &Value) -> Self {
        if value.is_null() {
            return None;
        }

        Some(T::coerce_from(value))
    }
}
