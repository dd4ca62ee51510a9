use serde::Serialize;

///
/// EntityField
/// One physical column as reported by the dialect adapter.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EntityField {
    /// Physical column name.
    pub name: String,
    /// Declared type name, verbatim from the dialect.
    pub type_name: String,
    /// Byte length. Not derived from the declared type yet, always zero.
    pub length: u32,
    pub key: bool,
    pub nullable: bool,
    /// Default-value text as reported; `NULL` when the column has none.
    pub default: String,
}

impl EntityField {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_key(mut self) -> Self {
        self.key = true;
        self
    }

    #[must_use]
    pub const fn with_nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }
}
