use serde::Serialize;
use std::fmt::{self, Display};

///
/// IndexModel
/// Index descriptor attached to an entity. Carried for completeness; no
/// dialect populates it and no query path consults it yet.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct IndexModel {
    pub name: String,
    pub fields: Vec<String>,
    pub unique: bool,
}

impl IndexModel {
    pub fn new(name: impl Into<String>, fields: Vec<String>, unique: bool) -> Self {
        Self {
            name: name.into(),
            fields,
            unique,
        }
    }
}

impl Display for IndexModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields.join(", ");

        if self.unique {
            write!(f, "UNIQUE {}({})", self.name, fields)
        } else {
            write!(f, "{}({})", self.name, fields)
        }
    }
}
