use serde::Serialize;

///
/// EntityRelationship
///
/// Foreign key owned by an entity. Keyed within its entity by
/// `foreign_key`; the referenced table keeps its physical affixes.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EntityRelationship {
    pub foreign_key: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

impl EntityRelationship {
    pub fn new(
        foreign_key: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
    ) -> Self {
        Self {
            foreign_key: foreign_key.into(),
            referenced_table: referenced_table.into(),
            referenced_column: referenced_column.into(),
        }
    }
}
