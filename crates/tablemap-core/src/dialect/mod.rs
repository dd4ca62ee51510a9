//! Schema-discovery adapters.
//!
//! An adapter knows how one database family reports its tables, columns
//! and foreign keys, and returns catalog-neutral descriptors. The catalog
//! never sees dialect SQL.

mod mssql;
mod mysql;


use crate::{
    config::ConnectionConfig,
    error::Error,
    model::EntityField,
    source::RowSource,
    value::Value,
};
use std::collections::HashMap;
use tracing::warn;

pub use mssql::{MssqlDialect, MssqlTranslator};
pub use mysql::MysqlDialect;

///
/// DialectAdapter
///

pub trait DialectAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Driver connection string for `config`.
    fn connection_string(&self, config: &ConnectionConfig) -> String;

    /// Names of every base table, physical affixes included.
    fn table_names(&self, source: &dyn RowSource) -> Result<Vec<String>, Error>;

    /// Columns of one table.
    fn table_columns(
        &self,
        source: &dyn RowSource,
        table: &str,
    ) -> Result<Vec<ColumnDescriptor>, Error>;

    /// Foreign-key constraints declared in `schema`.
    fn foreign_keys(
        &self,
        source: &dyn RowSource,
        schema: &str,
    ) -> Result<Vec<ForeignKeyDescriptor>, Error> {
        read_foreign_keys(source, schema)
    }
}

///
/// ColumnDescriptor
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub type_name: String,
    pub nullable: bool,
    /// Default-value text as reported; `NULL` when the column has none.
    pub default: String,
    /// Not every dialect reports key membership; those leave this false.
    pub key: bool,
}

impl From<ColumnDescriptor> for EntityField {
    fn from(column: ColumnDescriptor) -> Self {
        Self {
            name: column.name,
            type_name: column.type_name,
            length: 0,
            key: column.key,
            nullable: column.nullable,
            default: column.default,
        }
    }
}

///
/// ForeignKeyDescriptor
///
/// Update and delete rules are carried through but not interpreted.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ForeignKeyDescriptor {
    pub constraint: String,
    pub table: String,
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
    pub update_rule: String,
    pub delete_rule: String,
}

pub(crate) const FOREIGN_KEYS_SQL: &str = "\
SELECT rc.CONSTRAINT_NAME AS ConstraintName, \
rc.TABLE_NAME AS TableName, kc.COLUMN_NAME AS ColumnName, \
rc.REFERENCED_TABLE_NAME AS ReferencedTableName, \
kc.REFERENCED_COLUMN_NAME AS ReferencedColumnName, \
rc.UPDATE_RULE AS UpdateRule, rc.DELETE_RULE AS DeleteRule \
FROM INFORMATION_SCHEMA.REFERENTIAL_CONSTRAINTS AS rc \
JOIN INFORMATION_SCHEMA.KEY_COLUMN_USAGE AS kc \
ON rc.CONSTRAINT_NAME = kc.CONSTRAINT_NAME \
WHERE rc.CONSTRAINT_SCHEMA = ? \
ORDER BY rc.TABLE_NAME, kc.COLUMN_NAME";

/// Referential-constraint join over `INFORMATION_SCHEMA`, shared by every
/// dialect that exposes the standard views.
pub(crate) fn read_foreign_keys(
    source: &dyn RowSource,
    schema: &str,
) -> Result<Vec<ForeignKeyDescriptor>, Error> {
    let rows = read_rows(source, FOREIGN_KEYS_SQL, &[Value::from(schema)])?;

    Ok(rows
        .iter()
        .map(|row| ForeignKeyDescriptor {
            constraint: row.text("ConstraintName"),
            table: row.text("TableName"),
            column: row.text("ColumnName"),
            referenced_table: row.text("ReferencedTableName"),
            referenced_column: row.text("ReferencedColumnName"),
            update_rule: row.text("UpdateRule"),
            delete_rule: row.text("DeleteRule"),
        })
        .collect())
}

///
/// NamedRow
///
/// One metadata row addressed by column name.
///

pub(crate) struct NamedRow {
    values: HashMap<String, Value>,
    first: Option<Value>,
}

impl NamedRow {
    /// Column text; NULL and missing columns read as empty.
    pub(crate) fn text(&self, column: &str) -> String {
        match self.values.get(column) {
            None | Some(Value::Null) => String::new(),
            Some(v) => v.to_string(),
        }
    }

    /// Column as the value renders; NULL reads as `NULL`.
    pub(crate) fn rendered(&self, column: &str) -> String {
        self.values.get(column).map(ToString::to_string).unwrap_or_default()
    }

    pub(crate) fn first_text(&self) -> Option<String> {
        match &self.first {
            None | Some(Value::Null) => None,
            Some(v) => Some(v.to_string()),
        }
    }
}

/// Table names from the first column of a listing; unnamed rows are skipped.
pub(crate) fn table_names_from(rows: &[NamedRow]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| {
            let name = row.first_text();
            if name.is_none() {
                warn!("skipping table listing row without a name");
            }
            name
        })
        .collect()
}

/// Run one metadata statement and drain its rows.
pub(crate) fn read_rows(
    source: &dyn RowSource,
    sql: &str,
    params: &[Value],
) -> Result<Vec<NamedRow>, Error> {
    let mut set = source.query(sql, params)?;
    let columns = set.columns().to_vec();

    let mut rows = Vec::new();
    while let Some(values) = set.next_row()? {
        if values.len() != columns.len() {
            return Err(Error::dialect_internal(format!(
                "metadata row has {} values for {} columns",
                values.len(),
                columns.len()
            )));
        }

        rows.push(NamedRow {
            first: values.first().cloned(),
            values: columns.iter().cloned().zip(values).collect(),
        });
    }

    Ok(rows)
}
