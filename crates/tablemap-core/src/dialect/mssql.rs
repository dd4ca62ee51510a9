use crate::{
    config::ConnectionConfig,
    dialect::{ColumnDescriptor, DialectAdapter, read_rows, table_names_from},
    error::Error,
    predicate::Translator,
    source::RowSource,
    value::Value,
};

const TABLES_SQL: &str =
    "SELECT table_name FROM information_schema.tables WHERE table_type = 'BASE TABLE'";

const COLUMNS_SQL: &str = "\
SELECT COLUMN_NAME, DATA_TYPE, IS_NULLABLE, COLUMN_DEFAULT \
FROM information_schema.columns \
WHERE table_name = ? \
ORDER BY ordinal_position";

///
/// MssqlDialect
///
/// `information_schema.columns` carries no key flag, so every column comes
/// back with `key = false`. Key fields have to be declared by hand.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct MssqlDialect;

impl DialectAdapter for MssqlDialect {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn connection_string(&self, config: &ConnectionConfig) -> String {
        format!(
            "server={};user id={};password={};database={};encrypt=disable",
            config.host, config.user, config.password, config.database
        )
    }

    fn table_names(&self, source: &dyn RowSource) -> Result<Vec<String>, Error> {
        let rows = read_rows(source, TABLES_SQL, &[])?;

        Ok(table_names_from(&rows))
    }

    fn table_columns(
        &self,
        source: &dyn RowSource,
        table: &str,
    ) -> Result<Vec<ColumnDescriptor>, Error> {
        let rows = read_rows(source, COLUMNS_SQL, &[Value::from(table)])?;

        Ok(rows
            .iter()
            .map(|row| ColumnDescriptor {
                name: row.text("COLUMN_NAME"),
                type_name: row.text("DATA_TYPE"),
                nullable: row.text("IS_NULLABLE") == "YES",
                default: row.rendered("COLUMN_DEFAULT"),
                key: false,
            })
            .collect())
    }
}

///
/// MssqlTranslator
///
/// SQL Server LIKE has no default escape character and treats `[` as the
/// start of a character class.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct MssqlTranslator;

impl Translator for MssqlTranslator {
    fn escape_like(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        for c in value.chars() {
            if matches!(c, '\\' | '%' | '_' | '[') {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }

    fn escape_clause(&self) -> &'static str {
        " ESCAPE '\\'"
    }
}
