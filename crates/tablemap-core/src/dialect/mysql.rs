use crate::{
    config::ConnectionConfig,
    dialect::{ColumnDescriptor, DialectAdapter, read_rows, table_names_from},
    error::Error,
    source::RowSource,
};

///
/// MysqlDialect
///

#[derive(Clone, Copy, Debug, Default)]
pub struct MysqlDialect;

impl DialectAdapter for MysqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    // user:password@/database, local socket
    fn connection_string(&self, config: &ConnectionConfig) -> String {
        format!("{}:{}@/{}", config.user, config.password, config.database)
    }

    fn table_names(&self, source: &dyn RowSource) -> Result<Vec<String>, Error> {
        let rows = read_rows(source, "SHOW TABLES", &[])?;

        Ok(table_names_from(&rows))
    }

    fn table_columns(
        &self,
        source: &dyn RowSource,
        table: &str,
    ) -> Result<Vec<ColumnDescriptor>, Error> {
        let sql = format!("DESCRIBE `{}`", table.replace('`', "``"));
        let rows = read_rows(source, &sql, &[])?;

        Ok(rows
            .iter()
            .map(|row| ColumnDescriptor {
                name: row.text("Field"),
                type_name: row.text("Type"),
                nullable: row.text("Null") == "YES",
                default: row.rendered("Default"),
                key: row.text("Key") == "PRI",
            })
            .collect())
    }
}
