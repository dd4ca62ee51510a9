//! Shared fixtures: a small clinic schema served by a scripted row source.

use crate::{
    binding::Record,
    catalog::Catalog,
    dialect::MysqlDialect,
    naming::ConventionNaming,
    source::{MemorySource, ResultTable},
    value::Value,
};
use std::sync::Arc;
use tablemap_derive::Model;

///
/// Patient
///

#[derive(Clone, Debug, Default, Model)]
pub(crate) struct Patient {
    pub(crate) record: Record,
    pub(crate) id: String,
    pub(crate) achternaam: String,
    pub(crate) leeftijd: i16,
    pub(crate) huisarts: Option<String>,
}

pub(crate) fn naming() -> ConventionNaming {
    ConventionNaming::new()
        .table_suffix("_data")
        .field_prefix_template("{model}_")
}

fn describe(rows: &[(&str, &str, &str)]) -> ResultTable {
    rows.iter().fold(
        ResultTable::new(["Field", "Type", "Null", "Key", "Default", "Extra"]),
        |table, (field, ty, key)| {
            table.with_row(vec![
                (*field).into(),
                (*ty).into(),
                Value::from(if key.is_empty() { "YES" } else { "NO" }),
                (*key).into(),
                Value::Null,
                "".into(),
            ])
        },
    )
}

pub(crate) fn patient_rows() -> ResultTable {
    ResultTable::new([
        "patient_id",
        "patient_achternaam",
        "patient_leeftijd",
        "patient_huisarts",
    ])
    .with_row(vec!["P1".into(), "Jansen".into(), 42.into(), "R1".into()])
    .with_row(vec!["P2".into(), "de Vries".into(), "7".into(), Value::Null])
}

pub(crate) fn relatie_rows() -> ResultTable {
    ResultTable::new(["relatie_id", "relatie_naam"])
        .with_row(vec!["R1".into(), "Dokter Bakker".into()])
}

pub(crate) fn behandeling_rows() -> ResultTable {
    ResultTable::new(["behandeling_id", "behandeling_patient", "behandeling_code"])
        .with_row(vec![1.into(), "P1".into(), "ACH".into()])
        .with_row(vec![2.into(), "P2".into(), "AMF".into()])
        .with_row(vec![3.into(), "P1".into(), "UTR".into()])
}

/// Schema discovery plus keyed and full-table data responses.
pub(crate) fn clinic_source() -> MemorySource {
    MemorySource::new()
        .respond(
            "SHOW TABLES",
            ResultTable::new(["Tables_in_zorg"])
                .with_row(vec!["patient_data".into()])
                .with_row(vec!["relatie_data".into()])
                .with_row(vec!["behandeling_data".into()]),
        )
        .respond(
            "DESCRIBE `patient_data`",
            describe(&[
                ("patient_id", "varchar(16)", "PRI"),
                ("patient_achternaam", "varchar(64)", ""),
                ("patient_leeftijd", "smallint", ""),
                ("patient_huisarts", "varchar(16)", "MUL"),
            ]),
        )
        .respond(
            "DESCRIBE `relatie_data`",
            describe(&[
                ("relatie_id", "varchar(16)", "PRI"),
                ("relatie_naam", "varchar(64)", ""),
            ]),
        )
        .respond(
            "DESCRIBE `behandeling_data`",
            describe(&[
                ("behandeling_id", "int", "PRI"),
                ("behandeling_patient", "varchar(16)", "MUL"),
                ("behandeling_code", "varchar(8)", ""),
            ]),
        )
        .respond(
            "REFERENTIAL_CONSTRAINTS",
            ResultTable::new([
                "ConstraintName",
                "TableName",
                "ColumnName",
                "ReferencedTableName",
                "ReferencedColumnName",
                "UpdateRule",
                "DeleteRule",
            ])
            .with_row(vec![
                "fk_huisarts".into(),
                "patient_data".into(),
                "patient_huisarts".into(),
                "relatie_data".into(),
                "relatie_id".into(),
                "CASCADE".into(),
                "RESTRICT".into(),
            ])
            .with_row(vec![
                "fk_patient".into(),
                "behandeling_data".into(),
                "behandeling_patient".into(),
                "patient_data".into(),
                "patient_id".into(),
                "CASCADE".into(),
                "CASCADE".into(),
            ]),
        )
        .respond_where_eq(
            "FROM patient_data WHERE patient_id = ?",
            "patient_id",
            patient_rows(),
        )
        .respond_where_eq(
            "FROM relatie_data WHERE relatie_id = ?",
            "relatie_id",
            relatie_rows(),
        )
        .respond_where_eq(
            "FROM behandeling_data WHERE behandeling_data.behandeling_patient = ?",
            "behandeling_patient",
            behandeling_rows(),
        )
        .respond("SELECT * FROM patient_data", patient_rows())
}

/// Catalog loaded from [`clinic_source`], with `Patient` registered as a
/// typed model. Returns the source too so tests can inspect executed SQL.
pub(crate) fn clinic_catalog() -> (Arc<Catalog>, Arc<MemorySource>) {
    clinic_catalog_from(clinic_source())
}

pub(crate) fn clinic_catalog_from(source: MemorySource) -> (Arc<Catalog>, Arc<MemorySource>) {
    let source = Arc::new(source);

    let mut builder = Catalog::builder(source.clone())
        .naming(naming())
        .schema("zorg");
    builder
        .load_entities(&MysqlDialect)
        .expect("clinic schema loads");
    builder.register_model::<Patient>("patient");

    (builder.build(), source)
}
