use proptest::prelude::*;
use std::sync::Arc;
use tablemap::{
    config::CatalogConfig,
    dialect::MysqlDialect,
    prelude::*,
    source::{MemorySource, ResultTable},
};

///
/// Patient
///

#[derive(Debug, Default, Model)]
struct Patient {
    record: Record,
    id: String,
    achternaam: String,
    #[model(rename = "Leeftijd")]
    jaren: i32,
}

///
/// Behandeling
///

#[derive(Debug, Default, Model)]
struct Behandeling {
    record: Record,
    id: i64,
    patient: String,
    code: String,
}

const CONFIG: &str = r#"
table_suffix = "_data"
field_prefix = "{model}_"
schema = "zorg"
"#;

fn describe(rows: &[(&str, bool)]) -> ResultTable {
    rows.iter().fold(
        ResultTable::new(["Field", "Type", "Null", "Key", "Default", "Extra"]),
        |table, (field, key)| {
            table.with_row(vec![
                (*field).into(),
                "varchar(32)".into(),
                "NO".into(),
                (if *key { "PRI" } else { "" }).into(),
                Value::Null,
                "".into(),
            ])
        },
    )
}

fn source() -> MemorySource {
    let patients = ResultTable::new(["patient_id", "patient_achternaam", "patient_leeftijd"])
        .with_row(vec!["P1".into(), "Jansen".into(), "42".into()])
        .with_row(vec!["P2".into(), "de Vries".into(), 7.into()]);

    // one-to-many join: the patient row repeats per treatment
    let joined = ResultTable::new(["patient_id", "patient_achternaam", "patient_leeftijd"])
        .with_row(vec!["P1".into(), "Jansen".into(), 42.into()])
        .with_row(vec!["P1".into(), "Jansen".into(), 42.into()])
        .with_row(vec!["P2".into(), "de Vries".into(), 7.into()]);

    let treatments = ResultTable::new(["behandeling_id", "behandeling_patient", "behandeling_code"])
        .with_row(vec![1.into(), "P1".into(), "ACH".into()])
        .with_row(vec![3.into(), "P1".into(), "UTR".into()]);

    MemorySource::new()
        .respond(
            "SHOW TABLES",
            ResultTable::new(["Tables_in_zorg"])
                .with_row(vec!["patient_data".into()])
                .with_row(vec!["behandeling_data".into()]),
        )
        .respond(
            "DESCRIBE `patient_data`",
            describe(&[
                ("patient_id", true),
                ("patient_achternaam", false),
                ("patient_leeftijd", false),
            ]),
        )
        .respond(
            "DESCRIBE `behandeling_data`",
            describe(&[
                ("behandeling_id", true),
                ("behandeling_patient", false),
                ("behandeling_code", false),
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
            ])
            .with_row(vec![
                "fk_patient".into(),
                "behandeling_data".into(),
                "behandeling_patient".into(),
                "patient_data".into(),
                "patient_id".into(),
            ]),
        )
        .respond("JOIN behandeling_data", joined)
        .respond("WHERE behandeling_data.behandeling_patient", treatments)
        .respond_where_eq("FROM patient_data WHERE patient_id = ?", "patient_id", patients.clone())
        .respond("SELECT * FROM patient_data", patients)
}

fn catalog() -> (Arc<Catalog>, Arc<MemorySource>) {
    let config = CatalogConfig::from_toml_str(CONFIG).expect("valid config");
    let source = Arc::new(source());

    let mut builder = Catalog::builder(source.clone()).with_config(&config);
    builder
        .load_entities(&MysqlDialect)
        .expect("schema loads");
    builder
        .register_model::<Patient>("patient")
        .register_model::<Behandeling>("behandeling");

    (builder.build(), source)
}

#[test]
fn typed_lookup_binds_struct_fields() {
    let (catalog, _) = catalog();

    let model = catalog.query("patient").get("P1").unwrap().expect("P1");
    let patient = model.downcast::<Patient>().expect("typed");

    assert_eq!(patient.id, "P1");
    assert_eq!(patient.achternaam, "Jansen");
    assert_eq!(patient.jaren, 42);
    assert!(patient.field("leeftijd").is_alias());
}

#[test]
fn filtered_query_renders_and_binds_params() {
    let (catalog, _) = catalog();
    let patient = catalog.entity("patient").unwrap();

    let query = catalog.query("patient").filter([or([
        patient.col("achternaam").prefix("Jan"),
        patient.col("leeftijd").lt(10),
    ])]);

    assert_eq!(
        query.sql().unwrap(),
        "SELECT * FROM patient_data WHERE \
         (patient_data.patient_achternaam LIKE ? OR patient_data.patient_leeftijd < ?)"
    );
    assert_eq!(query.params().unwrap(), [Value::from("Jan%"), Value::Int(10)]);

    let names: Vec<_> = query
        .all()
        .unwrap()
        .iter()
        .map(|m| m.field("achternaam").string())
        .collect();
    assert_eq!(names, vec!["Jansen", "de Vries"]);
}

#[test]
fn joined_rows_collapse_per_key() {
    let (catalog, _) = catalog();

    let models = catalog
        .query("patient")
        .from_sql(
            "SELECT p.* FROM patient_data p JOIN behandeling_data b \
             ON b.behandeling_patient = p.patient_id WHERE b.behandeling_code LIKE ?",
            ["%"],
        )
        .all()
        .unwrap();

    let ids: Vec<_> = models.iter().map(|m| m.field("id").string()).collect();
    assert_eq!(ids, vec!["P1", "P2"]);

    let all = catalog
        .query("patient")
        .from_sql("SELECT p.* FROM patient_data p JOIN behandeling_data b", Vec::<Value>::new())
        .dedup(DedupMode::None)
        .all()
        .unwrap();
    assert_eq!(all.len(), 3);
}

#[test]
fn back_reference_loads_typed_children() {
    let (catalog, source) = catalog();
    let patient = catalog.query("patient").get("P1").unwrap().expect("P1");

    let treatments = patient.back_reference("behandeling", None).unwrap().all().unwrap();
    let codes: Vec<_> = treatments
        .into_iter()
        .filter_map(|m| m.downcast::<Behandeling>())
        .map(|b| (b.id, b.code))
        .collect();
    assert_eq!(codes, vec![(1, "ACH".to_string()), (3, "UTR".to_string())]);

    let last = source.executed().pop().expect("executed");
    assert_eq!(
        last.sql,
        "SELECT * FROM behandeling_data WHERE behandeling_data.behandeling_patient = ?"
    );
    assert_eq!(last.params, vec![Value::from("P1")]);
}

#[test]
fn reference_resolves_the_owning_patient() {
    let (catalog, _) = catalog();
    let treatment = catalog
        .query("behandeling")
        .filter([catalog.entity("behandeling").unwrap().col("patient").eq("P1")])
        .all()
        .unwrap()
        .into_iter()
        .next()
        .expect("treatment");

    let owner = treatment.reference("patient").unwrap().expect("owner");
    assert_eq!(owner.field("achternaam").string(), "Jansen");
    assert!(owner.downcast_ref::<Patient>().is_some());
}

proptest! {
    #[test]
    fn set_field_writes_through_the_alias(age in any::<i32>(), name in "[a-zA-Z ]{0,24}") {
        let (catalog, _) = catalog();
        let mut model = catalog.query("patient").get("P2").unwrap().expect("P2");

        prop_assert!(model.set_field("leeftijd", age));
        prop_assert!(model.set_field("achternaam", name.clone()));
        prop_assert!(!model.set_field("leeftijd", i64::from(i32::MAX) + 1));

        prop_assert_eq!(model.field("leeftijd").int(), i64::from(age));

        let patient = model.downcast::<Patient>().expect("typed");
        prop_assert_eq!(patient.jaren, age);
        prop_assert_eq!(patient.achternaam, name);
    }
}
