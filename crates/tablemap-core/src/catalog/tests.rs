use super::*;
use crate::{
    binding::ModelExt,
    config::{CatalogConfig, ConnectionConfig},
    dialect::MysqlDialect,
    error::ErrorOrigin,
    model::EntityField,
    source::{MemorySource, ResultTable},
    test_support::{Patient, clinic_catalog, naming},
    value::Value,
};

fn tables(names: &[&str]) -> ResultTable {
    names.iter().fold(ResultTable::new(["Tables_in_zorg"]), |t, name| {
        t.with_row(vec![(*name).into()])
    })
}

fn describe_one(column: &str) -> ResultTable {
    ResultTable::new(["Field", "Type", "Null", "Key", "Default", "Extra"]).with_row(vec![
        column.into(),
        "int".into(),
        "NO".into(),
        "PRI".into(),
        Value::Null,
        "".into(),
    ])
}

fn no_foreign_keys() -> ResultTable {
    ResultTable::new(["ConstraintName", "TableName", "ColumnName"])
}

#[test]
fn load_entities_discovers_tables_columns_and_relationships() {
    let (catalog, source) = clinic_catalog();

    assert_eq!(catalog.entity_names(), vec!["behandeling", "patient", "relatie"]);
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.schema(), "zorg");

    let patient = catalog.entity("patient").expect("patient loaded");
    assert_eq!(patient.name, "patient");
    assert_eq!(patient.table, "patient_data");
    assert_eq!(patient.field_prefix, "patient_");
    assert_eq!(patient.fields.len(), 4);
    assert_eq!(patient.key().map(|f| f.name.as_str()), Some("patient_id"));
    assert_eq!(
        patient.field("patient_leeftijd").map(|f| f.type_name.as_str()),
        Some("smallint")
    );

    let huisarts = patient
        .relationship("patient_huisarts")
        .expect("foreign key attached to its owner");
    assert_eq!(huisarts.referenced_table, "relatie_data");
    assert_eq!(huisarts.referenced_column, "relatie_id");

    let behandeling = catalog.entity("behandeling").expect("behandeling loaded");
    assert!(behandeling.relationship("behandeling_patient").is_some());
    assert!(catalog.entity("relatie").expect("relatie").relationships.is_empty());

    let fk_query = source
        .executed()
        .into_iter()
        .find(|q| q.sql.contains("REFERENTIAL_CONSTRAINTS"))
        .expect("foreign keys queried");
    assert_eq!(fk_query.params, vec![Value::from("zorg")]);
}

#[test]
fn failed_load_keeps_entities_loaded_so_far() {
    let source = MemorySource::new()
        .respond("SHOW TABLES", tables(&["a_data", "b_data"]))
        .respond("DESCRIBE `a_data`", describe_one("a_id"))
        .fail("DESCRIBE `b_data`", "access denied");

    let mut builder = Catalog::builder(Arc::new(source)).naming(naming());
    let err = builder
        .load_entities(&MysqlDialect)
        .expect_err("second describe fails");

    assert_eq!(err.origin, ErrorOrigin::Source);
    assert!(err.message.contains("access denied"));
    assert!(builder.entity("a").is_some());
    assert!(builder.entity("b").is_none());
    assert_eq!(builder.build().entity_names(), vec!["a"]);
}

#[test]
fn foreign_keys_on_unknown_tables_are_skipped() {
    let foreign_keys = ResultTable::new(["ConstraintName", "TableName", "ColumnName"])
        .with_row(vec!["fk_ghost".into(), "ghost_data".into(), "ghost_a".into()]);
    let source = MemorySource::new()
        .respond("SHOW TABLES", tables(&["a_data"]))
        .respond("DESCRIBE `a_data`", describe_one("a_id"))
        .respond("REFERENTIAL_CONSTRAINTS", foreign_keys);

    let mut builder = Catalog::builder(Arc::new(source))
        .naming(naming())
        .schema("zorg");
    builder.load_entities(&MysqlDialect).expect("load succeeds");

    let catalog = builder.build();
    assert!(catalog.entity("a").expect("a").relationships.is_empty());
    assert!(catalog.entity("ghost").is_none());
}

#[test]
fn empty_schema_skips_foreign_key_discovery() {
    let source = Arc::new(
        MemorySource::new()
            .respond("SHOW TABLES", tables(&["a_data"]))
            .respond("DESCRIBE `a_data`", describe_one("a_id"))
            .fail("REFERENTIAL_CONSTRAINTS", "schema '' does not exist"),
    );

    let mut builder = Catalog::builder(source.clone()).naming(naming());
    builder.load_entities(&MysqlDialect).expect("load succeeds");

    assert!(builder.entity("a").is_some());
    assert!(
        source
            .executed()
            .iter()
            .all(|q| !q.sql.contains("REFERENTIAL_CONSTRAINTS"))
    );
}

#[test]
fn connection_database_fills_an_empty_schema() {
    let connection = ConnectionConfig {
        database: "zorg".into(),
        ..ConnectionConfig::default()
    };
    let source = Arc::new(
        MemorySource::new()
            .respond("SHOW TABLES", tables(&["a_data"]))
            .respond("DESCRIBE `a_data`", describe_one("a_id"))
            .respond("REFERENTIAL_CONSTRAINTS", no_foreign_keys()),
    );

    let mut builder = Catalog::builder(source.clone())
        .naming(naming())
        .with_connection(&connection);
    builder.load_entities(&MysqlDialect).expect("load succeeds");
    assert_eq!(builder.build().schema(), "zorg");

    let fk_query = source
        .executed()
        .into_iter()
        .find(|q| q.sql.contains("REFERENTIAL_CONSTRAINTS"))
        .expect("foreign keys queried");
    assert_eq!(fk_query.params, vec![Value::from("zorg")]);

    let explicit = Catalog::builder(Arc::new(MemorySource::new()))
        .schema("archief")
        .with_connection(&connection)
        .build();
    assert_eq!(explicit.schema(), "archief");
}

#[test]
fn register_entity_normalizes_name_table_and_prefix() {
    let mut builder = Catalog::builder(Arc::new(MemorySource::new())).naming(naming());

    builder.register_entity(
        Entity::new("relatie_data", "").with_field(EntityField::new("relatie_id", "int").with_key()),
    );
    builder.register_entity(Entity::new("notitie", "tbl_notes").with_field_prefix("n_"));

    let catalog = builder.build();

    let relatie = catalog.entity("relatie").expect("trimmed key");
    assert_eq!(relatie.name, "relatie");
    assert_eq!(relatie.table, "relatie_data");
    assert_eq!(relatie.field_prefix, "relatie_");

    let notitie = catalog.entity("notitie").expect("registered");
    assert_eq!(notitie.table, "tbl_notes");
    assert_eq!(notitie.field_prefix, "n_");
}

#[test]
fn register_entity_replaces_same_name() {
    let mut builder = Catalog::builder(Arc::new(MemorySource::new())).naming(naming());

    builder
        .register_entity(Entity::new("relatie", "relatie_data"))
        .register_entity(
            Entity::new("relatie", "relatie_data").with_field(EntityField::new("relatie_id", "int")),
        );

    let catalog = builder.build();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.entity("relatie").expect("relatie").fields.len(), 1);
}

#[test]
fn unregistered_models_construct_dynamic_records() {
    let (catalog, _) = clinic_catalog();

    assert!(!catalog.is_registered("relatie"));
    let model = catalog.model("relatie")("relatie");
    assert!(model.downcast_ref::<Record>().is_some());
    assert_eq!(model.name(), "relatie");

    assert!(catalog.is_registered("patient"));
    let model = catalog.model("patient")("patient");
    assert!(model.downcast_ref::<Patient>().is_some());
    assert_eq!(model.name(), "patient");
    assert!(model.field_names().is_empty());
}

#[test]
fn later_model_registration_wins() {
    let mut builder = Catalog::builder(Arc::new(MemorySource::new()));

    builder
        .register_model::<Patient>("patient")
        .register_model_with("patient", |name| Box::new(Record::new(name)));

    let catalog = builder.build();
    let model = catalog.model("patient")("patient");
    assert!(model.downcast_ref::<Patient>().is_none());
    assert!(model.downcast_ref::<Record>().is_some());
}

#[test]
fn config_drives_naming_schema_and_dedup() {
    let config = CatalogConfig::from_toml_str(
        r#"
            table_prefix = "tbl_"
            table_suffix = "_data"
            schema = "zorg"
            dedup = "full"
        "#,
    )
    .expect("valid config");

    let source = MemorySource::new()
        .respond("SHOW TABLES", tables(&["tbl_a_data"]))
        .respond("DESCRIBE `tbl_a_data`", describe_one("a_id"))
        .respond("REFERENTIAL_CONSTRAINTS", no_foreign_keys());

    let mut builder = Catalog::builder(Arc::new(source)).with_config(&config);
    builder.load_entities(&MysqlDialect).expect("load succeeds");
    let catalog = builder.build();

    assert_eq!(catalog.schema(), "zorg");
    assert_eq!(catalog.dedup(), DedupMode::Full);
    assert_eq!(catalog.trim_table_affixes("tbl_tbl_a_data_data"), "a");

    let entity = catalog.entity("a").expect("trimmed name");
    assert_eq!(entity.table, "tbl_a_data");
    assert_eq!(entity.field_prefix, "a_");
}

#[test]
fn entities_serialize_for_inspection() {
    let (catalog, _) = clinic_catalog();
    let patient = catalog.entity("patient").expect("patient");

    let json = serde_json::to_value(patient).expect("serializable");

    assert_eq!(json["table"], "patient_data");
    assert_eq!(json["fields"]["patient_id"]["key"], true);
    assert_eq!(
        json["relationships"]["patient_huisarts"]["referenced_table"],
        "relatie_data"
    );
}

#[test]
fn debug_lists_entities_not_internals() {
    let (catalog, _) = clinic_catalog();
    let text = format!("{catalog:?}");

    assert!(text.contains("behandeling"));
    assert!(text.contains("zorg"));
}
