//! Unit tests for statement mapping
//!
//! These tests verify how statements are mapped to Keyspaces resources and
//! which diagnostics are raised along the way.

use cql2cfn::generator::{Generator, GeneratorOptions};
use cql2cfn::model::{CqlType, Identifier, Statement, TableProperties};
use cql2cfn::parser::parse_script;
use cql2cfn::template::{BillingMode, Expr, Resource};
use cql2cfn::{convert, Conversion, ConvertError};

const KEYSPACE: &str = "CREATE KEYSPACE ks WITH replication = {'class': 'SingleRegionStrategy'};";

fn convert_ok(cql: &str) -> Conversion {
    convert(cql, GeneratorOptions::default()).expect("Conversion should succeed")
}

fn fatal_message(cql: &str) -> String {
    match convert(cql, GeneratorOptions::default()) {
        Err(ConvertError::Diagnostic { message }) => message,
        other => panic!("Expected fatal diagnostic, got: {other:?}"),
    }
}

/// Run a script through a generator and hand it back for inspection
fn generate(cql: &str) -> Generator {
    let mut generator = Generator::new(GeneratorOptions::default());
    for statement in parse_script(cql).unwrap() {
        generator.handle(&statement).unwrap();
    }
    generator
}

fn table(generator: &Generator, logical_id: &str) -> cql2cfn::template::TableResource {
    match generator.template().resource(logical_id) {
        Some(Resource::Table(table)) => table.clone(),
        other => panic!("Expected table resource {logical_id}, got: {other:?}"),
    }
}

fn column_names(columns: &[cql2cfn::template::Column]) -> Vec<&str> {
    columns.iter().map(|c| c.column_name.as_str()).collect()
}

// ============================================================================
// USE
// ============================================================================

#[test]
fn test_use_sets_keyspace_without_existence_check() {
    let generator = generate("USE nowhere;");
    assert_eq!(generator.used_keyspace(), Some(&Identifier::from("nowhere")));
    assert!(generator.template().is_empty());
}

#[test]
fn test_use_replaces_previous_keyspace() {
    let generator = generate("USE a; USE b;");
    assert_eq!(generator.used_keyspace(), Some(&Identifier::from("b")));
}

// ============================================================================
// CREATE KEYSPACE
// ============================================================================

#[test]
fn test_keyspace_resource_created() {
    let generator = generate(KEYSPACE);
    match generator.template().resource("Keyspace1") {
        Some(Resource::Keyspace(keyspace)) => assert_eq!(keyspace.keyspace_name, "ks"),
        other => panic!("Expected keyspace, got: {other:?}"),
    }
}

#[test]
fn test_keyspace_duplicate_is_fatal() {
    let message = fatal_message(&format!("{KEYSPACE}{KEYSPACE}"));
    assert!(message.contains("Cannot create more than one keyspace"));
}

#[test]
fn test_keyspace_duplicate_if_not_exists_skipped() {
    let conversion = convert_ok(&format!(
        "{KEYSPACE} CREATE KEYSPACE IF NOT EXISTS KS WITH replication = {{'class': 'SingleRegionStrategy'}};"
    ));
    let template: serde_json::Value = serde_json::from_str(&conversion.template).unwrap();
    assert_eq!(template["Resources"].as_object().unwrap().len(), 1);
    assert!(conversion.warnings.is_empty());
}

#[test]
fn test_keyspace_logical_ids_are_sequential() {
    let generator = generate(
        "CREATE KEYSPACE a WITH replication = {'class': 'SingleRegionStrategy'};
         CREATE KEYSPACE b WITH replication = {'class': 'SingleRegionStrategy'};",
    );
    let ids: Vec<&str> = generator.template().resources().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["Keyspace1", "Keyspace2"]);
}

#[test]
fn test_keyspace_missing_replication() {
    let message = fatal_message("CREATE KEYSPACE ks WITH durable_writes = true;");
    assert_eq!(message, "Missing required property 'replication'");
}

#[test]
fn test_keyspace_replication_not_a_map() {
    let message = fatal_message("CREATE KEYSPACE ks WITH replication = 'simple';");
    assert!(message.contains("it should be a map"));
}

#[test]
fn test_keyspace_replication_missing_class() {
    let message = fatal_message("CREATE KEYSPACE ks WITH replication = {'replication_factor': 3};");
    assert_eq!(message, "Missing required option 'class' of property 'replication'");
}

#[test]
fn test_keyspace_single_region_extra_option() {
    let message = fatal_message(
        "CREATE KEYSPACE ks WITH replication = {'class': 'SingleRegionStrategy', 'extra': 'x'};",
    );
    assert_eq!(
        message,
        "Unrecognized option 'extra' for replication class 'SingleRegionStrategy'"
    );
}

#[test]
fn test_keyspace_other_replication_class_warns() {
    let conversion = convert_ok(
        "CREATE KEYSPACE ks WITH replication = {'class': 'SimpleStrategy', 'replication_factor': 3};",
    );
    assert_eq!(
        conversion.warnings,
        vec!["Replication class 'SimpleStrategy' is not applicable to Keyspaces".to_string()]
    );
}

#[test]
fn test_keyspace_other_replication_class_strict() {
    let err = convert(
        "CREATE KEYSPACE ks WITH replication = {'class': 'SimpleStrategy'};",
        GeneratorOptions { strict: true },
    )
    .unwrap_err();
    assert!(matches!(err, ConvertError::StrictWarning { .. }));
}

#[test]
fn test_keyspace_tags_cannot_be_set() {
    let message = fatal_message(
        "CREATE KEYSPACE ks WITH replication = {'class': 'SingleRegionStrategy'} AND tags = {'team': 'a'};",
    );
    assert_eq!(message, "Property 'tags' currently cannot be set via CloudFormation");
}

#[test]
fn test_keyspace_tags_must_be_map() {
    let message = fatal_message(
        "CREATE KEYSPACE ks WITH replication = {'class': 'SingleRegionStrategy'} AND tags = 'a';",
    );
    assert!(message.contains("Invalid value for property 'tags'"));
}

#[test]
fn test_keyspace_custom_properties_rejected() {
    let message = fatal_message(
        "CREATE KEYSPACE ks WITH replication = {'class': 'SingleRegionStrategy'}
            AND CUSTOM_PROPERTIES = {'capacity_mode': {'throughput_mode': 'PAY_PER_REQUEST'}};",
    );
    assert_eq!(message, "Custom properties are not supported for keyspace yet");
}

// ============================================================================
// CREATE TABLE: keyspace resolution
// ============================================================================

#[test]
fn test_table_references_created_keyspace() {
    let generator = generate(&format!("{KEYSPACE} CREATE TABLE ks.t (a int PRIMARY KEY);"));
    let t = table(&generator, "Table1");
    assert_eq!(t.keyspace_name, Expr::reference("Keyspace1"));
    assert_eq!(t.table_name, "t");
    assert!(generator.warnings().is_empty());
}

#[test]
fn test_table_uses_used_keyspace() {
    let generator = generate(&format!("{KEYSPACE} USE ks; CREATE TABLE t (a int PRIMARY KEY);"));
    assert_eq!(table(&generator, "Table1").keyspace_name, Expr::reference("Keyspace1"));
}

#[test]
fn test_table_in_uncreated_keyspace_uses_literal_name() {
    let conversion = convert_ok("USE ks; CREATE TABLE ks.t (a int, b int, PRIMARY KEY (a));");
    let template: serde_json::Value = serde_json::from_str(&conversion.template).unwrap();

    assert_eq!(template["Resources"]["Table1"]["Properties"]["KeyspaceName"], "ks");
    assert_eq!(
        conversion.warnings,
        vec!["Attempted to create table in keyspace 'ks' before creating it first".to_string()]
    );
}

#[test]
fn test_table_without_keyspace() {
    let message = fatal_message("CREATE TABLE t (a int PRIMARY KEY);");
    assert_eq!(message, "No keyspace specified for table");
}

#[test]
fn test_table_duplicate_is_fatal() {
    let message = fatal_message(&format!(
        "{KEYSPACE} CREATE TABLE ks.t (a int PRIMARY KEY); USE ks; CREATE TABLE t (b int PRIMARY KEY);"
    ));
    assert!(message.contains("Cannot create more than one table"));
}

#[test]
fn test_table_duplicate_if_not_exists_skipped() {
    let generator = generate(&format!(
        "{KEYSPACE} CREATE TABLE ks.t (a int PRIMARY KEY); CREATE TABLE IF NOT EXISTS ks.t (b int PRIMARY KEY);"
    ));
    assert_eq!(generator.template().len(), 2);
    assert_eq!(column_names(&table(&generator, "Table1").partition_key_columns), vec!["a"]);
}

#[test]
fn test_same_table_name_in_other_keyspace() {
    let generator = generate(&format!(
        "{KEYSPACE} CREATE TABLE ks.t (a int PRIMARY KEY);
         CREATE KEYSPACE ks2 WITH replication = {{'class': 'SingleRegionStrategy'}};
         CREATE TABLE ks2.t (a int PRIMARY KEY);"
    ));
    assert_eq!(table(&generator, "Table2").keyspace_name, Expr::reference("Keyspace2"));
}

// ============================================================================
// CREATE TABLE: columns
// ============================================================================

#[test]
fn test_table_columns_partitioned_exactly_once() {
    let generator = generate(&format!(
        "{KEYSPACE} CREATE TABLE ks.t (
            r1 text, c2 int, p1 int, r2 text, c1 int, p2 int,
            PRIMARY KEY ((p1, p2), c1, c2)
        );"
    ));
    let t = table(&generator, "Table1");

    let partition = column_names(&t.partition_key_columns);
    let clustering: Vec<&str> = t
        .clustering_key_columns
        .iter()
        .map(|c| c.column.column_name.as_str())
        .collect();
    let regular = column_names(&t.regular_columns);

    assert_eq!(partition, vec!["p1", "p2"]);
    assert_eq!(clustering, vec!["c1", "c2"]);
    assert_eq!(regular, vec!["r1", "r2"]);

    let mut all: Vec<&str> = partition.into_iter().chain(clustering).chain(regular).collect();
    all.sort_unstable();
    assert_eq!(all, vec!["c1", "c2", "p1", "p2", "r1", "r2"]);
}

#[test]
fn test_table_clustering_order() {
    let generator = generate(&format!(
        "{KEYSPACE} CREATE TABLE ks.t (a int, b int, c int, PRIMARY KEY (a, b, c))
            WITH CLUSTERING ORDER BY (b DESC);"
    ));
    let t = table(&generator, "Table1");
    assert_eq!(t.clustering_key_columns[0].order_by.as_deref(), Some("DESC"));
    assert_eq!(t.clustering_key_columns[1].order_by, None);
}

#[test]
fn test_table_static_columns_rejected() {
    let message = fatal_message(&format!(
        "{KEYSPACE} CREATE TABLE ks.t (a int, b int, s text STATIC, PRIMARY KEY (a, b));"
    ));
    assert_eq!(message, "Static columns are not supported by Keyspaces yet");
}

#[test]
fn test_table_composite_type_expression() {
    let generator = generate(&format!(
        "{KEYSPACE} CREATE TABLE ks.t (a int PRIMARY KEY, m map<text, int>);"
    ));
    let t = table(&generator, "Table1");
    assert_eq!(
        t.regular_columns[0].column_type,
        Expr::sub(
            "map<${Types}>",
            vec![(
                "Types".to_string(),
                Expr::join(",", vec![Expr::literal("text"), Expr::literal("int")])
            )]
        )
    );
}

#[test]
fn test_table_user_type_not_supported() {
    let message = fatal_message(&format!(
        "{KEYSPACE} CREATE TABLE ks.t (a int PRIMARY KEY, addr address);"
    ));
    assert_eq!(message, "User types are not supported by Keyspaces yet");
}

#[test]
fn test_table_user_type_nested_in_collection() {
    let message = fatal_message(&format!(
        "{KEYSPACE} CREATE TABLE ks.t (a int PRIMARY KEY, addrs list<frozen<ks.address>>);"
    ));
    assert_eq!(message, "User types are not supported by Keyspaces yet");
}

#[test]
fn test_table_user_type_other_keyspace() {
    let message = fatal_message(&format!(
        "{KEYSPACE} CREATE TABLE ks.t (a int PRIMARY KEY, addr other.address);"
    ));
    assert_eq!(message, "Cannot reference user type 'address' in another keyspace 'other'");
}

#[test]
fn test_table_custom_type_not_supported() {
    let message = fatal_message(&format!(
        "{KEYSPACE} CREATE TABLE ks.t (a int PRIMARY KEY, b 'org.example.Type');"
    ));
    assert_eq!(message, "Custom types are not supported by Keyspaces");
}

#[test]
fn test_table_handler_rejects_partition_key_type() {
    let mut properties = TableProperties::new();
    properties
        .add_column(Identifier::from("a"), CqlType::Custom("X".to_string()))
        .unwrap();
    properties.start_primary_key().unwrap();
    properties.add_partition_key_column(Identifier::from("a")).unwrap();
    let statement =
        Statement::create_table(Some(Identifier::from("ks")), Identifier::from("t"), false, properties)
            .unwrap();

    let mut generator = Generator::new(GeneratorOptions::default());
    let err = generator.handle(&statement).unwrap_err();
    assert!(matches!(err, ConvertError::Diagnostic { .. }));
    assert!(generator.template().is_empty());
}

// ============================================================================
// CREATE TABLE: properties
// ============================================================================

#[test]
fn test_table_default_time_to_live_not_supported() {
    let message = fatal_message(&format!(
        "{KEYSPACE} CREATE TABLE ks.t (a int PRIMARY KEY) WITH default_time_to_live = '100';"
    ));
    assert_eq!(message, "Property 'default_time_to_live' is not supported by Keyspaces yet");
}

#[test]
fn test_table_default_time_to_live_invalid() {
    let message = fatal_message(&format!(
        "{KEYSPACE} CREATE TABLE ks.t (a int PRIMARY KEY) WITH default_time_to_live = 'soon';"
    ));
    assert!(message.contains("it should be an integer"));
}

#[test]
fn test_table_comment_cannot_be_set() {
    let message = fatal_message(&format!(
        "{KEYSPACE} CREATE TABLE ks.t (a int PRIMARY KEY) WITH comment = 'hi';"
    ));
    assert_eq!(message, "Property 'comment' currently cannot be set via CloudFormation");
}

#[test]
fn test_table_tags_cannot_be_set() {
    let message = fatal_message(&format!(
        "{KEYSPACE} CREATE TABLE ks.t (a int PRIMARY KEY) WITH tags = {{'k': 'v'}};"
    ));
    assert_eq!(message, "Property 'tags' currently cannot be set via CloudFormation");
}

#[test]
fn test_table_unknown_property_warns() {
    let conversion = convert_ok(&format!(
        "{KEYSPACE} CREATE TABLE ks.t (a int PRIMARY KEY) WITH bloom_filter_fp_chance = 0.01;"
    ));
    assert_eq!(
        conversion.warnings,
        vec!["Property 'bloom_filter_fp_chance' is not applicable to Keyspaces".to_string()]
    );
}

#[test]
fn test_table_compact_storage_warns() {
    let conversion = convert_ok(&format!(
        "{KEYSPACE} CREATE TABLE ks.t (a int PRIMARY KEY) WITH COMPACT STORAGE;"
    ));
    assert_eq!(
        conversion.warnings,
        vec!["COMPACT STORAGE is not applicable to Keyspaces".to_string()]
    );
}

// ============================================================================
// CREATE TABLE: custom properties
// ============================================================================

fn table_with_custom(custom: &str) -> String {
    format!("{KEYSPACE} CREATE TABLE ks.t (a int PRIMARY KEY) WITH CUSTOM_PROPERTIES = {custom};")
}

#[test]
fn test_capacity_mode_pay_per_request() {
    let generator = generate(&table_with_custom(
        "{'capacity_mode': {'throughput_mode': 'PAY_PER_REQUEST'}}",
    ));
    assert_eq!(table(&generator, "Table1").billing_mode, Some(BillingMode::on_demand()));
}

#[test]
fn test_capacity_mode_pay_per_request_extra_option() {
    let message = fatal_message(&table_with_custom(
        "{'capacity_mode': {'throughput_mode': 'PAY_PER_REQUEST', 'read_capacity_units': 1}}",
    ));
    assert_eq!(
        message,
        "Unrecognized option 'read_capacity_units' for capacity mode throughput mode 'PAY_PER_REQUEST'"
    );
}

#[test]
fn test_capacity_mode_provisioned() {
    let generator = generate(&table_with_custom(
        "{'capacity_mode': {'throughput_mode': 'PROVISIONED', 'write_capacity_units': 7, 'read_capacity_units': 3}}",
    ));
    assert_eq!(table(&generator, "Table1").billing_mode, Some(BillingMode::provisioned(3, 7)));
}

#[test]
fn test_capacity_mode_provisioned_missing_units() {
    let message = fatal_message(&table_with_custom(
        "{'capacity_mode': {'throughput_mode': 'PROVISIONED', 'read_capacity_units': 3}}",
    ));
    assert_eq!(
        message,
        "Missing required option 'write_capacity_units' for capacity mode throughput mode 'PROVISIONED'"
    );
}

#[test]
fn test_capacity_mode_provisioned_invalid_units() {
    let message = fatal_message(&table_with_custom(
        "{'capacity_mode': {'throughput_mode': 'PROVISIONED', 'read_capacity_units': 'lots', 'write_capacity_units': 1}}",
    ));
    assert!(message.contains("Invalid value for option 'read_capacity_units'"));
}

#[test]
fn test_capacity_mode_provisioned_extra_option() {
    let message = fatal_message(&table_with_custom(
        "{'capacity_mode': {'throughput_mode': 'PROVISIONED', 'read_capacity_units': 1, 'write_capacity_units': 1, 'burst': 'yes'}}",
    ));
    assert_eq!(
        message,
        "Unrecognized option 'burst' for capacity mode throughput mode 'PROVISIONED'"
    );
}

#[test]
fn test_capacity_mode_missing_throughput_mode() {
    let message = fatal_message(&table_with_custom("{'capacity_mode': {}}"));
    assert!(message.contains("Missing required option 'throughput_mode'"));
}

#[test]
fn test_capacity_mode_unknown_throughput_mode() {
    let message = fatal_message(&table_with_custom(
        "{'capacity_mode': {'throughput_mode': 'AUTOSCALE'}}",
    ));
    assert_eq!(
        message,
        "Capacity mode throughput mode 'AUTOSCALE' is not recognized by Keyspaces"
    );
}

#[test]
fn test_point_in_time_recovery_cannot_be_set() {
    let message = fatal_message(&table_with_custom(
        "{'point_in_time_recovery': {'status': 'enabled'}}",
    ));
    assert_eq!(
        message,
        "Custom property 'point_in_time_recovery' currently cannot be set via CloudFormation"
    );
}

#[test]
fn test_point_in_time_recovery_unknown_status() {
    let message = fatal_message(&table_with_custom(
        "{'point_in_time_recovery': {'status': 'paused'}}",
    ));
    assert_eq!(
        message,
        "Point in time recovery status 'paused' is not recognized by Keyspaces"
    );
}

#[test]
fn test_point_in_time_recovery_extra_option() {
    let message = fatal_message(&table_with_custom(
        "{'point_in_time_recovery': {'status': 'disabled', 'window': '7d'}}",
    ));
    assert_eq!(
        message,
        "Unrecognized option 'window' of custom property 'point_in_time_recovery'"
    );
}

#[test]
fn test_unknown_custom_property() {
    let message = fatal_message(&table_with_custom("{'encryption': {'type': 'kms'}}"));
    assert_eq!(message, "Custom property 'encryption' is not recognized by Keyspaces");
}
