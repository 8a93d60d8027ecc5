//! Tests for converting script files on disk

use std::io::Write;

use tempfile::{NamedTempFile, TempDir};

use cql2cfn::{convert_file, ConvertError, ConvertOptions};

use crate::common::{fixture_path, parse_template};

fn options(input_path: std::path::PathBuf, output_path: Option<std::path::PathBuf>) -> ConvertOptions {
    ConvertOptions {
        input_path,
        output_path,
        debug: false,
        strict: false,
    }
}

#[test]
fn test_convert_file_writes_template() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("template.json");

    let conversion =
        convert_file(&options(fixture_path("ledger.cql"), Some(output_path.clone()))).unwrap();

    let written = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(written, format!("{}\n", conversion.template));
    let template = parse_template(&written);
    assert_eq!(
        template["Resources"]["Keyspace1"]["Properties"]["KeyspaceName"],
        "ledger"
    );
}

#[test]
fn test_convert_file_without_output_only_returns_template() {
    let conversion = convert_file(&options(fixture_path("ledger.cql"), None)).unwrap();
    assert!(conversion.template.contains("AWS::Cassandra::Table"));
}

#[test]
fn test_convert_missing_file_reports_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.cql");

    let err = convert_file(&options(missing, None)).unwrap_err();
    assert!(matches!(err, ConvertError::ScriptRead { .. }));
}

#[test]
fn test_convert_file_with_bom() {
    let mut file = NamedTempFile::with_suffix(".cql").unwrap();
    file.write_all(b"\xEF\xBB\xBFCREATE KEYSPACE ks WITH replication = {'class': 'SingleRegionStrategy'};")
        .unwrap();
    file.flush().unwrap();

    let conversion = convert_file(&options(file.path().to_path_buf(), None)).unwrap();
    let template = parse_template(&conversion.template);
    assert_eq!(
        template["Resources"]["Keyspace1"]["Properties"]["KeyspaceName"],
        "ks"
    );
}

#[test]
fn test_convert_file_with_windows_1252_comment() {
    let mut file = NamedTempFile::with_suffix(".cql").unwrap();
    // 0xE9 is 'é' in Windows-1252 and invalid as standalone UTF-8
    file.write_all(b"-- caf\xE9 schema\nCREATE KEYSPACE ks WITH replication = {'class': 'SingleRegionStrategy'};")
        .unwrap();
    file.flush().unwrap();

    let conversion = convert_file(&options(file.path().to_path_buf(), None)).unwrap();
    assert!(conversion.template.contains("\"KeyspaceName\": \"ks\""));
}

#[test]
fn test_convert_file_unwritable_output() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("no_such_dir").join("template.json");

    let err = convert_file(&options(fixture_path("ledger.cql"), Some(output_path))).unwrap_err();
    assert!(matches!(err, ConvertError::TemplateWrite { .. }));
}

#[test]
fn test_parse_script_file_keeps_statement_order() {
    let statements = cql2cfn::parser::parse_script_file(&fixture_path("ledger.cql")).unwrap();
    let descriptions: Vec<String> = statements.iter().map(|s| s.describe()).collect();
    assert_eq!(descriptions.first().map(String::as_str), Some("CREATE KEYSPACE 'ledger'"));
    assert!(descriptions.iter().any(|d| d == "USE 'ledger'"));
}
