//! Tests for the CLI argument types.

#![cfg(feature = "cli")]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use propchat::cli::{Args, DEFAULT_OUTPUT, OutputFormat};
use tempfile::NamedTempFile;

fn parse(args: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("propchat").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_output_format_value_names() {
    assert_eq!(OutputFormat::from_str("csv", true).unwrap(), OutputFormat::Csv);
    assert_eq!(OutputFormat::from_str("JSON", true).unwrap(), OutputFormat::Json);
    assert_eq!(OutputFormat::from_str("jsonl", false).unwrap(), OutputFormat::Jsonl);
    assert_eq!(OutputFormat::from_str("ndjson", false).unwrap(), OutputFormat::Jsonl);
    assert!(OutputFormat::from_str("xml", true).is_err());
}

#[test]
fn test_output_format_default_and_serde() {
    assert_eq!(OutputFormat::default(), OutputFormat::Csv);
    assert_eq!(serde_json::to_string(&OutputFormat::Jsonl).unwrap(), "\"jsonl\"");
}

#[test]
fn test_output_format_into_library_format() {
    for (cli, lib) in [
        (OutputFormat::Csv, propchat::format::OutputFormat::Csv),
        (OutputFormat::Json, propchat::format::OutputFormat::Json),
        (OutputFormat::Jsonl, propchat::format::OutputFormat::Jsonl),
    ] {
        assert_eq!(propchat::format::OutputFormat::from(cli), lib);
    }
}

#[test]
fn test_multiple_inputs_keep_order() {
    let args = parse(&["b.txt", "a.txt", "c.txt"]);
    assert_eq!(
        args.inputs,
        [PathBuf::from("b.txt"), PathBuf::from("a.txt"), PathBuf::from("c.txt")]
    );
}

#[test]
fn test_default_output_follows_format() {
    assert_eq!(parse(&["a.txt"]).output_path(), DEFAULT_OUTPUT);
    assert_eq!(parse(&["a.txt", "--format", "json"]).output_path(), "whatsapp_chats.json");
    assert_eq!(parse(&["a.txt", "-o", "x.csv", "-f", "jsonl"]).output_path(), "x.csv");
}

#[test]
fn test_rules_file_loaded() {
    let rules = NamedTempFile::new().unwrap();
    std::fs::write(
        rules.path(),
        r#"{"status_rules": [{"keyword": "للتمليك", "category": "sale", "language": "arabic"}]}"#,
    )
    .unwrap();

    let args = parse(&["a.txt", "--rules", rules.path().to_str().unwrap()]);
    let config = args.extraction_config().unwrap();
    assert!(config.status_rules.iter().any(|r| r.text() == "للتمليك"));
}

#[test]
fn test_missing_rules_file_is_error() {
    let args = parse(&["a.txt", "--rules", "/definitely/not/here.json"]);
    assert!(args.extraction_config().unwrap_err().is_io());
}

#[test]
fn test_malformed_rules_file_is_error() {
    let rules = NamedTempFile::new().unwrap();
    std::fs::write(rules.path(), "{ not json").unwrap();

    let args = parse(&["a.txt", "--rules", rules.path().to_str().unwrap()]);
    assert!(args.extraction_config().is_err());
}

#[test]
fn test_unknown_flag_rejected() {
    assert!(Args::try_parse_from(["propchat", "a.txt", "--merge"]).is_err());
}
