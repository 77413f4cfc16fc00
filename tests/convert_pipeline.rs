//! End-to-end conversion of the built-in fixture module.
//!
//! These tests drive the library the way the `fixtures2json` binary does:
//! select, convert, write, then read the JSON back.

use std::path::Path;

use argparse_fixtures::catalog::argparse_module;
use argparse_fixtures::commands::run_convert;
use argparse_fixtures::config::{CliOverrides, ResolvedConfig};
use argparse_fixtures::convert::convert_all;
use argparse_fixtures::error::{FixtureError, SkipKind};
use argparse_fixtures::output::{write_records, ConvertSummary};
use argparse_fixtures::select::select_fixture_classes;
use serde_json::{json, Value};
use tempfile::TempDir;

fn run() -> argparse_fixtures::ConversionReport {
    let module = argparse_module();
    convert_all(select_fixture_classes(&module))
}

fn record_json(name: &str) -> Value {
    let report = run();
    let record = report
        .records
        .iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("{name} was not converted"));
    serde_json::to_value(record).unwrap()
}

#[test]
fn catalog_counts() {
    let report = run();
    assert_eq!(report.discovered, 16);
    assert_eq!(report.records.len(), 12);
    assert_eq!(report.skipped.len(), 4);
    assert!(!report.is_complete());
}

#[test]
fn records_and_skips_are_sorted_by_name() {
    let report = run();
    let names: Vec<&str> = report.records.iter().map(|r| r.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    let skipped: Vec<&str> = report.skipped.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        skipped,
        [
            "TestActionUserDefined",
            "TestParentParsers",
            "TestTypeCallable",
            "TestTypeUserDefined",
        ]
    );
}

#[test]
fn skip_reasons() {
    let report = run();
    let reason = |name: &str| {
        report
            .skipped
            .iter()
            .find(|s| s.name == name)
            .map(|s| (s.reason.kind(), s.reason.to_string()))
            .unwrap()
    };

    assert_eq!(
        reason("TestParentParsers"),
        (
            SkipKind::MissingAttribute,
            "type object 'TestParentParsers' has no attribute 'argument_signatures'".to_string()
        )
    );
    assert_eq!(
        reason("TestTypeCallable"),
        (
            SkipKind::UnsupportedValue,
            "<class 'complex'> is not JSON serializable".to_string()
        )
    );
    assert_eq!(reason("TestTypeUserDefined").0, SkipKind::UnsupportedValue);
    assert_eq!(reason("TestActionUserDefined").0, SkipKind::UnsupportedValue);
}

#[test]
fn optionals_default_record() {
    assert_eq!(
        record_json("TestOptionalsDefault"),
        json!({
            "name": "TestOptionalsDefault",
            "doc": "Tests specifying a default for an Optional",
            "argument_signatures": [
                [["-x"], {}],
                [["-y"], {"default": 42}]
            ],
            "failures": ["a"],
            "successes": [
                ["", {"x": null, "y": 42}],
                ["-xx", {"x": "x", "y": 42}],
                ["-yy", {"x": null, "y": "y"}]
            ]
        })
    );
}

#[test]
fn type_markers_become_names() {
    let json = record_json("TestPositionalsChoicesInt");
    assert_eq!(json["argument_signatures"][0][1]["type"], "int");
    assert_eq!(json["argument_signatures"][0][1]["choices"][19], 19);

    let json = record_json("TestOptionLike");
    assert_eq!(json["argument_signatures"][0][1]["type"], "float");
}

#[test]
fn record_without_doc_serializes_null() {
    let json = record_json("TestEmptyAndSpaceContainingArguments");
    assert_eq!(json["doc"], Value::Null);
    assert!(json["successes"][0][0].is_array());
}

#[test]
fn parser_signature_only_when_declared() {
    assert!(record_json("TestParserDefault42")
        .get("parser_signature")
        .is_some());
    assert!(record_json("TestOptionalsDefault")
        .get("parser_signature")
        .is_none());
}

#[test]
fn written_file_matches_report() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("testpy.json");
    let report = run();

    write_records(&path, &report.records, false).unwrap();

    let written: Vec<Value> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written.len(), 12);
    assert_eq!(written[0]["name"], report.records[0].name.as_str());

    let summary = ConvertSummary::from_report(&report, Some(path.as_path()));
    assert_eq!(summary.status, "incomplete");
    assert_eq!(summary.converted, 12);
    assert_eq!(summary.skipped.len(), 4);
}

#[test]
fn conversion_is_deterministic() {
    let first = serde_json::to_string(&run().records).unwrap();
    let second = serde_json::to_string(&run().records).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Convert Command
// ============================================================================

fn config_for(output: &Path, strict: bool) -> ResolvedConfig {
    let overrides = CliOverrides {
        output: Some(output.to_path_buf()),
        pretty: None,
        strict: Some(strict),
    };
    ResolvedConfig::resolve_with(|_| None, &overrides).unwrap()
}

#[test]
fn convert_writes_file_and_prints_summary() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("testpy.json");
    let mut out = Vec::new();

    let report = run_convert(&argparse_module(), &config_for(&path, false), false, &mut out).unwrap();
    assert_eq!(report.records.len(), 12);

    let written: Vec<Value> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written.len(), 12);

    let summary: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(summary["status"], "incomplete");
    assert_eq!(summary["discovered"], 16);
    assert_eq!(summary["converted"], 12);
    assert_eq!(summary["skipped"].as_array().unwrap().len(), 4);
}

#[test]
fn strict_convert_fails_after_writing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("testpy.json");
    let mut out = Vec::new();

    let err = run_convert(&argparse_module(), &config_for(&path, true), false, &mut out).unwrap_err();
    assert!(matches!(
        err,
        FixtureError::SkippedFixtures {
            skipped: 4,
            discovered: 16
        }
    ));
    assert!(path.exists());
    // Only the error response goes to stdout.
    assert!(out.is_empty());
}

#[test]
fn strict_convert_passes_when_nothing_is_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("testpy.json");
    let mut module = argparse_fixtures::fixture::FixtureModule::new("m");
    module.add_class(argparse_module().class("TestOptionalsDefault").unwrap().clone());
    let mut out = Vec::new();

    let report = run_convert(&module, &config_for(&path, true), false, &mut out).unwrap();
    assert!(report.is_complete());
    let summary: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(summary["status"], "ok");
}

#[test]
fn stdout_convert_writes_no_file_and_no_summary() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("testpy.json");
    let mut out = Vec::new();

    run_convert(&argparse_module(), &config_for(&path, false), true, &mut out).unwrap();
    assert!(!path.exists());

    // Exactly one document: the record array.
    let records: Vec<Value> = serde_json::from_slice(&out).unwrap();
    assert_eq!(records.len(), 12);
}

#[test]
fn strict_stdout_convert_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("testpy.json");
    let mut out = Vec::new();

    let err = run_convert(&argparse_module(), &config_for(&path, true), true, &mut out).unwrap_err();
    assert!(matches!(err, FixtureError::SkippedFixtures { .. }));
    assert!(out.is_empty());
    assert!(!path.exists());
}
