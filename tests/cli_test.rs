//! Integration tests for the CLI commands.

use std::fs;
use std::path::Path;

use clap::Parser;
use query_lattice::cli::args::QueryLatticeArgs;
use query_lattice::cli::commands::run_command;
use serde_json::{Value, json};
use tempfile::TempDir;

fn sample_response() -> Value {
    json!({
        "detail": {
            "tokenfilters": [
                {"name": "stopword_filter", "tokens": [
                    {"token": "삼성", "position": 0, "start_offset": 0, "end_offset": 2},
                    {"token": "전자", "position": 1, "start_offset": 2, "end_offset": 4}
                ]},
                {"name": "synonym_filter", "tokens": [
                    {"token": "삼성", "type": "word", "position": 0, "start_offset": 0, "end_offset": 2},
                    {"token": "samsung", "type": "SYNONYM", "position": 0, "start_offset": 0, "end_offset": 2},
                    {"token": "전자", "type": "word", "position": 1, "start_offset": 2, "end_offset": 4},
                    {"token": "삼성전자", "type": "additional", "position": 0, "positionLength": 2,
                     "start_offset": 0, "end_offset": 4}
                ]}
            ]
        }
    })
}

fn write_response(dir: &Path) -> String {
    let path = dir.join("response.json");
    fs::write(&path, serde_json::to_vec(&sample_response()).unwrap()).unwrap();
    path.to_string_lossy().to_string()
}

fn run(argv: &[&str]) -> query_lattice::error::Result<String> {
    let mut full = vec!["query-lattice"];
    full.extend_from_slice(argv);
    let args = QueryLatticeArgs::try_parse_from(full).unwrap();

    let mut out = Vec::new();
    run_command(&args, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_analyze_json() {
    let temp_dir = TempDir::new().unwrap();
    let response = write_response(temp_dir.path());

    let output = run(&["--format", "json", "analyze", &response, "삼성전자"]).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["stage"], "synonym_filter");
    assert_eq!(value["tokens"].as_array().unwrap().len(), 4);
    assert_eq!(value["paths"], json!([["삼성", "전자"], ["samsung", "전자"]]));
    assert_eq!(value["additional_terms"], json!(["삼성전자"]));
    assert!(value["diagram"].as_str().unwrap().starts_with("graph LR"));
}

#[test]
fn test_analyze_human_without_diagram() {
    let temp_dir = TempDir::new().unwrap();
    let response = write_response(temp_dir.path());

    let output = run(&["analyze", &response, "삼성전자", "--no-diagram"]).unwrap();

    assert!(output.contains("Paths (2):"));
    assert!(output.contains("삼성 → samsung"));
    assert!(!output.contains("Diagram:"));
}

#[test]
fn test_index_view_with_stage_override() {
    let temp_dir = TempDir::new().unwrap();
    let response = write_response(temp_dir.path());

    let output = run(&["-f", "json", "index", &response, "삼성전자"]).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["tokens"], json!(["삼성", "전자"]));

    let output = run(&[
        "-f",
        "json",
        "index",
        &response,
        "삼성전자",
        "--stage",
        "synonym_filter",
    ])
    .unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["tokens"].as_array().unwrap().len(), 4);
}

#[test]
fn test_diagram_dot() {
    let temp_dir = TempDir::new().unwrap();
    let response = write_response(temp_dir.path());

    let output = run(&["diagram", &response, "삼성전자", "-d", "dot"]).unwrap();

    assert!(output.starts_with("digraph lattice {"));
    assert!(output.contains("0 -> 2 [label=\"삼성전자 (additional)\", style=bold];"));
}

#[test]
fn test_config_file_changes_stage() {
    let temp_dir = TempDir::new().unwrap();
    let response = write_response(temp_dir.path());
    let config = temp_dir.path().join("config.json");
    fs::write(&config, r#"{"search_stage": "stopword_filter", "include_diagram": false}"#).unwrap();
    let config = config.to_string_lossy().to_string();

    let output = run(&["--config", &config, "-f", "json", "analyze", &response, "삼성전자"]).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["stage"], "stopword_filter");
    assert_eq!(value["paths"], json!([["삼성", "전자"]]));
    assert!(value.get("diagram").is_none());
}

#[test]
fn test_malformed_response_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{\"detail\": [").unwrap();
    let path = path.to_string_lossy().to_string();

    let err = run(&["analyze", &path, "q"]).unwrap_err();
    assert!(err.is_parse_error());
}

#[test]
fn test_batch_reports_each_line() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("batch.jsonl");
    let lines = [
        json!({"query": "삼성전자", "response": sample_response()}).to_string(),
        String::new(),
        "not a request".to_string(),
        json!({"query": "빈 응답", "response": {}}).to_string(),
    ];
    fs::write(&input, lines.join("\n")).unwrap();
    let input = input.to_string_lossy().to_string();

    let output = run(&["-f", "json", "batch", &input]).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["total"], 3);
    assert_eq!(value["failed"], 1);
    let entries = value["entries"].as_array().unwrap();
    assert_eq!(entries[0]["line"], 1);
    assert_eq!(entries[0]["analysis"]["paths"].as_array().unwrap().len(), 2);
    assert_eq!(entries[1]["line"], 3);
    assert!(entries[1]["error"].is_string());
    assert_eq!(entries[2]["query"], "빈 응답");
    assert_eq!(entries[2]["analysis"]["tokens"], json!([]));

    let err = run(&["batch", &input, "--fail-fast"]).unwrap_err();
    assert!(err.is_parse_error());
}
