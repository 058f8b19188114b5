//! Integration tests for the non-interactive listing command.
//!
//! The fixture snapshot inserts elements out of atomic-number order on
//! purpose: the loader must scan ordered and the controller must keep that
//! order under an empty query.

mod common;

use common::{fixture, run_list};
use std::process::Command;

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| line.to_string())
        .collect()
}

#[test]
fn empty_query_lists_all_in_natural_order() {
    let fixture = fixture();
    let output = run_list(&fixture, &[]);
    assert!(output.status.success(), "list failed: {output:?}");
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("Hydrogen"));
    assert!(lines[1].contains("Helium"));
    assert!(lines[2].contains("Lithium"));
    // Series labels and oxidation states come from the secondary lookups.
    assert!(lines[0].contains("Nonmetal"));
    assert!(lines[0].contains("+1, -1"));
    assert!(lines[1].contains("Noble gas"));
}

#[test]
fn query_filters_to_substring_matches() {
    let fixture = fixture();
    let output = run_list(&fixture, &["--query", "um"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Helium"));
    assert!(lines[1].contains("Lithium"));
}

#[test]
fn exact_symbol_match_ranks_first() {
    let fixture = fixture();
    // "h" matches Hydrogen's symbol exactly; Helium and Lithium still match
    // by substring and follow in atomic-number order.
    let output = run_list(&fixture, &["--query", "h"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("Hydrogen"));
    assert!(lines[1].contains("Helium"));
    assert!(lines[2].contains("Lithium"));
}

#[test]
fn unmatched_query_prints_nothing() {
    let fixture = fixture();
    let output = run_list(&fixture, &["--query", "zz"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn json_output_carries_full_records() {
    let fixture = fixture();
    // "li" matches Lithium's symbol exactly, so it outranks Helium, which
    // also matches by name substring.
    let output = run_list(&fixture, &["--query", "li", "--json"]);
    assert!(output.status.success());
    let rows: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("parse json output");
    let rows = rows.as_array().expect("json array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["name"], "Helium");
    assert_eq!(rows[0]["name"], "Lithium");
    assert_eq!(rows[0]["symbol"], "Li");
    assert_eq!(rows[0]["atomic_number"], 3);
    assert_eq!(rows[0]["series"], "Alkali metal");
    assert_eq!(rows[0]["oxidation_states"], serde_json::json!([1]));
    assert_eq!(
        rows[0]["wikipedia_url"],
        "https://en.wikipedia.org/wiki/Lithium"
    );
    // Without --thumbs the enrichment never ran.
    assert_eq!(rows[0]["thumbnail"], serde_json::Value::Null);
}

#[test]
fn missing_snapshot_is_a_fatal_error() {
    let fixture = fixture();
    let bad_path = fixture.db_path.with_file_name("absent.db");
    let output = Command::new(env!("CARGO_BIN_EXE_ptable"))
        .arg("list")
        .arg("--db")
        .arg(&bad_path)
        .output()
        .expect("run ptable list");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("snapshot"), "stderr: {stderr}");
}
