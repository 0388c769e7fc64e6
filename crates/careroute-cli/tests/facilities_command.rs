use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .join(name)
        .canonicalize()
        .expect("fixture present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("careroute-cli");
    cmd.env("RUST_LOG", "error")
        .arg("--nodes")
        .arg(fixture("mo_nodes.csv"))
        .arg("--edges")
        .arg(fixture("mo_edges.csv"));
    cmd
}

#[test]
fn facilities_lists_names_with_priority_data() {
    cli()
        .arg("facilities")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Barnes-Jewish Hospital | priority 0.91 | class 3 | St. Louis",
        ))
        .stdout(predicate::str::contains("Phelps Health"));
}

#[test]
fn facilities_json_format_is_sorted_by_name() {
    let output = cli()
        .arg("--format")
        .arg("json")
        .arg("facilities")
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is valid JSON");
    let entries = json.as_array().expect("array of facilities");
    assert_eq!(entries.len(), 6);
    assert_eq!(entries[0]["name"], "Barnes-Jewish Hospital");
    assert_eq!(entries[0]["priority_class"], 3);
}
