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
fn path_lists_every_node_and_the_cost() {
    cli()
        .arg("path")
        .arg("--from")
        .arg("Barnes-Jewish Hospital")
        .arg("--to")
        .arg("Research Medical Center")
        .assert()
        .success()
        .stdout(predicate::str::contains("Barnes-Jewish Hospital (1)"))
        .stdout(predicate::str::contains("University Hospital (2)"))
        .stdout(predicate::str::contains("Research Medical Center (3)"))
        .stdout(predicate::str::contains("Cost:"))
        .stdout(predicate::str::contains("hours"));
}

#[test]
fn path_json_format_carries_node_ids() {
    let output = cli()
        .arg("--format")
        .arg("json")
        .arg("path")
        .arg("--from")
        .arg("Barnes-Jewish Hospital")
        .arg("--to")
        .arg("Research Medical Center")
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is valid JSON");
    assert_eq!(json["from"], 1);
    assert_eq!(json["to"], 3);
    assert_eq!(json["path"][0], 1);
    assert!(json["cost"].as_f64().unwrap() > 0.0);
}

#[test]
fn path_distance_weight_reports_kilometers() {
    cli()
        .arg("path")
        .arg("--weight")
        .arg("distance")
        .arg("--from")
        .arg("University Hospital")
        .arg("--to")
        .arg("Capital Region Medical Center")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cost: 53.00 km"));
}

#[test]
fn path_with_unknown_facility_suggests_corrections() {
    cli()
        .arg("path")
        .arg("--from")
        .arg("Barnes Jewish Hospitel")
        .arg("--to")
        .arg("Phelps Health")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown facility"))
        .stderr(predicate::str::contains("Barnes-Jewish Hospital"));
}

#[test]
fn missing_node_table_fails_with_path_in_message() {
    let mut cmd = cargo_bin_cmd!("careroute-cli");
    cmd.env("RUST_LOG", "error")
        .arg("--nodes")
        .arg("/nonexistent/nodes.csv")
        .arg("--edges")
        .arg(fixture("mo_edges.csv"))
        .arg("facilities")
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/nodes.csv"));
}
