//! CLI output integration tests.

mod support;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

use support::files::{write_temp, DOCUMENTED_RESOLUTION, MARKETS};

fn accuracy_pool() -> Command {
    let mut cmd = cargo_bin_cmd!("accuracy-pool");
    cmd.env_remove("ACCURACY_POOL_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("run accuracy-pool");
    assert!(output.status.success(), "{output:?}");
    serde_json::from_slice(&output.stdout).expect("stdout is one JSON document")
}

#[test]
fn test_help() {
    accuracy_pool()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("accuracy-pool"))
        .stdout(predicate::str::contains("allocate"))
        .stdout(predicate::str::contains("settle"))
        .stdout(predicate::str::contains("markets"));
}

#[test]
fn test_version() {
    accuracy_pool()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("accuracy-pool"));
}

#[test]
fn test_explain_shows_formula_and_example() {
    accuracy_pool()
        .arg("explain")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 / (distance + 1)"))
        .stdout(predicate::str::contains("359.68"));
}

#[test]
fn test_allocate_table() {
    let (_dir, input) = write_temp("bets.json", DOCUMENTED_RESOLUTION);
    accuracy_pool()
        .args(["allocate", "--decimals", "2"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("359.68"))
        .stdout(predicate::str::contains("17.12"));
}

#[test]
fn test_allocate_json_sums_to_pool() {
    let (_dir, input) = write_temp("bets.json", DOCUMENTED_RESOLUTION);
    let json = stdout_json(
        accuracy_pool()
            .args(["--json", "allocate", "--decimals", "2"])
            .arg(&input),
    );

    assert_eq!(json["command"], "allocate");
    let allocations = json["distribution"]["allocations"].as_array().unwrap();
    assert_eq!(allocations.len(), 4);
    assert_eq!(allocations[1]["participant"], "bob");
    assert_eq!(allocations[1]["reward"], "359.68");
    assert_eq!(json["distribution"]["residual_recipient"], "bob");
}

#[test]
fn test_allocate_rejects_negative_pool() {
    let (_dir, input) = write_temp(
        "bets.json",
        r#"{"actual_value": 1, "pool": -5, "bets": []}"#,
    );
    accuracy_pool()
        .arg("allocate")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pool must not be negative"));
}

#[test]
fn test_allocate_reports_malformed_json_with_location() {
    let (_dir, input) = write_temp("bets.json", "{\n  \"actual_value\": 850,\n  \"bets\": [,]\n}");
    accuracy_pool()
        .arg("allocate")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input document"))
        .stderr(predicate::str::contains("bets.json"));
}

#[test]
fn test_allocate_requires_actual_value() {
    let (_dir, input) = write_temp("bets.json", r#"{"bets": []}"#);
    accuracy_pool()
        .arg("allocate")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("actual_value"));
}

#[test]
fn test_settle_applies_fee_override() {
    let (_dir, input) = write_temp("bets.json", DOCUMENTED_RESOLUTION);
    let json = stdout_json(
        accuracy_pool()
            .args(["--json", "settle", "--fee-bps", "100"])
            .arg(&input),
    );

    assert_eq!(json["status"], 2);
    assert_eq!(json["status_name"], "resolved");
    assert_eq!(json["settlement"]["outcome"], "distributed");
    assert_eq!(json["settlement"]["pool"]["fee"], "4");
    assert_eq!(json["settlement"]["pool"]["net"], "396");
}

#[test]
fn test_settle_refunds_below_minimum() {
    let (_dir, input) = write_temp("bets.json", DOCUMENTED_RESOLUTION);
    accuracy_pool()
        .args(["settle", "--min-participants", "10"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("cancelled"))
        .stdout(predicate::str::contains("charlie"));
}

#[test]
fn test_markets_filtered_and_sorted() {
    let (_dir, input) = write_temp("markets.json", MARKETS);
    let json = stdout_json(
        accuracy_pool()
            .args(["--json", "markets", "--status", "active"])
            .arg(&input),
    );

    assert_eq!(json["total"], 3);
    let ids: Vec<&str> = json["markets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["0xccc", "0xaaa"]);
}

#[test]
fn test_markets_table_shows_volume_in_tokens() {
    let (_dir, input) = write_temp("markets.json", MARKETS);
    accuracy_pool()
        .arg("markets")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("SOL end of June"))
        .stdout(predicate::str::contains("2.5"));
}

#[test]
fn test_distribution_reports_mode() {
    let (_dir, input) = write_temp("bets.json", DOCUMENTED_RESOLUTION);
    let json = stdout_json(accuracy_pool().args(["--json", "distribution"]).arg(&input));

    assert_eq!(json["total"], 4);
    assert_eq!(json["mode"], "820");
    assert_eq!(json["distribution"]["counts"], serde_json::json!([1, 1, 1, 1]));
}

#[test]
fn test_config_init_then_validate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("accuracy-pool.toml");

    accuracy_pool()
        .args(["config", "init", "-c"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    accuracy_pool()
        .args(["config", "validate", "-c"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn test_config_validate_rejects_bad_file() {
    let (_dir, path) = write_temp("accuracy-pool.toml", "[pool]\nfee_bps = 99999\n");
    accuracy_pool()
        .args(["config", "validate", "-c"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("fee_bps"));
}

#[test]
fn test_config_env_var_selects_file() {
    let (_dir, path) = write_temp("custom.toml", "[allocation]\ndecimals = 4\n");
    let json = stdout_json(
        accuracy_pool()
            .env("ACCURACY_POOL_CONFIG", &path)
            .args(["--json", "config", "show"]),
    );

    assert_eq!(json["loaded"], true);
    assert_eq!(json["config"]["allocation"]["decimals"], 4);
}

#[test]
fn test_quiet_suppresses_report() {
    let (_dir, input) = write_temp("bets.json", DOCUMENTED_RESOLUTION);
    accuracy_pool()
        .args(["-q", "allocate"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
