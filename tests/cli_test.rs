use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_offline_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("credit-sim"));
    cmd.args([
        "--offline",
        "--risk-delay-ms",
        "0",
        "--amount",
        "12000",
        "--annual-rate",
        "0",
        "--months",
        "12",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "month,payment,principal,interest,remaining_balance",
        ))
        .stdout(predicate::str::contains("1,1000.00,1000.00,0.00,11000.00"))
        .stdout(predicate::str::contains("12,1000.00,1000.00,0.00,0.00"))
        .stdout(predicate::str::contains("risk_score,unrated"));

    Ok(())
}

#[test]
fn test_cli_uses_default_form_values() {
    let mut cmd = Command::new(cargo_bin!("credit-sim"));
    cmd.args(["--offline", "--risk-delay-ms", "0"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,473.08,368.91,104.17,9631.09"))
        .stdout(predicate::str::contains("\n24,"));
}

#[test]
fn test_cli_rejects_invalid_parameters() {
    let mut cmd = Command::new(cargo_bin!("credit-sim"));
    cmd.args(["--offline", "--amount=-100", "--months", "12"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid parameters"));
}

#[test]
fn test_cli_reports_unreachable_service() {
    let mut cmd = Command::new(cargo_bin!("credit-sim"));
    cmd.args(["--api-url", "http://127.0.0.1:9", "--risk-delay-ms", "0"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Network error"));
}
