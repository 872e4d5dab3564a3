#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_form_values_remembered_across_runs() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("form_db");

    // 1. First run: enter a six month, interest-free loan
    let mut cmd1 = Command::new(cargo_bin!("credit-sim"));
    cmd1.args([
        "--offline",
        "--risk-delay-ms",
        "0",
        "--amount",
        "600",
        "--annual-rate",
        "0",
        "--months",
        "6",
        "--db-path",
    ])
    .arg(&db_path);

    let output1 = cmd1.output().expect("Failed to execute command");
    assert!(output1.status.success());
    let stdout1 = String::from_utf8_lossy(&output1.stdout);
    assert!(stdout1.contains("6,100.00,100.00,0.00,0.00"));

    // 2. Second run: no parameters, the stored form is reused
    let mut cmd2 = Command::new(cargo_bin!("credit-sim"));
    cmd2.args(["--offline", "--risk-delay-ms", "0", "--db-path"])
        .arg(&db_path);

    let output2 = cmd2.output().expect("Failed to execute command");
    assert!(output2.status.success());
    let stdout2 = String::from_utf8_lossy(&output2.stdout);
    assert!(stdout2.contains("6,100.00,100.00,0.00,0.00"));

    // 3. Third run: forgetting the form falls back to the 24 month default
    let mut cmd3 = Command::new(cargo_bin!("credit-sim"));
    cmd3.args(["--offline", "--risk-delay-ms", "0", "--reset-form", "--db-path"])
        .arg(&db_path);

    let output3 = cmd3.output().expect("Failed to execute command");
    assert!(output3.status.success());
    let stdout3 = String::from_utf8_lossy(&output3.stdout);
    assert!(stdout3.contains("\n24,"));
}
