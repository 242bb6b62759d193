//! End-to-end tests of the `aurum` binary.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn aurum() -> Command {
    let mut cmd = Command::cargo_bin("aurum").unwrap();
    cmd.env_remove("AURUM_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Asset `LEVERED` is exactly twice `BENCH`.
fn returns_file(dir: &TempDir) -> PathBuf {
    write(
        dir,
        "returns.csv",
        "date,BENCH,LEVERED,STEADY\n\
         2024-01-31,0.010,0.020,0.004\n\
         2024-02-29,-0.020,-0.040,0.005\n\
         2024-03-31,0.015,0.030,0.003\n\
         2024-04-30,0.005,0.010,0.006\n\
         2024-05-31,-0.010,-0.020,0.004\n\
         2024-06-30,0.025,0.050,0.002\n",
    )
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

// =============================================================================
// GENERAL
// =============================================================================

#[test]
fn help_lists_commands() {
    aurum()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("performance"))
        .stdout(predicate::str::contains("esg"))
        .stdout(predicate::str::contains("simulate"));
}

#[test]
fn missing_return_file_fails() {
    aurum()
        .args(["performance", "--returns", "/nonexistent/returns.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read returns"));
}

// =============================================================================
// ANALYTICS
// =============================================================================

#[test]
fn performance_as_json() {
    let dir = TempDir::new().unwrap();
    let returns = returns_file(&dir);

    let rows = json_stdout(aurum().args([
        "--format",
        "json",
        "performance",
        "--returns",
        arg(&returns),
        "--benchmark",
        "BENCH",
    ]));

    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["asset"], "LEVERED");
    assert_eq!(rows[0]["periods"], 6);
    assert!(rows[0]["tracking_error"].as_f64().unwrap() > 0.0);
    assert!(rows[1]["max_drawdown"].as_f64().unwrap() <= 0.0);
}

#[test]
fn performance_without_benchmark_has_no_relative_figures() {
    let dir = TempDir::new().unwrap();
    let returns = returns_file(&dir);

    let rows = json_stdout(aurum().args([
        "--format",
        "json",
        "performance",
        "--returns",
        arg(&returns),
        "--asset",
        "STEADY",
    ]));

    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert!(rows[0]["tracking_error"].is_null());
    assert!(rows[0]["information_ratio"].is_null());
}

#[test]
fn beta_of_levered_asset_is_two() {
    let dir = TempDir::new().unwrap();
    let returns = returns_file(&dir);

    let rows = json_stdout(aurum().args([
        "--format",
        "json",
        "beta",
        "--returns",
        arg(&returns),
        "--benchmark",
        "BENCH",
    ]));

    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["asset"], "LEVERED");
    assert!((rows[0]["beta"].as_f64().unwrap() - 2.0).abs() < 1e-9);
    assert!((rows[0]["correlation"].as_f64().unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn unknown_benchmark_fails() {
    let dir = TempDir::new().unwrap();
    let returns = returns_file(&dir);

    aurum()
        .args(["beta", "--returns", arg(&returns), "--benchmark", "GOLD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown asset 'GOLD'"));
}

#[test]
fn diversification_table() {
    let dir = TempDir::new().unwrap();
    let returns = returns_file(&dir);

    aurum()
        .args([
            "diversification",
            "--returns",
            arg(&returns),
            "--weight",
            "BENCH=0.5",
            "--weight",
            "STEADY=0.5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Diversification Ratio"));
}

// =============================================================================
// ESG
// =============================================================================

#[test]
fn esg_coverage_as_json() {
    let dir = TempDir::new().unwrap();
    let scores = write(
        &dir,
        "esg_isin.csv",
        "isin,environmental,social,governance,overall\n\
         US0378331005,62,71,78,70\n\
         US5949181045,85,77,74,80\n",
    );
    let holdings = write(
        &dir,
        "holdings.csv",
        "identifier,market_value,asset_class\n\
         US0378331005,500000,Equity\n\
         US5949181045,250000,Equity\n\
         DE0007164600,250000,Fixed Income\n",
    );

    let report = json_stdout(aurum().args([
        "--format",
        "json",
        "esg",
        "--holdings",
        arg(&holdings),
        "--isin-scores",
        arg(&scores),
        "--by-asset-class",
    ]));

    let portfolio = &report["portfolio"];
    assert_eq!(portfolio["coverage"], 75.0);
    assert_eq!(portfolio["matched_holdings"], 2);
    assert!((portfolio["overall_score"].as_f64().unwrap() - 220.0 / 3.0).abs() < 1e-9);
    assert_eq!(report["by_asset_class"]["fixed_income"]["coverage"], 0.0);
}

#[test]
fn esg_warns_about_unmatched_holdings() {
    let dir = TempDir::new().unwrap();
    let scores = write(
        &dir,
        "esg_isin.csv",
        "identifier,environmental,social,governance,overall\nUS0378331005,62,71,78,70\n",
    );
    let holdings = write(
        &dir,
        "holdings.csv",
        "identifier,market_value\nUS0378331005,100\nCASH-USD,100\n",
    );

    aurum()
        .args([
            "esg",
            "--holdings",
            arg(&holdings),
            "--isin-scores",
            arg(&scores),
            "--show-unmatched",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("50.0%"))
        .stderr(predicate::str::contains("CASH-USD"));
}

// =============================================================================
// SIMULATION
// =============================================================================

#[test]
fn simulate_csv_is_deterministic() {
    let run = |seed: &str| {
        aurum()
            .args([
                "--format", "csv", "simulate", "--asset", "EQUITY", "--asset", "BONDS",
                "--periods", "12", "--seed", seed,
            ])
            .output()
            .unwrap()
            .stdout
    };

    let first = run("7");
    let text = String::from_utf8(first.clone()).unwrap();
    assert_eq!(text.lines().count(), 13);
    assert_eq!(text.lines().next(), Some("BONDS,EQUITY"));
    assert_eq!(first, run("7"));
    assert_ne!(first, run("8"));
}

#[test]
fn simulated_file_feeds_performance() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("paths.csv");

    aurum()
        .args(["simulate", "--periods", "24", "--output", arg(&path)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1 paths"));

    let rows = json_stdout(aurum().args(["--format", "json", "performance", "--returns", arg(&path)]));
    assert_eq!(rows[0]["asset"], "SIMULATED");
    assert_eq!(rows[0]["periods"], 24);
}

#[test]
fn simulate_rejects_negative_volatility() {
    aurum()
        .args(["simulate", "--annual-volatility=-0.1"])
        .assert()
        .failure();
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn config_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("aurum.toml");

    aurum()
        .args(["config", "init", "--path", arg(&path)])
        .assert()
        .success();
    assert!(std::fs::read_to_string(&path).unwrap().contains("[analytics]"));

    aurum()
        .args(["config", "init", "--path", arg(&path)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    aurum()
        .args(["config", "init", "--path", arg(&path), "--force"])
        .assert()
        .success();
}

#[test]
fn config_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let config = write(
        &dir,
        "aurum.toml",
        "[analytics]\nrisk_free_rate = 0.05\n\n[simulation]\nperiods = 6\n",
    );

    let shown = json_stdout(aurum().args(["--config", arg(&config), "--format", "json", "config", "show"]));
    assert_eq!(shown["analytics"]["risk_free_rate"], 0.05);
    assert_eq!(shown["simulation"]["periods"], 6);

    let output = aurum()
        .args(["--config", arg(&config), "--format", "csv", "simulate"])
        .output()
        .unwrap();
    assert_eq!(String::from_utf8(output.stdout).unwrap().lines().count(), 7);
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "bad.toml", "[simulation]\nannual_volatility = -1.0\n");

    aurum()
        .args(["config", "validate", arg(&config)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("simulation"));
}
