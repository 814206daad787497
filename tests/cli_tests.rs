use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn dashboard_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("invoice-dashboard"))
}

fn init_config(config_path: &std::path::Path) {
    dashboard_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();
}

#[test]
fn test_help() {
    dashboard_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Invoice metrics and filtering dashboard",
        ));
}

#[test]
fn test_version() {
    dashboard_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("invoice-dashboard"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dashboard-config");

    dashboard_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized invoice-dashboard config"));

    // Check files were created
    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("sample/invoices.json").exists());
    assert!(config_path.join("sample/profile.json").exists());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dashboard-config");

    init_config(&config_path);

    dashboard_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_list_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    dashboard_cmd()
        .args(["-C", config_path.to_str().unwrap(), "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_list_sample_data() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dashboard-config");
    init_config(&config_path);

    dashboard_cmd()
        .args(["-C", config_path.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-0001"))
        .stdout(predicate::str::contains("Payment overdue"))
        .stdout(predicate::str::contains("R$1,250.00"))
        .stdout(predicate::str::contains("Total: 8 invoices"));
}

#[test]
fn test_list_null_dates_render_as_dash() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dashboard-config");
    init_config(&config_path);

    // INV-0002 has neither billing nor payment date.
    dashboard_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "list",
            "--filter-by",
            "issueMonth",
            "--value",
            "2024-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-0002"))
        .stdout(predicate::str::contains("-"))
        .stdout(predicate::str::contains("Total: 3 invoices"));
}

#[test]
fn test_list_status_filter() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dashboard-config");
    init_config(&config_path);

    dashboard_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "list",
            "--filter-by",
            "status",
            "--value",
            "paymentOverdue",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-0004"))
        .stdout(predicate::str::contains("INV-0007"))
        .stdout(predicate::str::contains("INV-0001").not())
        .stdout(predicate::str::contains("Total: 2 invoices"));
}

#[test]
fn test_list_unknown_filter_kind_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dashboard-config");
    init_config(&config_path);

    dashboard_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "list",
            "--filter-by",
            "bogus",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown filter kind 'bogus'"));
}

#[test]
fn test_list_invalid_filter_value_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dashboard-config");
    init_config(&config_path);

    dashboard_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "list",
            "--filter-by",
            "issueMonth",
            "--value",
            "not-a-date",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value 'not-a-date'"));
}

#[test]
fn test_metrics_cards() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dashboard-config");
    init_config(&config_path);

    dashboard_cmd()
        .args(["-C", config_path.to_str().unwrap(), "metrics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Issued Invoices"))
        .stdout(predicate::str::contains("R$11,226.50"))
        .stdout(predicate::str::contains("Issued Invoices without Charges"))
        .stdout(predicate::str::contains("R$1,815.75"))
        .stdout(predicate::str::contains("Overdue Invoices - Delinquency"))
        .stdout(predicate::str::contains("R$2,040.75"))
        .stdout(predicate::str::contains("Invoices to be Paid"))
        .stdout(predicate::str::contains("R$2,100.00"))
        .stdout(predicate::str::contains("Paid Invoices"))
        .stdout(predicate::str::contains("R$5,270.00"));
}

#[test]
fn test_metrics_year_filter_with_no_matches_is_all_zero() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dashboard-config");
    init_config(&config_path);

    dashboard_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "metrics",
            "--filter-by",
            "year",
            "--value",
            "2019",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$0.00"))
        .stdout(predicate::str::contains("R$11,226.50").not());
}

#[test]
fn test_chart_year_series() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dashboard-config");
    init_config(&config_path);

    dashboard_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "chart",
            "--filter-by",
            "year",
            "--value",
            "2024",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("January"))
        .stdout(predicate::str::contains("December"))
        // February: INV-0005 paid, INV-0004 overdue
        .stdout(predicate::str::contains("R$3,300.00"))
        .stdout(predicate::str::contains("R$560.75"));
}

#[test]
fn test_chart_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dashboard-config");
    init_config(&config_path);

    dashboard_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "chart",
            "--filter-by",
            "year",
            "--value",
            "2024",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Paid Invoices\""))
        .stdout(predicate::str::contains("\"Delinquency amount\""))
        .stdout(predicate::str::contains("null"));
}

#[test]
fn test_link_and_query_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dashboard-config");
    init_config(&config_path);

    dashboard_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "list",
            "--filter-by",
            "status",
            "--value",
            "paymentOverdue",
            "--link",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "filter_by=status&filter_value=paymentOverdue",
        ));

    dashboard_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "list",
            "--query",
            "filter_by=status&filter_value=paymentOverdue",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-0004"))
        .stdout(predicate::str::contains("Total: 2 invoices"));
}

#[test]
fn test_query_with_unknown_kind_falls_back_to_no_filter() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dashboard-config");
    init_config(&config_path);

    dashboard_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "list",
            "--query",
            "filter_by=bogus&filter_value=2024",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 8 invoices"));
}

#[test]
fn test_profile() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dashboard-config");
    init_config(&config_path);

    dashboard_cmd()
        .args(["-C", config_path.to_str().unwrap(), "profile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Doe"))
        .stdout(predicate::str::contains("Financial Analyst"));
}

#[test]
fn test_fetch_failure_degrades_to_empty_state() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dashboard-config");
    init_config(&config_path);

    // Point the invoice source at a missing file.
    fs::write(
        config_path.join("config.toml"),
        r#"[data]
invoices = "missing/invoices.json"
profile = "sample/profile.json"

[display]
location = "en-us"
"#,
    )
    .unwrap();

    dashboard_cmd()
        .args(["-C", config_path.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No invoices to display."))
        .stderr(predicate::str::contains("Warning:"));
}

#[test]
fn test_invalid_location_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dashboard-config");
    init_config(&config_path);

    fs::write(
        config_path.join("config.toml"),
        r#"[data]
invoices = "sample/invoices.json"
profile = "sample/profile.json"

[display]
location = "fr-fr"
"#,
    )
    .unwrap();

    dashboard_cmd()
        .args(["-C", config_path.to_str().unwrap(), "metrics"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid location value 'fr-fr'"));
}

#[test]
fn test_cache_reuse_and_clear() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dashboard-config");
    init_config(&config_path);

    // First load populates the cache.
    dashboard_cmd()
        .args(["-C", config_path.to_str().unwrap(), "list"])
        .assert()
        .success();
    assert!(config_path.join("cache/invoices.json").exists());

    // Changing the source file does not affect cached loads.
    fs::write(config_path.join("sample/invoices.json"), "[]").unwrap();
    dashboard_cmd()
        .args(["-C", config_path.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 8 invoices"));

    // Clearing the cache makes the next load see the new source.
    dashboard_cmd()
        .args(["-C", config_path.to_str().unwrap(), "clear-cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared cached data"));

    dashboard_cmd()
        .args(["-C", config_path.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No invoices to display."));
}

#[test]
fn test_refresh_overwrites_cache() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dashboard-config");
    init_config(&config_path);

    // Populate the cache, then shrink the source.
    dashboard_cmd()
        .args(["-C", config_path.to_str().unwrap(), "list"])
        .assert()
        .success();
    fs::write(
        config_path.join("sample/invoices.json"),
        r#"[{ "id": "INV-9999", "issueDate": "2025-01-01", "billingDate": null,
             "paymentDate": null, "status": "Issued", "value": 10.0 }]"#,
    )
    .unwrap();

    dashboard_cmd()
        .args(["-C", config_path.to_str().unwrap(), "refresh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invoices: 1 records"));

    dashboard_cmd()
        .args(["-C", config_path.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-9999"))
        .stdout(predicate::str::contains("Total: 1 invoices"));
}
