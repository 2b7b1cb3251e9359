//! Integration tests for the bqshift CLI
//!
//! These tests run the actual CLI binary and verify output.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get the binary to test, isolated from ambient transfer settings
fn bqshift_cmd() -> Command {
    let mut cmd = Command::cargo_bin("bqshift").unwrap();
    cmd.env_remove("BQSHIFT_TABLE_LIST")
        .env_remove("BQSHIFT_SOURCE_BUCKET")
        .env_remove("BQSHIFT_DEST_BUCKET");
    cmd
}

fn write_table_list(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("table_list.csv");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_help_flag() {
    bqshift_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "build cross-region BigQuery transfer plans",
        ));
}

#[test]
fn test_plan_emits_yaml_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let table_list = write_table_list(&temp_dir, "source,dest\nproj:ds.src,proj:ds.dst\n");

    bqshift_cmd()
        .args([
            "plan",
            "--table-list",
            table_list.to_str().unwrap(),
            "--source-bucket",
            "us-staging",
            "--dest-bucket",
            "eu-staging",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("proj_ds.src_export"))
        .stdout(predicate::str::contains("proj_ds.src_relocate"))
        .stdout(predicate::str::contains("proj_ds.dst_import"))
        .stdout(predicate::str::contains("WRITE_TRUNCATE"));
}

#[test]
fn test_plan_json_format() {
    let temp_dir = TempDir::new().unwrap();
    let table_list = write_table_list(&temp_dir, "source,dest\na:d.t,a:d.u\n");

    bqshift_cmd()
        .args([
            "plan",
            "--table-list",
            table_list.to_str().unwrap(),
            "--source-bucket",
            "b1",
            "--dest-bucket",
            "b2",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"export_to_storage\""))
        .stdout(predicate::str::contains("\"retries\": 1"));
}

#[test]
fn test_plan_writes_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let table_list = write_table_list(&temp_dir, "source,dest\na:d.t,a:d.u\n");
    let out = temp_dir.path().join("plan.yaml");

    bqshift_cmd()
        .args([
            "plan",
            "--table-list",
            table_list.to_str().unwrap(),
            "--source-bucket",
            "b1",
            "--dest-bucket",
            "b2",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote plan"));

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("a_d.t_export"));
}

#[test]
fn test_plan_missing_table_list_setting() {
    bqshift_cmd()
        .args(["plan", "--source-bucket", "b1", "--dest-bucket", "b2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("BQSH-021"))
        .stderr(predicate::str::contains("--table-list"));
}

#[test]
fn test_plan_unreadable_table_list() {
    bqshift_cmd()
        .args([
            "plan",
            "--table-list",
            "/no/such/file.csv",
            "--source-bucket",
            "b1",
            "--dest-bucket",
            "b2",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("BQSH-001"));
}

#[test]
fn test_validate_reports_counts() {
    let temp_dir = TempDir::new().unwrap();
    let table_list = write_table_list(&temp_dir, "source,dest\na:d.t1,a:d.u1\na:d.t2,a:d.u2\n");

    bqshift_cmd()
        .args([
            "validate",
            "--table-list",
            table_list.to_str().unwrap(),
            "--source-bucket",
            "b1",
            "--dest-bucket",
            "b2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"))
        .stdout(predicate::str::contains("Tables: 2"))
        .stdout(predicate::str::contains("Nodes: 8"))
        .stdout(predicate::str::contains("Chains: 2"));
}

#[test]
fn test_validate_warns_on_duplicates() {
    let temp_dir = TempDir::new().unwrap();
    let table_list = write_table_list(&temp_dir, "source,dest\na:d.t,a:d.u\na:d.t,a:d.u\n");

    bqshift_cmd()
        .args([
            "validate",
            "--table-list",
            table_list.to_str().unwrap(),
            "--source-bucket",
            "b1",
            "--dest-bucket",
            "b2",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("duplicate step id"));
}

#[test]
fn test_validate_strict_fails_on_duplicates() {
    let temp_dir = TempDir::new().unwrap();
    let table_list = write_table_list(&temp_dir, "source,dest\na:d.t,a:d.u\na:d.t,a:d.u\n");

    bqshift_cmd()
        .args([
            "validate",
            "--table-list",
            table_list.to_str().unwrap(),
            "--source-bucket",
            "b1",
            "--dest-bucket",
            "b2",
            "--strict",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("BQSH-012"));
}

#[test]
fn test_validate_malformed_row_fails() {
    let temp_dir = TempDir::new().unwrap();
    let table_list = write_table_list(&temp_dir, "source,dest\nonly_one_field\n");

    bqshift_cmd()
        .args([
            "validate",
            "--table-list",
            table_list.to_str().unwrap(),
            "--source-bucket",
            "b1",
            "--dest-bucket",
            "b2",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("BQSH-002"));
}

#[test]
fn test_image_get_with_mock_service() {
    bqshift_cmd()
        .args([
            "image",
            "get",
            "my-project",
            "debian-12-bookworm",
            "--service",
            "mock",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"debian-12-bookworm\""))
        .stdout(predicate::str::contains("READY"));
}

#[test]
fn test_image_from_family_with_mock_service() {
    bqshift_cmd()
        .args([
            "image",
            "from-family",
            "my-project",
            "debian-12",
            "--service",
            "mock",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"family\": \"debian-12\""));
}

#[test]
fn test_config_path_points_at_bqshift() {
    bqshift_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bqshift"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_image_unknown_service() {
    bqshift_cmd()
        .args(["image", "get", "p", "img", "--service", "aws"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("BQSH-031"));
}
