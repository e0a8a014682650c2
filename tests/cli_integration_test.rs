// CLI tests: exit codes and stream routing of the hostfn-audit binary.

use assert_cmd::prelude::*;
use hostfn_audit::testkit::AuditFixture;
use std::process::{Command, Output};
use tempfile::TempDir;

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hostfn-audit"));
    cmd.env_remove("HOSTFN_AUDIT_LOG").env("NO_COLOR", "1");
    cmd
}

fn layout(fixture: &AuditFixture) -> (TempDir, TempDir) {
    let host = TempDir::new().unwrap();
    let bindings = TempDir::new().unwrap();
    fixture.write_to(host.path(), bindings.path()).unwrap();
    (host, bindings)
}

fn audit(host: &TempDir, bindings: &TempDir, extra: &[&str]) -> Output {
    bin()
        .arg(host.path())
        .arg("--bindings-root")
        .arg(bindings.path())
        .arg("--plain")
        .args(extra)
        .output()
        .unwrap()
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[test]
fn test_matching_tree_exits_zero() {
    let (host, bindings) = layout(&AuditFixture::standard());

    let output = audit(&host, &bindings, &[]);
    output.clone().assert().code(0);

    let stdout = text(&output.stdout);
    assert!(stdout.contains("All host functions match"));
    assert!(stdout.contains("[OK] host_bindings: 5 host functions match"));
    assert!(text(&output.stderr).is_empty());
}

#[test]
fn test_mismatch_exits_one_and_names_the_function() {
    let mut fixture = AuditFixture::standard();
    fixture.testing[4] = fixture.testing[4].clone().with_guest_param_type(2, "i32");
    let (host, bindings) = layout(&fixture);

    let output = audit(&host, &bindings, &[]);
    output.clone().assert().code(1);

    let stderr = text(&output.stderr);
    assert!(stderr.contains("host_bindings_for_testing [index 4]"));
    assert!(stderr.contains("trace_num"));
    assert!(stderr.contains("parameter 2"));
    assert!(!stderr.contains("host_bindings [index"));
    assert!(text(&output.stdout).contains("[OK] host_bindings: 5 host functions match"));
}

#[test]
fn test_unknown_type_exits_one_without_results() {
    let mut fixture = AuditFixture::standard();
    fixture.primary[0] = fixture.primary[0].clone().with_guest_param_type(0, "*mut u16");
    let (host, bindings) = layout(&fixture);

    let output = audit(&host, &bindings, &[]);
    output.clone().assert().code(1);

    assert!(text(&output.stdout).is_empty());
    let stderr = text(&output.stderr);
    assert!(stderr.contains("*mut u16"));
    assert_eq!(stderr.lines().count(), 1);
}

#[test]
fn test_missing_source_root_is_a_read_error() {
    let bindings = TempDir::new().unwrap();
    let missing = bindings.path().join("no-such-rippled");

    let output = bin()
        .arg(&missing)
        .arg("--bindings-root")
        .arg(bindings.path())
        .output()
        .unwrap();
    output.clone().assert().code(1);
    assert!(text(&output.stderr).contains("File not found"));
}

#[test]
fn test_json_format_writes_one_document() {
    let (host, bindings) = layout(&AuditFixture::standard());

    let output = audit(&host, &bindings, &["--format", "json"]);
    output.clone().assert().code(0);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], 0);
    assert_eq!(json["candidates"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_no_arguments_is_a_usage_error() {
    let output = bin().output().unwrap();
    output.clone().assert().code(1);
    assert!(text(&output.stderr).contains("Usage"));
}

#[test]
fn test_two_arguments_is_a_usage_error() {
    bin().args(["a", "b"]).assert().code(1);
}

#[test]
fn test_help_exits_zero() {
    bin().arg("--help").assert().code(0);
}
