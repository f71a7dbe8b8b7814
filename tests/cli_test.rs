//! Integration tests for the template-manager CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn command(templates_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("template-manager").unwrap();
    cmd.arg("--templates-dir").arg(templates_dir.path());
    cmd
}

#[test]
fn test_list_tools_command() {
    let mut cmd = Command::cargo_bin("template-manager").unwrap();

    cmd.arg("list-tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available tools:"))
        .stdout(predicate::str::contains("create_template"))
        .stdout(predicate::str::contains("validate_template"))
        .stdout(predicate::str::contains("fix_template_branches"))
        .stdout(predicate::str::contains("rename_template"))
        .stdout(predicate::str::contains("list_templates"));
}

#[test]
fn test_call_list_templates_on_empty_root() {
    let temp_dir = TempDir::new().unwrap();

    command(&temp_dir)
        .args(["call", "list_templates"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No BillPay templates found"));
}

#[test]
fn test_call_create_then_list() {
    let temp_dir = TempDir::new().unwrap();

    command(&temp_dir)
        .args([
            "call",
            "create_template",
            "--args",
            r#"{"template_name": "payments", "template_type": "simple-deployment", "description": "Payments service"}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "✅ Template 'billpay-payments' created successfully",
        ))
        .stdout(predicate::str::contains(
            "🔧 Steps: fetch, publish, register, trigger-deployment",
        ));

    assert!(temp_dir.path().join("billpay-payments/template.yaml").is_file());

    command(&temp_dir)
        .args(["call", "list_templates"])
        .assert()
        .success()
        .stdout(predicate::str::contains("📋 BillPay Templates:"))
        .stdout(predicate::str::contains("billpay-payments"))
        .stdout(predicate::str::contains("BillPay Payments"));
}

#[test]
fn test_call_unknown_tool_reports_text() {
    let temp_dir = TempDir::new().unwrap();

    command(&temp_dir)
        .args(["call", "delete_template"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown tool: delete_template"));
}

#[test]
fn test_call_with_missing_arguments_fails() {
    let temp_dir = TempDir::new().unwrap();

    command(&temp_dir)
        .args(["call", "validate_template", "--args", "{}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("template_name"));
}

#[test]
fn test_call_rejects_non_object_arguments() {
    let temp_dir = TempDir::new().unwrap();

    command(&temp_dir)
        .args(["call", "list_templates", "--args", "[1, 2]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a JSON object"));
}

#[test]
fn test_call_create_with_unknown_type_names_it() {
    let temp_dir = TempDir::new().unwrap();

    command(&temp_dir)
        .args([
            "call",
            "create_template",
            "--args",
            r#"{"template_name": "fn", "template_type": "lambda", "description": "Function"}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "❌ Invalid template type 'lambda'. Use: repository-creation, simple-deployment, complete-stack",
        ));

    assert!(!temp_dir.path().join("billpay-fn").exists());
}
