//! CLI integration tests
//!
//! These tests run the built `filterx` binary and check its stdout, stderr
//! and exit status.

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn filterx(args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_filterx");
    Command::new(cli_bin)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_show_prints_outline() {
    let output = filterx(&["show", "host=web1&(state=1|state=2)", "--add-to", "2"]);
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "0 AND\n  1 host = web1\n  2 OR\n    2-1 state = 1\n    2-2 state = 2\n    + <new>\n"
    );
}

#[test]
fn test_show_json() {
    let output = filterx(&["show", "?state!=(0|1)", "--json"]);
    assert_success(&output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["type"], "expression");
    assert_eq!(json["sign"], "!=");
    assert_eq!(json["value"][1], "1");
}

#[test]
fn test_apply_prints_new_query() {
    // AND at the root: operator_0=AND plus a new node at 0
    let output = filterx(&[
        "apply",
        "host=web1",
        "--field",
        "operator_new_0=AND",
        "--field",
        "column_new_0=state",
        "--field",
        "sign_new_0=!=",
        "--field",
        "value_new_0=0",
    ]);
    assert_success(&output);
    assert_eq!(stdout(&output), "host=web1&state!=0\n");
}

#[test]
fn test_handle_remove_redirects() {
    let output = filterx(&["handle", "a=1&b=2&c=3&removeFilter=2"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "redirect: ?a=1&c=3&modifyFilter=1\n");
}

#[test]
fn test_handle_uses_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("filterx.toml");
    fs::write(
        &config_path,
        "preserve_params = [\"sort\"]\ncancel_label = \"Abort\"\n",
    )
    .unwrap();

    let output = filterx(&[
        "handle",
        "a=1&sort=name&modifyFilter=1",
        "--field",
        "cancel=Abort",
        "--config",
        config_path.to_str().unwrap(),
    ]);
    assert_success(&output);
    assert_eq!(stdout(&output), "redirect: ?a=1&sort=name\n");
}

#[test]
fn test_handle_idle_prints_summary() {
    let output = filterx(&["handle", "host=web1&state=0"]);
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "filter: (host = web1 AND state = 0)\nedit: ?host=web1&state=0&modifyFilter=1\n"
    );
}

#[test]
fn test_errors_print_code_and_exit_1() {
    let output = filterx(&["apply", "a=1", "--field", "value_7=x"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.starts_with("Error: [ERR_NOT_FOUND]"),
        "unexpected stderr: {}",
        stderr
    );

    let output = filterx(&["show", "a=1)"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_INVALID_ENCODING"));
}

#[test]
fn test_malformed_field_argument_fails() {
    let output = filterx(&["apply", "a=1", "--field", "no_equals_sign"]);
    assert_eq!(output.status.code(), Some(1));
}
