use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn docq() -> Command {
    let mut cmd = Command::cargo_bin("docq").expect("bin");
    cmd.env_remove("NO_COLOR");
    cmd
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let text = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(text.trim_end()).expect("stdout should be JSON")
}

#[test]
fn version_short_circuits() {
    docq()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "docq version v{}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn version_is_printed_before_validation() {
    docq()
        .args(["-V", "-f", "bogus"])
        .assert()
        .success()
        .stdout(predicate::str::contains("docq version v"));
}

#[test]
fn json_plan_with_positional_expression_and_files() {
    let assert = docq()
        .args(["-o", "json", ".spec.replicas", "deploy.yaml", "svc.yaml"])
        .assert()
        .success();
    let value = stdout_json(assert.get_output());

    assert_eq!(value["expression"]["source"], "positional");
    assert_eq!(value["expression"]["value"], ".spec.replicas");
    assert_eq!(value["options"]["files"][0], "deploy.yaml");
    assert_eq!(value["options"]["files"][1], "svc.yaml");
    assert_eq!(value["options"]["unwrap_scalar"], false);
}

#[test]
fn explicit_expression_turns_positionals_into_files() {
    let assert = docq()
        .args(["-j", "--expression", ".a", "first.yaml"])
        .assert()
        .success();
    let value = stdout_json(assert.get_output());

    assert_eq!(value["expression"]["source"], "inline");
    assert_eq!(value["options"]["positional_expression"], serde_json::Value::Null);
    assert_eq!(value["options"]["files"][0], "first.yaml");
}

#[test]
fn invalid_front_matter_exits_with_config_code() {
    docq()
        .args(["-f", "frontmatter", "."])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("front_matter"));
}

#[test]
fn unknown_output_format_exits_with_config_code() {
    docq()
        .args(["-o", "hcl", "."])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown format 'hcl'"));
}

#[test]
fn inplace_without_files_is_rejected() {
    docq()
        .args(["-i", ".a = 1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("write_inplace"));
}

#[test]
fn missing_expression_file_is_rejected() {
    docq()
        .args(["--from-file", "/no/such/expression.yq"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read expression file"));
}

#[test]
fn expression_file_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let expr = dir.path().join("names.yq");
    fs::write(&expr, ".[] | .name\n").unwrap();

    let assert = docq()
        .arg("-j")
        .arg("--from-file")
        .arg(&expr)
        .arg("people.yaml")
        .assert()
        .success();
    let value = stdout_json(assert.get_output());

    assert_eq!(value["expression"]["source"], "file");
    assert_eq!(value["options"]["files"][0], "people.yaml");
}

#[test]
fn exit_status_is_success_after_completed_run() {
    docq().args(["-e", "."]).assert().success();
}

#[test]
fn nul_separated_output() {
    let assert = docq().args(["-0", "."]).assert().success();
    let stdout = &assert.get_output().stdout;
    assert_eq!(stdout.last(), Some(&0u8));
}

#[test]
fn no_colors_wins_over_colors() {
    let assert = docq()
        .args(["-j", "-C", "-M", "."])
        .assert()
        .success()
        .stderr(predicate::str::contains("colors are disabled"))
        .stderr(predicate::str::contains("\x1b[").not());
    let value = stdout_json(assert.get_output());
    assert_eq!(value["options"]["colors_enabled"], false);
    assert_eq!(value["options"]["color"], "suppress");
}

#[test]
fn warnings_on_piped_stderr_are_plain() {
    docq()
        .args(["-j", "-o", "yaml", "."])
        .assert()
        .success()
        .stderr(predicate::str::contains("WARN"))
        .stderr(predicate::str::contains("\x1b[").not());
}

#[test]
fn explicit_unwrap_flag() {
    let assert = docq()
        .args(["-j", "-r", "."])
        .assert()
        .success();
    assert_eq!(stdout_json(assert.get_output())["options"]["unwrap_scalar"], true);

    let assert = docq()
        .args(["-o", "yaml", "-r=false", "-I", "0", "-j", "."])
        .assert()
        .success();
    assert_eq!(stdout_json(assert.get_output())["options"]["unwrap_scalar"], false);
}

#[test]
fn options_file_under_flags() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("docq.yaml");
    fs::write(&settings, "output_format: json\nindent: 8\nfront_matter: extract\n").unwrap();

    let assert = docq()
        .arg("--options-file")
        .arg(&settings)
        .args(["-I", "3", "."])
        .assert()
        .success();
    let value = stdout_json(assert.get_output());

    assert_eq!(value["options"]["indent"], 3);
    assert_eq!(value["options"]["front_matter"], "extract");
    assert_eq!(value["options"]["output_format"], "json");
}

#[test]
fn unreadable_options_file_is_rejected() {
    docq()
        .args(["--options-file", "/no/such/docq.toml", "."])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read settings file"));
}

#[test]
fn options_file_expression_turns_positionals_into_files() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("docq.yaml");
    fs::write(&settings, "force_expression: .a\n").unwrap();

    let assert = docq()
        .arg("--options-file")
        .arg(&settings)
        .args(["-j", "in.yaml"])
        .assert()
        .success()
        .stderr(predicate::str::contains("more than one expression source").not());
    let value = stdout_json(assert.get_output());
    assert_eq!(value["expression"]["source"], "inline");
    assert_eq!(value["expression"]["value"], ".a");
    assert_eq!(value["options"]["positional_expression"], serde_json::Value::Null);
    assert_eq!(value["options"]["files"][0], "in.yaml");

    docq()
        .arg("--options-file")
        .arg(&settings)
        .args(["-i", "in.yaml"])
        .assert()
        .success();
}

#[test]
fn rendered_front_matter_is_accepted_back() {
    let assert = docq().args(["-j", "."]).assert().success();
    let value = stdout_json(assert.get_output());
    assert_eq!(value["options"]["front_matter"], "");

    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("docq.json");
    let front_matter = serde_json::json!({ "front_matter": value["options"]["front_matter"] });
    fs::write(&settings, front_matter.to_string()).unwrap();
    docq()
        .arg("--options-file")
        .arg(&settings)
        .arg(".")
        .assert()
        .success();
}
