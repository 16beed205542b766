//! Integration tests for the lintrc CLI
//!
//! These tests verify the CLI behavior end-to-end

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Helper function to create a test CLI command
#[allow(deprecated)]
fn cli() -> Command {
    let mut cmd = Command::cargo_bin("lintrc").unwrap();
    cmd.env_remove("NODE_ENV")
        .env_remove("RUST_LOG")
        .env_remove("LINTRC_LOG_FORMAT")
        .env("NO_COLOR", "1");
    cmd
}

/// Helper function to create a project holding the application config
fn create_test_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    cli()
        .current_dir(temp_dir.path())
        .args(["config", "init"])
        .assert()
        .success();

    fs::create_dir_all(temp_dir.path().join("src/components")).unwrap();
    fs::create_dir_all(temp_dir.path().join("tests/unit")).unwrap();
    fs::write(temp_dir.path().join("src/components/Widget.vue"), "<template/>\n").unwrap();
    fs::write(temp_dir.path().join("tests/unit/widget.spec.ts"), "").unwrap();

    temp_dir
}

fn print_config_json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = cli()
        .current_dir(dir.path())
        .args(["print-config", "--format", "json"])
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_help_command() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("print-config"))
        .stdout(predicate::str::contains("presets"));
}

#[test]
fn test_version_command() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(VERSION));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let temp_dir = create_test_project();
    assert!(temp_dir.path().join(".lintrc.json").exists());

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
}

#[test]
fn test_print_config_component_in_development() {
    let temp_dir = create_test_project();
    let json = print_config_json(&temp_dir, &["src/components/Widget.vue"]);
    let config = &json["src/components/Widget.vue"];

    assert_eq!(config["parser"], "vue-eslint-parser");
    assert_eq!(config["rules"]["no-console"], "off");
    assert_eq!(
        config["rules"]["vue/max-attributes-per-line"],
        serde_json::json!(["error", {"singleline": 3, "multiline": 1}])
    );
}

#[test]
fn test_mode_flag_and_node_env() {
    let temp_dir = create_test_project();

    let json = print_config_json(&temp_dir, &["--mode", "production", "src/main.ts"]);
    assert_eq!(json["src/main.ts"]["rules"]["no-debugger"], "warn");

    let output = cli()
        .current_dir(temp_dir.path())
        .env("NODE_ENV", "production")
        .args(["print-config", "--format", "json", "src/main.ts"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["src/main.ts"]["rules"]["no-console"], "warn");

    cli()
        .current_dir(temp_dir.path())
        .args(["--mode", "staging", "print-config", "src/main.ts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid mode"));
}

#[test]
fn test_print_config_multiple_files_human() {
    let temp_dir = create_test_project();

    cli()
        .current_dir(temp_dir.path())
        .args(["print-config", "tests/unit/widget.spec.ts", "src/main.ts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tests/unit/widget.spec.ts"))
        .stdout(predicate::str::contains("jest"))
        .stdout(predicate::str::contains("vue/html-indent"));
}

#[test]
fn test_print_config_nested_package_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("packages/web/src")).unwrap();
    fs::create_dir_all(temp_dir.path().join("other")).unwrap();
    fs::write(
        temp_dir.path().join(".lintrc.json"),
        r#"{"root": true, "rules": {"semi": "error"}}"#,
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("packages/web/.lintrc.json"),
        r#"{"rules": {"semi": "off"}}"#,
    )
    .unwrap();

    let json = print_config_json(&temp_dir, &["packages/web/src/a.js", "other/b.js"]);
    assert_eq!(json["packages/web/src/a.js"]["rules"]["semi"], "off");
    assert_eq!(json["other/b.js"]["rules"]["semi"], "error");

    let output = cli()
        .current_dir(temp_dir.path().join("packages/web"))
        .args(["print-config", "--format", "json", "../../other/b.js"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["../../other/b.js"]["rules"]["semi"], "error");

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("packages/web/.lintrc.json"));
}

#[test]
fn test_print_config_from_yaml_config() {
    let temp_dir = TempDir::new().unwrap();
    cli()
        .current_dir(temp_dir.path())
        .args(["config", "init", "--format", "yaml"])
        .assert()
        .success();
    assert!(temp_dir.path().join(".lintrc.yaml").exists());

    let json = print_config_json(&temp_dir, &["src/App.vue"]);
    assert_eq!(json["src/App.vue"]["rules"]["vue/html-indent"], serde_json::json!(["error", 2]));
}

#[test]
fn test_print_config_from_toml_config() {
    let temp_dir = TempDir::new().unwrap();
    cli()
        .current_dir(temp_dir.path())
        .args(["config", "init", "--format", "toml"])
        .assert()
        .success();

    let json = print_config_json(&temp_dir, &["src/App.vue"]);
    assert_eq!(json["src/App.vue"]["rules"]["vue/no-v-html"], "warn");
}

#[test]
fn test_config_validate_reports_unmatched_patterns() {
    let temp_dir = create_test_project();

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("**/__tests__/*.{j,t}s?(x)"))
        .stdout(predicate::str::contains("does not match any file"));
}

#[test]
fn test_config_validate_invalid_severity() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".lintrc.json"),
        r#"{"root": true, "rules": {"no-console": "loud"}}"#,
    )
    .unwrap();

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-console"));
}

#[test]
fn test_config_validate_unknown_preset() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("custom.json");
    fs::write(&config, r#"{"extends": ["plugin:react/recommended"]}"#).unwrap();

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "validate", "custom.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("plugin:react/recommended"));
}

#[test]
fn test_config_show() {
    let temp_dir = create_test_project();

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".lintrc.json"))
        .stdout(predicate::str::contains("@vue/prettier/@typescript-eslint"));

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "show", "--resolved"])
        .assert()
        .success()
        .stdout(predicate::str::contains("preset 'plugin:vue/base'"))
        .stdout(predicate::str::contains("#overrides[0]"))
        .stdout(predicate::str::contains("Base configuration:"));
}

#[test]
fn test_config_schema() {
    cli()
        .args(["config", "schema"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"properties\""))
        .stdout(predicate::str::contains("ignorePatterns"));
}

#[test]
fn test_presets_command() {
    cli()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("plugin:vue/vue3-recommended"))
        .stdout(predicate::str::contains("@vue/typescript/recommended"));
}

#[test]
fn test_rules_command() {
    cli()
        .args(["rules", "--plugin", "vue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vue/max-attributes-per-line"))
        .stdout(predicate::str::contains("no-console").not());

    cli()
        .args(["rules", "--plugin", "angular"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown plugin"));
}

#[test]
fn test_missing_config_fails() {
    let temp_dir = TempDir::new().unwrap();

    cli()
        .current_dir(temp_dir.path())
        .args(["--config", "nope.json", "print-config", "a.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_completion_generation() {
    cli()
        .args(["--generate-completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lintrc"));
}
