//! End-to-end resolution of the bundled application configuration and of
//! configurations loaded from disk

use lintrc_core::config::CONFIG_FILE_NAMES;
use lintrc_core::project::{PROJECT_CONFIG_NAME, vue_typescript_app, vue_typescript_app_value};
use lintrc_core::{
    BuildMode, ConfigArray, ConfigLoader, LintrcError, LoadOptions, PresetRegistry, Severity,
    check_config_array,
};
use rayon::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn app_array(mode: BuildMode) -> ConfigArray {
    let registry = PresetRegistry::builtin().unwrap();
    let config = vue_typescript_app().unwrap();
    ConfigArray::builder(&registry, mode, Path::new("/workspace/app"))
        .add_inline(PROJECT_CONFIG_NAME, &config)
        .unwrap()
        .build()
        .unwrap()
}

#[test]
fn test_component_file_in_development() {
    let array = app_array(BuildMode::Development);
    let config = array.resolve("src/components/Widget.vue");

    assert_eq!(config.severity("no-console"), Severity::Off);
    assert_eq!(config.severity("no-debugger"), Severity::Off);

    let max_attrs = config.rule("vue/max-attributes-per-line").unwrap();
    assert_eq!(max_attrs.severity, Severity::Error);
    assert_eq!(max_attrs.options, vec![json!({"singleline": 3, "multiline": 1})]);

    assert_eq!(config.parser.as_deref(), Some("vue-eslint-parser"));
    assert_eq!(
        config.parser_options.parser.as_deref(),
        Some("@typescript-eslint/parser")
    );
    assert_eq!(config.parser_options.ecma_version, Some(2021));
    assert!(
        !config
            .matched_overrides
            .iter()
            .any(|name| name.starts_with(PROJECT_CONFIG_NAME))
    );
    assert!(!config.env.get("jest").copied().unwrap_or(false));
}

#[test]
fn test_production_mode_warns_on_console_and_debugger() {
    let array = app_array(BuildMode::Production);
    let config = array.resolve("src/main.ts");

    assert_eq!(config.severity("no-console"), Severity::Warn);
    assert_eq!(config.severity("no-debugger"), Severity::Warn);
}

#[test]
fn test_unit_test_file_gets_jest_environment() {
    let array = app_array(BuildMode::Development);
    let spec = array.resolve("tests/unit/foo.spec.ts");
    let source = array.resolve("src/foo.ts");

    assert_eq!(spec.env.get("jest"), Some(&true));
    assert!(spec.is_global("describe"));
    assert!(spec.is_global("expect"));
    assert!(!source.is_global("describe"));

    // the override only adds an environment, every rule is untouched
    assert_eq!(spec.rules, source.rules);
    assert!(spec
        .matched_overrides
        .iter()
        .any(|name| name == "vue-typescript-app#overrides[0]"));
}

#[test]
fn test_both_test_patterns_match() {
    let array = app_array(BuildMode::Development);

    for file in [
        "src/components/__tests__/Button.js",
        "src/components/__tests__/Button.tsx",
        "tests/unit/store/cart.spec.jsx",
        "tests/unit/a/b/c.spec.ts",
    ] {
        assert_eq!(array.resolve(file).env.get("jest"), Some(&true), "{file}");
    }

    for file in [
        "src/components/__tests__/nested/Button.js",
        "tests/e2e/login.spec.ts",
        "tests/unit/helper.ts",
        "src/components/__tests__/Button.vue",
    ] {
        assert_eq!(array.resolve(file).env.get("jest"), None, "{file}");
    }
}

#[test]
fn test_non_matching_file_equals_base_config() {
    let array = app_array(BuildMode::Development);
    // plain script files match none of the preset or project overrides
    let resolved = array.resolve("src/main.js");
    assert_eq!(*resolved, array.base_config());
}

#[test]
fn test_resolution_is_idempotent_and_memoized() {
    let array = app_array(BuildMode::Development);

    let first = array.resolve("src/views/Home.vue");
    let second = array.resolve("src/views/Home.vue");
    let sibling = array.resolve("src/views/About.vue");

    assert_eq!(first, second);
    assert!(Arc::ptr_eq(&first, &sibling));
    assert_eq!(array.cached_configs(), 1);
}

#[test]
fn test_parallel_resolution_matches_sequential() {
    let array = app_array(BuildMode::Production);
    let files: Vec<String> = (0..64)
        .map(|i| match i % 3 {
            0 => format!("src/components/C{i}.vue"),
            1 => format!("tests/unit/c{i}.spec.ts"),
            _ => format!("src/__tests__/c{i}.js"),
        })
        .collect();

    let parallel: Vec<_> = files.par_iter().map(|f| array.resolve(f)).collect();
    for (file, config) in files.iter().zip(&parallel) {
        assert_eq!(**config, *array.resolve(file));
    }
    // components, TypeScript specs and __tests__ scripts each match a different override set
    assert_eq!(array.cached_configs(), 3);
}

#[test]
fn test_preset_order_matters() {
    let registry = PresetRegistry::builtin().unwrap();
    let mut value = vue_typescript_app_value();
    value["rules"] = json!({});
    let config = lintrc_core::LintConfig::from_json_value(value, "no-rules").unwrap();

    let array = ConfigArray::builder(&registry, BuildMode::Development, Path::new("/app"))
        .add_inline("no-rules", &config)
        .unwrap()
        .build()
        .unwrap();
    let resolved = array.resolve("src/App.vue");

    // prettier comes after the vue preset and switches its formatting rules off
    assert_eq!(resolved.severity("vue/html-indent"), Severity::Off);
    assert_eq!(resolved.severity("vue/max-attributes-per-line"), Severity::Off);
    assert_eq!(resolved.severity("vue/no-v-html"), Severity::Warn);
    assert_eq!(resolved.severity("prettier/prettier"), Severity::Warn);
}

#[test]
fn test_written_project_config_loads_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(CONFIG_FILE_NAMES[0]);
    fs::write(
        &path,
        serde_json::to_string_pretty(&vue_typescript_app_value()).unwrap(),
    )
    .unwrap();
    fs::create_dir_all(temp_dir.path().join("src/components")).unwrap();

    let registry = PresetRegistry::builtin().unwrap();
    let options = LoadOptions::new(temp_dir.path().join("src/components"), BuildMode::Production);
    let array = ConfigLoader::build(&options, &registry).unwrap();

    let config = array.resolve("Widget.vue");
    assert_eq!(config.severity("no-console"), Severity::Warn);
    assert_eq!(config.severity("vue/html-indent"), Severity::Error);
}

#[test]
fn test_jsonc_config_with_overrides_and_excluded_files() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".lintrc.jsonc"),
        r#"{
            // project root
            "root": true,
            "extends": "eslint:recommended",
            "overrides": [
                {
                    "files": "*.js",
                    "excludedFiles": "*.config.js",
                    "rules": { "no-var": 2, },
                },
            ],
        }"#,
    )
    .unwrap();

    let options = LoadOptions::new(temp_dir.path(), BuildMode::Development);
    let array = ConfigLoader::build(&options, &PresetRegistry::builtin().unwrap()).unwrap();

    assert_eq!(array.resolve("lib/index.js").severity("no-var"), Severity::Error);
    assert_eq!(array.resolve("vite.config.js").severity("no-var"), Severity::Off);
    assert_eq!(array.resolve("lib/index.ts").severity("no-var"), Severity::Off);
}

#[test]
fn test_disjoint_overrides_apply_independently() {
    let registry = PresetRegistry::builtin().unwrap();
    let config = lintrc_core::LintConfig::from_json_value(
        json!({
            "overrides": [
                {"files": ["*.ts"], "rules": {"no-var": "error"}},
                {"files": ["*.js"], "rules": {"prefer-const": "warn"}}
            ]
        }),
        "disjoint",
    )
    .unwrap();
    let array = ConfigArray::builder(&registry, BuildMode::Development, Path::new("/p"))
        .add_inline("disjoint", &config)
        .unwrap()
        .build()
        .unwrap();

    let ts = array.resolve("a.ts");
    assert_eq!(ts.severity("no-var"), Severity::Error);
    assert_eq!(ts.severity("prefer-const"), Severity::Off);

    let js = array.resolve("a.js");
    assert_eq!(js.severity("no-var"), Severity::Off);
    assert_eq!(js.severity("prefer-const"), Severity::Warn);
}

#[test]
fn test_file_extends_cycle_is_detected() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".lintrc.json"),
        r#"{"root": true, "extends": "./a.json"}"#,
    )
    .unwrap();
    fs::write(temp_dir.path().join("a.json"), r#"{"extends": "./b.json"}"#).unwrap();
    fs::write(temp_dir.path().join("b.json"), r#"{"extends": "./a.json"}"#).unwrap();

    let options = LoadOptions::new(temp_dir.path(), BuildMode::Development);
    let err = ConfigLoader::build(&options, &PresetRegistry::builtin().unwrap()).unwrap_err();
    match err {
        LintrcError::CircularExtends { chain } => {
            assert!(chain.contains("a.json -> "), "{chain}");
            assert!(chain.ends_with("a.json"), "{chain}");
        }
        other => panic!("expected CircularExtends, got {other:?}"),
    }
}

#[test]
fn test_invalid_rule_value_names_its_source() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".lintrc.yaml"),
        "root: true\nrules:\n  semi: loud\n",
    )
    .unwrap();

    let options = LoadOptions::new(temp_dir.path(), BuildMode::Development);
    let err = ConfigLoader::build(&options, &PresetRegistry::builtin().unwrap()).unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, LintrcError::InvalidSeverity { .. }));
    assert!(message.contains("semi"), "{message}");
    assert!(message.contains(".lintrc.yaml"), "{message}");
}

#[test]
fn test_pattern_check_on_project_tree() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".lintrc.json"),
        serde_json::to_string(&vue_typescript_app_value()).unwrap(),
    )
    .unwrap();
    fs::create_dir_all(temp_dir.path().join("tests/unit")).unwrap();
    fs::write(temp_dir.path().join("tests/unit/app.spec.ts"), "").unwrap();

    let options = LoadOptions::new(temp_dir.path(), BuildMode::Development);
    let array = ConfigLoader::build(&options, &PresetRegistry::builtin().unwrap()).unwrap();
    let warnings = check_config_array(&array, temp_dir.path()).unwrap();

    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].to_string().contains("**/__tests__/*.{j,t}s?(x)"));
}
