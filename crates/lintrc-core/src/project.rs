//! The lint configuration of the Vue 3 + TypeScript application
//!
//! Bundled so the application's rules can be resolved, printed and written
//! out (`lintrc config init`) without a file on disk.

use crate::Result;
use crate::config::LintConfig;
use serde_json::{Value, json};

/// Name the bundled configuration reports as its source
pub const PROJECT_CONFIG_NAME: &str = "vue-typescript-app";

/// Test file patterns that get the `jest` environment
pub const TEST_FILE_PATTERNS: [&str; 2] = [
    "**/__tests__/*.{j,t}s?(x)",
    "**/tests/unit/**/*.spec.{j,t}s?(x)",
];

/// The application configuration as it would appear in `.lintrc.json`
pub fn vue_typescript_app_value() -> Value {
    json!({
        "root": true,
        "env": {
            "node": true,
            "browser": true,
            "es2021": true
        },
        "extends": [
            "plugin:vue/vue3-recommended",
            "eslint:recommended",
            "@vue/typescript/recommended",
            "@vue/prettier",
            "@vue/prettier/@typescript-eslint"
        ],
        "parserOptions": {
            "ecmaVersion": 2021,
            "parser": "@typescript-eslint/parser"
        },
        "rules": {
            "no-console": {"production": "warn", "development": "off"},
            "no-debugger": {"production": "warn", "development": "off"},
            "vue/no-unused-components": "warn",
            "vue/multi-word-component-names": "warn",
            "@typescript-eslint/no-explicit-any": "warn",
            "@typescript-eslint/explicit-module-boundary-types": "off",
            "vue/attribute-hyphenation": "error",
            "vue/html-closing-bracket-newline": "error",
            "vue/html-closing-bracket-spacing": "error",
            "vue/html-end-tags": "error",
            "vue/html-indent": ["error", 2],
            "vue/html-quotes": "error",
            "vue/max-attributes-per-line": ["error", {"singleline": 3, "multiline": 1}],
            "vue/no-v-html": "warn",
            "prettier/prettier": ["error", {
                "singleQuote": true,
                "semi": false,
                "trailingComma": "none",
                "printWidth": 100
            }]
        },
        "overrides": [{
            "files": TEST_FILE_PATTERNS,
            "env": {"jest": true}
        }]
    })
}

/// The application configuration
pub fn vue_typescript_app() -> Result<LintConfig> {
    LintConfig::from_json_value(vue_typescript_app_value(), PROJECT_CONFIG_NAME)
}
