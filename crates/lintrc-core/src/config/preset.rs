//! Built-in presets and plugin rule catalogs
//!
//! The registry answers two questions for the resolver: what does an
//! `extends` name expand to, and is a rule id provided by anything loaded.

use super::lint_config::LintConfig;
use crate::Result;
use indexmap::IndexMap;
use serde_json::json;

/// A plugin: a name as written in `plugins` plus the rule ids it provides
#[derive(Debug, Clone)]
pub struct Plugin {
    pub name: &'static str,
    pub rules: &'static [&'static str],
}

/// Rules every config may reference without loading a plugin
pub const CORE_RULES: &[&str] = &[
    "arrow-body-style",
    "constructor-super",
    "curly",
    "eqeqeq",
    "for-direction",
    "getter-return",
    "indent",
    "no-array-constructor",
    "no-async-promise-executor",
    "no-case-declarations",
    "no-class-assign",
    "no-compare-neg-zero",
    "no-cond-assign",
    "no-console",
    "no-const-assign",
    "no-constant-condition",
    "no-control-regex",
    "no-debugger",
    "no-delete-var",
    "no-dupe-args",
    "no-dupe-class-members",
    "no-dupe-else-if",
    "no-dupe-keys",
    "no-duplicate-case",
    "no-empty",
    "no-empty-character-class",
    "no-empty-function",
    "no-empty-pattern",
    "no-ex-assign",
    "no-extra-boolean-cast",
    "no-extra-semi",
    "no-fallthrough",
    "no-func-assign",
    "no-global-assign",
    "no-import-assign",
    "no-inner-declarations",
    "no-invalid-regexp",
    "no-irregular-whitespace",
    "no-misleading-character-class",
    "no-mixed-spaces-and-tabs",
    "no-new-symbol",
    "no-obj-calls",
    "no-octal",
    "no-prototype-builtins",
    "no-redeclare",
    "no-regex-spaces",
    "no-self-assign",
    "no-setter-return",
    "no-shadow-restricted-names",
    "no-sparse-arrays",
    "no-this-before-super",
    "no-undef",
    "no-unexpected-multiline",
    "no-unreachable",
    "no-unsafe-finally",
    "no-unsafe-negation",
    "no-unused-labels",
    "no-unused-vars",
    "no-useless-catch",
    "no-useless-escape",
    "no-var",
    "no-with",
    "prefer-arrow-callback",
    "prefer-const",
    "prefer-rest-params",
    "prefer-spread",
    "quotes",
    "require-yield",
    "semi",
    "use-isnan",
    "valid-typeof",
];

pub const VUE_PLUGIN: Plugin = Plugin {
    name: "vue",
    rules: &[
        "vue/attribute-hyphenation",
        "vue/attributes-order",
        "vue/comment-directive",
        "vue/component-definition-name-casing",
        "vue/first-attribute-linebreak",
        "vue/html-closing-bracket-newline",
        "vue/html-closing-bracket-spacing",
        "vue/html-end-tags",
        "vue/html-indent",
        "vue/html-quotes",
        "vue/html-self-closing",
        "vue/jsx-uses-vars",
        "vue/max-attributes-per-line",
        "vue/multi-word-component-names",
        "vue/multiline-html-element-content-newline",
        "vue/mustache-interpolation-spacing",
        "vue/no-dupe-keys",
        "vue/no-lone-template",
        "vue/no-multi-spaces",
        "vue/no-multiple-slot-args",
        "vue/no-mutating-props",
        "vue/no-reserved-keys",
        "vue/no-side-effects-in-computed-properties",
        "vue/no-unused-components",
        "vue/no-unused-vars",
        "vue/no-use-v-if-with-v-for",
        "vue/no-v-html",
        "vue/order-in-components",
        "vue/prop-name-casing",
        "vue/require-default-prop",
        "vue/require-prop-types",
        "vue/require-v-for-key",
        "vue/return-in-computed-property",
        "vue/singleline-html-element-content-newline",
        "vue/this-in-template",
        "vue/v-bind-style",
        "vue/v-on-event-hyphenation",
        "vue/v-on-style",
        "vue/valid-template-root",
        "vue/valid-v-for",
        "vue/valid-v-if",
        "vue/valid-v-model",
        "vue/valid-v-slot",
    ],
};

pub const TYPESCRIPT_PLUGIN: Plugin = Plugin {
    name: "@typescript-eslint",
    rules: &[
        "@typescript-eslint/adjacent-overload-signatures",
        "@typescript-eslint/ban-ts-comment",
        "@typescript-eslint/ban-types",
        "@typescript-eslint/brace-style",
        "@typescript-eslint/comma-dangle",
        "@typescript-eslint/explicit-module-boundary-types",
        "@typescript-eslint/indent",
        "@typescript-eslint/member-delimiter-style",
        "@typescript-eslint/no-array-constructor",
        "@typescript-eslint/no-empty-function",
        "@typescript-eslint/no-empty-interface",
        "@typescript-eslint/no-explicit-any",
        "@typescript-eslint/no-extra-non-null-assertion",
        "@typescript-eslint/no-extra-semi",
        "@typescript-eslint/no-inferrable-types",
        "@typescript-eslint/no-misused-new",
        "@typescript-eslint/no-namespace",
        "@typescript-eslint/no-non-null-asserted-optional-chain",
        "@typescript-eslint/no-non-null-assertion",
        "@typescript-eslint/no-this-alias",
        "@typescript-eslint/no-unused-vars",
        "@typescript-eslint/no-var-requires",
        "@typescript-eslint/prefer-as-const",
        "@typescript-eslint/prefer-namespace-keyword",
        "@typescript-eslint/quotes",
        "@typescript-eslint/semi",
        "@typescript-eslint/triple-slash-reference",
        "@typescript-eslint/type-annotation-spacing",
    ],
};

pub const PRETTIER_PLUGIN: Plugin = Plugin {
    name: "prettier",
    rules: &["prettier/prettier"],
};

/// Presets by `extends` name, plus the plugins they can load
#[derive(Debug, Clone, Default)]
pub struct PresetRegistry {
    presets: IndexMap<String, LintConfig>,
    plugins: IndexMap<String, Plugin>,
}

impl PresetRegistry {
    /// A registry with no presets and no plugins (core rules only)
    pub fn empty() -> Self {
        Self::default()
    }

    /// The presets shipped with lintrc
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::empty();
        registry.register_plugin(VUE_PLUGIN);
        registry.register_plugin(TYPESCRIPT_PLUGIN);
        registry.register_plugin(PRETTIER_PLUGIN);

        for (name, value) in builtin_preset_values() {
            let config = LintConfig::from_json_value(value, name)?;
            registry.register_preset(name, config);
        }
        tracing::debug!(
            "Registered {} built-in presets and {} plugins",
            registry.presets.len(),
            registry.plugins.len()
        );
        Ok(registry)
    }

    pub fn register_preset(&mut self, name: impl Into<String>, config: LintConfig) {
        self.presets.insert(name.into(), config);
    }

    pub fn register_plugin(&mut self, plugin: Plugin) {
        self.plugins.insert(plugin.name.to_string(), plugin);
    }

    pub fn preset(&self, name: &str) -> Option<&LintConfig> {
        self.presets.get(name)
    }

    pub fn preset_names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn plugin(&self, name: &str) -> Option<&Plugin> {
        self.plugins.get(name)
    }

    pub fn plugins(&self) -> impl Iterator<Item = &Plugin> {
        self.plugins.values()
    }

    /// Whether `rule_id` is a core rule or belongs to one of `loaded_plugins`
    pub fn is_known_rule<S: AsRef<str>>(&self, rule_id: &str, loaded_plugins: &[S]) -> bool {
        if CORE_RULES.contains(&rule_id) {
            return true;
        }
        loaded_plugins
            .iter()
            .filter_map(|name| self.plugin(name.as_ref()))
            .any(|plugin| plugin.rules.contains(&rule_id))
    }
}

const TS_FILES: [&str; 4] = ["*.ts", "*.tsx", "*.mts", "*.cts"];

fn builtin_preset_values() -> Vec<(&'static str, serde_json::Value)> {
    vec![
        (
            "eslint:recommended",
            json!({
                "rules": {
                    "constructor-super": "error",
                    "for-direction": "error",
                    "getter-return": "error",
                    "no-async-promise-executor": "error",
                    "no-case-declarations": "error",
                    "no-class-assign": "error",
                    "no-compare-neg-zero": "error",
                    "no-cond-assign": "error",
                    "no-const-assign": "error",
                    "no-constant-condition": "error",
                    "no-control-regex": "error",
                    "no-debugger": "error",
                    "no-delete-var": "error",
                    "no-dupe-args": "error",
                    "no-dupe-class-members": "error",
                    "no-dupe-else-if": "error",
                    "no-dupe-keys": "error",
                    "no-duplicate-case": "error",
                    "no-empty": "error",
                    "no-empty-character-class": "error",
                    "no-empty-pattern": "error",
                    "no-ex-assign": "error",
                    "no-extra-boolean-cast": "error",
                    "no-extra-semi": "error",
                    "no-fallthrough": "error",
                    "no-func-assign": "error",
                    "no-global-assign": "error",
                    "no-import-assign": "error",
                    "no-inner-declarations": "error",
                    "no-invalid-regexp": "error",
                    "no-irregular-whitespace": "error",
                    "no-misleading-character-class": "error",
                    "no-mixed-spaces-and-tabs": "error",
                    "no-new-symbol": "error",
                    "no-obj-calls": "error",
                    "no-octal": "error",
                    "no-prototype-builtins": "error",
                    "no-redeclare": "error",
                    "no-regex-spaces": "error",
                    "no-self-assign": "error",
                    "no-setter-return": "error",
                    "no-shadow-restricted-names": "error",
                    "no-sparse-arrays": "error",
                    "no-this-before-super": "error",
                    "no-undef": "error",
                    "no-unexpected-multiline": "error",
                    "no-unreachable": "error",
                    "no-unsafe-finally": "error",
                    "no-unsafe-negation": "error",
                    "no-unused-labels": "error",
                    "no-unused-vars": "error",
                    "no-useless-catch": "error",
                    "no-useless-escape": "error",
                    "no-with": "error",
                    "require-yield": "error",
                    "use-isnan": "error",
                    "valid-typeof": "error"
                }
            }),
        ),
        (
            "plugin:vue/base",
            json!({
                "parser": "vue-eslint-parser",
                "parserOptions": {
                    "ecmaVersion": 2020,
                    "sourceType": "module"
                },
                "env": {"browser": true, "es6": true},
                "plugins": ["vue"],
                "rules": {
                    "vue/comment-directive": "error",
                    "vue/jsx-uses-vars": "error"
                }
            }),
        ),
        (
            "plugin:vue/vue3-essential",
            json!({
                "extends": "plugin:vue/base",
                "rules": {
                    "vue/multi-word-component-names": "error",
                    "vue/no-dupe-keys": "error",
                    "vue/no-mutating-props": "error",
                    "vue/no-reserved-keys": "error",
                    "vue/no-side-effects-in-computed-properties": "error",
                    "vue/no-unused-components": "error",
                    "vue/no-unused-vars": "error",
                    "vue/no-use-v-if-with-v-for": "error",
                    "vue/require-v-for-key": "error",
                    "vue/return-in-computed-property": "error",
                    "vue/valid-template-root": "error",
                    "vue/valid-v-for": "error",
                    "vue/valid-v-if": "error",
                    "vue/valid-v-model": "error",
                    "vue/valid-v-slot": "error"
                }
            }),
        ),
        (
            "plugin:vue/vue3-strongly-recommended",
            json!({
                "extends": "plugin:vue/vue3-essential",
                "rules": {
                    "vue/attribute-hyphenation": "warn",
                    "vue/component-definition-name-casing": "warn",
                    "vue/first-attribute-linebreak": "warn",
                    "vue/html-closing-bracket-newline": "warn",
                    "vue/html-closing-bracket-spacing": "warn",
                    "vue/html-end-tags": "warn",
                    "vue/html-indent": "warn",
                    "vue/html-quotes": "warn",
                    "vue/html-self-closing": "warn",
                    "vue/max-attributes-per-line": "warn",
                    "vue/multiline-html-element-content-newline": "warn",
                    "vue/mustache-interpolation-spacing": "warn",
                    "vue/no-multi-spaces": "warn",
                    "vue/prop-name-casing": "warn",
                    "vue/require-default-prop": "warn",
                    "vue/require-prop-types": "warn",
                    "vue/singleline-html-element-content-newline": "warn",
                    "vue/v-bind-style": "warn",
                    "vue/v-on-event-hyphenation": ["warn", "always", {"autofix": true}],
                    "vue/v-on-style": "warn"
                }
            }),
        ),
        (
            "plugin:vue/vue3-recommended",
            json!({
                "extends": "plugin:vue/vue3-strongly-recommended",
                "rules": {
                    "vue/attributes-order": "warn",
                    "vue/no-lone-template": "warn",
                    "vue/no-multiple-slot-args": "warn",
                    "vue/no-v-html": "warn",
                    "vue/order-in-components": "warn",
                    "vue/this-in-template": "warn"
                }
            }),
        ),
        (
            "plugin:@typescript-eslint/base",
            json!({
                "parser": "@typescript-eslint/parser",
                "parserOptions": {"sourceType": "module"},
                "plugins": ["@typescript-eslint"]
            }),
        ),
        (
            "plugin:@typescript-eslint/eslint-recommended",
            json!({
                "overrides": [{
                    "files": TS_FILES,
                    "rules": {
                        "constructor-super": "off",
                        "getter-return": "off",
                        "no-const-assign": "off",
                        "no-dupe-args": "off",
                        "no-dupe-class-members": "off",
                        "no-dupe-keys": "off",
                        "no-func-assign": "off",
                        "no-import-assign": "off",
                        "no-new-symbol": "off",
                        "no-obj-calls": "off",
                        "no-redeclare": "off",
                        "no-setter-return": "off",
                        "no-this-before-super": "off",
                        "no-undef": "off",
                        "no-unreachable": "off",
                        "no-unsafe-negation": "off",
                        "no-var": "error",
                        "prefer-const": "error",
                        "prefer-rest-params": "error",
                        "prefer-spread": "error",
                        "valid-typeof": "off"
                    }
                }]
            }),
        ),
        (
            "plugin:@typescript-eslint/recommended",
            json!({
                "extends": [
                    "plugin:@typescript-eslint/base",
                    "plugin:@typescript-eslint/eslint-recommended"
                ],
                "rules": {
                    "@typescript-eslint/adjacent-overload-signatures": "error",
                    "@typescript-eslint/ban-ts-comment": "error",
                    "@typescript-eslint/ban-types": "error",
                    "@typescript-eslint/explicit-module-boundary-types": "warn",
                    "no-array-constructor": "off",
                    "@typescript-eslint/no-array-constructor": "error",
                    "no-empty-function": "off",
                    "@typescript-eslint/no-empty-function": "error",
                    "@typescript-eslint/no-empty-interface": "error",
                    "@typescript-eslint/no-explicit-any": "warn",
                    "@typescript-eslint/no-extra-non-null-assertion": "error",
                    "no-extra-semi": "off",
                    "@typescript-eslint/no-extra-semi": "error",
                    "@typescript-eslint/no-inferrable-types": "error",
                    "@typescript-eslint/no-misused-new": "error",
                    "@typescript-eslint/no-namespace": "error",
                    "@typescript-eslint/no-non-null-asserted-optional-chain": "error",
                    "@typescript-eslint/no-non-null-assertion": "warn",
                    "@typescript-eslint/no-this-alias": "error",
                    "no-unused-vars": "off",
                    "@typescript-eslint/no-unused-vars": "warn",
                    "@typescript-eslint/no-var-requires": "error",
                    "@typescript-eslint/prefer-as-const": "error",
                    "@typescript-eslint/prefer-namespace-keyword": "error",
                    "@typescript-eslint/triple-slash-reference": "error"
                }
            }),
        ),
        (
            "@vue/typescript",
            json!({
                "plugins": ["@typescript-eslint"],
                "parser": "vue-eslint-parser",
                "parserOptions": {
                    "parser": "@typescript-eslint/parser",
                    "extraFileExtensions": [".vue"],
                    "sourceType": "module"
                },
                "overrides": [
                    {
                        "files": ["*.ts", "*.tsx", "*.vue"],
                        "rules": {"no-undef": "off"}
                    },
                    {
                        "files": ["*.ts", "*.tsx"],
                        "parser": "@typescript-eslint/parser"
                    }
                ]
            }),
        ),
        (
            "@vue/typescript/recommended",
            json!({
                "extends": ["@vue/typescript", "plugin:@typescript-eslint/recommended"],
                "parser": "vue-eslint-parser",
                "overrides": [{
                    "files": ["*.ts", "*.tsx"],
                    "parser": "@typescript-eslint/parser"
                }]
            }),
        ),
        (
            "prettier",
            json!({
                "rules": {
                    "curly": "off",
                    "indent": "off",
                    "no-extra-semi": "off",
                    "no-mixed-spaces-and-tabs": "off",
                    "no-unexpected-multiline": "off",
                    "quotes": "off",
                    "semi": "off",
                    "vue/first-attribute-linebreak": "off",
                    "vue/html-closing-bracket-newline": "off",
                    "vue/html-closing-bracket-spacing": "off",
                    "vue/html-end-tags": "off",
                    "vue/html-indent": "off",
                    "vue/html-quotes": "off",
                    "vue/html-self-closing": "off",
                    "vue/max-attributes-per-line": "off",
                    "vue/multiline-html-element-content-newline": "off",
                    "vue/mustache-interpolation-spacing": "off",
                    "vue/no-multi-spaces": "off",
                    "vue/singleline-html-element-content-newline": "off",
                    "@typescript-eslint/no-extra-semi": "off"
                }
            }),
        ),
        (
            "plugin:prettier/recommended",
            json!({
                "extends": ["prettier"],
                "plugins": ["prettier"],
                "rules": {
                    "prettier/prettier": "error",
                    "arrow-body-style": "off",
                    "prefer-arrow-callback": "off"
                }
            }),
        ),
        (
            "@vue/prettier",
            json!({
                "extends": ["plugin:prettier/recommended"],
                "rules": {"prettier/prettier": "warn"}
            }),
        ),
        (
            "@vue/prettier/@typescript-eslint",
            json!({
                "extends": ["prettier"],
                "rules": {
                    "@typescript-eslint/brace-style": "off",
                    "@typescript-eslint/comma-dangle": "off",
                    "@typescript-eslint/indent": "off",
                    "@typescript-eslint/member-delimiter-style": "off",
                    "@typescript-eslint/quotes": "off",
                    "@typescript-eslint/semi": "off",
                    "@typescript-eslint/type-annotation-spacing": "off"
                }
            }),
        ),
    ]
}
