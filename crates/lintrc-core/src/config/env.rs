//! Runtime environments and the global identifiers they make available

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a global identifier may be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase", try_from = "RawGlobalAccess")]
pub enum GlobalAccess {
    Readonly,
    Writable,
    /// Explicitly not available, even if an environment provides it
    Off,
}

/// On-disk spellings accepted for a global: booleans and eslintrc aliases
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawGlobalAccess {
    Flag(bool),
    Name(String),
}

impl TryFrom<RawGlobalAccess> for GlobalAccess {
    type Error = String;

    fn try_from(raw: RawGlobalAccess) -> Result<Self, Self::Error> {
        match raw {
            RawGlobalAccess::Flag(true) => Ok(GlobalAccess::Writable),
            RawGlobalAccess::Flag(false) => Ok(GlobalAccess::Readonly),
            RawGlobalAccess::Name(name) => match name.as_str() {
                "readonly" | "readable" => Ok(GlobalAccess::Readonly),
                "writable" | "writeable" => Ok(GlobalAccess::Writable),
                "off" => Ok(GlobalAccess::Off),
                other => Err(format!(
                    "invalid global access '{other}' (expected readonly, writable or off)"
                )),
            },
        }
    }
}

/// A named runtime environment
#[derive(Debug)]
pub struct Environment {
    pub name: &'static str,
    pub readonly: &'static [&'static str],
    pub writable: &'static [&'static str],
    /// ECMAScript edition (as a year) implied by enabling this environment
    pub ecma_version: Option<u32>,
}

const ES5_GLOBALS: &[&str] = &[
    "Array", "Boolean", "Date", "Error", "EvalError", "Function", "Infinity", "JSON", "Math",
    "NaN", "Number", "Object", "RangeError", "ReferenceError", "RegExp", "String",
    "SyntaxError", "TypeError", "URIError", "decodeURI", "decodeURIComponent", "encodeURI",
    "encodeURIComponent", "escape", "eval", "isFinite", "isNaN", "parseFloat", "parseInt",
    "undefined", "unescape",
];

const ES2015_GLOBALS: &[&str] = &[
    "ArrayBuffer", "DataView", "Float32Array", "Float64Array", "Int16Array", "Int32Array",
    "Int8Array", "Map", "Promise", "Proxy", "Reflect", "Set", "Symbol", "Uint16Array",
    "Uint32Array", "Uint8Array", "Uint8ClampedArray", "WeakMap", "WeakSet",
];

const ES2017_GLOBALS: &[&str] = &["Atomics", "SharedArrayBuffer"];

const ES2020_GLOBALS: &[&str] = &["BigInt", "BigInt64Array", "BigUint64Array", "globalThis"];

const ES2021_GLOBALS: &[&str] = &["AggregateError", "FinalizationRegistry", "WeakRef"];

const BROWSER_GLOBALS: &[&str] = &[
    "Blob", "CustomEvent", "DOMParser", "Element", "Event", "File", "FileReader", "FormData",
    "HTMLElement", "Headers", "IntersectionObserver", "MutationObserver", "Node", "NodeList",
    "Request", "ResizeObserver", "Response", "TextDecoder", "TextEncoder", "URL",
    "URLSearchParams", "WebSocket", "Worker", "XMLHttpRequest", "alert", "atob", "btoa",
    "caches", "cancelAnimationFrame", "clearInterval", "clearTimeout", "confirm", "console",
    "crypto", "document", "fetch", "getComputedStyle", "history", "indexedDB", "localStorage",
    "location", "matchMedia", "navigator", "performance", "prompt", "queueMicrotask",
    "requestAnimationFrame", "screen", "self", "sessionStorage", "setInterval", "setTimeout",
    "structuredClone", "window",
];

const BROWSER_WRITABLE: &[&str] = &["onerror", "onload", "onresize", "onscroll"];

const NODE_GLOBALS: &[&str] = &[
    "Buffer", "TextDecoder", "TextEncoder", "URL", "URLSearchParams", "__dirname",
    "__filename", "clearImmediate", "clearInterval", "clearTimeout", "console", "global",
    "module", "process", "queueMicrotask", "require", "setImmediate", "setInterval",
    "setTimeout", "structuredClone",
];

const COMMONJS_GLOBALS: &[&str] = &["global", "module", "require"];

const SHARED_NODE_BROWSER_GLOBALS: &[&str] = &[
    "TextDecoder", "TextEncoder", "URL", "URLSearchParams", "clearInterval", "clearTimeout",
    "console", "queueMicrotask", "setInterval", "setTimeout",
];

const WORKER_GLOBALS: &[&str] = &[
    "caches", "close", "console", "fetch", "importScripts", "postMessage", "self",
    "setInterval", "setTimeout",
];

const JEST_GLOBALS: &[&str] = &[
    "afterAll", "afterEach", "beforeAll", "beforeEach", "describe", "expect", "fdescribe",
    "fit", "it", "jest", "pit", "test", "xdescribe", "xit", "xtest",
];

const MOCHA_GLOBALS: &[&str] = &[
    "after", "afterEach", "before", "beforeEach", "context", "describe", "it", "mocha", "run",
    "setup", "specify", "suite", "suiteSetup", "suiteTeardown", "teardown", "test", "xcontext",
    "xdescribe", "xit", "xspecify",
];

const ENVIRONMENTS: &[Environment] = &[
    Environment {
        name: "builtin",
        readonly: ES5_GLOBALS,
        writable: &[],
        ecma_version: None,
    },
    Environment {
        name: "browser",
        readonly: BROWSER_GLOBALS,
        writable: BROWSER_WRITABLE,
        ecma_version: None,
    },
    Environment {
        name: "node",
        readonly: NODE_GLOBALS,
        writable: &["exports"],
        ecma_version: None,
    },
    Environment {
        name: "commonjs",
        readonly: COMMONJS_GLOBALS,
        writable: &["exports"],
        ecma_version: None,
    },
    Environment {
        name: "shared-node-browser",
        readonly: SHARED_NODE_BROWSER_GLOBALS,
        writable: &[],
        ecma_version: None,
    },
    Environment {
        name: "worker",
        readonly: WORKER_GLOBALS,
        writable: &["onmessage", "onerror"],
        ecma_version: None,
    },
    Environment {
        name: "jest",
        readonly: JEST_GLOBALS,
        writable: &[],
        ecma_version: None,
    },
    Environment {
        name: "mocha",
        readonly: MOCHA_GLOBALS,
        writable: &[],
        ecma_version: None,
    },
    Environment {
        name: "es6",
        readonly: ES2015_GLOBALS,
        writable: &[],
        ecma_version: Some(2015),
    },
    Environment {
        name: "es2015",
        readonly: ES2015_GLOBALS,
        writable: &[],
        ecma_version: Some(2015),
    },
    Environment {
        name: "es2016",
        readonly: ES2015_GLOBALS,
        writable: &[],
        ecma_version: Some(2016),
    },
    Environment {
        name: "es2017",
        readonly: ES2017_GLOBALS,
        writable: &[],
        ecma_version: Some(2017),
    },
    Environment {
        name: "es2018",
        readonly: ES2017_GLOBALS,
        writable: &[],
        ecma_version: Some(2018),
    },
    Environment {
        name: "es2019",
        readonly: ES2017_GLOBALS,
        writable: &[],
        ecma_version: Some(2019),
    },
    Environment {
        name: "es2020",
        readonly: ES2020_GLOBALS,
        writable: &[],
        ecma_version: Some(2020),
    },
    Environment {
        name: "es2021",
        readonly: ES2021_GLOBALS,
        writable: &[],
        ecma_version: Some(2021),
    },
    Environment {
        name: "es2022",
        readonly: ES2021_GLOBALS,
        writable: &[],
        ecma_version: Some(2022),
    },
];

/// The ES edition environments each build on the previous one
const ES_CHAIN: &[&str] = &[
    "es6", "es2015", "es2016", "es2017", "es2018", "es2019", "es2020", "es2021", "es2022",
];

/// Look up a known environment by name
pub fn lookup(name: &str) -> Option<&'static Environment> {
    ENVIRONMENTS.iter().find(|env| env.name == name)
}

/// Names of every environment a config may enable
pub fn known_names() -> impl Iterator<Item = &'static str> {
    ENVIRONMENTS
        .iter()
        .map(|env| env.name)
        .filter(|name| *name != "builtin")
}

/// Globals recognized under the given environment flags
///
/// ES5 builtins are always present. An ES edition environment also brings
/// the globals of every earlier edition.
pub fn globals_for(flags: &IndexMap<String, bool>) -> BTreeMap<String, GlobalAccess> {
    let mut globals = BTreeMap::new();
    let mut add = |env: &Environment| {
        for name in env.readonly {
            globals.insert((*name).to_string(), GlobalAccess::Readonly);
        }
        for name in env.writable {
            globals.insert((*name).to_string(), GlobalAccess::Writable);
        }
    };

    if let Some(builtin) = lookup("builtin") {
        add(builtin);
    }

    for (name, enabled) in flags {
        if !enabled {
            continue;
        }
        if let Some(position) = ES_CHAIN.iter().position(|es| *es == name.as_str()) {
            for earlier in &ES_CHAIN[..=position] {
                if let Some(env) = lookup(earlier) {
                    add(env);
                }
            }
        } else if let Some(env) = lookup(name) {
            add(env);
        }
    }
    globals
}

/// Highest ECMAScript edition implied by the enabled environments
pub fn implied_ecma_version(flags: &IndexMap<String, bool>) -> Option<u32> {
    flags
        .iter()
        .filter(|(_, enabled)| **enabled)
        .filter_map(|(name, _)| lookup(name).and_then(|env| env.ecma_version))
        .max()
}
