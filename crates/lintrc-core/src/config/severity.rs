//! Rule severity levels

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rule severity levels
///
/// Ordered `Off < Warn < Error`. On disk a severity is written either as its
/// lowercase name or as the numeric alias `0`, `1`, `2`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Disable the rule
    Off,
    /// Warning (doesn't fail a clean run)
    Warn,
    /// Error (fails a clean run)
    Error,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Off, Severity::Warn, Severity::Error];

    /// Interpret a raw config value as a severity
    ///
    /// Accepts `"off" | "warn" | "error"` and the integers `0 | 1 | 2`.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => s.parse().ok(),
            // JSON5 numbers may arrive as floats
            serde_json::Value::Number(n) => match n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))?
            {
                0 => Some(Severity::Off),
                1 => Some(Severity::Warn),
                2 => Some(Severity::Error),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }

    /// Whether a rule with this severity reports anything at all
    pub fn is_enabled(&self) -> bool {
        *self != Severity::Off
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Severity::Off),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            other => Err(format!(
                "invalid severity '{other}' (expected off, warn or error)"
            )),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
