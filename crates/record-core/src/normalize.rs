//! Value normalization.
//!
//! Maps every [`Value`] to a canonical textual form so that values of
//! different native types that denote the same logical value compare equal:
//! the decimal `0.0000000001` and the text `"0.0000000001"` normalize
//! identically, while `Null` normalizes to a marker that never equals any
//! text (including the text `"null"`).
//!
//! All rules are deterministic and locale-free:
//!
//! | Variant       | Normal form                                         |
//! |---------------|-----------------------------------------------------|
//! | `Null`        | [`Normalized::Null`]                                |
//! | `Bool`        | `true` / `false`                                    |
//! | `Int`         | base 10                                             |
//! | `Float`       | shortest round-trip decimal, never an exponent      |
//! | `Decimal`     | plain notation, trailing zeros trimmed (optional)   |
//! | `Text`        | unchanged                                           |
//! | `Bytes`       | upper-case hex without prefix                       |
//! | `Date`        | `%Y-%m-%d`                                          |
//! | `Time`        | `%H:%M:%S%.f`                                       |
//! | `DateTime`    | `%Y-%m-%d %H:%M:%S%.f`                              |
//! | `TimestampTz` | RFC 3339 with `Z`                                   |

use crate::values::Value;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Default rendering of the null marker in diagnostics. Distinct from the
/// text `null` so a null and that text never look alike in a failure.
pub const NULL_DISPLAY: &str = "<null>";

/// Canonical form of a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Normalized {
    /// The null marker. Never equal to any `Text`.
    Null,
    /// Canonical text.
    Text(String),
}

impl Normalized {
    /// Check if this is the null marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the canonical text, or `None` for the null marker.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Null => None,
            Self::Text(s) => Some(s),
        }
    }

    /// Render for a diagnostic, using `null_display` for the null marker.
    pub fn display_with(&self, null_display: &str) -> String {
        match self {
            Self::Null => null_display.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Normalized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "{NULL_DISPLAY}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

fn default_trim_decimal_zeros() -> bool {
    true
}

/// Options for normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Strip trailing fractional zeros from typed decimals (`1.100` -> `1.1`).
    ///
    /// Some drivers hand decimals back padded to the column scale. Text
    /// values are never touched by this option.
    #[serde(default = "default_trim_decimal_zeros")]
    pub trim_decimal_zeros: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            trim_decimal_zeros: default_trim_decimal_zeros(),
        }
    }
}

impl NormalizeOptions {
    /// Normalize a value under these options.
    pub fn normalize(&self, value: &Value) -> Normalized {
        let text = match value {
            Value::Null => return Normalized::Null,
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            // f64's Display never uses exponent notation.
            Value::Float(f) => f.to_string(),
            Value::Decimal(d) => {
                if self.trim_decimal_zeros {
                    d.normalize().to_string()
                } else {
                    d.to_string()
                }
            }
            Value::Text(s) => s.clone(),
            Value::Bytes(b) => hex::encode_upper(b),
            Value::Date(d) => d.format(DATE_FORMAT).to_string(),
            Value::Time(t) => t.format(TIME_FORMAT).to_string(),
            Value::DateTime(dt) => dt.format(DATETIME_FORMAT).to_string(),
            Value::TimestampTz(ts) => ts.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        };
        Normalized::Text(text)
    }
}

/// Normalize a value with default options.
pub fn normalize(value: &Value) -> Normalized {
    NormalizeOptions::default().normalize(value)
}
