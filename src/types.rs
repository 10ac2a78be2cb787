use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Values that can appear in a driver row or be bound as statement parameters.
///
/// The same enum is used on both sides of the driver so bind lists, raw rows and
/// normalized results never need to branch on driver-native types:
/// ```rust
/// use sql_query_adapter::prelude::*;
///
/// let params = vec![
///     RowValues::Int(1),
///     RowValues::Text("alice".into()),
///     RowValues::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// Text/string value
    Text(String),
    /// NULL value
    Null,
    /// Binary data
    Blob(Vec<u8>),
    /// JSON value
    JSON(JsonValue),
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// Interpret the value as an integer, accepting numeric text as the MySQL
    /// protocol reports some metadata columns (e.g. `Seq_in_index`) as strings.
    #[must_use]
    pub fn to_i64_lossy(&self) -> Option<i64> {
        match self {
            RowValues::Int(value) => Some(*value),
            RowValues::Bool(value) => Some(i64::from(*value)),
            RowValues::Text(value) => value.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for RowValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowValues::Int(value) => write!(f, "{value}"),
            RowValues::Float(value) => write!(f, "{value}"),
            RowValues::Bool(value) => write!(f, "{value}"),
            RowValues::Timestamp(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
            RowValues::Text(value) => f.write_str(value),
            RowValues::Null => f.write_str("NULL"),
            RowValues::Blob(bytes) => write!(f, "<{} bytes>", bytes.len()),
            RowValues::JSON(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for RowValues {
    fn from(value: i64) -> Self {
        RowValues::Int(value)
    }
}

impl From<&str> for RowValues {
    fn from(value: &str) -> Self {
        RowValues::Text(value.to_string())
    }
}

impl From<String> for RowValues {
    fn from(value: String) -> Self {
        RowValues::Text(value)
    }
}

impl From<bool> for RowValues {
    fn from(value: bool) -> Self {
        RowValues::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lossy_integer_accepts_numeric_text() {
        assert_eq!(RowValues::Text(" 2 ".into()).to_i64_lossy(), Some(2));
        assert_eq!(RowValues::Int(7).to_i64_lossy(), Some(7));
        assert_eq!(RowValues::Text("x".into()).to_i64_lossy(), None);
        assert_eq!(RowValues::Null.to_i64_lossy(), None);
    }

    #[test]
    fn display_matches_warning_text() {
        assert_eq!(RowValues::Text("Note".into()).to_string(), "Note");
        assert_eq!(RowValues::Int(1265).to_string(), "1265");
        assert_eq!(RowValues::Null.to_string(), "NULL");
    }
}
