use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A single cell of a host-supplied row.
///
/// Rows arrive as loosely typed JSON-like data, so a cell may hold anything.
/// The declared column type is only applied at evaluation time. Numbers keep
/// their JSON representation so rows serialize back exactly as they arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Number(Number),
    Text(String),
    /// Arrays and objects; never matches a criterion
    Composite(serde_json::Value),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the cell. Numeric strings are accepted, NaN is not.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Value::Number(n) => n.as_f64()?,
            Value::Text(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        if n.is_nan() {
            None
        } else {
            Some(n)
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

/// Non-finite floats have no JSON form and become `Null`.
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}
