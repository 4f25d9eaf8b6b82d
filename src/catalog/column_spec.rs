//! Column metadata supplied by the host view.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a filterable column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Number,
    Date,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column the user may filter on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Row key, unique within a view
    pub key: String,
    /// Declared type
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            key: key.into(),
            column_type,
        }
    }

    pub fn text(key: impl Into<String>) -> Self {
        Self::new(key, ColumnType::Text)
    }

    pub fn number(key: impl Into<String>) -> Self {
        Self::new(key, ColumnType::Number)
    }

    pub fn date(key: impl Into<String>) -> Self {
        Self::new(key, ColumnType::Date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_spec_json_shape() {
        let spec: ColumnSpec = serde_json::from_str(r#"{"key":"joinedOn","type":"date"}"#).unwrap();
        assert_eq!(spec, ColumnSpec::date("joinedOn"));

        let json = serde_json::to_string(&ColumnSpec::number("points")).unwrap();
        assert_eq!(json, r#"{"key":"points","type":"number"}"#);
    }

    #[test]
    fn test_unknown_column_type_rejected() {
        let result: Result<ColumnSpec, _> =
            serde_json::from_str(r#"{"key":"flag","type":"boolean"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_column_type_display() {
        assert_eq!(ColumnType::Text.to_string(), "text");
        assert_eq!(ColumnType::Number.to_string(), "number");
        assert_eq!(ColumnType::Date.to_string(), "date");
    }
}
