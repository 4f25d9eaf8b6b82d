//! Operator catalog for filter criteria.

use crate::catalog::ColumnType;
use crate::config::FilterConfig;
use crate::filter::FilterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operators a criterion may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "in range")]
    InRange,
}

static COMPARISON_OPERATORS: [Operator; 4] =
    [Operator::Eq, Operator::Ne, Operator::Gt, Operator::Lt];

static DATE_OPERATORS: [Operator; 5] = [
    Operator::Eq,
    Operator::Ne,
    Operator::Gt,
    Operator::Lt,
    Operator::InRange,
];

impl Operator {
    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::InRange => "in range",
        }
    }

    /// Whether this operator orders values rather than testing equality
    pub fn is_ordering(&self) -> bool {
        matches!(self, Operator::Gt | Operator::Lt)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" => Ok(Operator::Eq),
            "!=" => Ok(Operator::Ne),
            ">" => Ok(Operator::Gt),
            "<" => Ok(Operator::Lt),
            "in range" => Ok(Operator::InRange),
            other => Err(FilterError::UnknownOperator(other.to_string())),
        }
    }
}

/// Operators offered for a column type, in display order.
///
/// `in range` is only offered for dates.
pub fn operators_for(column_type: ColumnType) -> &'static [Operator] {
    match column_type {
        ColumnType::Text | ColumnType::Number => &COMPARISON_OPERATORS,
        ColumnType::Date => &DATE_OPERATORS,
    }
}

/// Operators the builder accepts under the given configuration.
///
/// Same as [`operators_for`], minus `>` and `<` on text when text ordering
/// is turned off.
pub fn allowed_operators(column_type: ColumnType, config: &FilterConfig) -> Vec<Operator> {
    operators_for(column_type)
        .iter()
        .copied()
        .filter(|op| {
            !(column_type == ColumnType::Text && op.is_ordering() && !config.text_ordering)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TYPES: [ColumnType; 3] = [ColumnType::Text, ColumnType::Number, ColumnType::Date];

    #[test]
    fn test_operators_non_empty_for_every_type() {
        for column_type in ALL_TYPES {
            assert!(!operators_for(column_type).is_empty());
        }
    }

    #[test]
    fn test_in_range_only_for_dates() {
        for column_type in ALL_TYPES {
            assert_eq!(
                operators_for(column_type).contains(&Operator::InRange),
                column_type == ColumnType::Date
            );
        }
    }

    #[test]
    fn test_catalog_order() {
        assert_eq!(
            operators_for(ColumnType::Date),
            &[
                Operator::Eq,
                Operator::Ne,
                Operator::Gt,
                Operator::Lt,
                Operator::InRange
            ]
        );
        assert_eq!(operators_for(ColumnType::Text), &COMPARISON_OPERATORS);
    }

    #[test]
    fn test_allowed_operators_respects_text_ordering() {
        let config = FilterConfig {
            text_ordering: false,
            ..FilterConfig::default()
        };
        assert_eq!(
            allowed_operators(ColumnType::Text, &config),
            vec![Operator::Eq, Operator::Ne]
        );
        // Numbers and dates keep their ordering operators
        assert_eq!(allowed_operators(ColumnType::Number, &config).len(), 4);
        assert_eq!(allowed_operators(ColumnType::Date, &config).len(), 5);

        let config = FilterConfig::default();
        assert_eq!(allowed_operators(ColumnType::Text, &config).len(), 4);
    }

    #[test]
    fn test_operator_parse_and_display() {
        for op in DATE_OPERATORS {
            assert_eq!(op.as_str().parse::<Operator>().unwrap(), op);
            assert_eq!(op.to_string(), op.as_str());
        }
        assert_eq!(
            ">=".parse::<Operator>(),
            Err(FilterError::UnknownOperator(">=".to_string()))
        );
    }

    #[test]
    fn test_operator_serde_symbols() {
        assert_eq!(serde_json::to_string(&Operator::InRange).unwrap(), "\"in range\"");
        let op: Operator = serde_json::from_str("\"!=\"").unwrap();
        assert_eq!(op, Operator::Ne);
    }
}
