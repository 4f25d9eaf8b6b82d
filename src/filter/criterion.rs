//! The criterion model: one typed filter condition.

use crate::catalog::ColumnType;
use crate::config::FilterConfig;
use crate::filter::{operators_for, FilterError, FilterResult, Operator};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed comparison value of a criterion
#[derive(Debug, Clone, PartialEq)]
pub enum CriterionValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    /// Inclusive date interval, `start <= end`
    DateRange { start: NaiveDate, end: NaiveDate },
}

/// Untyped value as it arrives from an input widget or a criteria file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueInput {
    Number(f64),
    Text(String),
    Range([String; 2]),
}

impl CriterionValue {
    pub fn text(value: impl Into<String>) -> Self {
        CriterionValue::Text(value.into())
    }

    pub fn number(value: f64) -> Self {
        CriterionValue::Number(value)
    }

    pub fn date(value: NaiveDate) -> Self {
        CriterionValue::Date(value)
    }

    pub fn date_range(start: NaiveDate, end: NaiveDate) -> Self {
        CriterionValue::DateRange { start, end }
    }

    /// Convert raw input into the value shape required by `(column_type, operator)`.
    ///
    /// Numbers may be given as numeric strings. Dates are read with the
    /// configured date format.
    pub fn from_input(
        column_type: ColumnType,
        operator: Operator,
        input: ValueInput,
        config: &FilterConfig,
    ) -> FilterResult<Self> {
        let shape_error = |reason: String| FilterError::ValueShape {
            column_type,
            operator,
            reason,
        };
        let parse_date = |raw: &str| {
            config
                .parse_date(raw)
                .ok_or_else(|| shape_error(format!("'{}' is not a date", raw)))
        };

        let value = match (column_type, operator, input) {
            (ColumnType::Text, _, ValueInput::Text(s)) => CriterionValue::Text(s),
            (ColumnType::Number, _, ValueInput::Number(n)) => CriterionValue::Number(n),
            (ColumnType::Number, _, ValueInput::Text(s)) => {
                let n = s
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| shape_error(format!("'{}' is not a number", s)))?;
                CriterionValue::Number(n)
            }
            (ColumnType::Date, Operator::InRange, ValueInput::Range([start, end])) => {
                CriterionValue::DateRange {
                    start: parse_date(&start)?,
                    end: parse_date(&end)?,
                }
            }
            (ColumnType::Date, op, ValueInput::Text(s)) if op != Operator::InRange => {
                CriterionValue::Date(parse_date(&s)?)
            }
            (_, _, input) => {
                return Err(shape_error(format!(
                    "expected {}, got {:?}",
                    expected_shape(column_type, operator),
                    input
                )))
            }
        };

        check_shape(column_type, operator, &value)?;
        Ok(value)
    }

    fn to_input(&self) -> ValueInput {
        match self {
            CriterionValue::Text(s) => ValueInput::Text(s.clone()),
            CriterionValue::Number(n) => ValueInput::Number(*n),
            CriterionValue::Date(d) => ValueInput::Text(d.to_string()),
            CriterionValue::DateRange { start, end } => {
                ValueInput::Range([start.to_string(), end.to_string()])
            }
        }
    }
}

impl fmt::Display for CriterionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriterionValue::Text(s) => write!(f, "{}", s),
            CriterionValue::Number(n) => write!(f, "{}", n),
            CriterionValue::Date(d) => write!(f, "{}", d),
            CriterionValue::DateRange { start, end } => write!(f, "{} to {}", start, end),
        }
    }
}

fn expected_shape(column_type: ColumnType, operator: Operator) -> &'static str {
    match (column_type, operator) {
        (ColumnType::Text, _) => "a non-empty text value",
        (ColumnType::Number, _) => "a finite number",
        (ColumnType::Date, Operator::InRange) => "a [start, end] date pair",
        (ColumnType::Date, _) => "a single date",
    }
}

/// Check that `value` has the shape required by `(column_type, operator)`
/// and that the operator is offered for the column type at all.
pub fn check_shape(
    column_type: ColumnType,
    operator: Operator,
    value: &CriterionValue,
) -> FilterResult<()> {
    if !operators_for(column_type).contains(&operator) {
        return Err(FilterError::InvalidOperator {
            operator,
            column_type,
        });
    }

    let conforms = match (column_type, value) {
        (ColumnType::Text, CriterionValue::Text(s)) => !s.trim().is_empty(),
        (ColumnType::Number, CriterionValue::Number(n)) => n.is_finite(),
        (ColumnType::Date, CriterionValue::Date(_)) => operator != Operator::InRange,
        (ColumnType::Date, CriterionValue::DateRange { start, end }) => {
            if start > end {
                return Err(FilterError::ValueShape {
                    column_type,
                    operator,
                    reason: format!("range start {} is after end {}", start, end),
                });
            }
            operator == Operator::InRange
        }
        _ => false,
    };

    if conforms {
        Ok(())
    } else {
        Err(FilterError::ValueShape {
            column_type,
            operator,
            reason: format!(
                "expected {}, got {}",
                expected_shape(column_type, operator),
                value
            ),
        })
    }
}

/// One filter condition: `key operator value` on a column of a declared type.
///
/// The column type is cached when the criterion is created, so later
/// changes to the host's column list do not alter existing criteria.
/// Construction always validates the value shape; a criterion never
/// holds an empty value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CriterionRecord", into = "CriterionRecord")]
pub struct Criterion {
    key: String,
    column_type: ColumnType,
    operator: Operator,
    value: CriterionValue,
}

impl Criterion {
    pub fn new(
        key: impl Into<String>,
        column_type: ColumnType,
        operator: Operator,
        value: CriterionValue,
    ) -> FilterResult<Self> {
        check_shape(column_type, operator, &value)?;
        Ok(Self {
            key: key.into(),
            column_type,
            operator,
            value,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &CriterionValue {
        &self.value
    }

    pub(crate) fn into_parts(self) -> (String, ColumnType, Operator, CriterionValue) {
        (self.key, self.column_type, self.operator, self.value)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.key, self.operator, self.value)
    }
}

/// Serialized form of a criterion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionRecord {
    pub key: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub operator: Operator,
    pub value: ValueInput,
}

/// Dates are read as ISO `%Y-%m-%d`, the form `Criterion` serializes to.
/// Records written in a view's own date format go through
/// `FilterSession::add_record` instead.
impl TryFrom<CriterionRecord> for Criterion {
    type Error = FilterError;

    fn try_from(record: CriterionRecord) -> Result<Self, Self::Error> {
        let value = CriterionValue::from_input(
            record.column_type,
            record.operator,
            record.value,
            &FilterConfig::default(),
        )?;
        Criterion::new(record.key, record.column_type, record.operator, value)
    }
}

impl From<Criterion> for CriterionRecord {
    fn from(criterion: Criterion) -> Self {
        let value = criterion.value.to_input();
        CriterionRecord {
            key: criterion.key,
            column_type: criterion.column_type,
            operator: criterion.operator,
            value,
        }
    }
}
