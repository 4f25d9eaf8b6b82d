//! Criteria evaluation against host rows.
//!
//! A row passes when it satisfies every criterion in collection order. Rows
//! with a missing, null or wrongly shaped cell simply fail the criterion;
//! evaluation never errors, so one bad row cannot abort a filter pass.

use crate::access::{Row, Value};
use crate::catalog::ColumnType;
use crate::config::FilterConfig;
use crate::filter::{CriteriaCollection, Criterion, CriterionValue, Operator};
use log::debug;
use std::cmp::Ordering;

/// Applies criteria to rows under a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: FilterConfig,
}

impl Evaluator {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Rows satisfying every criterion, in their original order
    pub fn apply(&self, rows: &[Row], criteria: &CriteriaCollection) -> Vec<Row> {
        let kept: Vec<Row> = self.filter(rows, criteria).cloned().collect();
        debug!(
            "kept {} of {} rows under {} criteria",
            kept.len(),
            rows.len(),
            criteria.len()
        );
        kept
    }

    /// Borrowing variant of [`Evaluator::apply`]
    pub fn filter<'r>(
        &'r self,
        rows: &'r [Row],
        criteria: &'r CriteriaCollection,
    ) -> impl Iterator<Item = &'r Row> + 'r {
        rows.iter().filter(move |row| self.matches_all(row, criteria))
    }

    /// Whether `row` satisfies all criteria. Stops at the first failure.
    pub fn matches_all(&self, row: &Row, criteria: &CriteriaCollection) -> bool {
        criteria.iter().all(|criterion| self.matches(row, criterion))
    }

    /// Whether `row` satisfies a single criterion
    pub fn matches(&self, row: &Row, criterion: &Criterion) -> bool {
        let cell = match row.get(criterion.key()) {
            Some(cell) if !cell.is_null() => cell,
            _ => return false,
        };

        match criterion.column_type() {
            ColumnType::Text => self.matches_text(cell, criterion.operator(), criterion.value()),
            ColumnType::Number => matches_number(cell, criterion.operator(), criterion.value()),
            ColumnType::Date => self.matches_date(cell, criterion.operator(), criterion.value()),
        }
    }

    fn matches_text(&self, cell: &Value, op: Operator, expected: &CriterionValue) -> bool {
        let (actual, expected) = match (cell.as_text(), expected) {
            (Some(actual), CriterionValue::Text(expected)) => (actual, expected.as_str()),
            _ => return false,
        };
        if op.is_ordering() && !self.config.text_ordering {
            return false;
        }

        let ordering = if self.config.case_sensitive {
            actual.cmp(expected)
        } else {
            actual.to_lowercase().cmp(&expected.to_lowercase())
        };
        compare(op, ordering)
    }

    fn matches_date(&self, cell: &Value, op: Operator, expected: &CriterionValue) -> bool {
        let actual = match cell.as_text().and_then(|raw| self.config.parse_date(raw)) {
            Some(date) => date,
            None => return false,
        };

        match (op, expected) {
            (Operator::InRange, CriterionValue::DateRange { start, end }) => {
                *start <= actual && actual <= *end
            }
            (_, CriterionValue::Date(expected)) => compare(op, actual.cmp(expected)),
            _ => false,
        }
    }
}

fn matches_number(cell: &Value, op: Operator, expected: &CriterionValue) -> bool {
    match (cell.as_number(), expected) {
        (Some(actual), CriterionValue::Number(expected)) => actual
            .partial_cmp(expected)
            .map_or(false, |ordering| compare(op, ordering)),
        _ => false,
    }
}

/// Map an ordering onto a comparison operator. Ranges never match here.
fn compare(op: Operator, ordering: Ordering) -> bool {
    match op {
        Operator::Eq => ordering == Ordering::Equal,
        Operator::Ne => ordering != Ordering::Equal,
        Operator::Gt => ordering == Ordering::Greater,
        Operator::Lt => ordering == Ordering::Less,
        Operator::InRange => false,
    }
}

/// Apply criteria with the default configuration
pub fn apply(rows: &[Row], criteria: &CriteriaCollection) -> Vec<Row> {
    Evaluator::default().apply(rows, criteria)
}
