//! Filtering session for one host view.

use crate::access::Row;
use crate::catalog::{ColumnCatalog, ColumnSpec};
use crate::config::FilterConfig;
use crate::filter::{
    BuilderPhase, CriteriaCollection, Criterion, CriterionBuilder, CriterionRecord,
    CriterionValue, Draft, Evaluator, FilterError, FilterResult, Operator, ValueInput,
};
use log::debug;

/// Owns the column catalog, the criterion builder and the committed
/// criteria of a single view.
///
/// Each open view constructs its own session; nothing is shared between
/// sessions and dropping the session discards its criteria.
#[derive(Debug, Clone)]
pub struct FilterSession {
    catalog: ColumnCatalog,
    builder: CriterionBuilder,
    criteria: CriteriaCollection,
    evaluator: Evaluator,
}

impl FilterSession {
    /// Creates a session with the default configuration.
    pub fn new(columns: Vec<ColumnSpec>) -> FilterResult<Self> {
        Self::with_config(columns, FilterConfig::default())
    }

    /// Creates a session for the given columns and configuration.
    pub fn with_config(columns: Vec<ColumnSpec>, config: FilterConfig) -> FilterResult<Self> {
        let catalog = ColumnCatalog::new(columns)?;
        debug!("new filter session over {} columns", catalog.len());
        Ok(Self {
            catalog,
            builder: CriterionBuilder::new(config.clone()),
            criteria: CriteriaCollection::new(),
            evaluator: Evaluator::new(config),
        })
    }

    pub fn catalog(&self) -> &ColumnCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &FilterConfig {
        self.builder.config()
    }

    /// Committed criteria, in chip order.
    pub fn criteria(&self) -> &[Criterion] {
        self.criteria.list()
    }

    pub fn collection(&self) -> &CriteriaCollection {
        &self.criteria
    }

    pub fn phase(&self) -> BuilderPhase {
        self.builder.phase()
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.builder.draft()
    }

    pub fn available_operators(&self) -> Vec<Operator> {
        self.builder.available_operators()
    }

    pub fn select_key(&mut self, key: &str) -> FilterResult<()> {
        self.builder.select_key(key, &self.catalog)
    }

    pub fn begin_add(&mut self, key: &str) -> FilterResult<()> {
        self.builder.begin_add(key, &self.catalog)
    }

    pub fn begin_edit(&mut self, index: usize) -> FilterResult<()> {
        self.builder.begin_edit(index, &self.criteria, &self.catalog)
    }

    pub fn select_operator(&mut self, operator: Operator) -> FilterResult<()> {
        self.builder.select_operator(operator)
    }

    pub fn set_value(&mut self, value: CriterionValue) -> FilterResult<()> {
        self.builder.set_value(value)
    }

    pub fn set_input(&mut self, input: ValueInput) -> FilterResult<()> {
        self.builder.set_input(input)
    }

    /// Commits the draft; returns the index of the added or replaced criterion.
    pub fn commit(&mut self) -> FilterResult<usize> {
        self.builder.commit(&mut self.criteria)
    }

    pub fn cancel(&mut self) {
        self.builder.cancel();
    }

    /// Removes the criterion at `index`.
    ///
    /// An active edit draft keeps pointing at the same criterion; if that
    /// criterion is the one removed, the draft is discarded.
    pub fn remove_at(&mut self, index: usize) -> FilterResult<Criterion> {
        let removed = self.criteria.remove_at(index)?;
        self.builder.criterion_removed(index);
        debug!("removed criterion {}: {}", index, removed);
        Ok(removed)
    }

    /// Adds a serialized criterion by replaying it through the builder.
    ///
    /// The declared type must match the view's column and the value is
    /// parsed with this session's configuration. On failure the draft is
    /// cancelled and the collection is unchanged.
    pub fn add_record(&mut self, record: CriterionRecord) -> FilterResult<usize> {
        let column_type = self.catalog.column_type(&record.key)?;
        if column_type != record.column_type {
            return Err(FilterError::ColumnTypeMismatch {
                key: record.key,
                column_type,
                declared: record.column_type,
            });
        }

        self.select_key(&record.key)?;
        let result = self
            .select_operator(record.operator)
            .and_then(|_| self.set_input(record.value))
            .and_then(|_| self.commit());
        if result.is_err() {
            self.cancel();
        }
        result
    }

    /// Rows passing every committed criterion.
    pub fn apply(&self, rows: &[Row]) -> Vec<Row> {
        self.evaluator.apply(rows, &self.criteria)
    }

    /// Borrowing variant of [`FilterSession::apply`].
    pub fn filter<'r>(&'r self, rows: &'r [Row]) -> impl Iterator<Item = &'r Row> + 'r {
        self.evaluator.filter(rows, &self.criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ColumnType;

    fn session() -> FilterSession {
        FilterSession::new(vec![
            ColumnSpec::text("type"),
            ColumnSpec::number("points"),
            ColumnSpec::date("joinedOn"),
        ])
        .unwrap()
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let result = FilterSession::new(vec![ColumnSpec::text("a"), ColumnSpec::number("a")]);
        assert!(matches!(result, Err(FilterError::DuplicateColumn { .. })));
    }

    #[test]
    fn test_remove_while_editing_later_criterion() {
        let mut session = session();
        for points in [10.0, 20.0, 30.0] {
            session.select_key("points").unwrap();
            session.select_operator(Operator::Gt).unwrap();
            session.set_value(CriterionValue::number(points)).unwrap();
            session.commit().unwrap();
        }

        session.begin_edit(2).unwrap();
        session.remove_at(0).unwrap();
        assert_eq!(session.draft().unwrap().editing_index(), Some(1));

        session.set_value(CriterionValue::number(35.0)).unwrap();
        assert_eq!(session.commit().unwrap(), 1);
        let labels: Vec<String> = session.criteria().iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["points > 20", "points > 35"]);
    }

    #[test]
    fn test_remove_edited_criterion_discards_draft() {
        let mut session = session();
        session.select_key("type").unwrap();
        session.select_operator(Operator::Eq).unwrap();
        session.set_value(CriterionValue::text("VIP")).unwrap();
        session.commit().unwrap();

        session.begin_edit(0).unwrap();
        session.remove_at(0).unwrap();
        assert_eq!(session.phase(), BuilderPhase::Idle);
        assert!(session.criteria().is_empty());
    }

    #[test]
    fn test_remove_stale_index() {
        let mut session = session();
        assert_eq!(
            session.remove_at(0),
            Err(FilterError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    fn record(json: &str) -> CriterionRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_add_record_replays_builder() {
        let mut session = session();
        let index = session
            .add_record(record(
                r#"{"key": "points", "type": "number", "operator": ">", "value": "100"}"#,
            ))
            .unwrap();
        assert_eq!(index, 0);
        assert_eq!(session.criteria()[0].to_string(), "points > 100");
        assert_eq!(session.phase(), BuilderPhase::Idle);

        assert_eq!(
            session.add_record(record(
                r#"{"key": "points", "type": "text", "operator": "=", "value": "gold"}"#,
            )),
            Err(FilterError::ColumnTypeMismatch {
                key: "points".to_string(),
                column_type: ColumnType::Number,
                declared: ColumnType::Text,
            })
        );
        assert!(matches!(
            session.add_record(record(
                r#"{"key": "points", "type": "number", "operator": "in range",
                    "value": ["1", "2"]}"#,
            )),
            Err(FilterError::InvalidOperator { .. })
        ));
        assert_eq!(session.phase(), BuilderPhase::Idle);
        assert_eq!(session.criteria().len(), 1);
    }

    #[test]
    fn test_add_record_discards_active_edit() {
        let mut session = session();
        session
            .add_record(record(
                r#"{"key": "type", "type": "text", "operator": "=", "value": "VIP"}"#,
            ))
            .unwrap();
        session.begin_edit(0).unwrap();

        let index = session
            .add_record(record(
                r#"{"key": "joinedOn", "type": "date", "operator": "<", "value": "2024-01-01"}"#,
            ))
            .unwrap();
        assert_eq!(index, 1);
        assert_eq!(session.criteria()[0].to_string(), "type = VIP");
    }

    #[test]
    fn test_add_record_reads_configured_date_format() {
        let config = FilterConfig {
            date_format: "%d/%m/%Y".to_string(),
            ..FilterConfig::default()
        };
        let mut session =
            FilterSession::with_config(vec![ColumnSpec::date("joinedOn")], config).unwrap();
        let local =
            r#"{"key": "joinedOn", "type": "date", "operator": ">", "value": "01/03/2023"}"#;

        // Serialized criteria carry ISO dates; the view format only applies here
        assert!(serde_json::from_str::<Criterion>(local).is_err());
        session.add_record(record(local)).unwrap();
        assert_eq!(session.criteria()[0].to_string(), "joinedOn > 2023-03-01");
    }

    #[test]
    fn test_cancel_leaves_collection_untouched() {
        let mut session = session();
        session.select_key("joinedOn").unwrap();
        session.select_operator(Operator::InRange).unwrap();
        session
            .set_input(ValueInput::Range(["2023-01-01".into(), "2023-12-31".into()]))
            .unwrap();
        session.cancel();
        assert_eq!(session.phase(), BuilderPhase::Idle);
        assert!(session.criteria().is_empty());
    }
}
