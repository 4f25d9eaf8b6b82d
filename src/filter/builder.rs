//! Builder state machine for adding and editing criteria.
//!
//! A criterion is built in steps: select a column key, then an operator,
//! then a value, then commit. At most one draft exists at a time:
//!
//! ```text
//! Idle --select_key--> KeySelected --select_operator--> OperationSelected
//!      --set_value--> ValueEntered --commit--> Idle
//! ```
//!
//! `cancel` returns to `Idle` from any state. `begin_edit` jumps straight to
//! a fully populated draft seeded from an existing criterion. Committing is
//! the only way a criterion enters or changes in the collection.

use crate::catalog::{ColumnCatalog, ColumnType};
use crate::config::FilterConfig;
use crate::filter::{
    allowed_operators, check_shape, CriteriaCollection, Criterion, CriterionValue, FilterError,
    FilterResult, Operator, ValueInput,
};
use log::debug;

/// Observable progress of the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderPhase {
    Idle,
    KeySelected,
    OperationSelected,
    ValueEntered,
}

/// A criterion under construction
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    key: String,
    /// Cached from the column catalog when the key was selected
    column_type: ColumnType,
    operator: Option<Operator>,
    value: Option<CriterionValue>,
    /// `Some(i)` when the draft will replace criterion `i` on commit
    editing_index: Option<usize>,
}

impl Draft {
    fn new(key: String, column_type: ColumnType, editing_index: Option<usize>) -> Self {
        Self {
            key,
            column_type,
            operator: None,
            value: None,
            editing_index,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn value(&self) -> Option<&CriterionValue> {
        self.value.as_ref()
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.editing_index
    }

    fn phase(&self) -> BuilderPhase {
        match (self.operator, &self.value) {
            (None, _) => BuilderPhase::KeySelected,
            (Some(_), None) => BuilderPhase::OperationSelected,
            (Some(_), Some(_)) => BuilderPhase::ValueEntered,
        }
    }

    fn to_criterion(&self) -> FilterResult<Criterion> {
        let operator = self
            .operator
            .ok_or(FilterError::IncompleteDraft { missing: "operator" })?;
        let value = self
            .value
            .clone()
            .ok_or(FilterError::IncompleteDraft { missing: "value" })?;
        Criterion::new(self.key.clone(), self.column_type, operator, value)
    }
}

/// Builder state: either nothing is being drafted, or exactly one draft
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BuilderState {
    #[default]
    Idle,
    Drafting(Draft),
}

/// Drives the add/edit interaction for one filtering session
#[derive(Debug, Clone, Default)]
pub struct CriterionBuilder {
    state: BuilderState,
    config: FilterConfig,
}

impl CriterionBuilder {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            state: BuilderState::Idle,
            config,
        }
    }

    pub fn state(&self) -> &BuilderState {
        &self.state
    }

    pub fn phase(&self) -> BuilderPhase {
        match &self.state {
            BuilderState::Idle => BuilderPhase::Idle,
            BuilderState::Drafting(draft) => draft.phase(),
        }
    }

    /// The active draft, if any
    pub fn draft(&self) -> Option<&Draft> {
        match &self.state {
            BuilderState::Idle => None,
            BuilderState::Drafting(draft) => Some(draft),
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Operators the user may pick for the drafted column
    pub fn available_operators(&self) -> Vec<Operator> {
        self.draft()
            .map(|draft| allowed_operators(draft.column_type, &self.config))
            .unwrap_or_default()
    }

    /// Select the column to filter on, starting a new add draft.
    ///
    /// Any active draft, including an edit, is discarded. An unknown key
    /// leaves the state untouched.
    pub fn select_key(&mut self, key: &str, catalog: &ColumnCatalog) -> FilterResult<()> {
        let column_type = catalog.column_type(key)?;
        if let BuilderState::Drafting(prior) = &self.state {
            debug!("discarding draft on '{}' to start a new add", prior.key);
        }
        debug!("select key '{}' ({})", key, column_type);
        self.state = BuilderState::Drafting(Draft::new(key.to_string(), column_type, None));
        Ok(())
    }

    /// Same as `select_key`, named for hosts with a separate "add" action
    pub fn begin_add(&mut self, key: &str, catalog: &ColumnCatalog) -> FilterResult<()> {
        self.select_key(key, catalog)
    }

    /// Seed a fully populated draft from the criterion at `index`.
    ///
    /// The column type is looked up again; if it no longer matches the
    /// type cached on the criterion, only the key is carried over.
    pub fn begin_edit(
        &mut self,
        index: usize,
        criteria: &CriteriaCollection,
        catalog: &ColumnCatalog,
    ) -> FilterResult<()> {
        let (key, cached_type, operator, value) = criteria.get(index)?.clone().into_parts();
        let column_type = catalog.column_type(&key)?;

        let mut draft = Draft::new(key, column_type, Some(index));
        if column_type == cached_type {
            draft.operator = Some(operator);
            draft.value = Some(value);
        } else {
            debug!(
                "column '{}' changed type from {} to {}, dropping operator and value",
                draft.key, cached_type, column_type
            );
        }

        debug!("begin edit of criterion {}", index);
        self.state = BuilderState::Drafting(draft);
        Ok(())
    }

    /// Select the operator. Always clears any entered value.
    pub fn select_operator(&mut self, operator: Operator) -> FilterResult<()> {
        let config = &self.config;
        let draft = match &mut self.state {
            BuilderState::Drafting(draft) => draft,
            BuilderState::Idle => return Err(FilterError::NoActiveDraft),
        };

        if !allowed_operators(draft.column_type, config).contains(&operator) {
            return Err(FilterError::InvalidOperator {
                operator,
                column_type: draft.column_type,
            });
        }

        debug!("select operator '{}' on '{}'", operator, draft.key);
        draft.operator = Some(operator);
        draft.value = None;
        Ok(())
    }

    /// Enter a typed value. It must match the shape the operator requires.
    pub fn set_value(&mut self, value: CriterionValue) -> FilterResult<()> {
        let draft = match &mut self.state {
            BuilderState::Drafting(draft) => draft,
            BuilderState::Idle => return Err(FilterError::NoActiveDraft),
        };
        let operator = draft
            .operator
            .ok_or(FilterError::IncompleteDraft { missing: "operator" })?;

        check_shape(draft.column_type, operator, &value)?;
        draft.value = Some(value);
        Ok(())
    }

    /// Enter a raw value from an input widget, parsed for the drafted column
    pub fn set_input(&mut self, input: ValueInput) -> FilterResult<()> {
        let draft = self.draft().ok_or(FilterError::NoActiveDraft)?;
        let operator = draft
            .operator
            .ok_or(FilterError::IncompleteDraft { missing: "operator" })?;
        let value = CriterionValue::from_input(draft.column_type, operator, input, &self.config)?;
        self.set_value(value)
    }

    /// Commit the draft into `criteria` and return the criterion's index.
    ///
    /// Appends for an add draft, replaces in place for an edit draft. On
    /// failure the draft is kept so the host can correct it or cancel.
    pub fn commit(&mut self, criteria: &mut CriteriaCollection) -> FilterResult<usize> {
        let draft = self.draft().ok_or(FilterError::NoActiveDraft)?;
        let criterion = draft.to_criterion()?;

        let index = match draft.editing_index {
            Some(index) => {
                criteria.replace_at(index, criterion)?;
                debug!("replaced criterion {}", index);
                index
            }
            None => {
                let index = criteria.add(criterion);
                debug!("added criterion {}", index);
                index
            }
        };

        self.state = BuilderState::Idle;
        Ok(index)
    }

    /// Discard the draft, returning it if there was one
    pub fn cancel(&mut self) -> Option<Draft> {
        match std::mem::take(&mut self.state) {
            BuilderState::Idle => None,
            BuilderState::Drafting(draft) => {
                debug!("cancelled draft on '{}'", draft.key);
                Some(draft)
            }
        }
    }

    /// Keep an edit draft pointing at the same criterion after `removed`
    /// was taken out of the collection. Editing the removed criterion
    /// itself discards the draft.
    pub(crate) fn criterion_removed(&mut self, removed: usize) {
        let discard = match &mut self.state {
            BuilderState::Drafting(draft) => match draft.editing_index {
                Some(index) if index == removed => true,
                Some(index) if index > removed => {
                    draft.editing_index = Some(index - 1);
                    false
                }
                _ => false,
            },
            BuilderState::Idle => false,
        };
        if discard {
            debug!("criterion {} removed while being edited", removed);
            self.state = BuilderState::Idle;
        }
    }
}
