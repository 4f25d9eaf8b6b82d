//! Ordered collection of committed criteria.

use crate::filter::{Criterion, FilterError, FilterResult};
use serde::{Deserialize, Serialize};

/// Criteria in insertion order.
///
/// Insertion order is both the display order of the chips and the order
/// in which the evaluator checks criteria. Keys may repeat, e.g. two
/// bounds on the same date column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriteriaCollection {
    criteria: Vec<Criterion>,
}

impl CriteriaCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a criterion and return its index
    pub fn add(&mut self, criterion: Criterion) -> usize {
        self.criteria.push(criterion);
        self.criteria.len() - 1
    }

    /// Replace the criterion at `index`, returning the old one
    pub fn replace_at(&mut self, index: usize, criterion: Criterion) -> FilterResult<Criterion> {
        let len = self.criteria.len();
        let slot = self
            .criteria
            .get_mut(index)
            .ok_or(FilterError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, criterion))
    }

    /// Remove the criterion at `index`, shifting later criteria down
    pub fn remove_at(&mut self, index: usize) -> FilterResult<Criterion> {
        self.check_index(index)?;
        Ok(self.criteria.remove(index))
    }

    pub fn get(&self, index: usize) -> FilterResult<&Criterion> {
        self.criteria.get(index).ok_or(FilterError::IndexOutOfRange {
            index,
            len: self.criteria.len(),
        })
    }

    /// Criteria in display and evaluation order
    pub fn list(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Criterion> {
        self.criteria.iter()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn clear(&mut self) {
        self.criteria.clear();
    }

    fn check_index(&self, index: usize) -> FilterResult<()> {
        if index >= self.criteria.len() {
            return Err(FilterError::IndexOutOfRange {
                index,
                len: self.criteria.len(),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a CriteriaCollection {
    type Item = &'a Criterion;
    type IntoIter = std::slice::Iter<'a, Criterion>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Criterion> for CriteriaCollection {
    fn from_iter<I: IntoIterator<Item = Criterion>>(iter: I) -> Self {
        Self {
            criteria: iter.into_iter().collect(),
        }
    }
}
