//! Filter criteria: model, operator catalog, builder and evaluator.
//!
//! This module provides:
//! - The typed criterion model and its value shapes
//! - The operator catalog, gated by column type
//! - The builder state machine for adding and editing criteria
//! - The ordered criteria collection
//! - Evaluation of criteria against host rows (flat conjunction)

pub mod builder;
pub mod collection;
pub mod criterion;
pub mod error;
pub mod eval;
pub mod operator;

pub use builder::{BuilderPhase, BuilderState, CriterionBuilder, Draft};
pub use collection::CriteriaCollection;
pub use criterion::{check_shape, Criterion, CriterionRecord, CriterionValue, ValueInput};
pub use error::{FilterError, FilterResult};
pub use eval::{apply, Evaluator};
pub use operator::{allowed_operators, operators_for, Operator};
