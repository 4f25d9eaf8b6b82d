//! Row data supplied by the host for evaluation.

pub mod row;
pub mod value;

pub use row::Row;
pub use value::Value;
