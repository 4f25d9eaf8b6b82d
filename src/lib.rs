//! Typed filter criteria for tabular views.
//!
//! A host view supplies its columns, the user builds criteria one at a time
//! through a [`session::FilterSession`], and the committed criteria restrict
//! the rows shown in the table.

pub mod access;
pub mod catalog;
pub mod config;
pub mod dataset;
pub mod filter;
pub mod session;
