//! Per-view column catalog.
//!
//! The catalog is built once from the host's column metadata and answers
//! key lookups for the builder. It is immutable for the lifetime of a
//! filtering session.

pub mod column_spec;

pub use column_spec::{ColumnSpec, ColumnType};

use crate::filter::{FilterError, FilterResult};
use std::collections::HashMap;

/// Columns available for filtering in one view
#[derive(Debug, Clone, Default)]
pub struct ColumnCatalog {
    columns: Vec<ColumnSpec>,
    by_key: HashMap<String, usize>,
}

impl ColumnCatalog {
    /// Build a catalog, rejecting duplicated keys
    pub fn new(columns: Vec<ColumnSpec>) -> FilterResult<Self> {
        let mut by_key = HashMap::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            if by_key.insert(column.key.clone(), position).is_some() {
                return Err(FilterError::DuplicateColumn {
                    key: column.key.clone(),
                });
            }
        }
        Ok(Self { columns, by_key })
    }

    /// Look up a column by key
    pub fn lookup(&self, key: &str) -> FilterResult<&ColumnSpec> {
        self.by_key
            .get(key)
            .map(|&position| &self.columns[position])
            .ok_or_else(|| FilterError::UnknownColumn {
                key: key.to_string(),
            })
    }

    /// Declared type of the column with the given key
    pub fn column_type(&self, key: &str) -> FilterResult<ColumnType> {
        self.lookup(key).map(|column| column.column_type)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Columns in the order the host supplied them
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer_columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::text("name"),
            ColumnSpec::number("points"),
            ColumnSpec::date("joinedOn"),
        ]
    }

    #[test]
    fn test_lookup() {
        let catalog = ColumnCatalog::new(customer_columns()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.column_type("points").unwrap(), ColumnType::Number);
        assert_eq!(catalog.lookup("joinedOn").unwrap().key, "joinedOn");
        assert!(catalog.contains("name"));
        assert!(!catalog.contains("email"));
    }

    #[test]
    fn test_unknown_column() {
        let catalog = ColumnCatalog::new(customer_columns()).unwrap();
        assert_eq!(
            catalog.column_type("email"),
            Err(FilterError::UnknownColumn {
                key: "email".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut columns = customer_columns();
        columns.push(ColumnSpec::date("points"));
        let err = ColumnCatalog::new(columns).unwrap_err();
        assert_eq!(
            err,
            FilterError::DuplicateColumn {
                key: "points".to_string()
            }
        );
    }

    #[test]
    fn test_columns_keep_host_order() {
        let catalog = ColumnCatalog::new(customer_columns()).unwrap();
        let keys: Vec<&str> = catalog.columns().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["name", "points", "joinedOn"]);
    }
}
