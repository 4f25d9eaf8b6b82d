//! Loading host data and criteria from JSON files.

use crate::access::Row;
use crate::catalog::ColumnSpec;
use crate::config::FilterConfig;
use crate::filter::CriterionRecord;
use crate::session::FilterSession;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Columns and rows of one view, as exported by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).context("Invalid dataset JSON")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset {}", path.display()))?;
        let dataset = Self::from_json(&data)
            .with_context(|| format!("Failed to load dataset {}", path.display()))?;
        debug!(
            "loaded {} columns and {} rows from {}",
            dataset.columns.len(),
            dataset.rows.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Start a filtering session over this dataset's columns
    pub fn session(&self, config: FilterConfig) -> Result<FilterSession> {
        FilterSession::with_config(self.columns.clone(), config)
            .context("Invalid column list")
    }
}

/// Read a JSON array of serialized criteria
pub fn load_criteria(path: impl AsRef<Path>) -> Result<Vec<CriterionRecord>> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read criteria {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Invalid criteria file {}", path.display()))
}

/// Commit a serialized criterion through the session's builder commands
pub fn replay_record(session: &mut FilterSession, record: CriterionRecord) -> Result<usize> {
    let index = session.add_record(record)?;
    debug!("replayed criterion {}: {}", index, session.criteria()[index]);
    Ok(index)
}

/// Replay every record in order, stopping at the first invalid one
pub fn replay_all(session: &mut FilterSession, records: Vec<CriterionRecord>) -> Result<()> {
    for (position, record) in records.into_iter().enumerate() {
        let key = record.key.clone();
        replay_record(session, record)
            .with_context(|| format!("Criterion #{} on '{}' rejected", position + 1, key))?;
    }
    info!("applied {} criteria", session.criteria().len());
    Ok(())
}
