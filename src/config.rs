//! Evaluation settings shared by the builder and the evaluator.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// ISO calendar date, the format date cells use unless configured otherwise
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Settings for text comparison and date parsing.
///
/// Missing fields in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Compare text cells case-sensitively. Off by default, matching the
    /// behavior of the table's global search box.
    pub case_sensitive: bool,
    /// Allow `>` and `<` on text columns (lexicographic ordering)
    pub text_ordering: bool,
    /// `chrono` format used to read date cells and date inputs
    pub date_format: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            text_ordering: true,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl FilterConfig {
    /// Load settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse a date using the configured format.
    ///
    /// Falls back to ISO dates and RFC 3339 timestamps, whose calendar
    /// date is used.
    pub fn parse_date(&self, raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, &self.date_format)
            .or_else(|_| NaiveDate::parse_from_str(raw, DEFAULT_DATE_FORMAT))
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|ts| ts.date_naive())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = FilterConfig::default();
        assert!(!config.case_sensitive);
        assert!(config.text_ordering);
        assert_eq!(config.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: FilterConfig = serde_json::from_str(r#"{"case_sensitive": true}"#).unwrap();
        assert!(config.case_sensitive);
        assert!(config.text_ordering);
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn test_from_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, r#"{{"text_ordering": false, "date_format": "%d/%m/%Y"}}"#)?;

        let config = FilterConfig::from_file(file.path())?;
        assert!(!config.text_ordering);
        assert_eq!(config.date_format, "%d/%m/%Y");
        Ok(())
    }

    #[test]
    fn test_from_missing_file() {
        assert!(FilterConfig::from_file("/nonexistent/rowfilter.json").is_err());
    }

    #[test]
    fn test_parse_date() {
        let config = FilterConfig {
            date_format: "%d/%m/%Y".to_string(),
            ..FilterConfig::default()
        };
        let expected = NaiveDate::from_ymd_opt(2023, 6, 15);
        assert_eq!(config.parse_date("15/06/2023"), expected);
        assert_eq!(config.parse_date("2023-06-15"), expected);
        assert_eq!(config.parse_date("2023-06-15T10:30:00+05:30"), expected);
        assert_eq!(config.parse_date("June 15"), None);
        assert_eq!(config.parse_date(""), None);
    }
}
