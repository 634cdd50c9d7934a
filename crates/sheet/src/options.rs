use crate::datetime::{DisplayOptions, DEFAULT_DATE_FORMAT};
use crate::error::{Result, SheetError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sheet name fragments accepted by default.
pub const DEFAULT_SHEET_ALIASES: [&str; 2] = ["in progress", "inprogress"];
/// Maximum row index scanned during bounds detection.
pub const DEFAULT_SCAN_ROW_CAP: usize = 5000;
/// Maximum column index scanned during bounds detection.
pub const DEFAULT_SCAN_COL_CAP: usize = 50;
/// Detected bounds always reach at least this column (G).
pub const DEFAULT_MIN_END_COL: usize = 6;

/// Options for ingesting a workbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// Case-insensitive name fragments identifying the target sheet
    pub sheet_aliases: Vec<String>,
    pub scan_row_cap: usize,
    pub scan_col_cap: usize,
    pub min_end_col: usize,
    /// chrono pattern for date-serial display
    pub date_format: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        IngestOptions {
            sheet_aliases: DEFAULT_SHEET_ALIASES.iter().map(|s| (*s).to_string()).collect(),
            scan_row_cap: DEFAULT_SCAN_ROW_CAP,
            scan_col_cap: DEFAULT_SCAN_COL_CAP,
            min_end_col: DEFAULT_MIN_END_COL,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl IngestOptions {
    /// Load options from a `.json`, `.yaml` or `.yml` file. Missing fields
    /// keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let options: IngestOptions = match extension.as_deref() {
            Some("json") => serde_json::from_str(&text).map_err(|e| SheetError::Config(e.to_string()))?,
            Some("yaml" | "yml") => serde_yaml::from_str(&text).map_err(|e| SheetError::Config(e.to_string()))?,
            _ => {
                return Err(SheetError::Config(format!(
                    "unsupported config file '{}', expected .json, .yaml or .yml",
                    path.display()
                )))
            }
        };
        options.validate()?;
        Ok(options)
    }

    /// Reject options no ingestion could succeed with.
    pub fn validate(&self) -> Result<()> {
        if self.sheet_aliases.iter().all(|alias| alias.trim().is_empty()) {
            return Err(SheetError::Config("at least one non-empty sheet alias is required".to_string()));
        }
        Ok(())
    }

    /// Replace the sheet aliases
    #[must_use]
    pub fn with_sheet_aliases<S: Into<String>>(mut self, aliases: impl IntoIterator<Item = S>) -> Self {
        self.sheet_aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Set the bounds-detection scan caps
    #[must_use]
    pub fn with_scan_caps(mut self, row_cap: usize, col_cap: usize) -> Self {
        self.scan_row_cap = row_cap;
        self.scan_col_cap = col_cap;
        self
    }

    /// Set the minimum end column of detected bounds
    #[must_use]
    pub fn with_min_end_col(mut self, min_end_col: usize) -> Self {
        self.min_end_col = min_end_col;
        self
    }

    /// Set the date display pattern
    #[must_use]
    pub fn with_date_format(mut self, date_format: &str) -> Self {
        self.date_format = date_format.to_string();
        self
    }

    /// Display options derived from these ingest options
    #[must_use]
    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            date_format: self.date_format.clone(),
        }
    }
}
