//! Date-serial detection and display formatting.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Days between 1899-12-30 (serial 0) and 1970-01-01.
const EXCEL_EPOCH: i64 = 25569;

/// Numbers strictly inside this window are treated as date serials for display.
pub const DATE_SERIAL_MIN: f64 = 30000.0;
pub const DATE_SERIAL_MAX: f64 = 80000.0;

pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Options controlling how cells are rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// chrono `strftime` pattern used for date serials
    pub date_format: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Whether a number falls inside the plausible date-serial window.
pub fn is_date_serial(value: f64) -> bool {
    value > DATE_SERIAL_MIN && value < DATE_SERIAL_MAX
}

/// Convert an Excel serial date to a calendar date (time of day dropped).
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    let unix_days = serial.floor() as i64 - EXCEL_EPOCH;
    DateTime::from_timestamp(unix_days * 86_400, 0).map(|dt| dt.date_naive())
}

/// Format a serial as a date if it is inside the date-serial window.
///
/// An invalid pattern falls back to ISO `YYYY-MM-DD`.
pub fn format_serial(serial: f64, pattern: &str) -> Option<String> {
    if !is_date_serial(serial) {
        return None;
    }
    let date = serial_to_date(serial)?;
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        return Some(date.format("%Y-%m-%d").to_string());
    }
    Some(out)
}
