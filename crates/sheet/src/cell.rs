use crate::datetime::{self, DisplayOptions};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integral numbers below this magnitude render without a fractional part.
const INTEGRAL_DISPLAY_LIMIT: f64 = 1e15;

/// Represents a cell value in a sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Check if the value is empty: no value at all, or blank text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Try to get the value as a number.
    ///
    /// Text is trimmed and parsed; only finite values count.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            CellValue::Empty => None,
        }
    }

    /// Get the raw string form of the value.
    ///
    /// This is what search and lexical sort operate on; date serials stay
    /// numbers here.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
        }
    }

    /// Whether this is a number inside the date-serial window.
    #[must_use]
    pub fn is_date_serial(&self) -> bool {
        matches!(self, CellValue::Number(n) if datetime::is_date_serial(*n))
    }

    /// Get the display form of the value.
    ///
    /// Numbers in the date-serial window are rendered as calendar dates;
    /// everything else falls back to [`CellValue::as_text`].
    #[must_use]
    pub fn display(&self, options: &DisplayOptions) -> String {
        if let CellValue::Number(n) = self {
            if let Some(date) = datetime::format_serial(*n, &options.date_format) {
                return date;
            }
        }
        self.as_text()
    }

    /// Parse a string into a `CellValue` with type inference
    /// Tries: empty -> number -> text
    #[must_use]
    pub fn parse(s: &str) -> CellValue {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(s.to_string()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < INTEGRAL_DISPLAY_LIMIT {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Number(i as f64)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Number(f64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Number(f)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s)
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::from(s.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Empty,
        }
    }
}
