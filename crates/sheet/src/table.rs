use crate::cell::CellValue;
use crate::grid::MergeRect;
use crate::headers::TableHeaders;
use serde::{Deserialize, Serialize};

/// Column holding the ticket number (A).
pub const TICKET_COLUMN: usize = 0;
/// Column holding the employee name (F).
pub const EMPLOYEE_COLUMN: usize = 5;
/// Rows above the data: group labels, then column labels.
pub const HEADER_ROWS: usize = 2;

/// The normalized sheet handed to queries, stats and lookups.
///
/// Every row has exactly one cell per header column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTable {
    sheet_name: String,
    group_headers: Vec<String>,
    column_headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
    header_merges: Vec<MergeRect>,
}

impl NormalizedTable {
    /// Build a table, padding or truncating each row to the header width.
    #[must_use]
    pub fn new(sheet_name: &str, headers: TableHeaders, rows: Vec<Vec<CellValue>>) -> Self {
        let width = headers.width();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();

        NormalizedTable {
            sheet_name: sheet_name.to_string(),
            group_headers: headers.group_headers,
            column_headers: headers.column_headers,
            rows,
            header_merges: Vec::new(),
        }
    }

    /// Attach the row-0 merge rectangles, clipped to the table width.
    /// Merges that start outside the table are dropped.
    #[must_use]
    pub fn with_header_merges(mut self, merges: &[MergeRect]) -> Self {
        let width = self.width();
        self.header_merges = merges
            .iter()
            .filter(|m| m.start_row == 0 && m.start_col < width)
            .map(|m| MergeRect::row_span(0, m.start_col, m.end_col.min(width - 1)))
            .collect();
        self
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    pub fn group_headers(&self) -> &[String] {
        &self.group_headers
    }

    pub fn column_headers(&self) -> &[String] {
        &self.column_headers
    }

    pub fn header_merges(&self) -> &[MergeRect] {
        &self.header_merges
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.column_headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The cell at (row, col), `None` outside the table.
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}
