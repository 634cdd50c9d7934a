//! Grid sources: the raw cell and merge data ingestion reads from.
//!
//! A [`WorkbookSource`] exposes sheet names and hands out one [`GridSource`]
//! per sheet. Cells are addressed absolutely by 0-based `(row, col)`; anything
//! outside the stored data reads as [`CellValue::Empty`].

use crate::a1_notation::to_a1_notation;
use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive, 0-based rectangle of cells.
///
/// Used for declared ranges, detected bounds and merge rectangles alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

/// A merge rectangle as reported by the spreadsheet source.
pub type MergeRect = CellRect;

impl CellRect {
    pub fn new(start_row: usize, start_col: usize, end_row: usize, end_col: usize) -> Self {
        CellRect {
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    /// A rectangle spanning one row from `start_col` to `end_col`.
    pub fn row_span(row: usize, start_col: usize, end_col: usize) -> Self {
        Self::new(row, start_col, row, end_col)
    }

    pub fn row_count(&self) -> usize {
        self.end_row.saturating_sub(self.start_row) + 1
    }

    pub fn col_count(&self) -> usize {
        self.end_col.saturating_sub(self.start_col) + 1
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.start_row..=self.end_row).contains(&row) && (self.start_col..=self.end_col).contains(&col)
    }
}

impl fmt::Display for CellRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            to_a1_notation(self.start_row, self.start_col),
            to_a1_notation(self.end_row, self.end_col)
        )
    }
}

/// A single sheet's raw cells and merges.
pub trait GridSource {
    /// The declared nominal range of the sheet, `None` if the sheet declares none.
    fn declared_range(&self) -> Option<CellRect>;

    /// The value at an absolute position.
    fn cell(&self, row: usize, col: usize) -> CellValue;

    /// All merge rectangles of the sheet.
    fn merges(&self) -> &[MergeRect];
}

/// A set of named sheets.
pub trait WorkbookSource {
    type Grid: GridSource;

    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Decode one sheet.
    fn grid(&mut self, name: &str) -> Result<Self::Grid>;
}

/// An in-memory grid, anchored at A1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryGrid {
    rows: Vec<Vec<CellValue>>,
    merges: Vec<MergeRect>,
    declared: Option<CellRect>,
}

impl MemoryGrid {
    /// Create a grid from rows of values. The declared range covers the
    /// widest row; an empty grid declares no range.
    #[must_use]
    pub fn from_rows<T: Into<CellValue>>(rows: Vec<Vec<T>>) -> Self {
        let rows: Vec<Vec<CellValue>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let declared = (!rows.is_empty() && width > 0).then(|| CellRect::new(0, 0, rows.len() - 1, width - 1));

        MemoryGrid {
            rows,
            merges: Vec::new(),
            declared,
        }
    }

    /// Add a merge rectangle
    #[must_use]
    pub fn with_merge(mut self, merge: MergeRect) -> Self {
        self.merges.push(merge);
        self
    }

    /// Override the declared range
    #[must_use]
    pub fn with_declared_range(mut self, declared: Option<CellRect>) -> Self {
        self.declared = declared;
        self
    }
}

impl GridSource for MemoryGrid {
    fn declared_range(&self) -> Option<CellRect> {
        self.declared
    }

    fn cell(&self, row: usize, col: usize) -> CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .cloned()
            .unwrap_or_default()
    }

    fn merges(&self) -> &[MergeRect] {
        &self.merges
    }
}

/// An in-memory workbook (preserves insertion order)
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: IndexMap<String, MemoryGrid>,
}

impl MemoryWorkbook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet, replacing any sheet with the same name
    #[must_use]
    pub fn with_sheet(mut self, name: &str, grid: MemoryGrid) -> Self {
        self.sheets.insert(name.to_string(), grid);
        self
    }
}

impl WorkbookSource for MemoryWorkbook {
    type Grid = MemoryGrid;

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.keys().cloned().collect()
    }

    fn grid(&mut self, name: &str) -> Result<MemoryGrid> {
        self.sheets
            .get(name)
            .cloned()
            .ok_or_else(|| SheetError::MalformedSource(format!("sheet '{name}' is not in the workbook")))
    }
}
