use crate::error::{Result, SheetError};
use crate::grid::{CellRect, GridSource};
use crate::options::{DEFAULT_MIN_END_COL, DEFAULT_SCAN_COL_CAP, DEFAULT_SCAN_ROW_CAP};

/// Result of bounds detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedBounds {
    /// The actual data rectangle, anchored at A1
    pub rect: CellRect,
    /// Number of non-empty cells seen during the scan
    pub populated_cells: usize,
}

impl DetectedBounds {
    pub fn is_empty(&self) -> bool {
        self.populated_cells == 0
    }
}

/// Finds the smallest A1-anchored rectangle holding every non-empty cell,
/// scanning no further than the row and column caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundsDetector {
    row_cap: usize,
    col_cap: usize,
    min_end_col: usize,
}

impl Default for BoundsDetector {
    fn default() -> Self {
        BoundsDetector::new(DEFAULT_SCAN_ROW_CAP, DEFAULT_SCAN_COL_CAP, DEFAULT_MIN_END_COL)
    }
}

impl BoundsDetector {
    pub fn new(row_cap: usize, col_cap: usize, min_end_col: usize) -> Self {
        BoundsDetector {
            row_cap,
            col_cap,
            min_end_col,
        }
    }

    /// Scan the grid. Fails only when the grid declares no range at all.
    pub fn detect<G: GridSource + ?Sized>(&self, sheet: &str, grid: &G) -> Result<DetectedBounds> {
        let declared = grid.declared_range().ok_or_else(|| SheetError::EmptySheet {
            sheet: sheet.to_string(),
        })?;

        let scan_rows = declared.end_row.min(self.row_cap);
        let scan_cols = declared.end_col.min(self.col_cap);
        if declared.end_row > self.row_cap || declared.end_col > self.col_cap {
            tracing::warn!(
                "Sheet '{}' declares {}, scanning only {}",
                sheet,
                declared,
                CellRect::new(0, 0, scan_rows, scan_cols)
            );
        }

        let mut max_row = 0;
        let mut max_col = 0;
        let mut populated_cells = 0;
        for row in 0..=scan_rows {
            for col in 0..=scan_cols {
                if !grid.cell(row, col).is_empty() {
                    max_row = max_row.max(row);
                    max_col = max_col.max(col);
                    populated_cells += 1;
                }
            }
        }

        let rect = CellRect::new(0, 0, max_row, max_col.max(self.min_end_col));
        tracing::debug!(
            "Detected bounds of '{}': {} ({} rows x {} cols, {} populated cells)",
            sheet,
            rect,
            rect.row_count(),
            rect.col_count(),
            populated_cells
        );

        Ok(DetectedBounds { rect, populated_cells })
    }
}
