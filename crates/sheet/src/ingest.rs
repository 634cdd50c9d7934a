//! The ingestion pipeline: locate the sheet, detect its bounds, reconcile
//! the two header rows and extract employees.

use crate::a1_notation::column_index_to_letters;
use crate::bounds::BoundsDetector;
use crate::cell::CellValue;
use crate::entities::{extract_employees, EmployeeIdentity};
use crate::error::{Result, SheetError};
use crate::grid::{CellRect, GridSource, WorkbookSource};
use crate::headers::reconcile_headers;
use crate::locate::SheetLocator;
use crate::options::IngestOptions;
use crate::table::{NormalizedTable, EMPLOYEE_COLUMN, HEADER_ROWS, TICKET_COLUMN};
use crate::xlsx::ExcelWorkbook;
use std::path::Path;

/// Everything ingestion produces for the rest of the application
#[derive(Debug, Clone, PartialEq)]
pub struct Ingestion {
    pub table: NormalizedTable,
    pub employees: Vec<EmployeeIdentity>,
}

/// Runs the ingestion pipeline with a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    options: IngestOptions,
}

impl Ingestor {
    #[must_use]
    pub fn new(options: IngestOptions) -> Self {
        Ingestor { options }
    }

    pub fn options(&self) -> &IngestOptions {
        &self.options
    }

    pub fn locator(&self) -> SheetLocator {
        SheetLocator::new(self.options.sheet_aliases.as_slice())
    }

    /// Open an Excel file and ingest its target sheet
    pub fn ingest_path<P: AsRef<Path>>(&self, path: P) -> Result<Ingestion> {
        let mut workbook = ExcelWorkbook::open(path)?;
        self.ingest(&mut workbook)
    }

    /// Ingest the target sheet of a workbook
    ///
    /// # Errors
    ///
    /// `SheetNotFound` when no sheet matches the aliases, `EmptySheet` when the
    /// sheet has no data below its header rows, `NoValidEntities` when no row
    /// carries both a ticket and an employee name, and `MalformedSource` when
    /// the sheet fails to decode.
    pub fn ingest<W: WorkbookSource>(&self, workbook: &mut W) -> Result<Ingestion> {
        let names = workbook.sheet_names();
        let sheet = self.locator().locate(&names)?.to_string();
        tracing::info!("Processing sheet '{}'", sheet);

        let grid = workbook.grid(&sheet)?;
        let detector = BoundsDetector::new(
            self.options.scan_row_cap,
            self.options.scan_col_cap,
            self.options.min_end_col,
        );
        let bounds = detector.detect(&sheet, &grid)?;

        let mut rows = read_rows(&grid, bounds.rect);
        if bounds.is_empty() || rows.len() <= HEADER_ROWS {
            return Err(SheetError::EmptySheet { sheet });
        }

        let data_rows = rows.split_off(HEADER_ROWS);
        let headers = reconcile_headers(&header_text(&rows[0]), &header_text(&rows[1]), grid.merges());
        tracing::debug!(
            "Reconciled {} columns, {} group labels",
            headers.width(),
            headers.group_headers.iter().filter(|h| !h.trim().is_empty()).count()
        );

        let employees = extract_employees(&data_rows, HEADER_ROWS);
        if employees.is_empty() {
            return Err(SheetError::NoValidEntities {
                sheet,
                ticket_column: column_index_to_letters(TICKET_COLUMN),
                employee_column: column_index_to_letters(EMPLOYEE_COLUMN),
            });
        }

        let table = NormalizedTable::new(&sheet, headers, data_rows).with_header_merges(grid.merges());
        tracing::info!(
            "Loaded {} rows and {} unique employees from '{}'",
            table.row_count(),
            employees.len(),
            sheet
        );

        Ok(Ingestion { table, employees })
    }
}

fn header_text(row: &[CellValue]) -> Vec<String> {
    row.iter().map(CellValue::as_text).collect()
}

/// Slice the grid to `rect`, one row per sheet row, missing cells empty.
fn read_rows<G: GridSource>(grid: &G, rect: CellRect) -> Vec<Vec<CellValue>> {
    (rect.start_row..=rect.end_row)
        .map(|row| (rect.start_col..=rect.end_col).map(|col| grid.cell(row, col)).collect())
        .collect()
}
