//! Spreadsheet ingestion for ticketgrid
//!
//! Turns a work-tracking sheet with two stacked header rows (merged group
//! labels above column labels) into a [`NormalizedTable`] plus a
//! deduplicated list of employees.
//!
//! # Examples
//!
//! ## Ingesting an in-memory workbook
//!
//! ```
//! use ticketgrid_sheet::{Ingestor, MemoryGrid, MemoryWorkbook, MergeRect};
//!
//! let grid = MemoryGrid::from_rows(vec![
//!     vec!["General", "", "", "", "", "People"],
//!     vec!["Ticket #", "Opened", "Status", "Site", "Team", "Employee"],
//!     vec!["T-1", "", "open", "", "", "Alice"],
//!     vec!["T-2", "", "open", "", "", "alice"],
//! ])
//! .with_merge(MergeRect::row_span(0, 0, 4));
//!
//! let mut book = MemoryWorkbook::new().with_sheet("In Progress", grid);
//! let ingestion = Ingestor::default().ingest(&mut book).unwrap();
//!
//! assert_eq!(ingestion.table.row_count(), 2);
//! assert_eq!(ingestion.employees.len(), 1);
//! assert_eq!(ingestion.table.group_headers()[0], "General");
//! ```
//!
//! ## Loading from Excel
//!
//! ```no_run
//! use ticketgrid_sheet::Ingestor;
//!
//! let ingestion = Ingestor::default().ingest_path("tracker.xlsx").unwrap();
//! ```
//!
//! # Fixed schema
//!
//! Column A ([`TICKET_COLUMN`]) holds the ticket number and column F
//! ([`EMPLOYEE_COLUMN`]) the employee name. Rows 1 and 2 are headers.

mod a1_notation;
mod bounds;
mod cell;
mod datetime;
mod entities;
mod error;
mod grid;
mod headers;
mod ingest;
mod locate;
mod options;
mod table;
mod xlsx;

pub use a1_notation::{column_index_to_letters, parse_column, to_a1_notation};
pub use bounds::{BoundsDetector, DetectedBounds};
pub use cell::CellValue;
pub use datetime::{format_serial, is_date_serial, serial_to_date, DisplayOptions};
pub use entities::{extract_employees, search_employees, EmployeeIdentity};
pub use error::{Result, SheetError};
pub use grid::{CellRect, GridSource, MemoryGrid, MemoryWorkbook, MergeRect, WorkbookSource};
pub use headers::{reconcile_headers, TableHeaders};
pub use ingest::{Ingestion, Ingestor};
pub use locate::SheetLocator;
pub use options::IngestOptions;
pub use table::{NormalizedTable, EMPLOYEE_COLUMN, HEADER_ROWS, TICKET_COLUMN};
pub use xlsx::{ExcelGrid, ExcelWorkbook};
