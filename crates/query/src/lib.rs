//! Queries over a [`NormalizedTable`](ticketgrid_sheet::NormalizedTable)
//!
//! Everything here is a pure function of the table and its inputs: search
//! and sort ([`run`]), summary counts ([`compute_stats`]), per-employee
//! records ([`match_records`]) and group header spans
//! ([`reconstruct_spans`]).
//!
//! ```
//! use ticketgrid_query::{run, QueryState};
//! use ticketgrid_sheet::{Ingestor, MemoryGrid, MemoryWorkbook};
//!
//! let grid = MemoryGrid::from_rows(vec![
//!     vec!["", "", "", "", "", ""],
//!     vec!["Ticket #", "", "", "", "", "Employee"],
//!     vec!["10", "", "", "", "", "Alice"],
//!     vec!["9", "", "", "", "", "Bob"],
//! ]);
//! let mut book = MemoryWorkbook::new().with_sheet("In Progress", grid);
//! let table = Ingestor::default().ingest(&mut book).unwrap().table;
//!
//! let mut state = QueryState::new();
//! state.toggle_sort(0);
//! assert_eq!(run(&table, &state).indices(), vec![1, 0]);
//! ```

mod matcher;
mod query;
mod spans;
mod stats;

pub use matcher::{match_records, EmployeeRecords, MatchedRecord};
pub use query::{compare_cells, filter_rows, run, sort_rows, QueryState, QueryView, RowRef, SortDirection};
pub use spans::{reconstruct_spans, span_mismatches, spans_from_merges, SpanDescriptor};
pub use stats::{compute as compute_stats, TableStats};
