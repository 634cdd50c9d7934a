use serde::Serialize;
use std::collections::HashSet;
use ticketgrid_sheet::{CellValue, NormalizedTable, EMPLOYEE_COLUMN, TICKET_COLUMN};

/// One table row assigned to an employee
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedRecord {
    /// Position of the row in the table's base rows
    pub row_index: usize,
    pub ticket: String,
    pub cells: Vec<CellValue>,
}

/// All records for one employee
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeRecords {
    pub employee_name: String,
    pub records: Vec<MatchedRecord>,
    pub unique_tickets: usize,
}

impl EmployeeRecords {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Rows whose employee cell equals `employee_name` once both are trimmed and
/// lowercased, in table order. No match yields an empty result.
pub fn match_records(table: &NormalizedTable, employee_name: &str) -> EmployeeRecords {
    let target = normalize(employee_name);
    let records: Vec<MatchedRecord> = if target.is_empty() {
        Vec::new()
    } else {
        table
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                row.get(EMPLOYEE_COLUMN)
                    .is_some_and(|cell| normalize(&cell.as_text()) == target)
            })
            .map(|(row_index, row)| MatchedRecord {
                row_index,
                ticket: row
                    .get(TICKET_COLUMN)
                    .map(|cell| cell.as_text().trim().to_string())
                    .unwrap_or_default(),
                cells: row.clone(),
            })
            .collect()
    };

    let unique_tickets = records
        .iter()
        .filter(|record| !record.ticket.is_empty())
        .map(|record| record.ticket.as_str())
        .collect::<HashSet<_>>()
        .len();

    tracing::debug!("Matched {} records for '{}'", records.len(), employee_name.trim());

    EmployeeRecords {
        employee_name: employee_name.trim().to_string(),
        records,
        unique_tickets,
    }
}
