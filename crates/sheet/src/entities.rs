use crate::cell::CellValue;
use crate::table::{EMPLOYEE_COLUMN, TICKET_COLUMN};
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A deduplicated employee, as first seen in the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeIdentity {
    pub display_name: String,
    pub primary_ticket: String,
    /// 0-based sheet row of the first occurrence, header rows included
    pub source_row_index: usize,
}

/// Scan data rows for (ticket, employee) pairs and deduplicate employees
/// case-insensitively.
///
/// Rows missing either value (after trimming) are skipped. The first row
/// seen for a name wins; later rows with the same name are dropped, never
/// merged into it. `row_offset` is the number of rows preceding `rows` in
/// the sheet.
pub fn extract_employees(rows: &[Vec<CellValue>], row_offset: usize) -> Vec<EmployeeIdentity> {
    let mut seen: IndexMap<String, EmployeeIdentity> = IndexMap::new();

    for (index, row) in rows.iter().enumerate() {
        let Some((ticket, name)) = ticket_and_name(row) else {
            continue;
        };
        if let Entry::Vacant(slot) = seen.entry(name.to_lowercase()) {
            slot.insert(EmployeeIdentity {
                display_name: name,
                primary_ticket: ticket,
                source_row_index: index + row_offset,
            });
        }
    }

    tracing::debug!("Extracted {} unique employees from {} rows", seen.len(), rows.len());
    seen.into_values().collect()
}

fn ticket_and_name(row: &[CellValue]) -> Option<(String, String)> {
    let ticket = row.get(TICKET_COLUMN)?.as_text().trim().to_string();
    let name = row.get(EMPLOYEE_COLUMN)?.as_text().trim().to_string();
    (!ticket.is_empty() && !name.is_empty()).then_some((ticket, name))
}

/// Employees whose name contains `term`, case-insensitively, in list order.
///
/// An empty term selects nobody. Whitespace is matched like any other text.
pub fn search_employees<'a>(employees: &'a [EmployeeIdentity], term: &str) -> Vec<&'a EmployeeIdentity> {
    let term = term.to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }
    employees
        .iter()
        .filter(|e| e.display_name.to_lowercase().contains(&term))
        .collect()
}
