use serde::Serialize;
use std::collections::HashSet;
use ticketgrid_sheet::{CellValue, NormalizedTable, EMPLOYEE_COLUMN, TICKET_COLUMN};

/// Summary counts for a table and one filtered view of it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub total_rows: usize,
    pub unique_employees: usize,
    pub unique_tickets: usize,
    pub filtered_rows: usize,
}

/// Compute stats over all rows. Distinct counts key on the cell kind and its
/// exact raw text, skipping blank cells; only `filtered_rows` depends on the
/// current view.
pub fn compute(table: &NormalizedTable, filtered_rows: usize) -> TableStats {
    TableStats {
        total_rows: table.row_count(),
        unique_employees: distinct_values(table, EMPLOYEE_COLUMN),
        unique_tickets: distinct_values(table, TICKET_COLUMN),
        filtered_rows,
    }
}

fn distinct_values(table: &NormalizedTable, column: usize) -> usize {
    table
        .rows()
        .iter()
        .filter_map(|row| row.get(column))
        .filter(|cell| !cell.is_empty())
        .map(|cell| (matches!(cell, CellValue::Number(_)), cell.as_text()))
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketgrid_sheet::TableHeaders;

    fn table(rows: &[(&str, &str)]) -> NormalizedTable {
        let headers = TableHeaders {
            group_headers: vec![String::new(); 6],
            column_headers: ["Ticket #", "B", "C", "D", "E", "Employee"].iter().map(|s| s.to_string()).collect(),
        };
        let rows = rows
            .iter()
            .map(|(ticket, employee)| {
                let mut row = vec![CellValue::Empty; 6];
                row[TICKET_COLUMN] = CellValue::from(*ticket);
                row[EMPLOYEE_COLUMN] = CellValue::from(*employee);
                row
            })
            .collect();
        NormalizedTable::new("In Progress", headers, rows)
    }

    #[test]
    fn test_counts_distinct_non_empty_values() {
        let table = table(&[("T1", "Alice"), ("T1", "alice"), ("T2", ""), ("", "Bob"), ("T3", "  ")]);
        let stats = compute(&table, 2);
        assert_eq!(
            stats,
            TableStats {
                total_rows: 5,
                unique_employees: 3,
                unique_tickets: 3,
                filtered_rows: 2,
            }
        );
    }

    #[test]
    fn test_numeric_and_text_tickets_count_separately() {
        let mut table_rows = vec![vec![CellValue::Empty; 6], vec![CellValue::Empty; 6]];
        table_rows[0][TICKET_COLUMN] = CellValue::Number(1001.0);
        table_rows[1][TICKET_COLUMN] = CellValue::from("1001");
        let headers = TableHeaders {
            group_headers: vec![String::new(); 6],
            column_headers: vec![String::new(); 6],
        };
        let table = NormalizedTable::new("S", headers, table_rows);
        assert_eq!(compute(&table, 0).unique_tickets, 2);
    }
}
