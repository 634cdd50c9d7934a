//! Terminal, JSON and CSV rendering of query results.

use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use ticketgrid_query::{EmployeeRecords, RowRef, SpanDescriptor, TableStats};
use ticketgrid_sheet::{column_index_to_letters, CellValue, DisplayOptions, EmployeeIdentity, NormalizedTable};

const MAX_CELL_WIDTH: usize = 32;
const SEPARATOR: &str = " | ";

/// Shorten text to the display width, marking the cut.
fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(MAX_CELL_WIDTH - 3).collect();
    clipped.push_str("...");
    clipped
}

fn display_row(cells: &[CellValue], display: &DisplayOptions) -> Vec<String> {
    cells.iter().map(|cell| clip(&cell.display(display))).collect()
}

fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let letters = column_index_to_letters(col).len();
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|text| text.chars().count())
                .chain([header.chars().count(), letters])
                .max()
                .unwrap_or(1)
        })
        .collect()
}

fn pad(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}

/// Width of a span of columns including the separators between them.
fn span_width(widths: &[usize], span: &SpanDescriptor) -> usize {
    let columns = widths.iter().skip(span.column_index).take(span.span);
    columns.sum::<usize>() + SEPARATOR.len() * span.span.saturating_sub(1)
}

/// Render the header rows and data rows as an aligned text table.
pub fn render_table(
    table: &NormalizedTable,
    rows: &[RowRef<'_>],
    spans: &[SpanDescriptor],
    display: &DisplayOptions,
) -> String {
    let headers: Vec<String> = table.column_headers().iter().map(|h| clip(h.trim())).collect();
    let body: Vec<Vec<String>> = rows.iter().map(|row| display_row(row.cells, display)).collect();
    let widths = column_widths(&headers, &body);

    let mut out = String::new();

    let groups: Vec<String> = spans
        .iter()
        .map(|span| {
            let width = span_width(&widths, span);
            let label = clip(span.label.trim());
            format!("{label:^width$}").cyan().bold().to_string()
        })
        .collect();
    out.push_str(&groups.join(SEPARATOR));
    out.push('\n');

    let letters: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(col, width)| pad(&column_index_to_letters(col), *width).dimmed().to_string())
        .collect();
    out.push_str(&letters.join(SEPARATOR));
    out.push('\n');

    let titles: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(header, *width).bold().to_string())
        .collect();
    out.push_str(&titles.join(SEPARATOR));
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');

    for row in &body {
        let cells: Vec<String> = row.iter().zip(&widths).map(|(text, width)| pad(text, *width)).collect();
        out.push_str(cells.join(SEPARATOR).trim_end());
        out.push('\n');
    }

    out
}

pub fn render_stats(sheet: &str, stats: &TableStats) -> String {
    format!(
        "{}  {} rows, {} employees, {} tickets ({} shown)",
        sheet.green().bold(),
        stats.total_rows,
        stats.unique_employees,
        stats.unique_tickets,
        stats.filtered_rows
    )
}

pub fn render_employees(employees: &[&EmployeeIdentity]) -> String {
    if employees.is_empty() {
        return "(no employees)\n".yellow().to_string();
    }
    let name_width = employees
        .iter()
        .map(|e| e.display_name.chars().count())
        .chain(["Employee".len()])
        .max()
        .unwrap_or(0);
    let ticket_width = employees
        .iter()
        .map(|e| e.primary_ticket.chars().count())
        .chain(["Ticket".len()])
        .max()
        .unwrap_or(0);

    let mut out = format!(
        "{}{SEPARATOR}{}{SEPARATOR}{}\n",
        pad("Employee", name_width).bold(),
        pad("Ticket", ticket_width).bold(),
        "Row".bold()
    );
    for employee in employees {
        out.push_str(&format!(
            "{}{SEPARATOR}{}{SEPARATOR}{}\n",
            pad(&employee.display_name, name_width),
            pad(&employee.primary_ticket, ticket_width),
            employee.source_row_index + 1
        ));
    }
    out
}

pub fn render_records_summary(records: &EmployeeRecords) -> String {
    if records.is_empty() {
        return format!("No records for '{}'", records.employee_name).yellow().to_string();
    }
    format!(
        "{}  {} records, {} unique tickets",
        records.employee_name.green().bold(),
        records.records.len(),
        records.unique_tickets
    )
}

/// Write a header line and display-formatted rows as CSV.
pub fn write_csv<W: Write>(writer: W, headers: &[String], rows: &[&[CellValue]], display: &DisplayOptions) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(headers)?;
    for row in rows {
        csv.write_record(row.iter().map(|cell| cell.display(display)))?;
    }
    csv.flush()?;
    Ok(())
}

/// JSON object for one row, keyed by column header (or letter when blank).
pub fn row_json(headers: &[String], cells: &[CellValue], display: &DisplayOptions) -> serde_json::Value {
    let object = headers
        .iter()
        .zip(cells)
        .enumerate()
        .map(|(col, (header, cell))| {
            let key = if header.trim().is_empty() {
                column_index_to_letters(col)
            } else {
                header.trim().to_string()
            };
            let value = match cell {
                CellValue::Empty => serde_json::Value::Null,
                CellValue::Number(n) if !cell.is_date_serial() => serde_json::json!(n),
                _ => serde_json::Value::String(cell.display(display)),
            };
            (key, value)
        })
        .collect();
    serde_json::Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketgrid_query::{filter_rows, reconstruct_spans};
    use ticketgrid_sheet::TableHeaders;

    fn table() -> NormalizedTable {
        let headers = TableHeaders {
            group_headers: vec!["General".into(), String::new(), "People".into()],
            column_headers: vec!["Ticket #".into(), "Opened".into(), "Employee".into()],
        };
        let rows = vec![
            vec![CellValue::Number(1001.0), CellValue::Number(44562.0), CellValue::from("Alice")],
            vec![CellValue::from("T-2"), CellValue::Empty, CellValue::from("Bob")],
        ];
        NormalizedTable::new("In Progress", headers, rows)
    }

    #[test]
    fn test_clip_long_text() {
        let long = "x".repeat(50);
        assert_eq!(clip(&long).chars().count(), MAX_CELL_WIDTH);
        assert!(clip(&long).ends_with("..."));
        assert_eq!(clip("short"), "short");
    }

    #[test]
    fn test_span_width_includes_separators() {
        let widths = [4, 6, 3];
        let span = SpanDescriptor {
            column_index: 0,
            label: "General".into(),
            span: 2,
        };
        assert_eq!(span_width(&widths, &span), 4 + 6 + SEPARATOR.len());
    }

    #[test]
    fn test_render_table_shows_dates_and_letters() {
        colored::control::set_override(false);
        let table = table();
        let rows = filter_rows(table.rows(), "");
        let spans = reconstruct_spans(table.group_headers());
        let out = render_table(&table, &rows, &spans, &DisplayOptions::default());
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].contains("General"));
        assert!(lines[0].contains("People"));
        assert!(lines[1].starts_with('A'));
        assert!(lines[2].contains("Ticket #"));
        assert!(lines[4].contains("1001"));
        assert!(lines[4].contains("1/1/2022"));
        assert!(lines[5].contains("T-2"));
    }

    #[test]
    fn test_row_json_keys_and_values() {
        let headers = vec!["Ticket #".to_string(), String::new(), "Opened".to_string()];
        let cells = [CellValue::Number(7.0), CellValue::from("x"), CellValue::Number(44562.0)];
        let json = row_json(&headers, &cells, &DisplayOptions::default());
        assert_eq!(json["Ticket #"], serde_json::json!(7.0));
        assert_eq!(json["B"], "x");
        assert_eq!(json["Opened"], "1/1/2022");
    }

    #[test]
    fn test_write_csv_uses_display_values() {
        let table = table();
        let rows: Vec<&[CellValue]> = table.rows().iter().map(Vec::as_slice).collect();
        let mut buffer = Vec::new();
        write_csv(&mut buffer, table.column_headers(), &rows, &DisplayOptions::default()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "Ticket #,Opened,Employee\n1001,1/1/2022,Alice\nT-2,,Bob\n");
    }

    #[test]
    fn test_render_employees() {
        colored::control::set_override(false);
        let alice = EmployeeIdentity {
            display_name: "Alice".into(),
            primary_ticket: "1001".into(),
            source_row_index: 2,
        };
        let out = render_employees(&[&alice]);
        assert!(out.contains("Alice"));
        assert!(out.lines().nth(1).is_some_and(|line| line.ends_with('3')));
        assert!(render_employees(&[]).contains("no employees"));
    }
}
