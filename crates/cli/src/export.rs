//! Write a query view back to an xlsx workbook with its two header rows.

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};
use std::path::Path;
use ticketgrid_query::{reconstruct_spans, spans_from_merges, RowRef, SpanDescriptor};
use ticketgrid_sheet::{CellValue, NormalizedTable, HEADER_ROWS};

const EXCEL_DATE_FORMAT: &str = "m/d/yyyy";

fn row_number(index: usize) -> Result<u32> {
    u32::try_from(index).context("row index exceeds the worksheet limit")
}

fn col_number(index: usize) -> Result<u16> {
    u16::try_from(index).context("column index exceeds the worksheet limit")
}

/// Group spans to write: the sheet's own merges when it has any, otherwise
/// spans inferred from the labels.
pub fn header_spans(table: &NormalizedTable) -> Vec<SpanDescriptor> {
    if table.header_merges().is_empty() {
        reconstruct_spans(table.group_headers())
    } else {
        spans_from_merges(table.width(), table.group_headers(), table.header_merges())
    }
}

fn write_group_row(worksheet: &mut Worksheet, spans: &[SpanDescriptor], format: &Format) -> Result<()> {
    for span in spans {
        let first = col_number(span.column_index)?;
        if span.span > 1 {
            let last = col_number(span.end_column())?;
            worksheet.merge_range(0, first, 0, last, &span.label, format)?;
        } else if !span.label.is_empty() {
            worksheet.write_string_with_format(0, first, &span.label, format)?;
        }
    }
    Ok(())
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &CellValue, date: &Format) -> Result<()> {
    match cell {
        CellValue::Empty => {}
        CellValue::Number(n) if cell.is_date_serial() => {
            worksheet.write_number_with_format(row, col, *n, date)?;
        }
        CellValue::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        CellValue::Text(text) => {
            worksheet.write_string(row, col, text)?;
        }
    }
    Ok(())
}

/// Save `rows` under the table's group and column headers.
///
/// Returns the number of data rows written.
pub fn export_view(path: &Path, table: &NormalizedTable, rows: &[RowRef<'_>], spans: &[SpanDescriptor]) -> Result<usize> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(table.sheet_name())
        .with_context(|| format!("Invalid worksheet name '{}'", table.sheet_name()))?;

    let group = Format::new().set_bold().set_align(FormatAlign::Center);
    let header = Format::new().set_bold();
    let date = Format::new().set_num_format(EXCEL_DATE_FORMAT);

    write_group_row(worksheet, spans, &group)?;
    for (col, label) in table.column_headers().iter().enumerate() {
        worksheet.write_string_with_format(1, col_number(col)?, label, &header)?;
    }

    for (offset, row) in rows.iter().enumerate() {
        let sheet_row = row_number(offset + HEADER_ROWS)?;
        for (col, cell) in row.cells.iter().enumerate() {
            write_cell(worksheet, sheet_row, col_number(col)?, cell, &date)?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(rows.len())
}
