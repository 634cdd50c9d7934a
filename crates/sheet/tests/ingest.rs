use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;
use tempfile::tempdir;
use ticketgrid_sheet::{CellValue, IngestOptions, Ingestor, MergeRect, SheetError};

fn write_headers(worksheet: &mut Worksheet) {
    let merged = Format::new();
    worksheet.merge_range(0, 0, 0, 2, "General Information", &merged).unwrap();
    worksheet.merge_range(0, 3, 0, 6, "Onboarding", &merged).unwrap();
    for (col, label) in ["Ticket #", "Opened", "Workforce", "Site", "Team", "Employee", "Step"]
        .iter()
        .enumerate()
    {
        worksheet.write_string(1, col as u16, *label).unwrap();
    }
}

fn write_tracker(path: &Path) {
    let mut workbook = Workbook::new();

    let done = workbook.add_worksheet();
    done.set_name("Done").unwrap();
    done.write_string(0, 0, "archived").unwrap();

    let progress = workbook.add_worksheet();
    progress.set_name("Tickets In Progress").unwrap();
    write_headers(progress);

    let rows = [
        (1001.0, 45000.0, "Alice Smith", "2"),
        (1002.0, 45001.0, "alice smith ", "3"),
        (1003.0, 45002.0, "Bob Jones", "5"),
    ];
    for (i, (ticket, opened, employee, step)) in rows.iter().enumerate() {
        let row = (i + 2) as u32;
        progress.write_number(row, 0, *ticket).unwrap();
        progress.write_number(row, 1, *opened).unwrap();
        progress.write_string(row, 5, *employee).unwrap();
        progress.write_string(row, 6, *step).unwrap();
    }
    // Row with no employee: kept in the table, ignored for employees
    progress.write_number(5, 0, 1004.0).unwrap();

    workbook.save(path).unwrap();
}

#[test]
fn test_ingest_xlsx_tracker() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tracker.xlsx");
    write_tracker(&path);

    let ingestion = Ingestor::default().ingest_path(&path).unwrap();
    let table = &ingestion.table;

    assert_eq!(table.sheet_name(), "Tickets In Progress");
    assert_eq!(
        table.group_headers(),
        ["General Information", "", "", "Onboarding", "", "", ""]
    );
    assert_eq!(table.column_headers()[0], "Ticket #");
    assert_eq!(table.column_headers()[5], "Employee");
    assert_eq!(table.row_count(), 4);
    assert!(table.rows().iter().all(|row| row.len() == table.width()));
    assert_eq!(table.cell(0, 0), Some(&CellValue::Number(1001.0)));
    assert_eq!(
        table.header_merges(),
        [MergeRect::row_span(0, 0, 2), MergeRect::row_span(0, 3, 6)]
    );

    assert_eq!(ingestion.employees.len(), 2);
    assert_eq!(ingestion.employees[0].display_name, "Alice Smith");
    assert_eq!(ingestion.employees[0].primary_ticket, "1001");
    assert_eq!(ingestion.employees[0].source_row_index, 2);
    assert_eq!(ingestion.employees[1].display_name, "Bob Jones");
}

#[test]
fn test_ingest_xlsx_without_target_sheet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("other.xlsx");

    let mut workbook = Workbook::new();
    workbook.add_worksheet().set_name("Backlog").unwrap();
    workbook.add_worksheet().set_name("Done").unwrap();
    workbook.save(&path).unwrap();

    let err = Ingestor::default().ingest_path(&path).unwrap_err();
    match &err {
        SheetError::SheetNotFound { available, .. } => assert_eq!(available, &vec!["Backlog", "Done"]),
        other => panic!("expected SheetNotFound, got {other:?}"),
    }
    assert!(err.to_string().contains("Available sheets: Backlog, Done"));
}

#[test]
fn test_ingest_xlsx_headers_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("headers.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("In Progress").unwrap();
    write_headers(worksheet);
    workbook.save(&path).unwrap();

    assert!(matches!(
        Ingestor::default().ingest_path(&path),
        Err(SheetError::EmptySheet { .. })
    ));
}

#[test]
fn test_ingest_xlsx_wrong_columns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shifted.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("In Progress").unwrap();
    write_headers(worksheet);
    // Employee written to column E instead of F
    worksheet.write_string(2, 0, "T-1").unwrap();
    worksheet.write_string(2, 4, "Alice").unwrap();
    workbook.save(&path).unwrap();

    let err = Ingestor::default().ingest_path(&path).unwrap_err();
    assert!(matches!(err, SheetError::NoValidEntities { .. }));
    assert!(err.to_string().contains("columns A (ticket #) and F (employee name)"));
}

#[test]
fn test_ingest_xlsx_scan_caps_bound_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("long.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("inprogress").unwrap();
    write_headers(worksheet);
    for row in 2..40u32 {
        worksheet.write_string(row, 0, &format!("T{row}")).unwrap();
        worksheet.write_string(row, 5, &format!("Person {row}")).unwrap();
    }
    workbook.save(&path).unwrap();

    let ingestor = Ingestor::new(IngestOptions::default().with_scan_caps(9, 50));
    let ingestion = ingestor.ingest_path(&path).unwrap();

    // Rows 0..=9 scanned: two header rows and eight data rows
    assert_eq!(ingestion.table.row_count(), 8);
    assert_eq!(ingestion.employees.len(), 8);
}
