use ticketgrid_query::{
    compute_stats, filter_rows, match_records, reconstruct_spans, run, sort_rows, QueryState, SortDirection,
};
use ticketgrid_sheet::{CellValue, Ingestor, MemoryGrid, MemoryWorkbook, MergeRect, NormalizedTable};

fn tracker() -> NormalizedTable {
    let grid = MemoryGrid::from_rows(vec![
        vec!["General Information", "", "", "Onboarding", "", "", ""],
        vec!["Ticket #", "Opened", "Status", "Site", "Team", "Employee", "Step"],
        vec!["1003", "45000", "open", "North", "Ops", "Bob", "5"],
        vec!["1001", "44562", "open", "South", "Ops", "Alice", "10"],
        vec!["1002", "45001", "hold", "North", "Dev", "alice ", "2"],
        vec!["1004", "", "open", "East", "Dev", "Carol", "9"],
        vec!["1005", "45003", "done", "West", "Ops", "BOB", "2"],
    ])
    .with_merge(MergeRect::row_span(0, 0, 2))
    .with_merge(MergeRect::row_span(0, 3, 6));

    let mut book = MemoryWorkbook::new().with_sheet("In Progress", grid);
    Ingestor::default().ingest(&mut book).unwrap().table
}

#[test]
fn test_empty_search_is_identity() {
    let table = tracker();
    let view = run(&table, &QueryState::new());
    assert_eq!(view.indices(), (0..table.row_count()).collect::<Vec<_>>());
    for row in view.iter() {
        assert_eq!(row.cells, table.rows()[row.index].as_slice());
    }
}

#[test]
fn test_search_finds_any_cell() {
    let table = tracker();
    let view = run(&table, &QueryState::new().with_search("NORTH"));
    assert_eq!(view.indices(), vec![0, 2]);

    let view = run(&table, &QueryState::new().with_search("alice"));
    assert_eq!(view.indices(), vec![1, 2]);
}

#[test]
fn test_sort_numeric_column() {
    let table = tracker();
    let view = run(&table, &QueryState::new().with_sort(6, SortDirection::Ascending));
    let steps: Vec<String> = view.iter().map(|r| r.cells[6].as_text()).collect();
    assert_eq!(steps, vec!["2", "2", "5", "9", "10"]);
    // Ties keep base order
    assert_eq!(&view.indices()[..2], &[2, 4]);
}

#[test]
fn test_descending_reverses_without_ties() {
    let table = tracker();
    let asc = run(&table, &QueryState::new().with_sort(0, SortDirection::Ascending)).indices();
    let mut desc = run(&table, &QueryState::new().with_sort(0, SortDirection::Descending)).indices();
    desc.reverse();
    assert_eq!(asc, desc);
}

#[test]
fn test_sorts_are_not_cumulative() {
    let table = tracker();
    let mut state = QueryState::new();
    state.toggle_sort(5);
    state.toggle_sort(2);
    let view = run(&table, &state);
    // Only the status column applies; ties fall back to base order
    assert_eq!(view.indices(), vec![4, 2, 0, 1, 3]);
}

#[test]
fn test_filter_then_sort() {
    let table = tracker();
    let state = QueryState::new().with_search("ops").with_sort(0, SortDirection::Descending);
    let tickets: Vec<String> = run(&table, &state).iter().map(|r| r.cells[0].as_text()).collect();
    assert_eq!(tickets, vec!["1005", "1003", "1001"]);
}

#[test]
fn test_stats_ignore_filter() {
    let table = tracker();
    let view = run(&table, &QueryState::new().with_search("dev"));
    let stats = compute_stats(&table, view.len());
    assert_eq!(stats.total_rows, 5);
    assert_eq!(stats.unique_tickets, 5);
    // Exact raw strings: "Alice", "alice ", "Bob", "BOB", "Carol"
    assert_eq!(stats.unique_employees, 5);
    assert_eq!(stats.filtered_rows, 2);
}

#[test]
fn test_records_for_employee() {
    let table = tracker();
    let records = match_records(&table, "BOB");
    assert_eq!(records.records.iter().map(|r| r.row_index).collect::<Vec<_>>(), vec![0, 4]);
    assert_eq!(records.unique_tickets, 2);

    let records = match_records(&table, "alice");
    assert_eq!(records.records.len(), 2);
}

#[test]
fn test_group_spans_tile_header() {
    let table = tracker();
    let spans = reconstruct_spans(table.group_headers());
    assert_eq!(spans.iter().map(|s| s.span).sum::<usize>(), table.width());
    assert_eq!(spans[0].label, "General Information");
    assert_eq!(spans[1].column_index, 3);
}

#[test]
fn test_sort_rows_on_mixed_values() {
    let rows = vec![
        vec![CellValue::Number(10.0)],
        vec![CellValue::from("abc")],
        vec![CellValue::Number(9.0)],
        vec![CellValue::Empty],
    ];
    let mut view = filter_rows(&rows, "");
    sort_rows(&mut view, 0, SortDirection::Ascending);
    assert_eq!(view.len(), 4);
    // Numeric pairs still order numerically relative to each other
    let nine = view.iter().position(|r| r.index == 2).unwrap();
    let ten = view.iter().position(|r| r.index == 0).unwrap();
    assert!(nine < ten);
}
