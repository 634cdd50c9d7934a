use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use ticketgrid_sheet::{CellValue, NormalizedTable};

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Search and sort settings for one view of a table.
///
/// Owned by the caller; every query is recomputed from the table's base rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub search_term: String,
    pub sort_column: Option<usize>,
    pub sort_direction: SortDirection,
}

impl QueryState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term
    #[must_use]
    pub fn with_search(mut self, term: &str) -> Self {
        self.search_term = term.to_string();
        self
    }

    /// Sort by a column in the given direction
    #[must_use]
    pub fn with_sort(mut self, column: usize, direction: SortDirection) -> Self {
        self.sort_column = Some(column);
        self.sort_direction = direction;
        self
    }

    /// Select a sort column: the current column flips direction, any other
    /// column starts ascending.
    pub fn toggle_sort(&mut self, column: usize) {
        if self.sort_column == Some(column) {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_column = Some(column);
            self.sort_direction = SortDirection::Ascending;
        }
    }

    pub fn clear_search(&mut self) {
        self.search_term.clear();
    }

    /// Clear the search term and the sort column.
    pub fn reset(&mut self) {
        self.search_term.clear();
        self.sort_column = None;
    }
}

/// A row of a query result, borrowed from the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowRef<'a> {
    /// Position of the row in the table's base rows
    pub index: usize,
    pub cells: &'a [CellValue],
}

impl<'a> RowRef<'a> {
    pub fn cell(&self, col: usize) -> Option<&'a CellValue> {
        self.cells.get(col)
    }
}

/// The filtered and sorted rows of a table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryView<'a> {
    rows: Vec<RowRef<'a>>,
}

impl<'a> QueryView<'a> {
    pub fn rows(&self) -> &[RowRef<'a>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowRef<'a>> {
        self.rows.iter()
    }

    /// Base row positions in view order
    pub fn indices(&self) -> Vec<usize> {
        self.rows.iter().map(|row| row.index).collect()
    }
}

/// Run a query: filter by the search term, then sort if a column is set.
pub fn run<'a>(table: &'a NormalizedTable, state: &QueryState) -> QueryView<'a> {
    let mut rows = filter_rows(table.rows(), &state.search_term);
    if let Some(column) = state.sort_column {
        sort_rows(&mut rows, column, state.sort_direction);
    }
    tracing::debug!(
        "Query '{}' matched {} of {} rows",
        state.search_term,
        rows.len(),
        table.row_count()
    );
    QueryView { rows }
}

/// Rows where any cell's raw text contains `term`, case-insensitively.
/// An empty term keeps every row.
pub fn filter_rows<'a>(rows: &'a [Vec<CellValue>], term: &str) -> Vec<RowRef<'a>> {
    let needle = term.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| needle.is_empty() || row_contains(row, &needle))
        .map(|(index, cells)| RowRef { index, cells })
        .collect()
}

fn row_contains(row: &[CellValue], needle: &str) -> bool {
    row.iter().any(|cell| cell.as_text().to_lowercase().contains(needle))
}

/// Compare two cells: numerically when both start with a number, otherwise by
/// their raw text, case-sensitively.
pub fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    SortKey::of(Some(a)).compare(&SortKey::of(Some(b)))
}

struct SortKey {
    number: Option<f64>,
    text: String,
}

impl SortKey {
    fn of(cell: Option<&CellValue>) -> Self {
        SortKey {
            number: cell.and_then(sort_number),
            text: cell.map(CellValue::as_text).unwrap_or_default(),
        }
    }

    fn compare(&self, other: &SortKey) -> Ordering {
        match (self.number, other.number) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            _ => self.text.cmp(&other.text),
        }
    }
}

/// Numeric sort key of a cell. Text yields the longest number at its start
/// after leading whitespace, so "10 - Closeout" sorts as 10.
fn sort_number(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(n) => Some(*n),
        CellValue::Text(s) => leading_number(s),
        CellValue::Empty => None,
    }
}

fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        has_digits |= frac_end > end + 1;
        if has_digits {
            end = frac_end;
        }
    }
    if !has_digits {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Stable sort of rows by one column. Missing cells sort as empty text.
pub fn sort_rows(rows: &mut Vec<RowRef<'_>>, column: usize, direction: SortDirection) {
    let keys: Vec<SortKey> = rows.iter().map(|row| SortKey::of(row.cell(column))).collect();
    let mut order: Vec<usize> = (0..rows.len()).collect();

    merge_sort_by(&mut order, &mut |a: &usize, b: &usize| {
        let ordering = keys[*a].compare(&keys[*b]);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    let sorted: Vec<RowRef<'_>> = order.into_iter().map(|i| rows[i]).collect();
    *rows = sorted;
}

// Mixed numeric/text columns make the comparator non-transitive. This merge
// sort stays stable and never panics on such input.
fn merge_sort_by<T: Copy, F: FnMut(&T, &T) -> Ordering>(items: &mut [T], compare: &mut F) {
    let len = items.len();
    if len <= 1 {
        return;
    }
    let mid = len / 2;
    merge_sort_by(&mut items[..mid], compare);
    merge_sort_by(&mut items[mid..], compare);

    let mut merged = Vec::with_capacity(len);
    let (mut left, mut right) = (0, mid);
    while left < mid && right < len {
        if compare(&items[right], &items[left]) == Ordering::Less {
            merged.push(items[right]);
            right += 1;
        } else {
            merged.push(items[left]);
            left += 1;
        }
    }
    merged.extend_from_slice(&items[left..mid]);
    merged.extend_from_slice(&items[right..]);
    items.copy_from_slice(&merged);
}
