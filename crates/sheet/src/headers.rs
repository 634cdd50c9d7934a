use crate::grid::MergeRect;
use serde::{Deserialize, Serialize};

/// Reconciled two-row header: one group label and one column label per column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableHeaders {
    pub group_headers: Vec<String>,
    pub column_headers: Vec<String>,
}

impl TableHeaders {
    pub fn width(&self) -> usize {
        self.column_headers.len()
    }
}

/// Combine the group-label row, the column-label row and row-0 merges into
/// aligned header arrays.
///
/// Every merge that starts on row 0 with a non-blank top-left label keeps
/// that label at its first column and blanks the rest of its columns. Columns
/// outside any such merge keep their row-1 text verbatim. Both outputs are
/// padded with empty strings to the longer input row.
pub fn reconcile_headers(group_row: &[String], column_row: &[String], merges: &[MergeRect]) -> TableHeaders {
    let width = group_row.len().max(column_row.len());
    let mut group_headers: Vec<String> = pad(group_row, width);

    for merge in merges.iter().filter(|m| m.start_row == 0) {
        let Some(label) = group_row.get(merge.start_col) else {
            continue;
        };
        if label.trim().is_empty() {
            continue;
        }
        group_headers[merge.start_col].clone_from(label);
        for slot in group_headers
            .iter_mut()
            .take(merge.end_col.saturating_add(1))
            .skip(merge.start_col + 1)
        {
            slot.clear();
        }
    }

    TableHeaders {
        group_headers,
        column_headers: pad(column_row, width),
    }
}

fn pad(row: &[String], width: usize) -> Vec<String> {
    let mut padded = row.to_vec();
    padded.resize(width, String::new());
    padded
}
