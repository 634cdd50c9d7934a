//! Group header spans for rendering the top header row.
//!
//! [`reconstruct_spans`] infers spans from label text alone. When merge
//! geometry is available, [`spans_from_merges`] gives the exact layout and
//! [`span_mismatches`] reports where the two disagree.

use serde::Serialize;
use std::collections::BTreeMap;
use ticketgrid_sheet::MergeRect;

/// One rendered group header cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanDescriptor {
    pub column_index: usize,
    pub label: String,
    pub span: usize,
}

impl SpanDescriptor {
    fn new(column_index: usize, label: &str, span: usize) -> Self {
        SpanDescriptor {
            column_index,
            label: label.to_string(),
            span,
        }
    }

    /// Last column covered, inclusive
    pub fn end_column(&self) -> usize {
        self.column_index + self.span - 1
    }
}

/// Infer group spans from a row of labels.
///
/// A non-blank label runs until the next non-blank label with different
/// text, or to the end of the row. Blank columns outside any run become
/// single empty cells. Adjacent groups with identical text collapse into one.
pub fn reconstruct_spans<S: AsRef<str>>(labels: &[S]) -> Vec<SpanDescriptor> {
    let width = labels.len();
    let mut spans = Vec::new();
    let mut covered_until = 0;

    for (i, label) in labels.iter().enumerate() {
        if i < covered_until {
            continue;
        }
        let label = label.as_ref();
        if label.trim().is_empty() {
            spans.push(SpanDescriptor::new(i, "", 1));
            covered_until = i + 1;
            continue;
        }

        let next = labels
            .iter()
            .enumerate()
            .skip(i + 1)
            .find(|(_, other)| {
                let other = other.as_ref();
                !other.trim().is_empty() && other != label
            })
            .map_or(width, |(j, _)| j);

        spans.push(SpanDescriptor::new(i, label, next - i));
        covered_until = next;
    }

    spans
}

/// Build spans from row-0 merge rectangles, clipped to `width`.
/// Columns outside every merge become single cells with their own label.
pub fn spans_from_merges<S: AsRef<str>>(width: usize, group_headers: &[S], merges: &[MergeRect]) -> Vec<SpanDescriptor> {
    let label_at = |col: usize| group_headers.get(col).map(|s| s.as_ref()).unwrap_or("");
    let mut spans = Vec::new();
    let mut col = 0;

    while col < width {
        let merge_end = merges
            .iter()
            .filter(|m| m.start_row == 0 && m.start_col == col && m.end_col > col)
            .map(|m| m.end_col.min(width - 1))
            .max();

        let end = merge_end.unwrap_or(col);
        spans.push(SpanDescriptor::new(col, label_at(col), end - col + 1));
        col = end + 1;
    }

    spans
}

/// Columns where inferred and geometric spans start or end differently.
pub fn span_mismatches(heuristic: &[SpanDescriptor], geometric: &[SpanDescriptor]) -> Vec<usize> {
    let by_start = |spans: &[SpanDescriptor]| -> BTreeMap<usize, usize> {
        spans.iter().map(|s| (s.column_index, s.span)).collect()
    };
    let inferred = by_start(heuristic);
    let actual = by_start(geometric);

    let mut columns: Vec<usize> = inferred
        .keys()
        .chain(actual.keys())
        .copied()
        .filter(|col| inferred.get(col) != actual.get(col))
        .collect();
    columns.sort_unstable();
    columns.dedup();
    columns
}
