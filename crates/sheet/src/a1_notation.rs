//! Column letters and A1 cell references.

use crate::error::{Result, SheetError};

/// Parse a column reference given either as letters ("F") or as a
/// 0-based index ("5").
pub fn parse_column(reference: &str) -> Result<usize> {
    let reference = reference.trim();
    if let Ok(index) = reference.parse::<usize>() {
        return Ok(index);
    }
    parse_column_letters(&reference.to_uppercase())
}

/// Convert column letters to 0-based column index
/// A=0, B=1, ... Z=25, AA=26, AB=27, ...
fn parse_column_letters(col_str: &str) -> Result<usize> {
    if col_str.is_empty() {
        return Err(SheetError::InvalidCellNotation(col_str.to_string()));
    }

    let mut col = 0usize;
    for b in col_str.bytes() {
        if !b.is_ascii_uppercase() {
            return Err(SheetError::InvalidCellNotation(col_str.to_string()));
        }
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(usize::from(b - b'A') + 1))
            .ok_or_else(|| SheetError::InvalidCellNotation(col_str.to_string()))?;
    }

    Ok(col - 1)
}

/// Convert 0-based column index to column letters
/// 0=A, 1=B, ... 25=Z, 26=AA, 27=AB, ...
pub fn column_index_to_letters(mut col: usize) -> String {
    let mut result = String::new();
    col += 1;

    while col > 0 {
        col -= 1;
        result.insert(0, ((col % 26) as u8 + b'A') as char);
        col /= 26;
    }

    result
}

/// Convert (row, col) to A1 notation
/// (0, 0) = "A1", (0, 1) = "B1", etc.
pub fn to_a1_notation(row: usize, col: usize) -> String {
    format!("{}{}", column_index_to_letters(col), row + 1)
}
