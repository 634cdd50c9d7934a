use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::grid::{CellRect, GridSource, MergeRect, WorkbookSource};
use calamine::{open_workbook, Data, Dimensions, Range, Reader, Xls, XlsError, Xlsx, XlsxError};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

enum ExcelReader {
    Xlsx(Xlsx<BufReader<File>>),
    Xls(Xls<BufReader<File>>),
}

/// A workbook read from an `.xlsx`, `.xlsm` or `.xls` file
pub struct ExcelWorkbook {
    path: PathBuf,
    reader: ExcelReader,
}

/// One decoded worksheet with its merge rectangles
#[derive(Debug, Clone)]
pub struct ExcelGrid {
    range: Range<Data>,
    merges: Vec<MergeRect>,
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::from(s.clone()),
        // Excel stores dates as days since 1899-12-30
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

fn dimensions_to_rect(dims: &Dimensions) -> MergeRect {
    CellRect::new(
        dims.start.0 as usize,
        dims.start.1 as usize,
        dims.end.0 as usize,
        dims.end.1 as usize,
    )
}

fn malformed(path: &Path, err: impl std::fmt::Display) -> SheetError {
    SheetError::MalformedSource(format!("{}: {err}", path.display()))
}

impl ExcelWorkbook {
    /// Open a workbook, choosing the decoder by file extension
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file does not exist and `MalformedSource` for an
    /// unsupported extension or a file that fails to decode.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SheetError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let reader = match extension.as_deref() {
            Some("xlsx" | "xlsm") => {
                let mut workbook: Xlsx<BufReader<File>> =
                    open_workbook(path).map_err(|e: XlsxError| malformed(path, e))?;
                workbook
                    .load_merged_regions()
                    .map_err(|e: XlsxError| malformed(path, e))?;
                ExcelReader::Xlsx(workbook)
            }
            Some("xls") => {
                let workbook: Xls<BufReader<File>> = open_workbook(path).map_err(|e: XlsError| malformed(path, e))?;
                ExcelReader::Xls(workbook)
            }
            _ => {
                return Err(malformed(path, "not an Excel file (.xlsx or .xls)"));
            }
        };

        tracing::debug!("Opened workbook {}", path.display());
        Ok(ExcelWorkbook {
            path: path.to_path_buf(),
            reader,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WorkbookSource for ExcelWorkbook {
    type Grid = ExcelGrid;

    fn sheet_names(&self) -> Vec<String> {
        match &self.reader {
            ExcelReader::Xlsx(workbook) => workbook.sheet_names(),
            ExcelReader::Xls(workbook) => workbook.sheet_names(),
        }
    }

    fn grid(&mut self, name: &str) -> Result<ExcelGrid> {
        let path = self.path.as_path();
        let (range, merges) = match &mut self.reader {
            ExcelReader::Xlsx(workbook) => {
                let range = workbook
                    .worksheet_range(name)
                    .map_err(|e: XlsxError| malformed(path, e))?;
                let merges = workbook
                    .merged_regions_by_sheet(name)
                    .into_iter()
                    .map(|(_, _, dims)| dimensions_to_rect(dims))
                    .collect();
                (range, merges)
            }
            ExcelReader::Xls(workbook) => {
                let range = workbook
                    .worksheet_range(name)
                    .map_err(|e: XlsError| malformed(path, e))?;
                let merges = workbook
                    .worksheet_merge_cells(name)
                    .unwrap_or_default()
                    .iter()
                    .map(dimensions_to_rect)
                    .collect();
                (range, merges)
            }
        };

        Ok(ExcelGrid { range, merges })
    }
}

impl GridSource for ExcelGrid {
    fn declared_range(&self) -> Option<CellRect> {
        let (start_row, start_col) = self.range.start()?;
        let (end_row, end_col) = self.range.end()?;
        Some(CellRect::new(
            start_row as usize,
            start_col as usize,
            end_row as usize,
            end_col as usize,
        ))
    }

    fn cell(&self, row: usize, col: usize) -> CellValue {
        let (Ok(row), Ok(col)) = (u32::try_from(row), u32::try_from(col)) else {
            return CellValue::Empty;
        };
        self.range
            .get_value((row, col))
            .map(data_to_cell_value)
            .unwrap_or_default()
    }

    fn merges(&self) -> &[MergeRect] {
        &self.merges
    }
}
