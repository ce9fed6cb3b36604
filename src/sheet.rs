//! Spreadsheet access for report files.
//!
//! Each source file is a single-worksheet workbook (only the first sheet is
//! ever read). The raw calamine range is loaded once per file; header-row
//! selection and row capping happen on the in-memory grid, so retrying a
//! different header row costs nothing.

use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

use crate::error::{MergerError, MergerResult};

/// A typed cell: the minimal read contract the pipeline needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    fn from_data(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Bool(b) => Cell::Text(b.to_string()),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(_) => Cell::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Coerce to text; empty cells become the empty string.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
        }
    }

    /// Numeric view: real numbers directly, text only when it parses cleanly.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

/// A loaded report file: first worksheet plus the display name used for
/// date and label fallbacks.
pub struct SheetData {
    range: Range<Data>,
    display_name: String,
}

/// One read of a sheet against a chosen header row: trimmed column names and
/// the data rows below the header.
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableView {
    /// Index of the first column whose name satisfies `pred`.
    pub fn find_column<F: Fn(&str) -> bool>(&self, pred: F) -> Option<usize> {
        self.columns.iter().position(|c| pred(c))
    }

    /// All values of one column coerced to trimmed text, row order preserved.
    pub fn column_text(&self, col: usize) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| {
                r.get(col)
                    .map(|c| c.to_text().trim().to_string())
                    .unwrap_or_default()
            })
            .collect()
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .cloned()
            .unwrap_or(Cell::Empty)
    }
}

impl SheetData {
    /// Open a workbook (`.xls` or `.xlsx`) and keep its first worksheet.
    pub fn load(path: &Path) -> MergerResult<Self> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| MergerError::Workbook(format!("Failed to open {}: {}", path.display(), e)))?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| {
                MergerError::Workbook(format!("{} has no worksheets", path.display()))
            })?;
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| MergerError::Workbook(format!("Failed to read {}: {}", path.display(), e)))?;
        let display_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        Ok(Self {
            range,
            display_name,
        })
    }

    /// File stem; doubles as the date label of last resort.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn height(&self) -> usize {
        self.range.get_size().0
    }

    pub fn width(&self) -> usize {
        self.range.get_size().1
    }

    fn cell(&self, row: usize, col: usize) -> Cell {
        self.range
            .get((row, col))
            .map(Cell::from_data)
            .unwrap_or(Cell::Empty)
    }

    /// Candidate date cells: the privileged hint row of column A first, then
    /// the first 10 rows of column A.
    pub fn date_candidates(&self, hint_row: usize) -> Vec<String> {
        let mut cells = Vec::new();
        if self.height() > hint_row {
            cells.push(self.cell(hint_row, 0).to_text());
        }
        for row in 0..self.height().min(10) {
            cells.push(self.cell(row, 0).to_text());
        }
        cells
    }

    /// View the sheet with `header_row` as the header (data starts on the
    /// next row), or positionally named columns `"0"..` when `None`.
    pub fn read(&self, header_row: Option<usize>, max_rows: Option<usize>) -> TableView {
        let (height, width) = self.range.get_size();
        let (columns, first_data_row) = match header_row {
            Some(h) => {
                let names = (0..width)
                    .map(|col| {
                        if h < height {
                            self.cell(h, col).to_text().trim().to_string()
                        } else {
                            String::new()
                        }
                    })
                    .collect();
                (names, h.saturating_add(1))
            }
            None => ((0..width).map(|c| c.to_string()).collect(), 0),
        };

        let end_row = match max_rows {
            Some(n) => height.min(first_data_row.saturating_add(n)),
            None => height,
        };
        let rows = (first_data_row..end_row)
            .map(|row| (0..width).map(|col| self.cell(row, col)).collect())
            .collect();

        TableView { columns, rows }
    }
}
