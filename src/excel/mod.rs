//! Merged-table export to an `.xlsx` workbook.

use rust_xlsxwriter::Workbook;
use std::path::Path;

use crate::error::{MergerError, MergerResult};
use crate::types::{MergedRecord, MERGED_COLUMNS, MERGED_SHEET};

/// Write the merged records to `output_path` as a single-sheet workbook.
/// Column order and names are part of the downstream contract.
pub fn write_merged(output_path: &Path, records: &[MergedRecord]) -> MergerResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(MERGED_SHEET)
        .map_err(|e| MergerError::Export(format!("Failed to set worksheet name: {}", e)))?;

    for (col, name) in MERGED_COLUMNS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *name)
            .map_err(|e| MergerError::Export(format!("Failed to write header: {}", e)))?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        let region = record.region.to_string();
        let cells = [
            record.date.as_str(),
            record.state.as_str(),
            record.plant.as_str(),
            region.as_str(),
            record.generation.as_str(),
            record.coal.as_str(),
        ];
        for (col, value) in cells.iter().enumerate() {
            worksheet
                .write_string(row, col as u16, *value)
                .map_err(|e| MergerError::Export(format!("Failed to write row {}: {}", row, e)))?;
        }
    }

    workbook
        .save(output_path)
        .map_err(|e| MergerError::Export(format!("Failed to save Excel file: {}", e)))?;

    Ok(())
}
