//! Header-row and data-column detection.
//!
//! All keyword literals here are fixed constants taken from the real report
//! templates. Matching is plain substring search, first hit wins; nothing in
//! this layer is fuzzy.

use crate::sheet::SheetData;

/// Rows 0..10 are candidate header rows in coal files.
const HEADER_SCAN_ROWS: usize = 10;

/// Locate the header row of a coal file: the first candidate row whose
/// resulting column names contain "Thermal" or "Station" (case-sensitive).
/// Defaults to row 0 when the scan finds nothing.
pub fn detect_coal_header(sheet: &SheetData) -> usize {
    for hdr in 0..HEADER_SCAN_ROWS {
        let view = sheet.read(Some(hdr), Some(10));
        if view.columns.iter().any(|c| is_plant_column(c)) {
            return hdr;
        }
    }
    0
}

/// Whether a column name labels the plant column of a coal sheet.
pub fn is_plant_column(name: &str) -> bool {
    name.contains("Thermal") || name.contains("Station")
}

/// Pick the daily-actual generation column.
///
/// Prefers a column naming both TODAY and ACTUAL, guarding against the
/// cumulative columns ("APRIL ... TILL DATE") that otherwise look similar;
/// falls back to any ACTUAL column or a DAILY+GEN column.
pub fn detect_generation_column(columns: &[String]) -> Option<usize> {
    for (i, c) in columns.iter().enumerate() {
        let name = c.to_uppercase();
        if name.contains("TODAY")
            && name.contains("ACTUAL")
            && !name.contains("APRIL")
            && !name.contains("TILL")
        {
            return Some(i);
        }
    }
    for (i, c) in columns.iter().enumerate() {
        let name = c.to_uppercase();
        if name.contains("ACTUAL") || (name.contains("DAILY") && name.contains("GEN")) {
            return Some(i);
        }
    }
    None
}

/// Pick the coal-consumption column: first name containing CONSUM or COAL.
pub fn detect_coal_column(columns: &[String]) -> Option<usize> {
    columns.iter().position(|c| {
        let name = c.to_uppercase();
        name.contains("CONSUM") || name.contains("COAL")
    })
}
