use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

//==============================================================================
// Output contract
//==============================================================================

/// Column headers of the merged export, in contract order.
pub const MERGED_COLUMNS: [&str; 6] = [
    "Date",
    "State Name",
    "Thermal Plant",
    "Region",
    GENERATION_COLUMN,
    COAL_COLUMN,
];

pub const GENERATION_COLUMN: &str = "Daily Electricity Generation (MU)";
pub const COAL_COLUMN: &str = "Daily Coal ('000 T)";

/// Worksheet name of the merged export.
pub const MERGED_SHEET: &str = "Generation_with_Coal";

//==============================================================================
// Registry types
//==============================================================================

/// One of the five fixed Indian power-grid regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridRegion {
    #[serde(rename = "NORTHERN")]
    Northern,
    #[serde(rename = "WESTERN")]
    Western,
    #[serde(rename = "SOUTHERN")]
    Southern,
    #[serde(rename = "EASTERN")]
    Eastern,
    #[serde(rename = "NORTH EASTERN")]
    NorthEastern,
}

impl fmt::Display for GridRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GridRegion::Northern => "NORTHERN",
            GridRegion::Western => "WESTERN",
            GridRegion::Southern => "SOUTHERN",
            GridRegion::Eastern => "EASTERN",
            GridRegion::NorthEastern => "NORTH EASTERN",
        };
        write!(f, "{}", label)
    }
}

/// A recognized thermal plant: canonical name plus administrative state and
/// grid region. The canonical name is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantRecord {
    pub name: String,
    pub state: String,
    pub region: GridRegion,
}

//==============================================================================
// Report files
//==============================================================================

/// Which daily report stream a source file belongs to. The two streams share
/// the extraction machinery but differ in layout conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Generation,
    Coal,
}

impl ReportKind {
    /// Row of column A that conventionally holds the report date
    /// (A2 in generation files, A3 in coal files).
    pub fn date_hint_row(&self) -> usize {
        match self {
            ReportKind::Generation => 1,
            ReportKind::Coal => 2,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Generation => write!(f, "generation"),
            ReportKind::Coal => write!(f, "coal"),
        }
    }
}

//==============================================================================
// Extraction results
//==============================================================================

/// Outcome of date recovery from a report file. A bare day number needs the
/// fallback month/year to become a real date; full absence is `None` at the
/// call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractedDate {
    Full(NaiveDate),
    DayOfMonth(u32),
}

/// One (plant, file) extraction result for a single stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRecord {
    /// Display label: formatted date, `DAY n`, or the file stem when no date
    /// could be recovered.
    pub date_label: String,
    /// Resolved calendar date, when one exists. Drives sort order; records
    /// without one sort last.
    pub date: Option<NaiveDate>,
    pub state: String,
    pub plant: String,
    pub region: GridRegion,
    /// Metric value formatted to 4 decimal places, or empty when the plant
    /// or metric column was not found in the file.
    pub value: String,
    pub kind: ReportKind,
}

/// A generation record left-joined with its coal counterpart on
/// (date label, plant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRecord {
    pub date: String,
    pub state: String,
    pub plant: String,
    pub region: GridRegion,
    pub generation: String,
    pub coal: String,
}
