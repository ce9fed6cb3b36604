//! Extraction pipeline: per-(plant × file) record production, sorting,
//! registry filtering, and the generation/coal merge.
//!
//! Every (plant, file) pair is independent: files are read-only, the
//! registry is immutable, and no state crosses iterations. The reference
//! behavior is strictly sequential; the progress callback observes a
//! monotonically increasing step counter over the known total.
//!
//! Failure policy: nothing here aborts the batch. An unreadable
//! file is skipped, a missing date degrades to a file-name label, an
//! unmatched plant or malformed cell yields an empty metric value.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::dates::{extract_date, format_date_label};
use crate::detect::{
    detect_coal_column, detect_coal_header, detect_generation_column, is_plant_column,
};
use crate::error::MergerResult;
use crate::matcher::find_best_match_index;
use crate::registry::Registry;
use crate::sheet::{Cell, SheetData};
use crate::types::{DailyRecord, MergedRecord, ReportKind};

/// Generation files carry their header on row 3 by template convention.
const GENERATION_HEADER_ROW: usize = 3;

#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// 1-based month used when only a day number can be recovered.
    pub fallback_month: u32,
    pub fallback_year: i32,
    /// Minimum fuzzy similarity; see [`crate::matcher::MIN_RATIO`].
    pub min_ratio: f64,
}

/// Result of a full run: both sorted, registry-filtered streams plus the
/// merged table.
pub struct MergeOutcome {
    pub generation: Vec<DailyRecord>,
    pub coal: Vec<DailyRecord>,
    pub merged: Vec<MergedRecord>,
    /// No-match notes, one line per (plant, file) miss.
    pub diagnostics: Vec<String>,
}

/// Everything derived from one report file before plants are matched
/// against it: date label, row labels of the plant column, and the metric
/// column. `None` when the file could not be read at all.
struct FileContext {
    date_label: String,
    date: Option<NaiveDate>,
    labels: Vec<String>,
    metric_cells: Option<Vec<Cell>>,
    display_name: String,
}

pub struct MergeJob<'a> {
    registry: &'a Registry,
    options: MergeOptions,
}

impl<'a> MergeJob<'a> {
    pub fn new(registry: &'a Registry, options: MergeOptions) -> Self {
        Self { registry, options }
    }

    /// Iteration count for progress reporting: plants × files per stream.
    pub fn total_steps(
        gen_plants: usize,
        gen_files: usize,
        coal_plants: usize,
        coal_files: usize,
    ) -> usize {
        (gen_plants * gen_files + coal_plants * coal_files).max(1)
    }

    /// Run both streams and merge. `progress` receives (step, total) after
    /// each (plant, file) iteration.
    pub fn run<F: FnMut(usize, usize)>(
        &self,
        gen_plants: &[String],
        gen_files: &[PathBuf],
        coal_plants: &[String],
        coal_files: &[PathBuf],
        mut progress: F,
    ) -> MergerResult<MergeOutcome> {
        let total = Self::total_steps(
            gen_plants.len(),
            gen_files.len(),
            coal_plants.len(),
            coal_files.len(),
        );
        let mut step = 0usize;
        let mut diagnostics = Vec::new();

        let mut generation = self.run_stream(
            ReportKind::Generation,
            gen_plants,
            gen_files,
            &mut step,
            total,
            &mut progress,
            &mut diagnostics,
        );
        let mut coal = self.run_stream(
            ReportKind::Coal,
            coal_plants,
            coal_files,
            &mut step,
            total,
            &mut progress,
            &mut diagnostics,
        );

        sort_records(&mut generation);
        sort_records(&mut coal);
        let generation = filter_to_registry(generation, self.registry);
        let coal = filter_to_registry(coal, self.registry);
        let merged = merge_records(&generation, &coal);

        Ok(MergeOutcome {
            generation,
            coal,
            merged,
            diagnostics,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn run_stream<F: FnMut(usize, usize)>(
        &self,
        kind: ReportKind,
        plants: &[String],
        files: &[PathBuf],
        step: &mut usize,
        total: usize,
        progress: &mut F,
        diagnostics: &mut Vec<String>,
    ) -> Vec<DailyRecord> {
        let mut sorted_files: Vec<&PathBuf> = files.iter().collect();
        sorted_files.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));

        // Each file is interpreted once; matching then runs per plant.
        let contexts: Vec<Option<FileContext>> = sorted_files
            .iter()
            .map(|path| self.prepare_file(kind, path))
            .collect();

        let mut records = Vec::new();
        for plant in plants {
            for ctx in &contexts {
                *step += 1;
                progress(*step, total);

                let Some(ctx) = ctx else { continue };
                let Some(info) = self.registry.get(plant) else {
                    continue;
                };

                let matched = find_best_match_index(&ctx.labels, plant, self.options.min_ratio);
                let value = match (matched, &ctx.metric_cells) {
                    (Some(row), Some(cells)) => {
                        format_metric(cells.get(row).unwrap_or(&Cell::Empty))
                    }
                    _ => String::new(),
                };
                if matched.is_none() {
                    diagnostics.push(format!(
                        "[{}] No match for '{}' in {}",
                        kind.to_string().to_uppercase(),
                        plant,
                        ctx.display_name
                    ));
                }

                records.push(DailyRecord {
                    date_label: ctx.date_label.clone(),
                    date: ctx.date,
                    state: info.state.clone(),
                    plant: info.name.clone(),
                    region: info.region,
                    value,
                    kind,
                });
            }
        }
        records
    }

    /// Interpret one report file: date, plant labels, metric column.
    /// Unreadable files yield `None` and contribute no records.
    fn prepare_file(&self, kind: ReportKind, path: &Path) -> Option<FileContext> {
        let sheet = SheetData::load(path).ok()?;
        let display_name = sheet.display_name().to_string();

        let candidates = sheet.date_candidates(kind.date_hint_row());
        let raw = extract_date(
            &candidates,
            &display_name,
            self.options.fallback_month,
            self.options.fallback_year,
        );
        let (label, date) =
            format_date_label(raw, self.options.fallback_month, self.options.fallback_year);
        let date_label = label.unwrap_or_else(|| display_name.clone());

        let (view, plant_col, metric_col) = match kind {
            ReportKind::Generation => {
                let header = if sheet.height() > GENERATION_HEADER_ROW {
                    GENERATION_HEADER_ROW
                } else {
                    0
                };
                let view = sheet.read(Some(header), None);
                let metric = detect_generation_column(&view.columns);
                (view, 0, metric)
            }
            ReportKind::Coal => {
                let header = detect_coal_header(&sheet);
                let view = sheet.read(Some(header), None);
                let plant_col = view.find_column(is_plant_column).unwrap_or(0);
                let metric = detect_coal_column(&view.columns);
                (view, plant_col, metric)
            }
        };

        let labels = view.column_text(plant_col);
        let metric_cells =
            metric_col.map(|col| view.rows.iter().map(|r| {
                r.get(col).cloned().unwrap_or(Cell::Empty)
            }).collect());

        Some(FileContext {
            date_label,
            date,
            labels,
            metric_cells,
            display_name,
        })
    }
}

/// Metric formatting: 4 decimal places for anything numeric, empty string
/// for everything else.
pub fn format_metric(cell: &Cell) -> String {
    match cell.as_number() {
        Some(n) => format!("{:.4}", n),
        None => String::new(),
    }
}

/// Sort by resolved date ascending with dateless records last, then by
/// plant name. Stable, so equal keys keep extraction order.
pub fn sort_records(records: &mut [DailyRecord]) {
    records.sort_by(|a, b| match (a.date, b.date) {
        (Some(da), Some(db)) => da.cmp(&db).then_with(|| a.plant.cmp(&b.plant)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.plant.cmp(&b.plant),
    });
}

/// Drop records whose plant is not a registry key.
pub fn filter_to_registry(records: Vec<DailyRecord>, registry: &Registry) -> Vec<DailyRecord> {
    records
        .into_iter()
        .filter(|r| registry.contains(&r.plant))
        .collect()
}

/// Left join anchored on the generation set: coal values attach by
/// (date label, plant) and default to empty when absent.
pub fn merge_records(generation: &[DailyRecord], coal: &[DailyRecord]) -> Vec<MergedRecord> {
    let mut coal_by_key: HashMap<(&str, &str), &str> = HashMap::new();
    for record in coal {
        coal_by_key
            .entry((record.date_label.as_str(), record.plant.as_str()))
            .or_insert(record.value.as_str());
    }

    generation
        .iter()
        .map(|g| MergedRecord {
            date: g.date_label.clone(),
            state: g.state.clone(),
            plant: g.plant.clone(),
            region: g.region,
            generation: g.value.clone(),
            coal: coal_by_key
                .get(&(g.date_label.as_str(), g.plant.as_str()))
                .map(|v| v.to_string())
                .unwrap_or_default(),
        })
        .collect()
}
