use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use crate::dates::{extract_date, format_date_label, month_number};
use crate::detect::{
    detect_coal_column, detect_coal_header, detect_generation_column, is_plant_column,
};
use crate::error::{MergerError, MergerResult};
use crate::excel::write_merged;
use crate::pipeline::{MergeJob, MergeOptions};
use crate::registry::Registry;
use crate::sheet::SheetData;
use crate::types::ReportKind;

/// The selection sentinel that expands to the whole registry.
pub const ALL_PLANTS: &str = "All";

fn load_registry(path: Option<&Path>) -> MergerResult<Registry> {
    match path {
        Some(p) => Registry::from_file(p),
        None => Registry::embedded(),
    }
}

/// Expand file and directory arguments into a flat list of `.xls`/`.xlsx`
/// files. Directories are globbed non-recursively.
fn expand_inputs(paths: &[PathBuf]) -> MergerResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let pattern = format!("{}/*.xls*", path.display());
            let matches = glob::glob(&pattern)
                .map_err(|e| MergerError::Config(format!("Bad input pattern: {}", e)))?;
            for entry in matches.filter_map(Result::ok) {
                files.push(entry);
            }
        } else {
            files.push(path.clone());
        }
    }
    files.sort();
    Ok(files)
}

/// Resolve a plant selection against the registry, expanding the `All`
/// sentinel and rejecting names the registry does not know.
fn resolve_selection(selection: &[String], registry: &Registry) -> MergerResult<Vec<String>> {
    if selection.is_empty() || selection.iter().any(|s| s == ALL_PLANTS) {
        return Ok(registry.names().to_vec());
    }
    for name in selection {
        if !registry.contains(name) {
            return Err(MergerError::Config(format!(
                "Unknown plant '{}' (not in registry; see `carbonmerge plants`)",
                name
            )));
        }
    }
    Ok(selection.to_vec())
}

fn resolve_month(month: &str) -> MergerResult<u32> {
    month_number(month)
        .ok_or_else(|| MergerError::Config(format!("Unknown month name '{}'", month)))
}

/// Execute the merge command
#[allow(clippy::too_many_arguments)]
pub fn merge(
    generation: Vec<PathBuf>,
    coal: Vec<PathBuf>,
    month: String,
    year: i32,
    gen_plants: Vec<String>,
    coal_plants: Vec<String>,
    registry_path: Option<PathBuf>,
    output: PathBuf,
    min_ratio: f64,
    verbose: bool,
) -> MergerResult<()> {
    println!("{}", "⚡ Carbonmerge - Merging daily reports".bold().green());

    let registry = load_registry(registry_path.as_deref())?;
    let fallback_month = resolve_month(&month)?;

    let gen_files = expand_inputs(&generation)?;
    let coal_files = expand_inputs(&coal)?;
    println!(
        "   {} generation files, {} coal files, {} registry plants",
        gen_files.len(),
        coal_files.len(),
        registry.len()
    );
    println!("   Fallback period: {} {}\n", month, year);

    let gen_selection = resolve_selection(&gen_plants, &registry)?;
    let coal_selection = resolve_selection(&coal_plants, &registry)?;

    let options = MergeOptions {
        fallback_month,
        fallback_year: year,
        min_ratio,
    };
    let job = MergeJob::new(&registry, options);

    let total = MergeJob::total_steps(
        gen_selection.len(),
        gen_files.len(),
        coal_selection.len(),
        coal_files.len(),
    );
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
            .unwrap()
            .progress_chars("##-"),
    );
    pb.set_message("Processing");

    let outcome = job.run(
        &gen_selection,
        &gen_files,
        &coal_selection,
        &coal_files,
        |step, _total| pb.set_position(step as u64),
    )?;
    pb.finish_with_message("Done");

    if verbose {
        for line in &outcome.diagnostics {
            println!("   {}", line.yellow());
        }
    }

    println!(
        "\n   Generation records: {}",
        outcome.generation.len().to_string().bright_blue()
    );
    println!(
        "   Coal records:       {}",
        outcome.coal.len().to_string().bright_blue()
    );
    println!(
        "   Merged rows:        {}",
        outcome.merged.len().to_string().bright_blue()
    );

    write_merged(&output, &outcome.merged)?;
    println!(
        "\n{} Wrote {}",
        "✅".green(),
        output.display().to_string().bold()
    );

    Ok(())
}

/// Execute the plants command: list the registry
pub fn plants(registry_path: Option<PathBuf>) -> MergerResult<()> {
    let registry = load_registry(registry_path.as_deref())?;
    println!("{}", "⚡ Registered thermal plants".bold().green());
    for plant in registry.iter() {
        println!(
            "   {:<42} {:<18} {}",
            plant.name,
            plant.state,
            plant.region.to_string().cyan()
        );
    }
    println!("\n   {} plants", registry.len().to_string().bright_blue());
    Ok(())
}

/// Execute the inspect command: show how one report file would be read
pub fn inspect(file: PathBuf, kind: ReportKind, month: String, year: i32) -> MergerResult<()> {
    let fallback_month = resolve_month(&month)?;
    println!(
        "{} {}",
        "🔍 Inspecting".bold().green(),
        file.display().to_string().bold()
    );

    let sheet = SheetData::load(&file)?;
    println!("   Kind: {}", kind);
    println!("   Size: {} rows x {} columns", sheet.height(), sheet.width());

    let candidates = sheet.date_candidates(kind.date_hint_row());
    let raw = extract_date(&candidates, sheet.display_name(), fallback_month, year);
    let (label, date) = format_date_label(raw, fallback_month, year);
    match (label, date) {
        (Some(l), Some(d)) => println!("   Date: {} ({})", l.bright_blue(), d),
        (Some(l), None) => println!("   Date: {} (no sort order)", l.yellow()),
        _ => println!(
            "   Date: {} (falls back to file name '{}')",
            "not found".yellow(),
            sheet.display_name()
        ),
    }

    let (header_row, view) = match kind {
        ReportKind::Generation => {
            let header = if sheet.height() > 3 { 3 } else { 0 };
            (header, sheet.read(Some(header), None))
        }
        ReportKind::Coal => {
            let header = detect_coal_header(&sheet);
            (header, sheet.read(Some(header), None))
        }
    };
    println!("   Header row: {}", header_row);

    let plant_col = match kind {
        ReportKind::Generation => 0,
        ReportKind::Coal => view.find_column(is_plant_column).unwrap_or(0),
    };
    let metric_col = match kind {
        ReportKind::Generation => detect_generation_column(&view.columns),
        ReportKind::Coal => detect_coal_column(&view.columns),
    };
    println!(
        "   Plant column: {} ({})",
        plant_col,
        view.columns
            .get(plant_col)
            .map(|s| s.as_str())
            .unwrap_or("?")
    );
    match metric_col {
        Some(col) => println!(
            "   Metric column: {} ({})",
            col,
            view.columns.get(col).map(|s| s.as_str()).unwrap_or("?")
        ),
        None => println!("   Metric column: {}", "not found".yellow()),
    }

    let labels = view.column_text(plant_col);
    let sample: Vec<&String> = labels.iter().filter(|l| !l.is_empty()).take(5).collect();
    println!("   First plant labels:");
    for label in sample {
        println!("     - {}", label);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_selection_all_sentinel() {
        let registry = Registry::embedded().unwrap();
        let all = resolve_selection(&["All".to_string()], &registry).unwrap();
        assert_eq!(all.len(), registry.len());
        let empty = resolve_selection(&[], &registry).unwrap();
        assert_eq!(empty.len(), registry.len());
    }

    #[test]
    fn test_resolve_selection_rejects_unknown() {
        let registry = Registry::embedded().unwrap();
        let result = resolve_selection(&["NOT A PLANT".to_string()], &registry);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_selection_passes_known() {
        let registry = Registry::embedded().unwrap();
        let got = resolve_selection(&["PANIPAT TPS".to_string()], &registry).unwrap();
        assert_eq!(got, vec!["PANIPAT TPS".to_string()]);
    }

    #[test]
    fn test_resolve_month() {
        assert_eq!(resolve_month("June").unwrap(), 6);
        assert!(resolve_month("Smarch").is_err());
    }
}
