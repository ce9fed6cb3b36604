//! Carbonmerge - daily power-plant report normalization
//!
//! Ingests heterogeneous daily generation and coal-consumption spreadsheets
//! (one file per day, layouts varying by source) and produces a merged
//! per-plant, per-date dataset restricted to a curated registry of thermal
//! plants.
//!
//! The interesting work is interpretation, not arithmetic: finding the
//! header row, finding the daily-actual column, recovering a report date
//! from title cells or file names, and resolving free-text plant labels
//! against canonical registry names despite abbreviations and punctuation.
//!
//! # Example
//!
//! ```no_run
//! use carbonmerge::pipeline::{MergeJob, MergeOptions};
//! use carbonmerge::registry::Registry;
//! use std::path::PathBuf;
//!
//! let registry = Registry::embedded()?;
//! let job = MergeJob::new(&registry, MergeOptions {
//!     fallback_month: 6,
//!     fallback_year: 2024,
//!     min_ratio: carbonmerge::matcher::MIN_RATIO,
//! });
//!
//! let plants = registry.names().to_vec();
//! let gen_files = vec![PathBuf::from("gen_01.xlsx")];
//! let coal_files = vec![PathBuf::from("coal_01.xlsx")];
//! let outcome = job.run(&plants, &gen_files, &plants, &coal_files, |_, _| {})?;
//!
//! println!("Merged rows: {}", outcome.merged.len());
//! # Ok::<(), carbonmerge::error::MergerError>(())
//! ```

pub mod cli;
pub mod dates;
pub mod detect;
pub mod error;
pub mod excel;
pub mod matcher;
pub mod normalize;
pub mod pipeline;
pub mod registry;
pub mod sheet;
pub mod types;

// Re-export commonly used types
pub use error::{MergerError, MergerResult};
pub use types::{DailyRecord, ExtractedDate, GridRegion, MergedRecord, PlantRecord, ReportKind};
