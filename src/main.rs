use carbonmerge::cli;
use carbonmerge::error::MergerResult;
use carbonmerge::matcher::MIN_RATIO;
use carbonmerge::types::ReportKind;
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "carbonmerge")]
#[command(about = "Merge daily power-plant generation and coal reports into one dataset")]
#[command(long_about = "Carbonmerge - daily thermal-plant report merger

Reads a month of daily generation and coal-consumption spreadsheets
(.xls/.xlsx, one file per day, first worksheet only), resolves each
registry plant against the free-text rows of every file, and writes a
merged Date x Plant dataset.

COMMANDS:
  merge     - Build the merged Generation_with_Coal workbook
  plants    - List the thermal-plant registry
  inspect   - Show how one report file would be interpreted

EXAMPLES:
  carbonmerge merge -g gen_reports/ -c coal_reports/ --month June --year 2024
  carbonmerge merge -g gen/ -c coal/ --plants \"PANIPAT TPS\" --plants \"KOTA TPS\"
  carbonmerge inspect coal_reports/Coal_04.xlsx --kind coal
  carbonmerge plants")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Gen,
    Coal,
}

impl From<KindArg> for ReportKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Gen => ReportKind::Generation,
            KindArg::Coal => ReportKind::Coal,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Merge generation and coal reports into one workbook
    Merge {
        /// Generation report files or directories
        #[arg(short = 'g', long = "generation", required = true, num_args = 1..)]
        generation: Vec<PathBuf>,

        /// Coal report files or directories
        #[arg(short = 'c', long = "coal", required = true, num_args = 1..)]
        coal: Vec<PathBuf>,

        /// Fallback month name, used when a file carries only a day number
        #[arg(long)]
        month: Option<String>,

        /// Fallback year
        #[arg(long)]
        year: Option<i32>,

        /// Plant selection for both streams ("All" expands to the registry)
        #[arg(short, long = "plants", default_value = cli::commands::ALL_PLANTS)]
        plants: Vec<String>,

        /// Plant selection for the generation stream only
        #[arg(long = "gen-plants")]
        gen_plants: Vec<String>,

        /// Plant selection for the coal stream only
        #[arg(long = "coal-plants")]
        coal_plants: Vec<String>,

        /// Registry YAML overriding the built-in plant catalog
        #[arg(long)]
        registry: Option<PathBuf>,

        /// Output workbook path
        #[arg(short, long, default_value = "Generation_with_Coal.xlsx")]
        output: PathBuf,

        /// Minimum fuzzy-match similarity (0..1)
        #[arg(long, default_value_t = MIN_RATIO)]
        min_ratio: f64,

        /// Print per-plant matching diagnostics
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the thermal-plant registry
    Plants {
        /// Registry YAML overriding the built-in plant catalog
        #[arg(long)]
        registry: Option<PathBuf>,
    },

    /// Show how one report file would be interpreted
    Inspect {
        /// Report file to inspect
        file: PathBuf,

        /// Report stream the file belongs to
        #[arg(long, value_enum)]
        kind: KindArg,

        /// Fallback month name
        #[arg(long)]
        month: Option<String>,

        /// Fallback year
        #[arg(long)]
        year: Option<i32>,
    },
}

fn run() -> MergerResult<()> {
    let cli = Cli::parse();
    let now = Local::now();
    let current_month = now.format("%B").to_string();

    match cli.command {
        Commands::Merge {
            generation,
            coal,
            month,
            year,
            plants,
            gen_plants,
            coal_plants,
            registry,
            output,
            min_ratio,
            verbose,
        } => {
            let gen_selection = if gen_plants.is_empty() {
                plants.clone()
            } else {
                gen_plants
            };
            let coal_selection = if coal_plants.is_empty() {
                plants
            } else {
                coal_plants
            };
            cli::merge(
                generation,
                coal,
                month.unwrap_or(current_month),
                year.unwrap_or(now.year()),
                gen_selection,
                coal_selection,
                registry,
                output,
                min_ratio,
                verbose,
            )
        }
        Commands::Plants { registry } => cli::plants(registry),
        Commands::Inspect {
            file,
            kind,
            month,
            year,
        } => cli::inspect(
            file,
            kind.into(),
            month.unwrap_or(current_month),
            year.unwrap_or(now.year()),
        ),
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
