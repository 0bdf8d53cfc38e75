//! CLI command definitions and argument parsing.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use growth_domain::{MeasurementType, Sex};
use std::path::PathBuf;

/// Growth CLI - WHO growth centiles and charts from the command line.
#[derive(Debug, Parser)]
#[command(name = "growth")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite reference dataset (defaults to the bundled WHO excerpt)
    #[arg(long, global = true, env = "GROWTH_DATASET")]
    pub dataset: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (bare values)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Centile of a single measurement
    Centile(CentileArgs),

    /// Reference percentile curves
    Curves(CurvesArgs),

    /// Latest centiles from a session file
    Latest(SessionArgs),

    /// Chart data for one measurement type from a session file
    Chart(ChartArgs),

    /// Export a growth report from a session file
    Report(ReportArgs),
}

/// Arguments for the centile command.
#[derive(Debug, Parser)]
pub struct CentileArgs {
    /// Measurement type (height, weight, bmi, head_circumference)
    #[arg(short, long)]
    pub measure: MeasurementType,

    /// Sex (male, female)
    #[arg(short, long)]
    pub sex: Sex,

    /// Measured value (cm, kg or kg/m²)
    #[arg(short, long, allow_negative_numbers = true)]
    pub value: f64,

    /// Age in days
    #[arg(short, long, conflicts_with_all = ["dob", "date"])]
    pub age_days: Option<u32>,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long, requires = "date")]
    pub dob: Option<NaiveDate>,

    /// Measurement date (YYYY-MM-DD)
    #[arg(long, requires = "dob")]
    pub date: Option<NaiveDate>,
}

/// Arguments for the curves command.
#[derive(Debug, Parser)]
pub struct CurvesArgs {
    /// Measurement type
    #[arg(short, long)]
    pub measure: MeasurementType,

    /// Sex
    #[arg(short, long)]
    pub sex: Sex,

    /// Percentile lines, comma separated (defaults to the configured set)
    #[arg(short, long, value_delimiter = ',')]
    pub percentiles: Option<Vec<f64>>,

    /// Sampling step in days (defaults to the configured step)
    #[arg(long)]
    pub step: Option<u32>,
}

/// Arguments for commands that read a session file.
#[derive(Debug, Parser)]
pub struct SessionArgs {
    /// Session file (.toml or .json)
    #[arg(short, long)]
    pub session: PathBuf,
}

/// Arguments for the chart command.
#[derive(Debug, Parser)]
pub struct ChartArgs {
    /// Session file (.toml or .json)
    #[arg(short, long)]
    pub session: PathBuf,

    /// Measurement type
    #[arg(short, long)]
    pub measure: MeasurementType,
}

/// Arguments for the report command.
#[derive(Debug, Parser)]
pub struct ReportArgs {
    /// Session file (.toml or .json)
    #[arg(short, long)]
    pub session: PathBuf,

    /// Output file (defaults to `<name>_growth_chart.json`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Measurement types to chart, comma separated (defaults to all)
    #[arg(short, long, value_delimiter = ',')]
    pub measure: Vec<MeasurementType>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
