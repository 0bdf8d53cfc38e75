//! Report command implementation.

use crate::cli::ReportArgs;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::load_series;
use growth_domain::MeasurementType;
use growth_engine::GrowthEngine;
use std::fs;
use std::path::PathBuf;

/// Execute the report command, returning the path written.
pub fn execute_report(
    args: ReportArgs,
    engine: &GrowthEngine,
    formatter: &Formatter,
) -> Result<PathBuf> {
    let series = load_series(&args.session)?;
    let types = if args.measure.is_empty() {
        MeasurementType::ALL.to_vec()
    } else {
        args.measure
    };

    let document = engine.charts(&series).report(&types)?;
    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(document.file_name()));
    fs::write(&path, document.to_json()?)?;

    match formatter.format() {
        OutputFormat::Quiet => println!("{}", path.display()),
        _ => {
            for note in &document.skipped {
                println!(
                    "{}",
                    formatter.warning(&format!(
                        "{} chart skipped: {}",
                        note.measurement_type.name(),
                        note.reason
                    ))
                );
            }
            println!(
                "{}",
                formatter.success(&format!(
                    "Wrote {} chart page(s) to {}",
                    document.pages.len(),
                    path.display()
                ))
            );
        }
    }

    Ok(path)
}
