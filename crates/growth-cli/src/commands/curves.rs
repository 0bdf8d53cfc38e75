//! Curves command implementation.

use crate::cli::CurvesArgs;
use crate::error::Result;
use crate::output::Formatter;
use growth_domain::AgeSampling;
use growth_engine::GrowthEngine;

/// Execute the curves command.
pub fn execute_curves(
    args: CurvesArgs,
    engine: &GrowthEngine,
    formatter: &Formatter,
) -> Result<()> {
    let percentiles = args
        .percentiles
        .unwrap_or_else(|| engine.config().percentile_labels.clone());
    let sampling = match args.step {
        Some(step) => AgeSampling::Step(step),
        None => engine.config().age_sampling(),
    };

    let set = engine.get_curve_set_with(args.measure, args.sex, &percentiles, &sampling)?;
    println!("{}", formatter.format_curves(&set)?);

    Ok(())
}
