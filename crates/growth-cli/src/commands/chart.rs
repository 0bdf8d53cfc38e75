//! Chart command implementation.

use crate::cli::ChartArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::load_series;
use growth_engine::GrowthEngine;

/// Execute the chart command.
pub fn execute_chart(
    args: ChartArgs,
    engine: &GrowthEngine,
    formatter: &Formatter,
) -> Result<()> {
    let series = load_series(&args.session)?;
    let chart = engine.charts(&series).build_chart(args.measure)?;

    println!("{}", formatter.format_chart(&chart)?);

    Ok(())
}
