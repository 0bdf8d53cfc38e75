//! Latest command implementation.

use crate::cli::SessionArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::load_series;
use growth_engine::GrowthEngine;

/// Execute the latest command.
pub fn execute_latest(
    args: SessionArgs,
    engine: &GrowthEngine,
    formatter: &Formatter,
) -> Result<()> {
    let series = load_series(&args.session)?;
    let rows = engine.charts(&series).latest_centiles()?;

    println!("{}", formatter.format_summary(&rows)?);

    Ok(())
}
