//! Centile command implementation.

use crate::cli::CentileArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use growth_engine::GrowthEngine;

/// Execute the centile command.
pub fn execute_centile(
    args: CentileArgs,
    engine: &GrowthEngine,
    formatter: &Formatter,
) -> Result<()> {
    let age_in_days = resolve_age(&args)?;
    let centile = engine.calculate_centile(args.measure, args.value, age_in_days, args.sex)?;

    println!(
        "{}",
        formatter.format_centile(args.measure, age_in_days, args.value, &centile)?
    );

    Ok(())
}

/// Age in days from `--age-days`, or from `--dob` and `--date`.
pub fn resolve_age(args: &CentileArgs) -> Result<u32> {
    if let Some(age) = args.age_days {
        return Ok(age);
    }

    match (args.dob, args.date) {
        (Some(dob), Some(date)) => {
            let days = (date - dob).num_days();
            if days < 0 {
                return Err(CliError::InvalidInput(format!(
                    "Measurement date {} is before date of birth {}",
                    date, dob
                )));
            }
            u32::try_from(days)
                .map_err(|_| CliError::InvalidInput(format!("Age of {} days is too large", days)))
        }
        _ => Err(CliError::InvalidInput(
            "Provide --age-days or both --dob and --date".to_string(),
        )),
    }
}
