//! Growth CLI - WHO growth centiles and charts from the command line.

use clap::Parser;
use growth_cli::commands;
use growth_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("GROWTH_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> growth_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config, falling back to defaults when the file is absent
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);
    let engine = config.engine(cli.dataset.as_deref())?;

    match cli.command {
        Command::Centile(args) => commands::execute_centile(args, &engine, &formatter)?,
        Command::Curves(args) => commands::execute_curves(args, &engine, &formatter)?,
        Command::Latest(args) => commands::execute_latest(args, &engine, &formatter)?,
        Command::Chart(args) => commands::execute_chart(args, &engine, &formatter)?,
        Command::Report(args) => {
            commands::execute_report(args, &engine, &formatter)?;
        }
    }

    Ok(())
}
