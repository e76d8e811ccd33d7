mod aggregate;
mod cli;
mod dashboard;
mod data;
mod export;
mod filter;
mod model;
mod report;
mod scatter;
mod text_summary;
mod trajectory;
#[cfg(feature = "tui")]
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    init_tracing(&args)?;
    cli::run(args)
}

/// Logs go to stderr in text/JSON modes. While the TUI owns the terminal they go
/// to `--log-file` if one was given and nowhere otherwise.
fn init_tracing(args: &cli::Cli) -> Result<()> {
    let default = if args.verbose {
        "debug,coach_plus_minus=debug"
    } else {
        "warn,coach_plus_minus=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    if let Some(path) = args.log_file.as_deref() {
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(filter)
            .init();
    } else if !args.is_interactive() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(false)
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init();
    }
    Ok(())
}
