// Lineup viewer entry point.
//
// Startup sequence:
// 1. Parse arguments
// 2. Initialize tracing (log to file, stdout is reserved for the report)
// 3. Load config (copying defaults on first run)
// 4. Load predictions and the lineup document
// 5. Build and print the matchup view

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use touchline_app::cli::{self, CliArgs};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    init_tracing()?;
    info!("touchline starting for matchup {}", args.matchup_id);

    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    match cli::run_in(&args, &cwd) {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            error!("{:#}", e);
            Err(e)
        }
    }
}

/// Initialize tracing to log to a file (stdout carries the report).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("touchline.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("touchline_app=info,touchline_core=info,warn")
        }))
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
