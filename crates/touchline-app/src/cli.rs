// Command-line arguments and the top-level run routine.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::config::{self, Config};
use crate::ingest::lineup::load_lineup;
use crate::ingest::predictions::{load_predictions, Predictions};
use crate::matchup::MatchupId;
use crate::report;
use crate::view::{LineupMode, MatchupView};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Show nominal or optimal lineups for a matchup", long_about = None)]
pub struct CliArgs {
    /// Lineup document (JSON) as served by the dashboard backend
    pub lineup: PathBuf,
    /// Matchup id, e.g. `24_teamA_teamB` or `CL_5_teamA_teamB`
    #[arg(long)]
    pub matchup_id: MatchupId,
    /// Show the optimal lineup instead of the one the managers set
    #[arg(long, default_value_t = false)]
    pub optimal: bool,
    /// Override the league's current week from config
    #[arg(long)]
    pub current_week: Option<u32>,
    /// Prediction CSV to fill in missing projections (overrides config)
    #[arg(long)]
    pub predictions: Option<PathBuf>,
    /// Print the view as JSON instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl CliArgs {
    pub fn mode(&self) -> LineupMode {
        if self.optimal {
            LineupMode::Optimal
        } else {
            LineupMode::Nominal
        }
    }
}

/// Build the matchup view for the given arguments and config.
pub fn build_view(args: &CliArgs, config: &Config) -> anyhow::Result<MatchupView> {
    let current_week = args.current_week.unwrap_or(config.league.current_week);
    let week = args.matchup_id.week;

    let predictions_path = args
        .predictions
        .clone()
        .or_else(|| config.data.predictions.as_ref().map(PathBuf::from));
    let predictions: Option<Predictions> = match predictions_path {
        Some(path) => {
            let preds = load_predictions(&path, week)
                .with_context(|| format!("failed to load predictions from {}", path.display()))?;
            info!("Loaded {} predictions for week {}", preds.len(), preds.week());
            Some(preds)
        }
        None => None,
    };

    let document = load_lineup(&args.lineup, predictions.as_ref())
        .with_context(|| format!("failed to load lineup {}", args.lineup.display()))?;
    info!(
        "Lineup loaded: {} ({} players) vs {} ({} players)",
        document.home.name,
        document.home.players.len(),
        document.away.name,
        document.away.players.len()
    );

    Ok(MatchupView::build(
        &args.matchup_id,
        &document,
        args.mode(),
        current_week,
    ))
}

/// Render the view in the requested output format.
pub fn render(args: &CliArgs, view: &MatchupView) -> anyhow::Result<String> {
    if args.json {
        serde_json::to_string_pretty(view).context("failed to serialize matchup view")
    } else {
        Ok(report::render_text(view))
    }
}

/// Load config from `base_dir`, build the view and render it.
pub fn run_in(args: &CliArgs, base_dir: &Path) -> anyhow::Result<String> {
    config::ensure_config_files(base_dir).context("failed to prepare config files")?;
    let config = config::load_config_from(base_dir).context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, current week {}",
        config.league.name, config.league.current_week
    );
    let view = build_view(args, &config)?;
    render(args, &view)
}
