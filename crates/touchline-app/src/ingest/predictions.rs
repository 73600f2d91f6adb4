// Weekly prediction overlay.
//
// The prediction model writes one CSV row per player per week:
// `player_id,week,predicted_fpts`. Only rows for the matchup's week are kept.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use super::IngestError;

/// Predicted points for one week, keyed by player id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predictions {
    week: u32,
    by_player: HashMap<String, f64>,
}

impl Predictions {
    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn get(&self, player_id: &str) -> Option<f64> {
        self.by_player.get(player_id).copied()
    }

    pub fn insert(&mut self, player_id: &str, predicted: f64) {
        self.by_player.insert(player_id.to_string(), predicted);
    }

    pub fn len(&self) -> usize {
        self.by_player.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_player.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct RawPrediction {
    player_id: String,
    week: u32,
    predicted_fpts: f64,
}

const REQUIRED_COLUMNS: [&str; 3] = ["player_id", "week", "predicted_fpts"];

/// Read predictions for `week` from any CSV reader. Malformed and
/// non-finite rows are skipped with a warning; an unreadable header or a
/// missing column fails the whole file.
pub fn predictions_from_reader<R: Read>(rdr: R, week: u32) -> Result<Predictions, IngestError> {
    read_predictions(rdr, week, "<reader>")
}

/// Load predictions for `week` from a CSV file.
pub fn load_predictions(path: &Path, week: u32) -> Result<Predictions, IngestError> {
    let file = std::fs::File::open(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    read_predictions(file, week, &path.display().to_string())
}

fn read_predictions<R: Read>(rdr: R, week: u32, path: &str) -> Result<Predictions, IngestError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let headers = reader.headers().map_err(|e| IngestError::Csv {
        path: path.to_string(),
        source: e,
    })?;
    if let Some(column) = REQUIRED_COLUMNS
        .into_iter()
        .find(|col| !headers.iter().any(|h| h.trim() == *col))
    {
        return Err(IngestError::MissingColumn {
            path: path.to_string(),
            column,
        });
    }

    let mut predictions = Predictions {
        week,
        by_player: HashMap::new(),
    };
    let mut other_weeks = 0usize;

    for result in reader.deserialize::<RawPrediction>() {
        match result {
            Ok(raw) => {
                if raw.week != week {
                    other_weeks += 1;
                    continue;
                }
                let id = raw.player_id.trim();
                if id.is_empty() {
                    warn!("skipping prediction row with empty player_id");
                    continue;
                }
                if !raw.predicted_fpts.is_finite() {
                    warn!("skipping prediction for '{}': non-finite value", id);
                    continue;
                }
                if predictions.by_player.contains_key(id) {
                    warn!("duplicate prediction for '{}' in week {}, using latest value", id, week);
                }
                predictions.insert(id, raw.predicted_fpts);
            }
            Err(e) => {
                warn!("skipping malformed prediction row in {}: {}", path, e);
            }
        }
    }

    debug!(
        "loaded {} predictions for week {} from {} ({} rows for other weeks)",
        predictions.len(),
        week,
        path,
        other_weeks
    );
    Ok(predictions)
}
