// Lineup document loading.
//
// The backend serves one JSON document per matchup:
// `{ home_team: {name, roster: [...]}, away_team: {...}, home_score, away_score }`.
// Roster rows come straight from the fantasy platform and are loosely typed:
// ids and statuses may be strings or numbers, scores may be null, predictions
// may be missing entirely.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use touchline_core::{Player, PlayerId, Position, RosterStatus};

use super::predictions::Predictions;
use super::IngestError;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One side of a matchup after ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamRoster {
    pub name: String,
    pub players: Vec<Player>,
    /// Official week total from the scoring source, when it has one.
    pub authoritative_total: Option<f64>,
}

/// Both sides of a matchup after ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct LineupDocument {
    pub home: TeamRoster,
    pub away: TeamRoster,
}

// ---------------------------------------------------------------------------
// Raw serde structs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawLineupDocument {
    home_team: RawTeam,
    away_team: RawTeam,
    #[serde(default, deserialize_with = "lenient_f64")]
    home_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    away_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawTeam {
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
    /// Decoded row by row; unreadable rows are skipped.
    #[serde(default)]
    roster: Value,
}

#[derive(Debug, Deserialize)]
struct RawPlayer {
    #[serde(default, deserialize_with = "lenient_string")]
    player_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    team: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    position: Option<String>,
    /// 1 = Active, 2 = Reserve; the feed sends either a string or a number.
    #[serde(default)]
    status: Value,
    #[serde(default, deserialize_with = "lenient_f64")]
    score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    is_started: Option<bool>,
    /// `{predicted_fpts, ...}` when the model has a number for this player,
    /// otherwise a placeholder object or nothing at all.
    #[serde(default)]
    prediction: Value,
}

// ---------------------------------------------------------------------------
// Lenient field decoding
// ---------------------------------------------------------------------------

/// Accept a number, a numeric string, or null. Anything non-finite or
/// unparseable becomes `None`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_f64(&value))
}

/// Accept a bool, 0/1, or "true"/"false" style strings.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" | "" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// Accept a string or a number; anything else becomes `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn value_as_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn status_from_value(value: &Value) -> RosterStatus {
    let code = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match code {
        Some(1) => RosterStatus::Active,
        _ => RosterStatus::Reserve,
    }
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

impl RawPlayer {
    /// Build a defaulted `Player`, or `None` for rows without a name or id.
    /// A position outside G/D/M/F leaves the player unplaced.
    fn into_player(self, predictions: Option<&Predictions>) -> Option<Player> {
        let name = self.name.filter(|n| !n.trim().is_empty())?;

        let Some(id) = self.player_id.filter(|id| !id.trim().is_empty()) else {
            warn!("skipping player '{}': missing player_id", name);
            return None;
        };

        let position = self.position.as_deref().and_then(Position::from_str_pos);
        if position.is_none() {
            warn!(
                "player '{}' ({}) has unknown position {:?}, keeping as unplaced",
                name, id, self.position
            );
        }

        let projected_score = value_as_f64(&self.prediction["predicted_fpts"])
            .or_else(|| predictions.and_then(|overlay| overlay.get(&id)))
            .unwrap_or(0.0);

        Some(Player {
            id: PlayerId::new(id),
            name: name.trim().to_string(),
            team: self.team.unwrap_or_default().trim().to_string(),
            position,
            realized_score: self.score.unwrap_or(0.0),
            projected_score,
            has_started: self.is_started.unwrap_or(false),
            status: status_from_value(&self.status),
        })
    }
}

impl RawTeam {
    fn into_roster(
        self,
        fallback_name: &str,
        authoritative_total: Option<f64>,
        predictions: Option<&Predictions>,
    ) -> TeamRoster {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| fallback_name.to_string());
        let raw_rows = match self.roster {
            Value::Array(rows) => rows,
            Value::Null => Vec::new(),
            other => {
                warn!("roster for {} is not a list: {}", name, other);
                Vec::new()
            }
        };
        let total_rows = raw_rows.len();
        let players: Vec<Player> = raw_rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<RawPlayer>(row) {
                Ok(raw) => raw.into_player(predictions),
                Err(e) => {
                    warn!("skipping unreadable roster row for {}: {}", name, e);
                    None
                }
            })
            .collect();
        debug!(
            "ingested {} of {} roster rows for {}",
            players.len(),
            total_rows,
            name
        );
        TeamRoster {
            name,
            players,
            authoritative_total,
        }
    }
}

impl RawLineupDocument {
    fn into_document(self, predictions: Option<&Predictions>) -> LineupDocument {
        LineupDocument {
            home: self
                .home_team
                .into_roster("Home Team", self.home_score, predictions),
            away: self
                .away_team
                .into_roster("Away Team", self.away_score, predictions),
        }
    }
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Parse a lineup document from any reader.
pub fn lineup_from_reader<R: Read>(
    rdr: R,
    predictions: Option<&Predictions>,
) -> Result<LineupDocument, serde_json::Error> {
    let raw: RawLineupDocument = serde_json::from_reader(rdr)?;
    Ok(raw.into_document(predictions))
}

/// Load a lineup document from a JSON file.
pub fn load_lineup(
    path: &Path,
    predictions: Option<&Predictions>,
) -> Result<LineupDocument, IngestError> {
    let file = std::fs::File::open(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    lineup_from_reader(std::io::BufReader::new(file), predictions).map_err(|e| {
        IngestError::Json {
            path: path.display().to_string(),
            source: e,
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
