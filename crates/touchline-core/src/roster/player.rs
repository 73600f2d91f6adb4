// Player records consumed by the lineup engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::position::Position;

/// Opaque player identifier, stable within one matchup evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId(s.to_string())
    }
}

/// Whether the manager slotted the player into the active lineup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RosterStatus {
    /// Nominal starter.
    Active,
    /// On the bench.
    #[default]
    Reserve,
}

/// A rostered player for one side of a matchup.
///
/// All numeric fields are already defaulted by the ingestion layer, so the
/// lineup engine never has to treat a missing value specially.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub team: String,
    /// `None` when the feed's position is missing or unrecognised. Such a
    /// player still counts toward nominal lineups and sums but is never
    /// picked by the optimizer.
    #[serde(default)]
    pub position: Option<Position>,
    /// Points actually scored this week. May be negative.
    #[serde(default)]
    pub realized_score: f64,
    /// Projected points for this week.
    #[serde(default)]
    pub projected_score: f64,
    /// True once the player's real-world fixture has kicked off.
    #[serde(default)]
    pub has_started: bool,
    #[serde(default)]
    pub status: RosterStatus,
}

impl Player {
    /// Build a player with zeroed scores and reserve status.
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Player {
            id: PlayerId::new(id),
            name: String::new(),
            team: String::new(),
            position: Some(position),
            realized_score: 0.0,
            projected_score: 0.0,
            has_started: false,
            status: RosterStatus::Reserve,
        }
    }

    /// Build a player the feed gave no usable position for.
    pub fn unplaced(id: impl Into<String>) -> Self {
        Player {
            position: None,
            ..Player::new(id, Position::Goalkeeper)
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_realized(mut self, score: f64) -> Self {
        self.realized_score = score;
        self
    }

    pub fn with_projected(mut self, score: f64) -> Self {
        self.projected_score = score;
        self
    }

    pub fn started(mut self, has_started: bool) -> Self {
        self.has_started = has_started;
        self
    }

    pub fn active(mut self) -> Self {
        self.status = RosterStatus::Active;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == RosterStatus::Active
    }

    /// Display order G, D, M, F; unplaced players sort last.
    pub fn position_order(&self) -> u8 {
        self.position.map_or(u8::MAX, |pos| pos.sort_order())
    }

    /// Short position label, `-` when unplaced.
    pub fn position_str(&self) -> &'static str {
        self.position.map_or("-", |pos| pos.display_str())
    }

    /// Name for log lines; falls back to the id when no name was supplied.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}
