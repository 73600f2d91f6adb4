// Score-source policy: which number ranks a player for a given week.

use serde::{Deserialize, Serialize};

use crate::roster::player::Player;

/// How player scores are read when ranking candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreSource {
    /// Completed week: final realized scores only.
    Hindsight,
    /// Live or future week: realized score once the fixture has started,
    /// projected score before that.
    Hybrid,
}

impl ScoreSource {
    /// Pick the policy for a matchup week relative to the league's current week.
    pub fn for_week(evaluation_week: u32, current_week: u32) -> Self {
        if evaluation_week < current_week {
            ScoreSource::Hindsight
        } else {
            ScoreSource::Hybrid
        }
    }

    /// The value used to rank `player` under this policy.
    pub fn score(&self, player: &Player) -> f64 {
        match self {
            ScoreSource::Hindsight => player.realized_score,
            ScoreSource::Hybrid if player.has_started => player.realized_score,
            ScoreSource::Hybrid => player.projected_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::position::Position;

    fn player(realized: f64, projected: f64, started: bool) -> Player {
        Player::new("p", Position::Midfielder)
            .with_realized(realized)
            .with_projected(projected)
            .started(started)
    }

    #[test]
    fn past_week_is_hindsight() {
        assert_eq!(ScoreSource::for_week(10, 11), ScoreSource::Hindsight);
    }

    #[test]
    fn current_and_future_weeks_are_hybrid() {
        assert_eq!(ScoreSource::for_week(11, 11), ScoreSource::Hybrid);
        assert_eq!(ScoreSource::for_week(12, 11), ScoreSource::Hybrid);
    }

    #[test]
    fn hindsight_ignores_started_flag() {
        let p = player(3.0, 9.0, false);
        assert_eq!(ScoreSource::Hindsight.score(&p), 3.0);
    }

    #[test]
    fn hybrid_uses_realized_once_started() {
        let p = player(-1.5, 6.0, true);
        assert_eq!(ScoreSource::Hybrid.score(&p), -1.5);
    }

    #[test]
    fn hybrid_uses_projection_before_kickoff() {
        let p = player(0.0, 6.0, false);
        assert_eq!(ScoreSource::Hybrid.score(&p), 6.0);
    }
}
