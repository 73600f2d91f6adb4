// Auto-substitution inference.
//
// The official scoring source swaps a bench player in for a starter who did
// not play, but only the net effect on the team total is visible to us. When
// the official total and the nominal starters' sum disagree, look for the one
// starter/bench pair whose score difference explains the gap.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::roster::player::{Player, PlayerId};

/// Gaps smaller than this are floating-point noise, not a substitution.
pub const NOISE_TOLERANCE: f64 = 0.01;

/// How close a candidate swap must bring the sum to the official total.
pub const SWAP_TOLERANCE: f64 = 0.05;

/// A single inferred substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoSub {
    /// Nominal starter moved to the bench.
    pub player_out: PlayerId,
    /// Bench player promoted to the lineup.
    pub player_in: PlayerId,
}

/// Result of reconciling nominal starters against an official total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoSubOutcome {
    NoChange,
    Swap(AutoSub),
}

impl AutoSubOutcome {
    pub fn swap(&self) -> Option<&AutoSub> {
        match self {
            AutoSubOutcome::NoChange => None,
            AutoSubOutcome::Swap(sub) => Some(sub),
        }
    }

    /// Apply the outcome to owned starter and bench lists.
    ///
    /// The promoted player takes the benched starter's place in `starters` and
    /// vice versa, so list order is otherwise preserved. `NoChange`, or a swap
    /// naming ids that are not present, leaves both lists untouched.
    pub fn apply(&self, starters: &mut [Player], bench: &mut [Player]) -> bool {
        let Some(sub) = self.swap() else {
            return false;
        };
        let out_idx = starters.iter().position(|p| p.id == sub.player_out);
        let in_idx = bench.iter().position(|p| p.id == sub.player_in);
        match (out_idx, in_idx) {
            (Some(s), Some(b)) => {
                std::mem::swap(&mut starters[s], &mut bench[b]);
                true
            }
            _ => false,
        }
    }
}

/// Sum of realized scores over a set of players.
pub fn realized_sum(players: &[Player]) -> f64 {
    players.iter().map(|p| p.realized_score).sum()
}

/// Find the single swap that reconciles `nominal_starters` with
/// `authoritative_total`.
///
/// Search order is starters in their given order, then bench players in
/// theirs; the first pair whose score difference lands within
/// [`SWAP_TOLERANCE`] of the gap wins. An unexplained gap is not an error and
/// yields `NoChange`.
pub fn resolve_auto_subs(
    nominal_starters: &[Player],
    bench: &[Player],
    authoritative_total: f64,
) -> AutoSubOutcome {
    let current_sum = realized_sum(nominal_starters);
    let diff = authoritative_total - current_sum;

    if diff.abs() < NOISE_TOLERANCE {
        return AutoSubOutcome::NoChange;
    }

    debug!(
        "resolving discrepancy: official {:.2} vs sum {:.2} (diff {:.2})",
        authoritative_total, current_sum, diff
    );

    for starter in nominal_starters {
        for sub in bench {
            let delta = sub.realized_score - starter.realized_score;
            if (delta - diff).abs() < SWAP_TOLERANCE {
                info!(
                    "auto-sub inferred: {} ({:.2}) out, {} ({:.2}) in",
                    starter.label(),
                    starter.realized_score,
                    sub.label(),
                    sub.realized_score
                );
                return AutoSubOutcome::Swap(AutoSub {
                    player_out: starter.id.clone(),
                    player_in: sub.id.clone(),
                });
            }
        }
    }

    debug!("no single swap explains a {:.2} point discrepancy", diff);
    AutoSubOutcome::NoChange
}
