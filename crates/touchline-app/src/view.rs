// Lineup views: starters, bench, totals and auto-sub badges for one team,
// ready for whichever presentation layer consumes them.

use serde::Serialize;
use tracing::{info, warn};

use touchline_core::lineup::autosub::{realized_sum, NOISE_TOLERANCE};
use touchline_core::{
    nominal_starters, resolve_auto_subs, select_optimal_starters, AutoSub, Player, ScoreSource,
    FORMATION,
};

use crate::ingest::lineup::{LineupDocument, TeamRoster};
use crate::matchup::MatchupId;

/// Which starters to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineupMode {
    /// The lineup the manager set, reconciled against the official total.
    Nominal,
    /// The best legal lineup for the week.
    Optimal,
}

/// Auto-substitution marker for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubBadge {
    In,
    Out,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupEntry {
    #[serde(flatten)]
    pub player: Player,
    pub auto_sub: Option<SubBadge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamLineupView {
    pub name: String,
    pub mode: LineupMode,
    /// Sorted G, D, M, F.
    pub starters: Vec<LineupEntry>,
    /// Roster order.
    pub bench: Vec<LineupEntry>,
    /// Official total in nominal mode when available, otherwise `starters_sum`.
    pub total_score: f64,
    /// Sum of the displayed starters' realized scores.
    pub starters_sum: f64,
    pub total_projected: f64,
    pub authoritative_total: Option<f64>,
    pub auto_sub: Option<AutoSub>,
    /// False when an official total exists and no single swap explains it.
    pub reconciled: bool,
    /// Starters missing from a full eleven.
    pub short_by: usize,
}

fn sort_by_position(players: &mut [Player]) {
    players.sort_by_key(Player::position_order);
}

impl TeamLineupView {
    pub fn build(
        team: &TeamRoster,
        mode: LineupMode,
        evaluation_week: u32,
        current_week: u32,
    ) -> Self {
        let selection = match mode {
            LineupMode::Nominal => nominal_starters(&team.players),
            LineupMode::Optimal => {
                select_optimal_starters(&team.players, evaluation_week, current_week)
            }
        };
        let (mut starters, mut bench) = selection.split(&team.players);
        sort_by_position(&mut starters);

        let mut auto_sub: Option<AutoSub> = None;
        let mut reconciled = true;
        if let (LineupMode::Nominal, Some(total)) = (mode, team.authoritative_total) {
            let outcome = resolve_auto_subs(&starters, &bench, total);
            if outcome.apply(&mut starters, &mut bench) {
                sort_by_position(&mut starters);
                auto_sub = outcome.swap().cloned();
            } else {
                reconciled = (total - realized_sum(&starters)).abs() < NOISE_TOLERANCE;
            }
            if !reconciled {
                warn!(
                    "{}: official total {:.2} does not reconcile with starters {:.2}",
                    team.name,
                    total,
                    realized_sum(&starters)
                );
            }
        }

        let starters_sum = realized_sum(&starters);
        let total_projected: f64 = starters.iter().map(|p| p.projected_score).sum();
        let total_score = match (mode, team.authoritative_total) {
            (LineupMode::Nominal, Some(total)) => total,
            _ => starters_sum,
        };
        let short_by = FORMATION.starters.saturating_sub(starters.len());
        if short_by > 0 {
            info!("{}: {:?} lineup has {} starters", team.name, mode, starters.len());
        }

        let badge = |p: &Player| -> Option<SubBadge> {
            let sub = auto_sub.as_ref()?;
            if p.id == sub.player_in {
                Some(SubBadge::In)
            } else if p.id == sub.player_out {
                Some(SubBadge::Out)
            } else {
                None
            }
        };
        let to_entries = |players: Vec<Player>| -> Vec<LineupEntry> {
            players
                .into_iter()
                .map(|player| LineupEntry {
                    auto_sub: badge(&player),
                    player,
                })
                .collect()
        };

        TeamLineupView {
            name: team.name.clone(),
            mode,
            starters: to_entries(starters),
            bench: to_entries(bench),
            total_score,
            starters_sum,
            total_projected,
            authoritative_total: team.authoritative_total,
            auto_sub: auto_sub.clone(),
            reconciled,
            short_by,
        }
    }
}

/// Both sides of a matchup rendered in the same mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupView {
    pub matchup_id: String,
    pub week: u32,
    pub current_week: u32,
    pub score_source: ScoreSource,
    pub home: TeamLineupView,
    pub away: TeamLineupView,
}

impl MatchupView {
    pub fn build(
        id: &MatchupId,
        document: &LineupDocument,
        mode: LineupMode,
        current_week: u32,
    ) -> Self {
        MatchupView {
            matchup_id: id.to_string(),
            week: id.week,
            current_week,
            score_source: ScoreSource::for_week(id.week, current_week),
            home: TeamLineupView::build(&document.home, mode, id.week, current_week),
            away: TeamLineupView::build(&document.away, mode, id.week, current_week),
        }
    }
}
