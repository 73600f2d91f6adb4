// Optimal lineup selection under formation constraints.
//
// Greedy constrained selection: fill the base formation from the top of each
// position pool, then hand each flex slot to the best remaining outfield
// player whose position is still below its maximum.

use std::cmp::Ordering;
use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::lineup::formation::{FLEX_ORDER, FORMATION};
use crate::lineup::score::ScoreSource;
use crate::roster::player::{Player, PlayerId};
use crate::roster::position::{Position, ALL_POSITIONS};

// ---------------------------------------------------------------------------
// Selection result
// ---------------------------------------------------------------------------

/// The starters chosen for one team, in selection order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineupSelection {
    pub starters: Vec<PlayerId>,
    /// Flex slots no eligible player could fill.
    pub unfilled_flex_slots: usize,
}

impl LineupSelection {
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.starters.iter().any(|s| s == id)
    }

    pub fn len(&self) -> usize {
        self.starters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starters.is_empty()
    }

    /// Whether a full eleven was selected.
    pub fn is_complete(&self) -> bool {
        self.starters.len() == FORMATION.starters
    }

    /// Split a roster into (starters, bench), both in roster order.
    ///
    /// Duplicate ids after the first occurrence are dropped from both lists so
    /// no id ends up on both sides.
    pub fn split(&self, roster: &[Player]) -> (Vec<Player>, Vec<Player>) {
        let mut seen: HashSet<&PlayerId> = HashSet::new();
        let mut starters = Vec::new();
        let mut bench = Vec::new();
        for player in roster {
            if !seen.insert(&player.id) {
                continue;
            }
            if self.contains(&player.id) {
                starters.push(player.clone());
            } else {
                bench.push(player.clone());
            }
        }
        (starters, bench)
    }
}

// ---------------------------------------------------------------------------
// Position pools
// ---------------------------------------------------------------------------

/// Players of one position, best first, plus how many have been started.
struct PositionPool<'a> {
    position: Position,
    remaining: VecDeque<&'a Player>,
    selected: usize,
}

impl<'a> PositionPool<'a> {
    /// Collect players at `position` and sort them descending by `source`.
    /// The sort is stable, so ties keep roster order.
    fn build(roster: &[&'a Player], position: Position, source: ScoreSource) -> Self {
        let mut players: Vec<&Player> = roster
            .iter()
            .copied()
            .filter(|p| p.position == Some(position))
            .collect();
        players.sort_by(|a, b| {
            source
                .score(b)
                .partial_cmp(&source.score(a))
                .unwrap_or(Ordering::Equal)
        });
        PositionPool {
            position,
            remaining: players.into(),
            selected: 0,
        }
    }

    fn has_room(&self) -> bool {
        self.selected < FORMATION.max(self.position)
    }

    fn take(&mut self) -> Option<&'a Player> {
        let player = self.remaining.pop_front()?;
        self.selected += 1;
        Some(player)
    }
}

/// Roster with later duplicates of an id removed.
fn unique_players(roster: &[Player]) -> Vec<&Player> {
    let mut seen: HashSet<&PlayerId> = HashSet::new();
    let mut players = Vec::with_capacity(roster.len());
    for player in roster {
        if seen.insert(&player.id) {
            players.push(player);
        } else {
            warn!("duplicate roster entry for player {}, keeping the first", player.id);
        }
    }
    players
}

// ---------------------------------------------------------------------------
// Public selection operations
// ---------------------------------------------------------------------------

/// Compute the highest-scoring legal lineup for a roster.
///
/// Algorithm:
/// 1. Pick the score source: hindsight for completed weeks
///    (`evaluation_week < current_week`), hybrid otherwise.
/// 2. Partition by position and sort each pool descending by that score.
/// 3. Fill the base formation (1 GK, 3 DEF, 2 MID, 1 FWD) from each pool's head.
/// 4. Fill each flex slot with the strictly best pool head among positions
///    still below their maximum. Ties go Defender, then Midfielder, then Forward.
///    A slot with no candidate stays unfilled and is counted.
pub fn select_optimal_starters(
    roster: &[Player],
    evaluation_week: u32,
    current_week: u32,
) -> LineupSelection {
    let source = ScoreSource::for_week(evaluation_week, current_week);
    let players = unique_players(roster);

    let mut pools: Vec<PositionPool> = ALL_POSITIONS
        .iter()
        .map(|&pos| PositionPool::build(&players, pos, source))
        .collect();

    let mut starters: Vec<PlayerId> = Vec::with_capacity(FORMATION.starters);

    // Base formation
    for pool in pools.iter_mut() {
        for _ in 0..FORMATION.base(pool.position) {
            match pool.take() {
                Some(p) => {
                    debug!("base {}: {} ({:.2})", pool.position, p.label(), source.score(p));
                    starters.push(p.id.clone());
                }
                None => break,
            }
        }
    }

    // Flex slots
    let mut unfilled_flex_slots = 0;
    for slot in 0..FORMATION.flex_slots() {
        let mut best: Option<(usize, f64)> = None;
        for (idx, pool) in pools.iter().enumerate() {
            if !FLEX_ORDER.contains(&pool.position) || !pool.has_room() {
                continue;
            }
            let Some(head) = pool.remaining.front() else {
                continue;
            };
            let score = source.score(head);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((idx, score));
            }
        }

        match best.and_then(|(idx, _)| pools[idx].take().map(|p| (idx, p))) {
            Some((idx, p)) => {
                debug!(
                    "flex {}: {} {} ({:.2})",
                    slot + 1,
                    pools[idx].position,
                    p.label(),
                    source.score(p)
                );
                starters.push(p.id.clone());
            }
            None => {
                unfilled_flex_slots += 1;
                warn!(
                    "no eligible flex candidate for slot {} (DEF {}, MID {}, FWD {} started)",
                    slot + 1,
                    pools[1].selected,
                    pools[2].selected,
                    pools[3].selected
                );
            }
        }
    }

    let total: f64 = players
        .iter()
        .filter(|p| starters.contains(&p.id))
        .map(|p| source.score(p))
        .sum();
    debug!(
        "optimal lineup for week {} ({:?}): {} starters, {:.2} points",
        evaluation_week,
        source,
        starters.len(),
        total
    );

    LineupSelection {
        starters,
        unfilled_flex_slots,
    }
}

/// The lineup the manager actually set: every player with `Active` status,
/// in roster order.
pub fn nominal_starters(roster: &[Player]) -> LineupSelection {
    let starters = unique_players(roster)
        .into_iter()
        .filter(|p| p.is_active())
        .map(|p| p.id.clone())
        .collect();
    LineupSelection {
        starters,
        unfilled_flex_slots: 0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: &str, pos: Position, realized: f64) -> Player {
        Player::new(id, pos).with_realized(realized)
    }

    /// 1 GK, 5 DEF, 5 MID, 4 FWD with distinct scores.
    fn fifteen_man_roster() -> Vec<Player> {
        vec![
            p("gk", Position::Goalkeeper, 4.0),
            p("d8", Position::Defender, 8.0),
            p("d7", Position::Defender, 7.0),
            p("d6", Position::Defender, 6.0),
            p("d5", Position::Defender, 5.0),
            p("d4", Position::Defender, 4.0),
            p("m9", Position::Midfielder, 9.0),
            p("m8", Position::Midfielder, 8.0),
            p("m7", Position::Midfielder, 7.0),
            p("m6", Position::Midfielder, 6.0),
            p("m5", Position::Midfielder, 5.0),
            p("f10", Position::Forward, 10.0),
            p("f9", Position::Forward, 9.0),
            p("f8", Position::Forward, 8.0),
            p("f7", Position::Forward, 7.0),
        ]
    }

    fn ids(selection: &LineupSelection) -> Vec<&str> {
        selection.starters.iter().map(|id| id.as_str()).collect()
    }

    fn count(selection: &LineupSelection, roster: &[Player], pos: Position) -> usize {
        roster
            .iter()
            .filter(|pl| pl.position == Some(pos) && selection.contains(&pl.id))
            .count()
    }

    #[test]
    fn fifteen_man_scenario_follows_greedy_flex_rule() {
        let roster = fifteen_man_roster();
        let sel = select_optimal_starters(&roster, 5, 6);
        // Base: gk, d8 d7 d6, m9 m8, f10.
        // Flex: f9 (beats m7/d5), f8 (beats m7/d5), m7 (ties f7, MID wins), f7.
        assert_eq!(
            ids(&sel),
            vec!["gk", "d8", "d7", "d6", "m9", "m8", "f10", "f9", "f8", "m7", "f7"]
        );
        assert!(sel.is_complete());
        assert_eq!(sel.unfilled_flex_slots, 0);
    }

    #[test]
    fn formation_limits_respected() {
        let roster = fifteen_man_roster();
        let sel = select_optimal_starters(&roster, 5, 6);
        assert_eq!(count(&sel, &roster, Position::Goalkeeper), 1);
        assert!((3..=5).contains(&count(&sel, &roster, Position::Defender)));
        assert!((2..=5).contains(&count(&sel, &roster, Position::Midfielder)));
        assert!((1..=4).contains(&count(&sel, &roster, Position::Forward)));
    }

    #[test]
    fn forward_cap_of_four_is_enforced() {
        // Six elite forwards; only four may start.
        let mut roster = vec![p("gk", Position::Goalkeeper, 1.0)];
        for i in 0..3 {
            roster.push(p(&format!("d{i}"), Position::Defender, 1.0));
        }
        for i in 0..2 {
            roster.push(p(&format!("m{i}"), Position::Midfielder, 1.0));
        }
        for i in 0..6 {
            roster.push(p(&format!("f{i}"), Position::Forward, 50.0 - i as f64));
        }
        roster.push(p("d_extra", Position::Defender, 0.5));
        roster.push(p("m_extra", Position::Midfielder, 0.25));

        let sel = select_optimal_starters(&roster, 1, 2);
        assert_eq!(count(&sel, &roster, Position::Forward), 4);
        // Last flex slot falls to the better of the remaining DEF/MID heads.
        assert!(sel.contains(&PlayerId::from("d_extra")));
        assert!(!sel.contains(&PlayerId::from("m_extra")));
        assert!(!sel.contains(&PlayerId::from("f4")));
        assert!(!sel.contains(&PlayerId::from("f5")));
        assert!(sel.is_complete());
    }

    #[test]
    fn defender_cap_of_five_is_enforced() {
        // Eight elite defenders and nobody else to fill flex slots.
        let mut roster = vec![p("gk", Position::Goalkeeper, 1.0)];
        for i in 0..8 {
            roster.push(p(&format!("d{i}"), Position::Defender, 20.0));
        }
        roster.push(p("m0", Position::Midfielder, 1.0));
        roster.push(p("m1", Position::Midfielder, 1.0));
        roster.push(p("f0", Position::Forward, 1.0));

        let sel = select_optimal_starters(&roster, 1, 2);
        assert_eq!(count(&sel, &roster, Position::Defender), 5);
        assert!(!sel.contains(&PlayerId::from("d5")));
        assert_eq!(sel.len(), 9);
        assert_eq!(sel.unfilled_flex_slots, 2);
    }

    #[test]
    fn midfielder_cap_of_five_is_enforced() {
        let mut roster = vec![p("gk", Position::Goalkeeper, 1.0)];
        for i in 0..3 {
            roster.push(p(&format!("d{i}"), Position::Defender, 1.0));
        }
        for i in 0..8 {
            roster.push(p(&format!("m{i}"), Position::Midfielder, 20.0 - i as f64));
        }
        roster.push(p("f0", Position::Forward, 1.0));
        roster.push(p("d_extra", Position::Defender, 0.5));

        let sel = select_optimal_starters(&roster, 1, 2);
        assert_eq!(count(&sel, &roster, Position::Midfielder), 5);
        // The last flex slot drops to a weak defender rather than a sixth midfielder.
        assert!(sel.contains(&PlayerId::from("d_extra")));
        assert!(!sel.contains(&PlayerId::from("m5")));
        assert!(sel.is_complete());
    }

    #[test]
    fn unplaced_players_are_never_selected() {
        let mut roster = fifteen_man_roster();
        roster.push(Player::unplaced("mystery").with_realized(99.0).active());
        let sel = select_optimal_starters(&roster, 5, 6);
        assert!(!sel.contains(&PlayerId::from("mystery")));
        assert!(sel.is_complete());

        // ...but they still count as nominal starters and split onto a side.
        let nominal = nominal_starters(&roster);
        assert_eq!(ids(&nominal), vec!["mystery"]);
        let (starters, bench) = nominal.split(&roster);
        assert_eq!(starters.len(), 1);
        assert_eq!(bench.len(), 15);
    }

    #[test]
    fn defender_wins_three_way_tie() {
        let mut roster = vec![p("gk", Position::Goalkeeper, 1.0)];
        for i in 0..3 {
            roster.push(p(&format!("d{i}"), Position::Defender, 10.0));
        }
        for i in 0..2 {
            roster.push(p(&format!("m{i}"), Position::Midfielder, 10.0));
        }
        roster.push(p("f0", Position::Forward, 10.0));
        // Bench candidates, all tied at 3.0; forward listed first in roster.
        roster.push(p("f_tie", Position::Forward, 3.0));
        roster.push(p("m_tie", Position::Midfielder, 3.0));
        roster.push(p("d_tie", Position::Defender, 3.0));

        let sel = select_optimal_starters(&roster, 1, 2);
        // First flex picks the defender, then the midfielder, then the forward.
        assert_eq!(&ids(&sel)[7..], &["d_tie", "m_tie", "f_tie"]);
        assert_eq!(sel.unfilled_flex_slots, 1);
    }

    #[test]
    fn ties_within_position_keep_roster_order() {
        let roster = vec![
            p("gk", Position::Goalkeeper, 1.0),
            p("d_a", Position::Defender, 2.0),
            p("d_b", Position::Defender, 2.0),
            p("d_c", Position::Defender, 2.0),
            p("d_d", Position::Defender, 2.0),
        ];
        let sel = select_optimal_starters(&roster, 1, 2);
        assert_eq!(ids(&sel)[1..4], ["d_a", "d_b", "d_c"]);
        // d_d takes the first flex slot.
        assert_eq!(ids(&sel)[4], "d_d");
    }

    #[test]
    fn no_goalkeeper_is_not_an_error() {
        let roster: Vec<Player> = fifteen_man_roster()
            .into_iter()
            .filter(|pl| pl.position != Some(Position::Goalkeeper))
            .collect();
        let sel = select_optimal_starters(&roster, 5, 6);
        assert_eq!(sel.len(), 10);
        assert_eq!(count(&sel, &roster, Position::Goalkeeper), 0);
        assert_eq!(sel.unfilled_flex_slots, 0);
        assert!(!sel.is_complete());
    }

    #[test]
    fn small_roster_leaves_flex_slots_unfilled() {
        let roster = vec![
            p("gk", Position::Goalkeeper, 2.0),
            p("d1", Position::Defender, 3.0),
            p("m1", Position::Midfielder, 4.0),
            p("f1", Position::Forward, 5.0),
            p("f2", Position::Forward, 1.0),
        ];
        let sel = select_optimal_starters(&roster, 3, 3);
        assert_eq!(sel.len(), 5);
        assert_eq!(sel.unfilled_flex_slots, 3);
    }

    #[test]
    fn empty_roster_selects_nobody() {
        let sel = select_optimal_starters(&[], 1, 1);
        assert!(sel.is_empty());
        assert_eq!(sel.unfilled_flex_slots, 4);
    }

    #[test]
    fn idempotent_for_identical_input() {
        let roster = fifteen_man_roster();
        let a = select_optimal_starters(&roster, 5, 6);
        let b = select_optimal_starters(&roster, 5, 6);
        assert_eq!(a, b);
    }

    #[test]
    fn higher_scorer_never_benched_for_lower_same_position() {
        let roster = fifteen_man_roster();
        let sel = select_optimal_starters(&roster, 5, 6);
        for a in &roster {
            for b in &roster {
                if a.position == b.position
                    && a.realized_score > b.realized_score
                    && sel.contains(&b.id)
                {
                    assert!(sel.contains(&a.id), "{} benched while {} started", a.id, b.id);
                }
            }
        }
    }

    #[test]
    fn hybrid_week_uses_projection_for_unstarted_players() {
        let mut roster = fifteen_man_roster();
        // d4 has not played yet but projects to 20; in hindsight he scored 4.
        for pl in roster.iter_mut() {
            pl.has_started = true;
        }
        let d4 = roster.iter_mut().find(|pl| pl.id.as_str() == "d4").unwrap();
        d4.has_started = false;
        d4.projected_score = 20.0;

        let live = select_optimal_starters(&roster, 6, 6);
        assert_eq!(live.starters[1].as_str(), "d4");

        let past = select_optimal_starters(&roster, 5, 6);
        assert!(!past.contains(&PlayerId::from("d4")));
    }

    #[test]
    fn duplicate_ids_selected_once() {
        let mut roster = fifteen_man_roster();
        roster.push(p("f10", Position::Forward, 10.0));
        let sel = select_optimal_starters(&roster, 5, 6);
        let f10_count = sel.starters.iter().filter(|id| id.as_str() == "f10").count();
        assert_eq!(f10_count, 1);
        assert_eq!(sel.len(), 11);
    }

    #[test]
    fn negative_scores_still_fill_slots() {
        let roster = vec![
            p("gk", Position::Goalkeeper, -2.0),
            p("d1", Position::Defender, -1.0),
            p("d2", Position::Defender, -3.0),
            p("d3", Position::Defender, -4.0),
            p("d4", Position::Defender, -5.0),
        ];
        let sel = select_optimal_starters(&roster, 1, 2);
        assert_eq!(ids(&sel), vec!["gk", "d1", "d2", "d3", "d4"]);
    }

    #[test]
    fn nominal_starters_follow_active_status() {
        let roster = vec![
            p("a", Position::Goalkeeper, 1.0).active(),
            p("b", Position::Defender, 9.0),
            p("c", Position::Forward, 2.0).active(),
        ];
        let sel = nominal_starters(&roster);
        assert_eq!(ids(&sel), vec!["a", "c"]);
        assert_eq!(sel.unfilled_flex_slots, 0);
    }

    #[test]
    fn split_partitions_roster_in_order() {
        let roster = vec![
            p("a", Position::Goalkeeper, 1.0).active(),
            p("b", Position::Defender, 9.0),
            p("c", Position::Forward, 2.0).active(),
            p("a", Position::Goalkeeper, 1.0).active(),
        ];
        let sel = nominal_starters(&roster);
        let (starters, bench) = sel.split(&roster);
        let s: Vec<&str> = starters.iter().map(|pl| pl.id.as_str()).collect();
        let b: Vec<&str> = bench.iter().map(|pl| pl.id.as_str()).collect();
        assert_eq!(s, vec!["a", "c"]);
        assert_eq!(b, vec!["b"]);
    }
}
