// Library root: lineup selection and auto-substitution reconciliation for
// fantasy soccer rosters. Everything here is pure; callers supply rosters and
// receive plain selection/outcome records.

pub mod lineup;
pub mod roster;

pub use lineup::autosub::{resolve_auto_subs, AutoSub, AutoSubOutcome};
pub use lineup::formation::{Formation, FORMATION};
pub use lineup::optimizer::{nominal_starters, select_optimal_starters, LineupSelection};
pub use lineup::score::ScoreSource;
pub use roster::player::{Player, PlayerId, RosterStatus};
pub use roster::position::Position;
