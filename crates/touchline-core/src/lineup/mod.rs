// Lineup engine: formation policy, score source, optimizer, auto-sub resolver.

pub mod autosub;
pub mod formation;
pub mod optimizer;
pub mod score;
