// Roster records: positions and players as supplied by the data feed.

pub mod player;
pub mod position;
