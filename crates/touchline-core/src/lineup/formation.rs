// Formation policy: per-position minimum/maximum starter counts.
//
// The base formation (1 GK, 3 DEF, 2 MID, 1 FWD) is always filled first; the
// remaining flex slots go to outfield positions that are still below their
// maximum.

use crate::roster::position::Position;

/// Fixed lineup constraints for one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formation {
    pub goalkeepers: usize,
    pub min_defenders: usize,
    pub max_defenders: usize,
    pub min_midfielders: usize,
    pub max_midfielders: usize,
    pub min_forwards: usize,
    pub max_forwards: usize,
    pub starters: usize,
}

/// The league's formation: exactly 1 GK, 3-5 DEF, 2-5 MID, 1-4 FWD, 11 starters.
pub const FORMATION: Formation = Formation {
    goalkeepers: 1,
    min_defenders: 3,
    max_defenders: 5,
    min_midfielders: 2,
    max_midfielders: 5,
    min_forwards: 1,
    max_forwards: 4,
    starters: 11,
};

impl Formation {
    /// Number of starters the base formation guarantees for a position.
    pub fn base(&self, pos: Position) -> usize {
        match pos {
            Position::Goalkeeper => self.goalkeepers,
            Position::Defender => self.min_defenders,
            Position::Midfielder => self.min_midfielders,
            Position::Forward => self.min_forwards,
        }
    }

    /// Maximum number of starters allowed at a position.
    pub fn max(&self, pos: Position) -> usize {
        match pos {
            Position::Goalkeeper => self.goalkeepers,
            Position::Defender => self.max_defenders,
            Position::Midfielder => self.max_midfielders,
            Position::Forward => self.max_forwards,
        }
    }

    /// Slots left over after the base formation is filled.
    pub fn flex_slots(&self) -> usize {
        self.starters
            - (self.goalkeepers + self.min_defenders + self.min_midfielders + self.min_forwards)
    }
}

/// Positions eligible for flex slots, in tie-break order.
pub const FLEX_ORDER: [Position; 3] = [Position::Defender, Position::Midfielder, Position::Forward];
