// Soccer position categories used for formation constraints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four position categories a rostered player can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

/// All positions in display order (G, D, M, F).
pub const ALL_POSITIONS: [Position; 4] = [
    Position::Goalkeeper,
    Position::Defender,
    Position::Midfielder,
    Position::Forward,
];

impl Position {
    /// Parse a position string into a Position enum.
    ///
    /// Handles the feed's short names ("G", "D", "M", "F") as well as common
    /// long forms ("GK", "DEF", "MID", "FWD", "Goalkeeper", ...).
    /// Multi-position strings such as "D,M" resolve to their first entry.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        let first = s.split([',', '/']).next().unwrap_or("").trim();
        match first.to_uppercase().as_str() {
            "G" | "GK" | "GKP" | "GOALKEEPER" => Some(Position::Goalkeeper),
            "D" | "DEF" | "DEFENDER" => Some(Position::Defender),
            "M" | "MID" | "MIDFIELDER" => Some(Position::Midfielder),
            "F" | "FW" | "FWD" | "FORWARD" | "ST" => Some(Position::Forward),
            _ => None,
        }
    }

    /// Return the short display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "G",
            Position::Defender => "D",
            Position::Midfielder => "M",
            Position::Forward => "F",
        }
    }

    /// Deterministic ordering index for lineup display.
    pub fn sort_order(&self) -> u8 {
        match self {
            Position::Goalkeeper => 0,
            Position::Defender => 1,
            Position::Midfielder => 2,
            Position::Forward => 3,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_names() {
        assert_eq!(Position::from_str_pos("G"), Some(Position::Goalkeeper));
        assert_eq!(Position::from_str_pos("D"), Some(Position::Defender));
        assert_eq!(Position::from_str_pos("M"), Some(Position::Midfielder));
        assert_eq!(Position::from_str_pos("F"), Some(Position::Forward));
    }

    #[test]
    fn parses_long_names_case_insensitively() {
        assert_eq!(Position::from_str_pos("gk"), Some(Position::Goalkeeper));
        assert_eq!(Position::from_str_pos("Defender"), Some(Position::Defender));
        assert_eq!(Position::from_str_pos(" mid "), Some(Position::Midfielder));
        assert_eq!(Position::from_str_pos("FWD"), Some(Position::Forward));
    }

    #[test]
    fn multi_position_uses_first_entry() {
        assert_eq!(Position::from_str_pos("D,M"), Some(Position::Defender));
        assert_eq!(Position::from_str_pos("M/F"), Some(Position::Midfielder));
    }

    #[test]
    fn rejects_unknown_and_empty() {
        assert_eq!(Position::from_str_pos(""), None);
        assert_eq!(Position::from_str_pos("XX"), None);
        assert_eq!(Position::from_str_pos("1B"), None);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for pos in ALL_POSITIONS {
            assert_eq!(Position::from_str_pos(pos.display_str()), Some(pos));
        }
    }

    #[test]
    fn sort_order_is_g_d_m_f() {
        let orders: Vec<u8> = ALL_POSITIONS.iter().map(|p| p.sort_order()).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);
    }
}
