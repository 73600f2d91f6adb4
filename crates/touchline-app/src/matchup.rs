// Matchup identifiers: "{week}_{home}_{away}" for league fixtures,
// "CL_{week}_{home}_{away}" / "CUP_{week}_{home}_{away}" for cup competitions.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchupIdError {
    #[error("matchup id `{0}` must have the form week_home_away or CL|CUP_week_home_away")]
    Malformed(String),

    #[error("matchup id `{id}` has a non-numeric week `{week}`")]
    BadWeek { id: String, week: String },
}

/// Which competition a matchup belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Competition {
    League,
    ChampionsLeague,
    Cup,
}

impl Competition {
    fn prefix(&self) -> Option<&'static str> {
        match self {
            Competition::League => None,
            Competition::ChampionsLeague => Some("CL"),
            Competition::Cup => Some("CUP"),
        }
    }
}

/// A parsed matchup identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchupId {
    pub competition: Competition,
    pub week: u32,
    pub home_team_id: String,
    pub away_team_id: String,
}

impl MatchupId {
    pub fn parse(id: &str) -> Result<Self, MatchupIdError> {
        let parts: Vec<&str> = id.trim().split('_').collect();
        let (competition, rest) = match parts.first().copied() {
            Some("CL") => (Competition::ChampionsLeague, &parts[1..]),
            Some("CUP") => (Competition::Cup, &parts[1..]),
            _ => (Competition::League, &parts[..]),
        };

        let [week, home, away] = rest else {
            return Err(MatchupIdError::Malformed(id.to_string()));
        };
        if home.is_empty() || away.is_empty() {
            return Err(MatchupIdError::Malformed(id.to_string()));
        }
        let week: u32 = week.parse().map_err(|_| MatchupIdError::BadWeek {
            id: id.to_string(),
            week: week.to_string(),
        })?;

        Ok(MatchupId {
            competition,
            week,
            home_team_id: home.to_string(),
            away_team_id: away.to_string(),
        })
    }
}

impl FromStr for MatchupId {
    type Err = MatchupIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MatchupId::parse(s)
    }
}

impl fmt::Display for MatchupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = self.competition.prefix() {
            write!(f, "{prefix}_")?;
        }
        write!(f, "{}_{}_{}", self.week, self.home_team_id, self.away_team_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_league_matchup() {
        let id = MatchupId::parse("24_abc_def").unwrap();
        assert_eq!(id.competition, Competition::League);
        assert_eq!(id.week, 24);
        assert_eq!(id.home_team_id, "abc");
        assert_eq!(id.away_team_id, "def");
    }

    #[test]
    fn parses_cup_prefixes() {
        let cl = MatchupId::parse("CL_7_h_a").unwrap();
        assert_eq!(cl.competition, Competition::ChampionsLeague);
        assert_eq!(cl.week, 7);

        let cup = MatchupId::parse("CUP_12_h_a").unwrap();
        assert_eq!(cup.competition, Competition::Cup);
        assert_eq!(cup.week, 12);
        assert_eq!(cup.away_team_id, "a");
    }

    #[test]
    fn display_round_trips() {
        for raw in ["24_abc_def", "CL_7_h_a", "CUP_12_x_y"] {
            assert_eq!(MatchupId::parse(raw).unwrap().to_string(), raw);
        }
    }

    #[test]
    fn rejects_wrong_part_count() {
        assert!(matches!(
            MatchupId::parse("24_abc"),
            Err(MatchupIdError::Malformed(_))
        ));
        assert!(matches!(
            MatchupId::parse("CL_24_a_b_c"),
            Err(MatchupIdError::Malformed(_))
        ));
        assert!(matches!(MatchupId::parse(""), Err(MatchupIdError::Malformed(_))));
    }

    #[test]
    fn rejects_non_numeric_week() {
        let err = MatchupId::parse("wk_abc_def").unwrap_err();
        assert_eq!(
            err,
            MatchupIdError::BadWeek {
                id: "wk_abc_def".into(),
                week: "wk".into()
            }
        );
    }

    #[test]
    fn rejects_empty_team_ids() {
        assert!(MatchupId::parse("24__def").is_err());
    }
}
