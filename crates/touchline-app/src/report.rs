// Plain-text matchup report.

use std::fmt;

use crate::view::{LineupEntry, LineupMode, MatchupView, SubBadge, TeamLineupView};

/// Text rendering of a matchup view.
pub struct TextReport<'a>(pub &'a MatchupView);

fn entry_line(f: &mut fmt::Formatter<'_>, entry: &LineupEntry) -> fmt::Result {
    let p = &entry.player;
    let badge = match entry.auto_sub {
        Some(SubBadge::In) => "  [SUB IN]",
        Some(SubBadge::Out) => "  [SUB OUT]",
        None => "",
    };
    let started = if p.has_started { "" } else { " *" };
    writeln!(
        f,
        "  {:<2} {:<24} {:<5} {:>7.2}  proj {:>6.2}{}{}",
        p.position_str(),
        p.label(),
        p.team,
        p.realized_score,
        p.projected_score,
        started,
        badge
    )
}

fn team_section(f: &mut fmt::Formatter<'_>, team: &TeamLineupView) -> fmt::Result {
    writeln!(f, "{}", team.name)?;
    writeln!(
        f,
        "  total {:.2}   projected {:.2}",
        team.total_score, team.total_projected
    )?;
    if let (Some(total), false) = (team.authoritative_total, team.reconciled) {
        writeln!(
            f,
            "  ! official total {:.2} does not match starters {:.2}",
            total, team.starters_sum
        )?;
    }
    if team.short_by > 0 {
        writeln!(
            f,
            "  ! only {} starters selected ({} short of a full eleven)",
            team.starters.len(),
            team.short_by
        )?;
    }

    writeln!(f, " Starters")?;
    for entry in &team.starters {
        entry_line(f, entry)?;
    }
    if !team.bench.is_empty() {
        writeln!(f, " Bench")?;
        for entry in &team.bench {
            entry_line(f, entry)?;
        }
    }
    Ok(())
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        let mode = match view.home.mode {
            LineupMode::Nominal => "lineups",
            LineupMode::Optimal => "optimal lineups",
        };
        writeln!(
            f,
            "Matchup {} (week {}, current week {}, {:?} scoring): {}",
            view.matchup_id, view.week, view.current_week, view.score_source, mode
        )?;
        writeln!(f)?;
        team_section(f, &view.home)?;
        writeln!(f)?;
        team_section(f, &view.away)
    }
}

/// Render both teams of a matchup as text.
pub fn render_text(view: &MatchupView) -> String {
    TextReport(view).to_string()
}
