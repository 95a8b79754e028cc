//! Box score aggregation
//!
//! Cumulative statistics summarizing the entire event log. The box score is
//! rebuilt wholesale after every mutation: truncation can retroactively
//! invalidate any prior aggregate, so no incremental patching is attempted.
//! `build` replays the full log through a fresh [`Situation`] and is
//! idempotent.

use crate::core::{EventLog, PlayerId, Team};
use crate::game::scoring::ScoringEngine;
use crate::game::situation::Situation;
use crate::Result;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Cumulative team totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTotals {
    pub runs: u32,
    pub hits: u32,
    pub errors: u32,
    pub double_plays: u32,
    pub left_on_base: u32,
}

/// Cumulative batting line for one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattingLine {
    pub appearances: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub runs: u32,
}

/// Box score over the full event log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Boxscore {
    teams: [TeamTotals; 2],
    batting: FxHashMap<PlayerId, BattingLine>,
}

impl Boxscore {
    pub fn new() -> Self {
        Boxscore::default()
    }

    /// Recompute all statistics from the full current log
    pub fn build(&mut self, log: &EventLog, engine: &dyn ScoringEngine) -> Result<()> {
        self.teams = [TeamTotals::default(); 2];
        self.batting.clear();

        let mut double_plays = [0u32; 2];
        let mut situation = Situation::new();
        for event in log.iter() {
            let Some(applied) = situation.apply(event, engine)? else {
                continue;
            };
            if applied.outcome.double_play {
                // Double plays are a fielding credit
                double_plays[applied.team.other().index()] += 1;
            }
            let line = self.batting.entry(applied.batter).or_default();
            line.appearances += 1;
            if applied.outcome.at_bat {
                line.at_bats += 1;
            }
            if applied.outcome.hit {
                line.hits += 1;
            }
            for scorer in applied.scorers {
                self.batting.entry(scorer).or_default().runs += 1;
            }
        }

        for team in [Team::Visitor, Team::Home] {
            self.teams[team.index()] = TeamTotals {
                runs: situation.score(team),
                hits: situation.hits(team),
                errors: situation.errors(team),
                double_plays: double_plays[team.index()],
                left_on_base: situation.left_on_base(team),
            };
        }
        Ok(())
    }

    pub fn totals(&self, team: Team) -> &TeamTotals {
        &self.teams[team.index()]
    }

    pub fn double_plays(&self, team: Team) -> u32 {
        self.teams[team.index()].double_plays
    }

    pub fn batting_line(&self, player: &PlayerId) -> Option<&BattingLine> {
        self.batting.get(player)
    }

    /// All batting lines (unordered)
    pub fn batting_lines(&self) -> impl Iterator<Item = (&PlayerId, &BattingLine)> {
        self.batting.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayRecord;
    use crate::game::scoring::StandardRules;

    fn log_with(plays: &[(Team, &str, &str)]) -> EventLog {
        let mut log = EventLog::new();
        for (team, batter, text) in plays {
            log.append_play(
                1,
                *team,
                PlayerId::new(*batter),
                PlayRecord::UNKNOWN_COUNT,
                "",
                *text,
            );
        }
        log
    }

    #[test]
    fn test_empty_log_builds_zero_totals() {
        let mut box_score = Boxscore::new();
        box_score
            .build(&EventLog::new(), &StandardRules::new())
            .unwrap();
        assert_eq!(box_score.totals(Team::Visitor), &TeamTotals::default());
        assert_eq!(box_score.totals(Team::Home), &TeamTotals::default());
    }

    #[test]
    fn test_team_totals_match_replay() {
        let log = log_with(&[
            (Team::Visitor, "a", "S8"),
            (Team::Visitor, "b", "HR"),
            (Team::Visitor, "c", "E4"),
            (Team::Visitor, "d", "K"),
        ]);
        let mut box_score = Boxscore::new();
        box_score.build(&log, &StandardRules::new()).unwrap();

        let visitor = box_score.totals(Team::Visitor);
        assert_eq!(visitor.runs, 2);
        assert_eq!(visitor.hits, 2);
        assert_eq!(visitor.left_on_base, 1);
        // Error charged against the home defense
        assert_eq!(box_score.totals(Team::Home).errors, 1);
    }

    #[test]
    fn test_double_play_credited_to_defense() {
        let log = log_with(&[
            (Team::Visitor, "a", "S8"),
            (Team::Visitor, "b", "64(1)3/GDP"),
        ]);
        let mut box_score = Boxscore::new();
        box_score.build(&log, &StandardRules::new()).unwrap();

        assert_eq!(box_score.double_plays(Team::Home), 1);
        assert_eq!(box_score.double_plays(Team::Visitor), 0);
    }

    #[test]
    fn test_batting_lines() {
        let log = log_with(&[
            (Team::Visitor, "a", "T8"),
            (Team::Visitor, "b", "W"),
            (Team::Visitor, "c", "S9.3-H;1-2"),
        ]);
        let mut box_score = Boxscore::new();
        box_score.build(&log, &StandardRules::new()).unwrap();

        let a = box_score.batting_line(&PlayerId::new("a")).unwrap();
        assert_eq!(a.at_bats, 1);
        assert_eq!(a.hits, 1);
        assert_eq!(a.runs, 1);

        // Walk is a plate appearance but not an at-bat
        let b = box_score.batting_line(&PlayerId::new("b")).unwrap();
        assert_eq!(b.appearances, 1);
        assert_eq!(b.at_bats, 0);
    }

    #[test]
    fn test_build_is_idempotent() {
        let log = log_with(&[
            (Team::Visitor, "a", "S8"),
            (Team::Visitor, "b", "K"),
        ]);
        let mut box_score = Boxscore::new();
        box_score.build(&log, &StandardRules::new()).unwrap();
        let first = box_score.clone();
        box_score.build(&log, &StandardRules::new()).unwrap();
        assert_eq!(box_score, first);
    }
}
