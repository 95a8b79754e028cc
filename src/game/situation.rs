//! The instantaneous game situation
//!
//! A [`Situation`] is a pure function of an event-log prefix: replaying the
//! same events always produces an equal value, which is what makes suffix
//! truncation a safe undo. The half-inning rollover is lazy: after a third
//! out the situation keeps `outs == 3` until the next play arrives, and the
//! `current_*` accessors report the upcoming half during that window.

use crate::core::{
    Base, BattingSlot, Event, EventKind, PlayerId, PlayerName, Position, SubstitutionRecord, Team,
};
use crate::game::scoring::{Destination, PlayOutcome, ScoringEngine};
use crate::Result;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Occupant of one batting-order slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupEntry {
    pub player: PlayerId,
    pub name: PlayerName,
    pub position: Position,
}

/// One team's nine batting-order slots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    slots: [Option<LineupEntry>; 9],
}

impl Lineup {
    pub fn set(&mut self, slot: BattingSlot, entry: LineupEntry) {
        self.slots[slot.index()] = Some(entry);
    }

    pub fn entry(&self, slot: BattingSlot) -> Option<&LineupEntry> {
        self.slots[slot.index()].as_ref()
    }

    pub fn player(&self, slot: BattingSlot) -> Option<&PlayerId> {
        self.entry(slot).map(|e| &e.player)
    }

    pub fn position(&self, slot: BattingSlot) -> Option<Position> {
        self.entry(slot).map(|e| e.position)
    }
}

/// What one applied play did, for aggregate builders
///
/// `team` is the team that was at bat after any half-inning rollover, and
/// `scorers` lists every runner (batter included) who crossed the plate.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedPlay {
    pub team: Team,
    pub batter: PlayerId,
    pub outcome: PlayOutcome,
    pub scorers: SmallVec<[PlayerId; 4]>,
}

/// Derived game state at a point in the event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Situation {
    inning: u32,
    batting_team: Team,
    outs: u8,
    score: [u32; 2],
    hits: [u32; 2],
    errors: [u32; 2],
    left_on_base: [u32; 2],
    /// Completed plate appearances per team over the whole game;
    /// mod 9 gives the zero-based slot of the next batter due up
    batters_faced: [u32; 2],
    bases: [Option<PlayerId>; 3],
    lineups: [Lineup; 2],
}

impl Default for Situation {
    fn default() -> Self {
        Self::new()
    }
}

impl Situation {
    /// State before any event: top of the first, nobody out, bases empty
    pub fn new() -> Self {
        Situation {
            inning: 1,
            batting_team: Team::Visitor,
            outs: 0,
            score: [0, 0],
            hits: [0, 0],
            errors: [0, 0],
            left_on_base: [0, 0],
            batters_faced: [0, 0],
            bases: [None, None, None],
            lineups: [Lineup::default(), Lineup::default()],
        }
    }

    /// Raw outs count; reads 3 when a half-inning has just ended
    pub fn outs(&self) -> u8 {
        self.outs
    }

    /// Inning the next play belongs to
    pub fn current_inning(&self) -> u32 {
        if self.outs == 3 && self.batting_team == Team::Home {
            self.inning + 1
        } else {
            self.inning
        }
    }

    /// Team the next play belongs to
    pub fn current_batting_team(&self) -> Team {
        if self.outs == 3 {
            self.batting_team.other()
        } else {
            self.batting_team
        }
    }

    pub fn score(&self, team: Team) -> u32 {
        self.score[team.index()]
    }

    pub fn hits(&self, team: Team) -> u32 {
        self.hits[team.index()]
    }

    pub fn errors(&self, team: Team) -> u32 {
        self.errors[team.index()]
    }

    /// Completed plate appearances for `team` so far this game
    pub fn batters_faced(&self, team: Team) -> u32 {
        self.batters_faced[team.index()]
    }

    /// Runners left on base by `team`
    ///
    /// Official definition: cumulative over completed half-innings, plus any
    /// runners currently aboard while the team is still batting.
    pub fn left_on_base(&self, team: Team) -> u32 {
        let mut lob = self.left_on_base[team.index()];
        if team == self.batting_team {
            lob += self.runners_aboard();
        }
        lob
    }

    pub fn runner(&self, base: Base) -> Option<&PlayerId> {
        self.bases[base.index()].as_ref()
    }

    pub fn player(&self, team: Team, slot: BattingSlot) -> Option<&PlayerId> {
        self.lineups[team.index()].player(slot)
    }

    pub fn position(&self, team: Team, slot: BattingSlot) -> Option<Position> {
        self.lineups[team.index()].position(slot)
    }

    /// Which bases are occupied, for the scoring engine
    pub fn bases_occupied(&self) -> [bool; 3] {
        [
            self.bases[0].is_some(),
            self.bases[1].is_some(),
            self.bases[2].is_some(),
        ]
    }

    fn runners_aboard(&self) -> u32 {
        self.bases.iter().filter(|b| b.is_some()).count() as u32
    }

    /// Install a lineup record (starter or substitution)
    pub fn set_lineup_entry(&mut self, record: &SubstitutionRecord) {
        self.lineups[record.team.index()].set(
            record.slot,
            LineupEntry {
                player: record.player.clone(),
                name: record.name.clone(),
                position: record.position,
            },
        );
    }

    /// Close the current half-inning and open the next one
    fn change_sides(&mut self) {
        self.left_on_base[self.batting_team.index()] += self.runners_aboard();
        self.bases = [None, None, None];
        self.outs = 0;
        if self.batting_team == Team::Home {
            self.inning += 1;
        }
        self.batting_team = self.batting_team.other();
    }

    /// Apply one event, returning the play summary for aggregate builders
    ///
    /// Lineup records patch the lineups, comments are inert, and plays first
    /// roll the half-inning over if three outs are standing, then apply the
    /// engine's outcome.
    pub fn apply(&mut self, event: &Event, engine: &dyn ScoringEngine) -> Result<Option<AppliedPlay>> {
        let play = match &event.kind {
            EventKind::Starter(record) | EventKind::Substitution(record) => {
                self.set_lineup_entry(record);
                return Ok(None);
            }
            EventKind::Comment(_) => return Ok(None),
            EventKind::Play(play) => play,
        };

        if self.outs == 3 {
            self.change_sides();
        }

        let outcome = engine.score_play(&play.text, self.bases_occupied())?;
        if outcome.no_play {
            return Ok(None);
        }

        let team = self.batting_team;
        self.batters_faced[team.index()] += 1;
        if outcome.hit {
            self.hits[team.index()] += 1;
        }
        if outcome.error {
            self.errors[team.other().index()] += 1;
        }

        let mut scorers: SmallVec<[PlayerId; 4]> = SmallVec::new();
        for advance in &outcome.advances {
            let moving = match advance.runner {
                Some(base) => match self.bases[base.index()].take() {
                    Some(runner) => runner,
                    // Engine referenced an empty base; nothing to move
                    None => continue,
                },
                None => play.batter.clone(),
            };
            match advance.to {
                Destination::Base(target) => {
                    self.bases[target.index()] = Some(moving);
                }
                Destination::Home => {
                    self.score[team.index()] += 1;
                    scorers.push(moving);
                }
                Destination::Out => {
                    self.outs += 1;
                }
            }
        }
        // Tolerate over-recorded outs rather than wedging the rollover
        self.outs = self.outs.min(3);

        Ok(Some(AppliedPlay {
            team,
            batter: play.batter.clone(),
            outcome,
            scorers,
        }))
    }
}
