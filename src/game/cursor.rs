//! Replay cursor over the event log
//!
//! The cursor pairs a log position with the [`Situation`] derived from the
//! events before it. It only ever moves by replaying: forward from its
//! current position after appends, or from scratch after a truncation that
//! removed events it had already consumed. It never patches derived state in
//! place.

use crate::core::{Base, BattingSlot, EventKind, EventLog, PlayerId, Position, Team};
use crate::game::scoring::ScoringEngine;
use crate::game::situation::Situation;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Replay position and the situation at that position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameCursor {
    pos: usize,
    situation: Situation,
}

impl Default for GameCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl GameCursor {
    pub fn new() -> Self {
        GameCursor {
            pos: 0,
            situation: Situation::new(),
        }
    }

    /// Number of events already replayed
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn situation(&self) -> &Situation {
        &self.situation
    }

    /// Rewind to the state before any play
    ///
    /// Starting lineup declarations at the head of the log are consumed so
    /// lineup queries work immediately after a starter is recorded; starters
    /// are only legal before the first play, so this never skips game state.
    pub fn reset_to_start(&mut self, log: &EventLog) {
        self.situation = Situation::new();
        self.pos = 0;
        for event in log.iter() {
            match &event.kind {
                EventKind::Starter(record) => {
                    self.situation.set_lineup_entry(record);
                    self.pos += 1;
                }
                _ => break,
            }
        }
    }

    /// Replay to the end of the log
    ///
    /// If a truncation removed events this cursor had already consumed, the
    /// replay restarts from scratch; otherwise it continues incrementally
    /// from the current position.
    pub fn advance_to_end(&mut self, log: &EventLog, engine: &dyn ScoringEngine) -> Result<()> {
        if self.pos > log.len() {
            self.reset_to_start(log);
        }
        // Position advances with each applied event so an engine error
        // leaves a consistent prefix behind
        while let Some(event) = log.events_from(self.pos).first() {
            self.situation.apply(event, engine)?;
            self.pos += 1;
        }
        Ok(())
    }

    // Situation queries, delegating to the underlying accessors

    pub fn inning(&self) -> u32 {
        self.situation.current_inning()
    }

    pub fn batting_team(&self) -> Team {
        self.situation.current_batting_team()
    }

    pub fn outs(&self) -> u8 {
        self.situation.outs()
    }

    pub fn score(&self, team: Team) -> u32 {
        self.situation.score(team)
    }

    pub fn hits(&self, team: Team) -> u32 {
        self.situation.hits(team)
    }

    pub fn errors(&self, team: Team) -> u32 {
        self.situation.errors(team)
    }

    pub fn batters_faced(&self, team: Team) -> u32 {
        self.situation.batters_faced(team)
    }

    pub fn left_on_base(&self, team: Team) -> u32 {
        self.situation.left_on_base(team)
    }

    pub fn runner(&self, base: Base) -> Option<&PlayerId> {
        self.situation.runner(base)
    }

    pub fn player(&self, team: Team, slot: BattingSlot) -> Option<&PlayerId> {
        self.situation.player(team, slot)
    }

    pub fn position_of(&self, team: Team, slot: BattingSlot) -> Option<Position> {
        self.situation.position(team, slot)
    }
}
