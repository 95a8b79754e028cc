//! The game event log
//!
//! An append-only arena of game events (plays, lineup records, comments)
//! referenced by position index. Undo is modeled as suffix truncation:
//! removing an event removes everything after it too, so no event ever
//! dangles. The derived game situation and box score are recomputed from the
//! log after every mutation rather than patched in place.

use crate::core::{BattingSlot, PlayerId, PlayerName, Position, Team};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position-stable index of an event in the log
///
/// Ids are assigned in append order. Truncation removes a suffix, so any
/// id below the current length still refers to the same event it always did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(u32);

impl EventId {
    pub fn new(id: u32) -> Self {
        EventId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recorded play: one line of the play-by-play record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    /// Inning the play occurred in (1-based)
    pub inning: u32,

    /// Which team was at bat
    pub batting_team: Team,

    /// Batter of record when the play was appended
    pub batter: PlayerId,

    /// Ball-strike count, "??" when not tracked
    pub count: String,

    /// Pitch sequence, empty when not tracked
    pub pitches: String,

    /// Raw event text; interpretation belongs to the scoring engine
    pub text: String,
}

impl PlayRecord {
    /// Text of the placeholder record inserted before a substitution
    pub const NO_PLAY_TEXT: &'static str = "NP";

    /// Count placeholder for "count not recorded"
    pub const UNKNOWN_COUNT: &'static str = "??";

    /// Is this a placeholder record that carries no batting outcome?
    pub fn is_no_play(&self) -> bool {
        self.text == Self::NO_PLAY_TEXT
    }
}

/// A lineup record: who occupies a batting slot and where they field
///
/// Used both for starting lineup declarations and in-game substitutions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionRecord {
    pub player: PlayerId,
    pub name: PlayerName,
    pub team: Team,
    pub slot: BattingSlot,
    pub position: Position,
}

/// The kinds of entries a game log can hold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// A play (including "NP" placeholders)
    Play(PlayRecord),

    /// Starting lineup declaration, only legal before the first play
    Starter(SubstitutionRecord),

    /// In-game substitution, always preceded by an "NP" placeholder play
    Substitution(SubstitutionRecord),

    /// Free-text annotation with no effect on derived state
    Comment(String),
}

/// One entry in the game log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub kind: EventKind,
}

impl Event {
    /// The play record, if this event is a play
    pub fn as_play(&self) -> Option<&PlayRecord> {
        match &self.kind {
            EventKind::Play(play) => Some(play),
            _ => None,
        }
    }
}

/// Ordered, append/truncate-able sequence of game events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog { events: Vec::new() }
    }

    fn push(&mut self, kind: EventKind) -> EventId {
        let id = EventId::new(self.events.len() as u32);
        self.events.push(Event { id, kind });
        id
    }

    /// Append a play record
    pub fn append_play(
        &mut self,
        inning: u32,
        batting_team: Team,
        batter: PlayerId,
        count: impl Into<String>,
        pitches: impl Into<String>,
        text: impl Into<String>,
    ) -> EventId {
        self.push(EventKind::Play(PlayRecord {
            inning,
            batting_team,
            batter,
            count: count.into(),
            pitches: pitches.into(),
            text: text.into(),
        }))
    }

    /// Append a starting lineup declaration
    pub fn append_starter(&mut self, record: SubstitutionRecord) -> EventId {
        self.push(EventKind::Starter(record))
    }

    /// Append an in-game substitution record
    pub fn append_substitution(&mut self, record: SubstitutionRecord) -> EventId {
        self.push(EventKind::Substitution(record))
    }

    /// Append a comment
    pub fn append_comment(&mut self, text: impl Into<String>) -> EventId {
        self.push(EventKind::Comment(text.into()))
    }

    /// Remove `id` and every event after it
    ///
    /// Silent no-op when the log is empty or `id` no longer names an event;
    /// interactive undo flows depend on "nothing to undo" being harmless.
    pub fn truncate_from(&mut self, id: EventId) {
        if id.index() < self.events.len() {
            self.events.truncate(id.index());
        }
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Events from position `pos` to the end (for cursor replay)
    pub fn events_from(&self, pos: usize) -> &[Event] {
        &self.events[pos.min(self.events.len())..]
    }

    pub fn last_event(&self) -> Option<&Event> {
        self.events.last()
    }

    /// First play record in the log, placeholders included
    ///
    /// A log holding only starters and comments has no plays; the editor
    /// treats such a game as not yet started.
    pub fn first_play(&self) -> Option<&PlayRecord> {
        self.events.iter().find_map(Event::as_play)
    }

    /// Last play record in the log, placeholders included
    pub fn last_play(&self) -> Option<&PlayRecord> {
        self.events.iter().rev().find_map(Event::as_play)
    }

    /// Last substantive play: skips trailing "NP" placeholders,
    /// substitutions, and comments walking backward from the end
    pub fn last_substantive_play(&self) -> Option<&Event> {
        self.events
            .iter()
            .rev()
            .find(|event| event.as_play().is_some_and(|play| !play.is_no_play()))
    }
}
