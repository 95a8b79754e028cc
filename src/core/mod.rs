//! Core data model: typed identifiers, the event log, and rosters

pub mod event;
pub mod roster;
pub mod types;

pub use event::{Event, EventId, EventKind, EventLog, PlayRecord, SubstitutionRecord};
pub use roster::{Roster, RosterPlayer};
pub use types::{Base, BattingSlot, PlayerId, PlayerName, Position, Team};
