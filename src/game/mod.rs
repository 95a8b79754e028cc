//! Game editing: scoring engine seam, replay cursor, editor orchestration

pub mod cursor;
pub mod editor;
pub mod logger;
pub mod scoring;
pub mod situation;

pub use cursor::GameCursor;
pub use editor::GameEditor;
pub use logger::{GameLogger, LogEntry, OutputMode, VerbosityLevel};
pub use scoring::{Advance, Destination, PlayOutcome, ScoringEngine, StandardRules};
pub use situation::{AppliedPlay, Lineup, LineupEntry, Situation};
