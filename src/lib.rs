//! Scorebook - incremental baseball play-by-play editing
//!
//! This crate maintains a game's event log (plays, substitutions, starters,
//! comments) under live append/undo editing, and keeps the derived game
//! situation and box score consistent with the log after every mutation.

pub mod boxscore;
pub mod core;
pub mod error;
pub mod game;

pub use error::{Result, ScorebookError};
