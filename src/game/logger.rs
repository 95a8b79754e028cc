//! Centralized logger for editing narration
//!
//! The editor narrates every mutation (plays, substitutions, undo) through
//! one logger. Output can go to stdout, to an in-memory buffer for tests and
//! embedding UIs, or both.

use serde::{Deserialize, Serialize};

/// Verbosity level for editor output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output
    Silent = 0,
    /// Minimal - only game milestones
    Minimal = 1,
    /// Normal - every mutation (default)
    #[default]
    Normal = 2,
    /// Verbose - mutations plus annotations
    Verbose = 3,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
}

/// Logger with verbosity filtering and optional in-memory capture
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    buffer: Vec<LogEntry>,
}

impl GameLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        GameLogger::default()
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            ..GameLogger::default()
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    /// Log a message at the given level
    ///
    /// Messages above the current verbosity are dropped entirely; capture
    /// and stdout honor the same threshold so the buffer matches what a
    /// stdout reader would have seen.
    pub fn log(&mut self, level: VerbosityLevel, message: impl Into<String>) {
        if level > self.verbosity {
            return;
        }
        let message = message.into();
        if matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both) {
            println!("{message}");
        }
        if matches!(self.output_mode, OutputMode::Memory | OutputMode::Both) {
            self.buffer.push(LogEntry { level, message });
        }
    }

    /// Captured entries, oldest first
    pub fn entries(&self) -> &[LogEntry] {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_filters_capture() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Normal);
        logger.set_output_mode(OutputMode::Memory);

        logger.log(VerbosityLevel::Minimal, "kept");
        logger.log(VerbosityLevel::Normal, "also kept");
        logger.log(VerbosityLevel::Verbose, "dropped");

        let messages: Vec<_> = logger.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["kept", "also kept"]);
    }

    #[test]
    fn test_silent_drops_everything() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
        logger.set_output_mode(OutputMode::Memory);
        logger.log(VerbosityLevel::Minimal, "nope");
        assert!(logger.entries().is_empty());
    }

    #[test]
    fn test_stdout_mode_does_not_capture() {
        let mut logger = GameLogger::new();
        logger.log(VerbosityLevel::Normal, "printed only");
        assert!(logger.entries().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Verbose);
        logger.set_output_mode(OutputMode::Memory);
        logger.log(VerbosityLevel::Verbose, "x");
        assert_eq!(logger.entries().len(), 1);
        logger.clear();
        assert!(logger.entries().is_empty());
    }
}
