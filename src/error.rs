//! Error types for scorebook

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScorebookError {
    #[error("Invalid play text: {0}")]
    InvalidPlayText(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Invalid batting slot: {0} (expected 1-9)")]
    InvalidSlot(u8),

    #[error("Invalid base: {0} (expected 1-3)")]
    InvalidBase(u8),
}

pub type Result<T> = std::result::Result<T, ScorebookError>;
