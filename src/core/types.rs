//! Strongly-typed wrappers for scoring concepts
//!
//! This module provides newtypes to prevent type confusion and make the code
//! more self-documenting. Instead of bare Strings and integers for player
//! identifiers, teams, bases, and lineup slots, we wrap them in distinct
//! types that cannot be mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Player identifier in Retrosheet style (e.g. "ruthb101")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(s: impl Into<String>) -> Self {
        PlayerId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        PlayerId(s)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId(s.to_string())
    }
}

/// Player display name (distinct from other string types)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(s: impl Into<String>) -> Self {
        PlayerName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PlayerName {
    fn from(s: String) -> Self {
        PlayerName(s)
    }
}

impl From<&str> for PlayerName {
    fn from(s: &str) -> Self {
        PlayerName(s.to_string())
    }
}

/// One of the two sides of a game
///
/// The numeric encoding is fixed by the play-by-play record format:
/// 0 = visiting team (bats in the top half), 1 = home team (bats in the
/// bottom half). The end-of-game rules compare against these encodings
/// directly, so they must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Visitor = 0,
    Home = 1,
}

impl Team {
    /// Numeric half-inning encoding (0 = top/visitor, 1 = bottom/home)
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(idx: usize) -> Option<Team> {
        match idx {
            0 => Some(Team::Visitor),
            1 => Some(Team::Home),
            _ => None,
        }
    }

    /// The opposing team
    pub fn other(&self) -> Team {
        match self {
            Team::Visitor => Team::Home,
            Team::Home => Team::Visitor,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Visitor => write!(f, "visitor"),
            Team::Home => write!(f, "home"),
        }
    }
}

/// A base a runner can occupy (home plate is not a base)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Base {
    First,
    Second,
    Third,
}

impl Base {
    /// Zero-based index for base-occupancy arrays
    pub fn index(&self) -> usize {
        match self {
            Base::First => 0,
            Base::Second => 1,
            Base::Third => 2,
        }
    }

    /// One-based base number as written in play text
    pub fn number(&self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn from_number(n: u8) -> Option<Base> {
        match n {
            1 => Some(Base::First),
            2 => Some(Base::Second),
            3 => Some(Base::Third),
            _ => None,
        }
    }

    /// The next base toward home, or None from third
    pub fn next(&self) -> Option<Base> {
        match self {
            Base::First => Some(Base::Second),
            Base::Second => Some(Base::Third),
            Base::Third => None,
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}B", self.number())
    }
}

impl TryFrom<u8> for Base {
    type Error = crate::ScorebookError;

    fn try_from(base: u8) -> crate::Result<Self> {
        Base::from_number(base).ok_or(crate::ScorebookError::InvalidBase(base))
    }
}

/// Batting order slot, 1 through 9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattingSlot(u8);

impl BattingSlot {
    pub fn new(slot: u8) -> Option<BattingSlot> {
        if (1..=9).contains(&slot) {
            Some(BattingSlot(slot))
        } else {
            None
        }
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Zero-based index for lineup arrays
    pub fn index(&self) -> usize {
        self.0 as usize - 1
    }

    /// The slot due up after this one (9 wraps to 1)
    pub fn next(&self) -> BattingSlot {
        BattingSlot(self.0 % 9 + 1)
    }
}

impl fmt::Display for BattingSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for BattingSlot {
    type Error = crate::ScorebookError;

    fn try_from(slot: u8) -> crate::Result<Self> {
        BattingSlot::new(slot).ok_or(crate::ScorebookError::InvalidSlot(slot))
    }
}

/// Fielding position, Retrosheet numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Pitcher = 1,
    Catcher = 2,
    FirstBase = 3,
    SecondBase = 4,
    ThirdBase = 5,
    Shortstop = 6,
    LeftField = 7,
    CenterField = 8,
    RightField = 9,
    DesignatedHitter = 10,
    PinchHitter = 11,
    PinchRunner = 12,
}

impl Position {
    pub fn as_number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(n: u8) -> Option<Position> {
        match n {
            1 => Some(Position::Pitcher),
            2 => Some(Position::Catcher),
            3 => Some(Position::FirstBase),
            4 => Some(Position::SecondBase),
            5 => Some(Position::ThirdBase),
            6 => Some(Position::Shortstop),
            7 => Some(Position::LeftField),
            8 => Some(Position::CenterField),
            9 => Some(Position::RightField),
            10 => Some(Position::DesignatedHitter),
            11 => Some(Position::PinchHitter),
            12 => Some(Position::PinchRunner),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_number())
    }
}
