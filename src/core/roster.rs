//! Team rosters
//!
//! Read-only player identity lookups used when recording starters and
//! substitutions. The editor never mutates a roster.

use crate::core::PlayerId;
use serde::{Deserialize, Serialize};

/// One player on a team's roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterPlayer {
    pub player_id: PlayerId,
    pub first_name: String,
    pub last_name: String,
}

impl RosterPlayer {
    pub fn new(
        player_id: impl Into<PlayerId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        RosterPlayer {
            player_id: player_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// "First Last" as written on substitution records
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A team's roster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub team_id: String,
    players: Vec<RosterPlayer>,
}

impl Roster {
    pub fn new(team_id: impl Into<String>) -> Self {
        Roster {
            team_id: team_id.into(),
            players: Vec::new(),
        }
    }

    pub fn add_player(&mut self, player: RosterPlayer) {
        self.players.push(player);
    }

    pub fn find(&self, id: &PlayerId) -> Option<&RosterPlayer> {
        self.players.iter().find(|p| &p.player_id == id)
    }

    /// Like `find`, but a missing player is an error
    pub fn get(&self, id: &PlayerId) -> crate::Result<&RosterPlayer> {
        self.find(id)
            .ok_or_else(|| crate::ScorebookError::PlayerNotFound(id.to_string()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RosterPlayer> {
        self.players.iter()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
