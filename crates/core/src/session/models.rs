#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{combat::Outcome, mission::MissionKind};

/// Result of one attack action together with the mission check that follows it.
#[derive(Debug, Clone, Serialize)]
pub struct AttackReport {
    pub attacker: String,
    pub defender: String,
    pub outcome: Outcome,
    pub mission_complete: bool,
}

/// Read-only row of the map as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerritoryStatus {
    pub index: usize,
    pub name: String,
    pub owner: String,
    pub troops: u32,
}

/// Snapshot of a running game for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub player_color: String,
    pub mission: Option<MissionKind>,
    pub mission_description: Option<&'static str>,
    pub consecutive_conquests: u32,
    pub mission_complete: bool,
    pub territories: Vec<TerritoryStatus>,
    pub started_at: DateTime<Utc>,
}

impl SessionStatus {
    /// Territories currently held by the player.
    pub fn owned_count(&self) -> usize {
        self.territories
            .iter()
            .filter(|territory| territory.owner == self.player_color)
            .count()
    }
}
