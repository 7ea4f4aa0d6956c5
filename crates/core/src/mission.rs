//! Mission catalog and win-condition evaluation.
//!
//! Each catalog entry binds its predicate directly, so evaluation never
//! depends on the wording of the description.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    dice::DiceRoller,
    error::{GameError, GameResult},
    models::Player,
    registry::Registry,
};

/// Faction whose troops must be wiped out for [`MissionKind::EliminateRed`].
pub const ELIMINATION_TARGET: &str = "Vermelha";
/// Conquests in a row needed for [`MissionKind::ConquerStreak`].
pub const STREAK_GOAL: u32 = 3;
/// Territories to hold for [`MissionKind::ControlTerritories`].
pub const TERRITORY_GOAL: usize = 5;
/// Total troops to hold for [`MissionKind::HoldTroops`].
pub const TROOP_GOAL: u64 = 15;
/// Defenders must hold more than this many troops to count as a stronghold.
pub const STRONGHOLD_TROOPS: u32 = 5;
/// Strongholds to conquer for [`MissionKind::ConquerStrongholds`].
pub const STRONGHOLD_GOAL: u32 = 2;

/// Identifier of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionKind {
    /// Conquer 3 territories in a row.
    ConquerStreak,
    /// Wipe out every red troop.
    EliminateRed,
    /// Control at least 5 territories.
    ControlTerritories,
    /// Hold at least 15 troops in total.
    HoldTroops,
    /// Conquer 2 territories that held more than 5 troops.
    ConquerStrongholds,
}

impl MissionKind {
    /// Catalog entry for this kind.
    pub fn mission(self) -> &'static Mission {
        let index = match self {
            MissionKind::ConquerStreak => 0,
            MissionKind::EliminateRed => 1,
            MissionKind::ControlTerritories => 2,
            MissionKind::HoldTroops => 3,
            MissionKind::ConquerStrongholds => 4,
        };
        &MISSION_CATALOG[index]
    }
}

/// Immutable mission descriptor with its bound predicate.
#[derive(Clone, Copy)]
pub struct Mission {
    /// Catalog identifier.
    pub kind: MissionKind,
    /// Text shown to the player.
    pub description: &'static str,
    predicate: fn(&Player, &Registry) -> bool,
}

impl Mission {
    /// Whether the objective holds for the current registry state.
    pub fn is_satisfied(&self, player: &Player, registry: &Registry) -> bool {
        (self.predicate)(player, registry)
    }
}

impl fmt::Debug for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mission")
            .field("kind", &self.kind)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Every mission a player can draw.
pub static MISSION_CATALOG: [Mission; 5] = [
    Mission {
        kind: MissionKind::ConquerStreak,
        description: "Conquer 3 territories in a row.",
        predicate: conquer_streak,
    },
    Mission {
        kind: MissionKind::EliminateRed,
        description: "Eliminate every troop of the red (Vermelha) army.",
        predicate: eliminate_red,
    },
    Mission {
        kind: MissionKind::ControlTerritories,
        description: "Control at least 5 territories.",
        predicate: control_territories,
    },
    Mission {
        kind: MissionKind::HoldTroops,
        description: "Hold at least 15 troops across your territories.",
        predicate: hold_troops,
    },
    Mission {
        kind: MissionKind::ConquerStrongholds,
        description: "Conquer 2 territories holding more than 5 troops.",
        predicate: conquer_strongholds,
    },
];

fn conquer_streak(player: &Player, _registry: &Registry) -> bool {
    player.consecutive_conquests() >= STREAK_GOAL
}

// Vacuously true when the target color never appeared on the map.
fn eliminate_red(_player: &Player, registry: &Registry) -> bool {
    registry.troops_of(ELIMINATION_TARGET) == 0
}

fn control_territories(player: &Player, registry: &Registry) -> bool {
    registry.owned_by(player.color()).count() >= TERRITORY_GOAL
}

fn hold_troops(player: &Player, registry: &Registry) -> bool {
    registry.troops_of(player.color()) >= TROOP_GOAL
}

fn conquer_strongholds(player: &Player, _registry: &Registry) -> bool {
    player.strongholds_conquered() >= STRONGHOLD_GOAL
}

/// Assigns missions and checks whether they are fulfilled.
pub struct MissionSubsystem;

impl MissionSubsystem {
    /// Draw a mission uniformly from the catalog and bind it to `player`.
    ///
    /// A player keeps one mission for the whole game; a second call fails
    /// with [`GameError::MissionAlreadyAssigned`].
    pub fn assign(player: &mut Player, dice: &mut impl DiceRoller) -> GameResult<&'static Mission> {
        if player.mission.is_some() {
            return Err(GameError::MissionAlreadyAssigned {
                color: player.color().to_string(),
            });
        }
        let mission = &MISSION_CATALOG[dice.pick(MISSION_CATALOG.len())];
        player.mission = Some(mission.kind);
        info!(color = %player.color(), mission = ?mission.kind, "Mission assigned");
        Ok(mission)
    }

    /// Recompute the bound mission against the current registry.
    ///
    /// Returns false when no mission has been assigned.
    pub fn evaluate(player: &Player, registry: &Registry) -> bool {
        player
            .mission()
            .map(|kind| kind.mission().is_satisfied(player, registry))
            .unwrap_or(false)
    }
}
