use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    combat::resolve_attack,
    dice::{DiceRoller, RngDice},
    error::GameResult,
    mission::{Mission, MissionSubsystem},
    models::Player,
    registry::Registry,
};

use super::models::{AttackReport, SessionStatus, TerritoryStatus};

/// One running game: the map, the single player and the dice they share.
///
/// Sessions are independent of each other, so tests can run several side
/// by side with scripted dice.
#[derive(Debug)]
pub struct GameSession<D = RngDice> {
    registry: Registry,
    player: Player,
    dice: D,
    started_at: DateTime<Utc>,
}

impl<D: DiceRoller> GameSession<D> {
    pub fn new(registry: Registry, player: Player, dice: D) -> Self {
        info!(
            territories = registry.count(),
            color = %player.color(),
            "Game session started"
        );
        Self {
            registry,
            player,
            dice,
            started_at: Utc::now(),
        }
    }

    /// Draw the player's mission. Only succeeds once per session.
    pub fn assign_mission(&mut self) -> GameResult<&'static Mission> {
        MissionSubsystem::assign(&mut self.player, &mut self.dice)
    }

    /// Resolve one attack and re-check the mission against the new map.
    pub fn attack(&mut self, attacker: usize, defender: usize) -> GameResult<AttackReport> {
        let outcome = resolve_attack(
            &mut self.registry,
            attacker,
            defender,
            &mut self.player,
            &mut self.dice,
        )?;
        let mission_complete = self.mission_complete();
        if mission_complete {
            info!(color = %self.player.color(), "Mission accomplished");
        }
        Ok(AttackReport {
            attacker: self.registry.territory(attacker)?.name().to_string(),
            defender: self.registry.territory(defender)?.name().to_string(),
            outcome,
            mission_complete,
        })
    }

    pub fn mission_complete(&self) -> bool {
        MissionSubsystem::evaluate(&self.player, &self.registry)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn status(&self) -> SessionStatus {
        let mission = self.player.mission();
        SessionStatus {
            player_color: self.player.color().to_string(),
            mission,
            mission_description: mission.map(|kind| kind.mission().description),
            consecutive_conquests: self.player.consecutive_conquests(),
            mission_complete: self.mission_complete(),
            territories: self
                .registry
                .iter()
                .enumerate()
                .map(|(index, territory)| TerritoryStatus {
                    index,
                    name: territory.name().to_string(),
                    owner: territory.owner().to_string(),
                    troops: territory.troops(),
                })
                .collect(),
            started_at: self.started_at,
        }
    }
}
