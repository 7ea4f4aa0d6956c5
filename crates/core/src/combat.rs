//! Combat resolution: one dice-decided round between two territories.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    dice::DiceRoller,
    error::{GameError, GameResult},
    mission::STRONGHOLD_TROOPS,
    models::Player,
    registry::Registry,
};

/// Fewest troops a territory needs to launch an attack.
pub const MIN_ATTACKING_TROOPS: u32 = 2;

/// Which side won the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The attacker rolled strictly higher and took the territory.
    Conquered,
    /// The defender matched or beat the attacker's roll.
    DefenseHeld,
}

/// Everything a caller needs to render a battle report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Winning side.
    pub verdict: Verdict,
    /// Attacker's die.
    pub attack_roll: u8,
    /// Defender's die.
    pub defense_roll: u8,
    /// Troops moved into the conquered territory; 0 when the defense held.
    pub transferred: u32,
    /// Owner of the defending territory after the round.
    pub defender_owner: String,
    /// Troops left on the attacking territory.
    pub attacker_troops: u32,
    /// Troops on the defending territory after the round.
    pub defender_troops: u32,
    /// Whether the attacker lost a troop for failing.
    pub attacker_penalized: bool,
}

impl Outcome {
    /// Whether the defending territory changed hands.
    pub fn is_conquest(&self) -> bool {
        self.verdict == Verdict::Conquered
    }
}

/// Resolve a single attack from `attacker` against `defender` on behalf of `player`.
///
/// Preconditions are checked in a fixed order (owner, troop count, self
/// attack, same faction) before any die is rolled, so a rejected attack
/// leaves the registry and the player untouched.
///
/// The attacker wins only on a strictly higher roll; ties go to the defender.
pub fn resolve_attack(
    registry: &mut Registry,
    attacker: usize,
    defender: usize,
    player: &mut Player,
    dice: &mut impl DiceRoller,
) -> GameResult<Outcome> {
    if let Err(err) = validate(registry, attacker, defender, player) {
        warn!(attacker, defender, %err, "Attack rejected");
        return Err(err);
    }

    let attack_roll = dice.roll_d6();
    let defense_roll = dice.roll_d6();
    debug!(attack_roll, defense_roll, "Dice rolled");

    let (from, to) = registry.pair_mut(attacker, defender)?;

    if attack_roll > defense_roll {
        let stronghold = to.troops > STRONGHOLD_TROOPS;
        to.owner = from.owner.clone();
        let transferred = from.troops / 2;
        to.troops += transferred;
        from.troops -= transferred;

        player.consecutive_conquests += 1;
        if stronghold {
            player.strongholds_conquered += 1;
        }
        info!(
            from = %from.name,
            to = %to.name,
            owner = %to.owner,
            transferred,
            streak = player.consecutive_conquests,
            "Territory conquered"
        );

        Ok(Outcome {
            verdict: Verdict::Conquered,
            attack_roll,
            defense_roll,
            transferred,
            defender_owner: to.owner.clone(),
            attacker_troops: from.troops,
            defender_troops: to.troops,
            attacker_penalized: false,
        })
    } else {
        player.consecutive_conquests = 0;
        let attacker_penalized = from.troops > 1;
        if attacker_penalized {
            from.troops -= 1;
        }
        debug!(
            from = %from.name,
            to = %to.name,
            attacker_penalized,
            "Defense held"
        );

        Ok(Outcome {
            verdict: Verdict::DefenseHeld,
            attack_roll,
            defense_roll,
            transferred: 0,
            defender_owner: to.owner.clone(),
            attacker_troops: from.troops,
            defender_troops: to.troops,
            attacker_penalized,
        })
    }
}

fn validate(
    registry: &Registry,
    attacker: usize,
    defender: usize,
    player: &Player,
) -> GameResult<()> {
    let from = registry.territory(attacker)?;
    let to = registry.territory(defender)?;

    if !from.is_owned_by(player.color()) {
        return Err(GameError::NotOwnedByPlayer {
            owner: from.owner().to_string(),
            player: player.color().to_string(),
        });
    }
    if from.troops() < MIN_ATTACKING_TROOPS {
        return Err(GameError::InsufficientTroops {
            troops: from.troops(),
        });
    }
    if attacker == defender {
        return Err(GameError::SelfAttack);
    }
    if from.owner() == to.owner() {
        return Err(GameError::SameFactionAttack {
            color: from.owner().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dice::testing::ScriptedDice, models::Territory};

    fn board(entries: &[(&str, &str, u32)]) -> Registry {
        let territories = entries
            .iter()
            .map(|(name, owner, troops)| {
                Territory::new(name, owner, *troops).expect("valid territory")
            })
            .collect();
        Registry::from_territories(territories).expect("non-empty map")
    }

    fn blue() -> Player {
        Player::new("Blue").expect("valid color")
    }

    #[test]
    fn conquest_end_to_end() -> GameResult<()> {
        let mut registry = board(&[("North", "Blue", 4), ("South", "Red", 3), ("East", "Green", 2)]);
        let mut player = blue();
        let mut dice = ScriptedDice::new([5, 2]);

        let outcome = resolve_attack(&mut registry, 0, 1, &mut player, &mut dice)?;

        assert_eq!(outcome.verdict, Verdict::Conquered);
        assert_eq!((outcome.attack_roll, outcome.defense_roll), (5, 2));
        assert_eq!(outcome.transferred, 2);
        assert_eq!(outcome.defender_owner, "Blue");
        assert_eq!(registry.territory(0)?.troops(), 2);
        assert_eq!(registry.territory(1)?.troops(), 5);
        assert_eq!(registry.territory(1)?.owner(), "Blue");
        assert_eq!(registry.territory(2)?.troops(), 2);
        assert_eq!(player.consecutive_conquests(), 1);
        Ok(())
    }

    #[test]
    fn odd_troops_leave_the_extra_with_attacker() -> GameResult<()> {
        let mut registry = board(&[("A", "Blue", 7), ("B", "Red", 1)]);
        let mut player = blue();
        let outcome = resolve_attack(&mut registry, 0, 1, &mut player, &mut ScriptedDice::new([6, 1]))?;
        assert_eq!(outcome.transferred, 3);
        assert_eq!(outcome.attacker_troops, 4);
        assert_eq!(outcome.defender_troops, 4);
        assert_eq!(outcome.transferred + outcome.attacker_troops, 7);
        Ok(())
    }

    #[test]
    fn ties_go_to_the_defender() -> GameResult<()> {
        let mut registry = board(&[("A", "Blue", 3), ("B", "Red", 2)]);
        let mut player = blue();
        let outcome = resolve_attack(&mut registry, 0, 1, &mut player, &mut ScriptedDice::new([3, 3]))?;
        assert_eq!(outcome.verdict, Verdict::DefenseHeld);
        assert_eq!(outcome.transferred, 0);
        assert_eq!(outcome.defender_owner, "Red");
        assert!(outcome.attacker_penalized);
        assert_eq!(registry.territory(0)?.troops(), 2);
        assert_eq!(registry.territory(1)?.troops(), 2);
        Ok(())
    }

    #[test]
    fn failed_attack_resets_streak() -> GameResult<()> {
        let mut registry = board(&[("A", "Blue", 9), ("B", "Red", 1), ("C", "Red", 1)]);
        let mut player = blue();
        let mut dice = ScriptedDice::new([4, 1, 2, 5]);
        resolve_attack(&mut registry, 0, 1, &mut player, &mut dice)?;
        assert_eq!(player.consecutive_conquests(), 1);
        resolve_attack(&mut registry, 0, 2, &mut player, &mut dice)?;
        assert_eq!(player.consecutive_conquests(), 0);

        // Resetting an empty streak is still a reset.
        let mut dice = ScriptedDice::new([1, 1]);
        resolve_attack(&mut registry, 0, 2, &mut player, &mut dice)?;
        assert_eq!(player.consecutive_conquests(), 0);
        Ok(())
    }

    #[test]
    fn penalty_never_removes_the_last_troop() -> GameResult<()> {
        let mut registry = board(&[("A", "Blue", 2), ("B", "Red", 6)]);
        let mut player = blue();
        let mut dice = ScriptedDice::new([1, 6]);
        let outcome = resolve_attack(&mut registry, 0, 1, &mut player, &mut dice)?;
        assert!(outcome.attacker_penalized);
        assert_eq!(outcome.attacker_troops, 1);

        let err = resolve_attack(&mut registry, 0, 1, &mut player, &mut ScriptedDice::default())
            .unwrap_err();
        assert_eq!(err, GameError::InsufficientTroops { troops: 1 });
        assert_eq!(registry.territory(0)?.troops(), 1);
        Ok(())
    }

    #[test]
    fn troops_stay_positive_over_many_rounds() -> GameResult<()> {
        use crate::dice::RngDice;

        let mut registry = board(&[("A", "Blue", 12), ("B", "Red", 3), ("C", "Green", 8), ("D", "Red", 2)]);
        let mut player = blue();
        let mut dice = RngDice::seeded(99);
        for round in 0..200 {
            let attacker = registry
                .iter()
                .position(|t| t.is_owned_by("Blue") && t.troops() >= MIN_ATTACKING_TROOPS);
            let defender = registry.iter().position(|t| !t.is_owned_by("Blue"));
            let (Some(attacker), Some(defender)) = (attacker, defender) else {
                break;
            };
            let before: u32 = registry.iter().map(|t| t.troops()).sum();
            let outcome = resolve_attack(&mut registry, attacker, defender, &mut player, &mut dice)?;
            let after: u32 = registry.iter().map(|t| t.troops()).sum();
            let lost = u32::from(outcome.attacker_penalized);
            assert_eq!(after + lost, before, "round {round}");
            assert!(registry.iter().all(|t| t.troops() >= 1), "round {round}");
        }
        Ok(())
    }

    #[test]
    fn stronghold_conquests_are_counted() -> GameResult<()> {
        let mut registry = board(&[("A", "Blue", 10), ("B", "Red", 6), ("C", "Red", 5)]);
        let mut player = blue();
        let mut dice = ScriptedDice::new([6, 1, 6, 1]);
        resolve_attack(&mut registry, 0, 1, &mut player, &mut dice)?;
        assert_eq!(player.strongholds_conquered(), 1);
        resolve_attack(&mut registry, 0, 2, &mut player, &mut dice)?;
        assert_eq!(player.strongholds_conquered(), 1);
        assert_eq!(player.consecutive_conquests(), 2);
        Ok(())
    }

    #[test]
    fn preconditions_are_checked_in_order() {
        let mut registry = board(&[("A", "Blue", 1), ("B", "Blue", 3), ("C", "Red", 3), ("D", "Red", 4)]);
        let mut player = blue();
        let mut dice = ScriptedDice::default();

        assert!(matches!(
            resolve_attack(&mut registry, 2, 0, &mut player, &mut dice),
            Err(GameError::NotOwnedByPlayer { .. })
        ));
        // Low troops beat same faction.
        assert_eq!(
            resolve_attack(&mut registry, 0, 1, &mut player, &mut dice),
            Err(GameError::InsufficientTroops { troops: 1 })
        );
        assert_eq!(
            resolve_attack(&mut registry, 1, 1, &mut player, &mut dice),
            Err(GameError::SelfAttack)
        );
        assert_eq!(
            resolve_attack(&mut registry, 1, 0, &mut player, &mut dice),
            Err(GameError::SameFactionAttack {
                color: "Blue".to_string()
            })
        );
        assert_eq!(
            resolve_attack(&mut registry, 1, 4, &mut player, &mut dice),
            Err(GameError::OutOfRange { index: 4, count: 4 })
        );
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn rejected_attack_changes_nothing() {
        let mut registry = board(&[("A", "Blue", 5), ("B", "Blue", 3)]);
        let mut player = blue();
        player.consecutive_conquests = 2;
        let snapshot = registry.clone();
        let result = resolve_attack(&mut registry, 0, 1, &mut player, &mut ScriptedDice::new([6, 1]));
        assert!(result.is_err());
        assert_eq!(player.consecutive_conquests(), 2);
        assert!(registry.iter().eq(snapshot.iter()));
    }
}
