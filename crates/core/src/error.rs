//! Error taxonomy shared by the registry, combat and mission layers.

use thiserror::Error;

/// Failures reported by core game operations.
///
/// Every variant is recoverable by the caller: no state has been mutated
/// when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Malformed setup input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Territory storage could not be reserved.
    #[error("unable to allocate storage for {requested} territories")]
    AllocationError {
        /// Number of slots that was requested.
        requested: usize,
    },
    /// Territory index outside `[0, count)`.
    #[error("territory index {index} out of range (0..{count})")]
    OutOfRange {
        /// Offending index.
        index: usize,
        /// Number of territories in the registry.
        count: usize,
    },
    /// The attacking territory belongs to another faction.
    #[error("territory owned by {owner} does not belong to {player}")]
    NotOwnedByPlayer {
        /// Current owner of the attacking territory.
        owner: String,
        /// Color of the attacking player.
        player: String,
    },
    /// The attacking territory cannot spare a troop.
    #[error("at least 2 troops are required to attack, found {troops}")]
    InsufficientTroops {
        /// Troops garrisoned on the attacking territory.
        troops: u32,
    },
    /// Attacker and defender are the same territory.
    #[error("a territory cannot attack itself")]
    SelfAttack,
    /// Attacker and defender share an owner.
    #[error("cannot attack a territory of the same color ({color})")]
    SameFactionAttack {
        /// Shared owner color.
        color: String,
    },
    /// The player already holds a mission for this game.
    #[error("player {color} already has a mission")]
    MissionAlreadyAssigned {
        /// Color of the player.
        color: String,
    },
}

/// Convenience alias for core results.
pub type GameResult<T> = Result<T, GameError>;
