#![warn(clippy::all, missing_docs)]

//! Core rules for the War territory-conquest game.
//!
//! This crate hosts the territory registry, dice-driven combat resolution,
//! the mission catalog and the session context used by the console
//! frontend and any future frontends.

pub mod combat;
pub mod config;
pub mod dice;
pub mod error;
pub mod mission;
pub mod models;
pub mod registry;
pub mod session;

pub use combat::{resolve_attack, Outcome, Verdict};
pub use config::AppConfig;
pub use dice::{DiceRoller, RngDice};
pub use error::{GameError, GameResult};
pub use mission::{Mission, MissionKind, MissionSubsystem, MISSION_CATALOG};
pub use models::{Player, Territory};
pub use registry::Registry;
pub use session::{AttackReport, GameSession, ScenarioLoader, SessionStatus, TerritoryStatus};
