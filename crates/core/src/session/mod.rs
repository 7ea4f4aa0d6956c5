#![allow(missing_docs)]

//! Game session context and scenario loader.

mod game;
pub mod loader;
mod models;

pub use game::GameSession;
pub use loader::ScenarioLoader;
pub use models::{AttackReport, SessionStatus, TerritoryStatus};
