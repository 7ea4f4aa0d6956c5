//! Shared domain models.

use serde::Serialize;

use crate::{
    error::{GameError, GameResult},
    mission::MissionKind,
};

/// Longest accepted territory name, in characters.
pub const MAX_NAME_LEN: usize = 29;
/// Longest accepted color tag, in characters.
pub const MAX_COLOR_LEN: usize = 9;

/// A named map region held by one faction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Territory {
    pub(crate) name: String,
    pub(crate) owner: String,
    pub(crate) troops: u32,
}

impl Territory {
    /// Build a validated territory.
    pub fn new(name: &str, owner: &str, troops: u32) -> GameResult<Self> {
        let mut territory = Self::placeholder();
        territory.configure(name, owner, troops)?;
        Ok(territory)
    }

    /// Empty slot handed out by [`crate::Registry::create`] before setup fills it.
    pub(crate) fn placeholder() -> Self {
        Self {
            name: String::new(),
            owner: String::new(),
            troops: 1,
        }
    }

    /// Fill this slot with setup data. Nothing changes when validation fails.
    pub fn configure(&mut self, name: &str, owner: &str, troops: u32) -> GameResult<()> {
        let name = bounded("territory name", name, MAX_NAME_LEN)?;
        let owner = color_tag(owner)?;
        if troops == 0 {
            return Err(GameError::InvalidArgument(
                "troop count must be at least 1".to_string(),
            ));
        }
        self.name = name;
        self.owner = owner;
        self.troops = troops;
        Ok(())
    }

    /// Territory name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color of the faction holding the territory.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Garrisoned troops, never below 1.
    pub fn troops(&self) -> u32 {
        self.troops
    }

    /// Whether `color` holds this territory.
    pub fn is_owned_by(&self, color: &str) -> bool {
        self.owner == color
    }
}

/// The single active faction and its mission progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    color: String,
    pub(crate) mission: Option<MissionKind>,
    pub(crate) consecutive_conquests: u32,
    pub(crate) strongholds_conquered: u32,
}

impl Player {
    /// Create a player for `color` with no mission and an empty streak.
    pub fn new(color: &str) -> GameResult<Self> {
        Ok(Self {
            color: color_tag(color)?,
            mission: None,
            consecutive_conquests: 0,
            strongholds_conquered: 0,
        })
    }

    /// Faction color, also the player's identity.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Mission bound at game start, if any.
    pub fn mission(&self) -> Option<MissionKind> {
        self.mission
    }

    /// Conquests since the last failed attack.
    pub fn consecutive_conquests(&self) -> u32 {
        self.consecutive_conquests
    }

    /// Conquests of territories that held more than 5 troops.
    pub fn strongholds_conquered(&self) -> u32 {
        self.strongholds_conquered
    }
}

/// Validate a faction color tag.
pub fn color_tag(value: &str) -> GameResult<String> {
    bounded("color", value, MAX_COLOR_LEN)
}

fn bounded(field: &str, value: &str, max: usize) -> GameResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(GameError::InvalidArgument(format!("{field} must not be empty")));
    }
    if value.chars().count() > max {
        return Err(GameError::InvalidArgument(format!(
            "{field} '{value}' exceeds {max} characters"
        )));
    }
    Ok(value.to_string())
}
