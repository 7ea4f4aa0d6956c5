//! Application configuration loaded from defaults, a TOML file and the environment.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::models::color_tag;

/// Directory under the user's config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "war";
/// Prefix for environment overrides, e.g. `WAR_SEED=7`.
pub const ENV_PREFIX: &str = "WAR";
/// Color the single player fights for unless configured otherwise.
pub const DEFAULT_PLAYER_COLOR: &str = "Vermelha";

const DEFAULT_CONFIG: &str = r#"# Color of the army you command (at most 9 characters).
player_color = "Vermelha"

# Fixed dice seed for reproducible games. Omit for a clock-derived seed.
# seed = 42

# JSON file with the starting territories. Omit to enter them interactively.
# scenario = "scenario.json"
"#;

/// Runtime settings for a game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Faction color of the player.
    pub player_color: String,
    /// Dice seed; `None` seeds from the clock.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Territory setup file.
    #[serde(default)]
    pub scenario: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            player_color: DEFAULT_PLAYER_COLOR.to_string(),
            seed: None,
            scenario: None,
        }
    }
}

impl AppConfig {
    /// Load from the default config file and `WAR_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load using `path` as the config file. A missing file is not an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .set_default("player_color", DEFAULT_PLAYER_COLOR)?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.player_color = color_tag(&config.player_color)
            .with_context(|| format!("invalid player_color in {}", path.display()))?;
        Ok(config)
    }
}

/// Location of the user's config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join("config.toml")
}

/// Write the commented default config if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    write_default_config(config_path())
}

fn write_default_config(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("absent.toml"))?;
        assert_eq!(config.player_color, DEFAULT_PLAYER_COLOR);
        assert_eq!(config.scenario, None);
        Ok(())
    }

    #[test]
    fn default_file_round_trips() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("config.toml");
        write_default_config(&path)?;
        assert!(path.exists());

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.player_color, DEFAULT_PLAYER_COLOR);
        Ok(())
    }

    #[test]
    fn existing_file_is_kept() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "player_color = \"Azul\"\nseed = 7\nscenario = \"map.json\"\n")?;
        write_default_config(&path)?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.player_color, "Azul");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.scenario, Some(PathBuf::from("map.json")));
        Ok(())
    }

    #[test]
    fn rejects_oversized_color() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "player_color = \"Ultramarine\"\n")?;
        assert!(AppConfig::load_from(&path).is_err());
        Ok(())
    }
}
