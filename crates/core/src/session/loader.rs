#![allow(missing_docs)]

use std::{fs, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::{models::Territory, registry::Registry};

/// Builds a starting registry from a JSON scenario file.
///
/// ```json
/// { "territories": [ { "name": "Brasil", "owner": "Azul", "troops": 3 } ] }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioLoader {
    path: PathBuf,
}

impl ScenarioLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn with_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    pub fn load(&self) -> Result<Registry> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read scenario {}", self.path.display()))?;
        let registry = Self::parse(&contents)
            .with_context(|| format!("failed to load scenario {}", self.path.display()))?;
        info!(
            path = %self.path.display(),
            territories = registry.count(),
            "Scenario loaded"
        );
        Ok(registry)
    }

    pub fn parse(contents: &str) -> Result<Registry> {
        let raw: RawScenario =
            serde_json::from_str(contents).context("failed to parse scenario JSON")?;
        let territories = raw
            .territories
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                Territory::new(&entry.name, &entry.owner, entry.troops)
                    .map_err(|err| anyhow!("territory #{}: {err}", index + 1))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Registry::from_territories(territories)?)
    }
}

#[derive(Debug, Deserialize)]
struct RawScenario {
    #[serde(default)]
    territories: Vec<RawTerritory>,
}

#[derive(Debug, Deserialize)]
struct RawTerritory {
    name: String,
    #[serde(alias = "color")]
    owner: String,
    troops: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_scenario_from_disk() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("scenario.json");
        fs::write(
            &path,
            r#"{
  "territories": [
    { "name": "Brasil", "owner": "Azul", "troops": 3 },
    { "name": "Argentina", "color": "Vermelha", "troops": 2 }
  ]
}"#,
        )?;

        let registry = ScenarioLoader::new(&path).load()?;
        assert_eq!(registry.count(), 2);
        let argentina = registry.territory(1)?;
        assert_eq!(argentina.name(), "Argentina");
        assert_eq!(argentina.owner(), "Vermelha");
        assert_eq!(argentina.troops(), 2);
        Ok(())
    }

    #[test]
    fn rejects_invalid_entries() {
        let err = ScenarioLoader::parse(
            r#"{ "territories": [ { "name": "Peru", "owner": "Verde", "troops": 0 } ] }"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("territory #1"));
    }

    #[test]
    fn rejects_empty_map() {
        assert!(ScenarioLoader::parse(r#"{ "territories": [] }"#).is_err());
        assert!(ScenarioLoader::parse("{}").is_err());
    }

    #[test]
    fn missing_file_names_the_path() -> Result<()> {
        let temp = tempdir()?;
        let mut loader = ScenarioLoader::new(temp.path().join("a.json"));
        loader.with_path(temp.path().join("missing.json"));
        let err = loader.load().unwrap_err();
        assert!(err.to_string().contains("missing.json"));
        Ok(())
    }
}
