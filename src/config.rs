//! On-disk configuration: where the administrator listens, which player
//! type fills empty slots, and how far the look-ahead strategies search.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// `santorini.config`: a single JSON object.
#[derive(Clone, Debug, Deserialize)]
pub struct SantoriniConfig {
    #[serde(rename = "IP")]
    pub ip: String,
    pub port: u16,
    #[serde(rename = "default-player")]
    pub default_player: String,
}

impl SantoriniConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<SantoriniConfig> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        raw.parse()
    }
}

impl std::str::FromStr for SantoriniConfig {
    type Err = anyhow::Error;
    fn from_str(raw: &str) -> anyhow::Result<SantoriniConfig> {
        serde_json::from_str(raw).context("parsing santorini.config")
    }
}

/// `strategy.config`: how many plies the look-ahead strategies search.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct StrategyConfig {
    #[serde(rename = "look-ahead")]
    pub look_ahead: usize,
}

impl StrategyConfig {
    pub const DEFAULT_PATH: &'static str = "strategy.config";

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<StrategyConfig> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        raw.parse()
    }

    pub fn load_default() -> anyhow::Result<StrategyConfig> {
        StrategyConfig::load(StrategyConfig::DEFAULT_PATH)
    }
}

impl std::str::FromStr for StrategyConfig {
    type Err = anyhow::Error;
    fn from_str(raw: &str) -> anyhow::Result<StrategyConfig> {
        let config: StrategyConfig =
            serde_json::from_str(raw).context("parsing strategy.config")?;
        if config.look_ahead < 1 {
            return Err(anyhow::anyhow!("look-ahead must be at least 1"));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tournament_config_parses() {
        let config: SantoriniConfig =
            r#"{"IP": "127.0.0.1", "port": 8800, "default-player": "smart"}"#.parse().unwrap();
        assert_eq!(config.ip, "127.0.0.1");
        assert_eq!(config.port, 8800);
        assert_eq!(config.default_player, "smart");
    }

    #[test]
    fn strategy_config_enforces_its_floor() {
        let config: StrategyConfig = r#"{"look-ahead": 3}"#.parse().unwrap();
        assert_eq!(config.look_ahead, 3);
        assert!(r#"{"look-ahead": 0}"#.parse::<StrategyConfig>().is_err());
        assert!(r#"{"look-ahead": "deep"}"#.parse::<StrategyConfig>().is_err());
    }
}
