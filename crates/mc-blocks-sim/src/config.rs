use serde::Deserialize;
use std::path::Path;

use mc_blocks_behavior::{Difficulty, LiquidSettings};

use crate::error::SimError;

#[derive(Debug, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub world: WorldSection,
    pub logging: LoggingSection,
    #[serde(default)]
    pub liquids: LiquidSettings,
}

#[derive(Debug, Deserialize)]
pub struct WorldSection {
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub seed: u64,
    /// Ticks each scenario runs for.
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    /// Sky light everywhere in the world, 0..15.
    #[serde(default = "default_light")]
    pub default_light: u8,
    /// Random block ticks per game tick.
    #[serde(default = "default_random_tick_speed")]
    pub random_tick_speed: usize,
}

fn default_ticks() -> u64 {
    400
}

fn default_light() -> u8 {
    15
}

fn default_random_tick_speed() -> usize {
    3
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            seed: 0,
            ticks: default_ticks(),
            default_light: default_light(),
            random_tick_speed: default_random_tick_speed(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    pub level: String,
}

impl SimConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, SimError> {
        let config: Self = toml::from_str(contents)?;
        Ok(config)
    }
}
