use serde::{Deserialize, Serialize};

/// Tunables for the liquid flow engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidSettings {
    #[serde(default = "default_water_tick_rate")]
    pub water_tick_rate: u32,
    #[serde(default = "default_lava_tick_rate")]
    pub lava_tick_rate: u32,
    /// Decay lost per block of horizontal lava flow. 1 in the nether.
    #[serde(default = "default_lava_flow_decay_per_block")]
    pub lava_flow_decay_per_block: u8,
}

fn default_water_tick_rate() -> u32 {
    5
}

fn default_lava_tick_rate() -> u32 {
    30
}

fn default_lava_flow_decay_per_block() -> u8 {
    2
}

impl Default for LiquidSettings {
    fn default() -> Self {
        Self {
            water_tick_rate: default_water_tick_rate(),
            lava_tick_rate: default_lava_tick_rate(),
            lava_flow_decay_per_block: default_lava_flow_decay_per_block(),
        }
    }
}
