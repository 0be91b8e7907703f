use serde::{Deserialize, Serialize};

use crate::codec::{read_bounded_int, IdVariant, StateCodec};
use crate::error::{check_range, StateError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnowLayer {
    layers: u8,
}

impl Default for SnowLayer {
    fn default() -> Self {
        Self {
            layers: Self::MIN_LAYERS,
        }
    }
}

impl SnowLayer {
    pub const MIN_LAYERS: u8 = 1;
    pub const MAX_LAYERS: u8 = 8;

    pub fn new(layers: u8) -> Result<Self, StateError> {
        let mut snow = Self::default();
        snow.set_layers(layers)?;
        Ok(snow)
    }

    pub fn layers(&self) -> u8 {
        self.layers
    }

    pub fn set_layers(&mut self, layers: u8) -> Result<&mut Self, StateError> {
        check_range("layers", layers as i32, Self::MIN_LAYERS as i32, Self::MAX_LAYERS as i32)?;
        self.layers = layers;
        Ok(self)
    }

    pub fn is_full(&self) -> bool {
        self.layers >= Self::MAX_LAYERS
    }
}

impl StateCodec for SnowLayer {
    const STATE_BITMASK: u8 = 0b111;

    fn read_state(&mut self, _variant: IdVariant, meta: u8) -> Result<(), StateError> {
        self.layers = read_bounded_int(
            "layers",
            meta as i32 + 1,
            Self::MIN_LAYERS as i32,
            Self::MAX_LAYERS as i32,
        ) as u8;
        Ok(())
    }

    fn write_state(&self) -> u8 {
        self.layers - 1
    }
}
