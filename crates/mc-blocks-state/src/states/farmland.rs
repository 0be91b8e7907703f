use serde::{Deserialize, Serialize};

use crate::codec::{read_bounded_int, IdVariant, StateCodec};
use crate::error::{check_range, StateError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Farmland {
    wetness: u8,
}

impl Farmland {
    pub const MAX_WETNESS: u8 = 7;

    pub fn new(wetness: u8) -> Result<Self, StateError> {
        let mut farmland = Self::default();
        farmland.set_wetness(wetness)?;
        Ok(farmland)
    }

    pub fn wetness(&self) -> u8 {
        self.wetness
    }

    pub fn set_wetness(&mut self, wetness: u8) -> Result<&mut Self, StateError> {
        check_range("wetness", wetness as i32, 0, Self::MAX_WETNESS as i32)?;
        self.wetness = wetness;
        Ok(self)
    }
}

impl StateCodec for Farmland {
    const STATE_BITMASK: u8 = 0b111;

    fn read_state(&mut self, _variant: IdVariant, meta: u8) -> Result<(), StateError> {
        self.wetness = read_bounded_int("wetness", meta as i32, 0, Self::MAX_WETNESS as i32) as u8;
        Ok(())
    }

    fn write_state(&self) -> u8 {
        self.wetness
    }
}
