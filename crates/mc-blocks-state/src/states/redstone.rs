use serde::{Deserialize, Serialize};

use crate::codec::{read_bounded_int, IdVariant, StateCodec};
use crate::error::{check_range, StateError};
use crate::facing::HorizontalFacing;

const COMPARATOR_FLAG_SUBTRACT: u8 = 0x04;
const COMPARATOR_FLAG_POWERED: u8 = 0x08;
const REPEATER_DELAY_SHIFT: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RedstoneComparator {
    pub facing: HorizontalFacing,
    pub subtract: bool,
    pub powered: bool,
}

impl StateCodec for RedstoneComparator {
    const STATE_BITMASK: u8 = 0b1111;

    fn read_state(&mut self, variant: IdVariant, meta: u8) -> Result<(), StateError> {
        self.facing = HorizontalFacing::from_legacy(meta & 0x03);
        self.subtract = meta & COMPARATOR_FLAG_SUBTRACT != 0;
        self.powered = variant.is_secondary() || meta & COMPARATOR_FLAG_POWERED != 0;
        Ok(())
    }

    fn write_state(&self) -> u8 {
        self.facing.to_legacy()
            | if self.subtract { COMPARATOR_FLAG_SUBTRACT } else { 0 }
            | if self.powered { COMPARATOR_FLAG_POWERED } else { 0 }
    }

    fn id_variant(&self) -> IdVariant {
        IdVariant::from_flag(self.powered)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RedstoneOre {
    pub lit: bool,
}

impl StateCodec for RedstoneOre {
    const STATE_BITMASK: u8 = 0;

    fn read_state(&mut self, variant: IdVariant, _meta: u8) -> Result<(), StateError> {
        self.lit = variant.is_secondary();
        Ok(())
    }

    fn write_state(&self) -> u8 {
        0
    }

    fn id_variant(&self) -> IdVariant {
        IdVariant::from_flag(self.lit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RedstoneRepeater {
    pub facing: HorizontalFacing,
    delay: u8,
    pub powered: bool,
}

impl Default for RedstoneRepeater {
    fn default() -> Self {
        Self {
            facing: HorizontalFacing::default(),
            delay: Self::MIN_DELAY,
            powered: false,
        }
    }
}

impl RedstoneRepeater {
    pub const MIN_DELAY: u8 = 1;
    pub const MAX_DELAY: u8 = 4;

    pub fn new(facing: HorizontalFacing, delay: u8, powered: bool) -> Result<Self, StateError> {
        let mut repeater = Self {
            facing,
            powered,
            ..Self::default()
        };
        repeater.set_delay(delay)?;
        Ok(repeater)
    }

    pub fn delay(&self) -> u8 {
        self.delay
    }

    pub fn set_delay(&mut self, delay: u8) -> Result<&mut Self, StateError> {
        check_range("delay", delay as i32, Self::MIN_DELAY as i32, Self::MAX_DELAY as i32)?;
        self.delay = delay;
        Ok(self)
    }

    /// Next delay in the 1, 2, 3, 4, 1 interaction cycle.
    pub fn next_delay(&self) -> u8 {
        if self.delay >= Self::MAX_DELAY {
            Self::MIN_DELAY
        } else {
            self.delay + 1
        }
    }
}

impl StateCodec for RedstoneRepeater {
    const STATE_BITMASK: u8 = 0b1111;

    fn read_state(&mut self, variant: IdVariant, meta: u8) -> Result<(), StateError> {
        self.facing = HorizontalFacing::from_legacy(meta & 0x03);
        self.delay = read_bounded_int(
            "delay",
            ((meta >> REPEATER_DELAY_SHIFT) + 1) as i32,
            Self::MIN_DELAY as i32,
            Self::MAX_DELAY as i32,
        ) as u8;
        self.powered = variant.is_secondary();
        Ok(())
    }

    fn write_state(&self) -> u8 {
        self.facing.to_legacy() | ((self.delay - 1) << REPEATER_DELAY_SHIFT)
    }

    fn id_variant(&self) -> IdVariant {
        IdVariant::from_flag(self.powered)
    }
}
