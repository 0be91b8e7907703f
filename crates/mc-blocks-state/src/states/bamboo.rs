use serde::{Deserialize, Serialize};

use crate::codec::{read_bounded_int, IdVariant, StateCodec};
use crate::error::StateError;

const FLAG_THICK: u8 = 0x01;
const LEAF_SIZE_SHIFT: u8 = 1;
const LEAF_SIZE_MASK: u8 = 0x03;
const FLAG_READY: u8 = 0x08;

const SAPLING_FLAG_READY: u8 = 0x01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LeafSize {
    #[default]
    None,
    Small,
    Large,
}

impl LeafSize {
    fn from_raw(raw: i32) -> Self {
        match raw {
            0 => LeafSize::None,
            1 => LeafSize::Small,
            _ => LeafSize::Large,
        }
    }

    fn to_raw(self) -> u8 {
        self as u8
    }
}

/// A bamboo stalk segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bamboo {
    pub thick: bool,
    pub leaf_size: LeafSize,
    /// Set on one random tick, consumed by the next to grow.
    pub ready: bool,
}

impl StateCodec for Bamboo {
    const STATE_BITMASK: u8 = 0b1111;

    fn read_state(&mut self, _variant: IdVariant, meta: u8) -> Result<(), StateError> {
        self.thick = meta & FLAG_THICK != 0;
        let leaf = read_bounded_int(
            "leaf size",
            ((meta >> LEAF_SIZE_SHIFT) & LEAF_SIZE_MASK) as i32,
            0,
            2,
        );
        self.leaf_size = LeafSize::from_raw(leaf);
        self.ready = meta & FLAG_READY != 0;
        Ok(())
    }

    fn write_state(&self) -> u8 {
        (if self.thick { FLAG_THICK } else { 0 })
            | (self.leaf_size.to_raw() << LEAF_SIZE_SHIFT)
            | (if self.ready { FLAG_READY } else { 0 })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BambooSapling {
    pub ready: bool,
}

impl StateCodec for BambooSapling {
    const STATE_BITMASK: u8 = 0b1;

    fn read_state(&mut self, _variant: IdVariant, meta: u8) -> Result<(), StateError> {
        self.ready = meta & SAPLING_FLAG_READY != 0;
        Ok(())
    }

    fn write_state(&self) -> u8 {
        if self.ready {
            SAPLING_FLAG_READY
        } else {
            0
        }
    }
}
