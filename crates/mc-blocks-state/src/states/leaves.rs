use serde::{Deserialize, Serialize};

use crate::codec::{IdVariant, StateCodec};
use crate::error::StateError;

const FLAG_NO_DECAY: u8 = 0x04;
const FLAG_CHECK_DECAY: u8 = 0x08;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TreeType {
    #[default]
    Oak,
    Spruce,
    Birch,
    Jungle,
    Acacia,
    DarkOak,
}

impl TreeType {
    pub const ALL: [TreeType; 6] = [
        TreeType::Oak,
        TreeType::Spruce,
        TreeType::Birch,
        TreeType::Jungle,
        TreeType::Acacia,
        TreeType::DarkOak,
    ];

    /// Legacy sapling / wood variant number.
    pub fn magic_number(self) -> u8 {
        self as u8
    }

    pub fn drops_apples(self) -> bool {
        matches!(self, TreeType::Oak | TreeType::DarkOak)
    }
}

/// A leaves block. The tree type is part of the block identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Leaves {
    pub tree_type: TreeType,
    /// Player-placed leaves never decay.
    pub no_decay: bool,
    /// Set when a neighbor changed; the next random tick searches for a log.
    pub check_decay: bool,
}

impl Leaves {
    pub fn new(tree_type: TreeType) -> Self {
        Self {
            tree_type,
            ..Self::default()
        }
    }
}

impl StateCodec for Leaves {
    const STATE_BITMASK: u8 = 0b1100;

    fn read_state(&mut self, _variant: IdVariant, meta: u8) -> Result<(), StateError> {
        self.no_decay = meta & FLAG_NO_DECAY != 0;
        self.check_decay = meta & FLAG_CHECK_DECAY != 0;
        Ok(())
    }

    fn write_state(&self) -> u8 {
        (if self.no_decay { FLAG_NO_DECAY } else { 0 })
            | (if self.check_decay { FLAG_CHECK_DECAY } else { 0 })
    }
}
