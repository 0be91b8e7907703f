use serde::{Deserialize, Serialize};

use crate::codec::{IdVariant, StateCodec};
use crate::error::StateError;

const CORAL_BLOCK_FLAG_DEAD: u8 = 0x08;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CoralType {
    #[default]
    Tube,
    Brain,
    Bubble,
    Fire,
    Horn,
}

impl CoralType {
    pub const ALL: [CoralType; 5] = [
        CoralType::Tube,
        CoralType::Brain,
        CoralType::Bubble,
        CoralType::Fire,
        CoralType::Horn,
    ];

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Species and liveness shared by every coral-typed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CoralTyped {
    pub coral_type: CoralType,
    pub dead: bool,
}

/// A coral plant. Liveness is part of the block identity, not the packed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coral {
    pub coral: CoralTyped,
}

impl StateCodec for Coral {
    const STATE_BITMASK: u8 = 0b0111;

    fn read_state(&mut self, _variant: IdVariant, meta: u8) -> Result<(), StateError> {
        self.coral.coral_type =
            CoralType::from_id(meta).ok_or_else(|| StateError::invalid("coral", "coral type", meta))?;
        Ok(())
    }

    fn write_state(&self) -> u8 {
        self.coral.coral_type.id()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CoralBlock {
    pub coral: CoralTyped,
}

impl StateCodec for CoralBlock {
    const STATE_BITMASK: u8 = 0b1111;

    fn read_state(&mut self, _variant: IdVariant, meta: u8) -> Result<(), StateError> {
        let raw = meta & 0x07;
        self.coral.coral_type =
            CoralType::from_id(raw).ok_or_else(|| StateError::invalid("coral block", "coral type", raw))?;
        self.coral.dead = meta & CORAL_BLOCK_FLAG_DEAD != 0;
        Ok(())
    }

    fn write_state(&self) -> u8 {
        (if self.coral.dead { CORAL_BLOCK_FLAG_DEAD } else { 0 }) | self.coral.coral_type.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coral_types_round_trip() {
        for coral_type in CoralType::ALL {
            let c = Coral {
                coral: CoralTyped {
                    coral_type,
                    dead: false,
                },
            };
            assert_eq!(Coral::decode(IdVariant::Primary, c.write_state()).unwrap(), c);
        }
    }

    #[test]
    fn undefined_coral_type_is_rejected() {
        for meta in 5..16 {
            assert!(Coral::decode(IdVariant::Primary, meta).is_err());
        }
    }

    #[test]
    fn coral_plant_read_keeps_liveness() {
        let mut c = Coral {
            coral: CoralTyped {
                coral_type: CoralType::Tube,
                dead: true,
            },
        };
        c.read_state(IdVariant::Primary, 3).unwrap();
        assert_eq!(c.coral.coral_type, CoralType::Fire);
        assert!(c.coral.dead);
    }

    #[test]
    fn coral_block_dead_flag() {
        let b = CoralBlock::decode(IdVariant::Primary, 0x08 | 4).unwrap();
        assert!(b.coral.dead);
        assert_eq!(b.coral.coral_type, CoralType::Horn);
        assert_eq!(b.write_state(), 0x0c);
        assert!(CoralBlock::decode(IdVariant::Primary, 0x0d).is_err());
    }
}
