use serde::{Deserialize, Serialize};

use crate::codec::{IdVariant, StateCodec};
use crate::error::StateError;
use crate::facing::{Facing, HorizontalFacing};

const ATTACHMENT_SHIFT: u8 = 2;

/// How a bell hangs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BellAttachment {
    #[default]
    Floor,
    Ceiling,
    OneWall,
    TwoWalls,
}

impl BellAttachment {
    fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(BellAttachment::Floor),
            1 => Some(BellAttachment::Ceiling),
            2 => Some(BellAttachment::OneWall),
            3 => Some(BellAttachment::TwoWalls),
            _ => None,
        }
    }

    fn to_raw(self) -> u8 {
        match self {
            BellAttachment::Floor => 0,
            BellAttachment::Ceiling => 1,
            BellAttachment::OneWall => 2,
            BellAttachment::TwoWalls => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bell {
    pub facing: HorizontalFacing,
    pub attachment: BellAttachment,
}

impl Bell {
    /// Whether striking the bell on `face_hit` rings it.
    pub fn is_valid_face_to_ring(&self, face_hit: Facing) -> bool {
        let facing = self.facing.get();
        match self.attachment {
            BellAttachment::Ceiling => true,
            BellAttachment::Floor => face_hit.axis() == facing.axis(),
            BellAttachment::OneWall | BellAttachment::TwoWalls => {
                face_hit == facing.rotate_y(false) || face_hit == facing.rotate_y(true)
            }
        }
    }
}

impl StateCodec for Bell {
    const STATE_BITMASK: u8 = 0b1111;

    fn read_state(&mut self, _variant: IdVariant, meta: u8) -> Result<(), StateError> {
        // The selector takes every bit above the facing, so stray high bits
        // surface as an undefined attachment instead of being dropped.
        let selector = meta >> ATTACHMENT_SHIFT;
        let attachment = BellAttachment::from_raw(selector)
            .ok_or_else(|| StateError::invalid("bell", "attachment type", selector))?;
        self.facing = HorizontalFacing::from_legacy(meta & 0x03);
        self.attachment = attachment;
        Ok(())
    }

    fn write_state(&self) -> u8 {
        self.facing.to_legacy() | (self.attachment.to_raw() << ATTACHMENT_SHIFT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_defined_meta_round_trips() {
        for meta in 0..16u8 {
            let bell = Bell::decode(IdVariant::Primary, meta).unwrap();
            assert_eq!(bell.write_state(), meta);
        }
    }

    #[test]
    fn undefined_attachment_is_rejected() {
        let err = Bell::decode(IdVariant::Primary, 4 << ATTACHMENT_SHIFT).unwrap_err();
        assert_eq!(
            err,
            StateError::InvalidState {
                block: "bell",
                property: "attachment type",
                raw: 4
            }
        );
    }

    #[test]
    fn decodes_wall_bell() {
        let bell = Bell::decode(IdVariant::Primary, 0b1011).unwrap();
        assert_eq!(bell.facing, HorizontalFacing::WEST);
        assert_eq!(bell.attachment, BellAttachment::OneWall);
    }
}
