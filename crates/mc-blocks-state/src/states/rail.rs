use serde::{Deserialize, Serialize};

use crate::codec::{IdVariant, StateCodec};
use crate::error::StateError;
use crate::facing::Facing;

/// Track layout of a plain rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RailShape {
    #[default]
    NorthSouth,
    EastWest,
    AscendingEast,
    AscendingWest,
    AscendingNorth,
    AscendingSouth,
    SouthEast,
    SouthWest,
    NorthWest,
    NorthEast,
}

impl RailShape {
    pub const ALL: [RailShape; 10] = [
        RailShape::NorthSouth,
        RailShape::EastWest,
        RailShape::AscendingEast,
        RailShape::AscendingWest,
        RailShape::AscendingNorth,
        RailShape::AscendingSouth,
        RailShape::SouthEast,
        RailShape::SouthWest,
        RailShape::NorthWest,
        RailShape::NorthEast,
    ];

    pub fn from_raw(raw: u8) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    pub fn to_raw(self) -> u8 {
        self as u8
    }

    pub fn is_curve(self) -> bool {
        self.to_raw() >= RailShape::SouthEast.to_raw()
    }

    /// Side the track climbs toward, for ascending shapes.
    pub fn ascending_toward(self) -> Option<Facing> {
        match self {
            RailShape::AscendingEast => Some(Facing::East),
            RailShape::AscendingWest => Some(Facing::West),
            RailShape::AscendingNorth => Some(Facing::North),
            RailShape::AscendingSouth => Some(Facing::South),
            _ => None,
        }
    }

    /// The two horizontal sides this shape connects.
    pub fn connections(self) -> [Facing; 2] {
        match self {
            RailShape::NorthSouth | RailShape::AscendingNorth | RailShape::AscendingSouth => {
                [Facing::North, Facing::South]
            }
            RailShape::EastWest | RailShape::AscendingEast | RailShape::AscendingWest => {
                [Facing::East, Facing::West]
            }
            RailShape::SouthEast => [Facing::South, Facing::East],
            RailShape::SouthWest => [Facing::South, Facing::West],
            RailShape::NorthWest => [Facing::North, Facing::West],
            RailShape::NorthEast => [Facing::North, Facing::East],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rail {
    pub shape: RailShape,
}

impl StateCodec for Rail {
    const STATE_BITMASK: u8 = 0b1111;

    fn read_state(&mut self, _variant: IdVariant, meta: u8) -> Result<(), StateError> {
        self.shape = RailShape::from_raw(meta).ok_or_else(|| StateError::invalid("rail", "rail shape", meta))?;
        Ok(())
    }

    fn write_state(&self) -> u8 {
        self.shape.to_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_round_trip() {
        for shape in RailShape::ALL {
            let rail = Rail { shape };
            assert_eq!(Rail::decode(IdVariant::Primary, rail.write_state()).unwrap(), rail);
        }
    }

    #[test]
    fn undefined_shape_is_rejected() {
        for meta in 10..16 {
            assert_eq!(
                Rail::decode(IdVariant::Primary, meta).unwrap_err(),
                StateError::InvalidState {
                    block: "rail",
                    property: "rail shape",
                    raw: meta
                }
            );
        }
    }

    #[test]
    fn curves() {
        assert!(RailShape::NorthEast.is_curve());
        assert!(!RailShape::AscendingSouth.is_curve());
        assert_eq!(RailShape::AscendingWest.ascending_toward(), Some(Facing::West));
    }
}
