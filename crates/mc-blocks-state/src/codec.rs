//! Packed legacy metadata codec.
//!
//! Each stateful block record maps its fields to and from a small packed
//! integer. Bits outside a type's [`StateCodec::STATE_BITMASK`] are never
//! produced by encoding. Flattened block identifiers (a second id standing in
//! for one boolean) are surfaced as an [`IdVariant`] instead of a type swap.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StateError;

/// Which of a flattened identifier pair a block is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IdVariant {
    #[default]
    Primary,
    Secondary,
}

impl IdVariant {
    pub fn from_flag(flag: bool) -> Self {
        if flag {
            IdVariant::Secondary
        } else {
            IdVariant::Primary
        }
    }

    pub fn is_secondary(self) -> bool {
        self == IdVariant::Secondary
    }
}

/// Bidirectional mapping between a state record and its packed metadata.
pub trait StateCodec: Sized {
    /// Low bits of the packed value that carry state.
    const STATE_BITMASK: u8;

    /// Overwrite this record's state from packed metadata.
    ///
    /// Identity attributes (species, tree type, button material) are kept.
    fn read_state(&mut self, variant: IdVariant, meta: u8) -> Result<(), StateError>;

    /// Pack this record's state. Always a subset of [`Self::STATE_BITMASK`].
    fn write_state(&self) -> u8;

    /// Identifier of the flattened pair this state is stored under.
    fn id_variant(&self) -> IdVariant {
        IdVariant::Primary
    }

    fn decode(variant: IdVariant, meta: u8) -> Result<Self, StateError>
    where
        Self: Default,
    {
        let mut state = Self::default();
        state.read_state(variant, meta)?;
        Ok(state)
    }
}

/// Clamp a bounded integer read from storage into `min..=max`.
///
/// Out-of-range stored values are recovered locally rather than rejected.
pub fn read_bounded_int(property: &'static str, value: i32, min: i32, max: i32) -> i32 {
    if value < min || value > max {
        debug!("clamping stored {property} {value} into {min} ... {max}");
    }
    value.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_int_clamps() {
        assert_eq!(read_bounded_int("wetness", 9, 0, 7), 7);
        assert_eq!(read_bounded_int("delay", 0, 1, 4), 1);
        assert_eq!(read_bounded_int("age", 3, 0, 15), 3);
    }

    #[test]
    fn variant_from_flag() {
        assert_eq!(IdVariant::from_flag(true), IdVariant::Secondary);
        assert_eq!(IdVariant::from_flag(false), IdVariant::Primary);
        assert!(IdVariant::Secondary.is_secondary());
        assert_eq!(IdVariant::default(), IdVariant::Primary);
    }
}
