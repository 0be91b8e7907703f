//! Block state errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// Packed metadata selects a discrete sub-state that does not exist.
    #[error("invalid {block} state: no such {property} for raw value {raw}")]
    InvalidState {
        block: &'static str,
        property: &'static str,
        raw: u8,
    },

    /// A programmatic mutation supplied a value outside the field's range.
    #[error("{property} must be in range {min} ... {max}, got {value}")]
    OutOfRange {
        property: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },

    /// A facing that is not horizontal was supplied to a horizontal field.
    #[error("facing {0:?} is not horizontal")]
    NotHorizontal(crate::Facing),

    #[error("unknown legacy block id {id} (meta {meta})")]
    UnknownBlockId { id: u16, meta: u8 },
}

impl StateError {
    pub(crate) fn invalid(block: &'static str, property: &'static str, raw: u8) -> Self {
        Self::InvalidState {
            block,
            property,
            raw,
        }
    }
}

/// Reject `value` unless it lies in `min..=max`.
pub fn check_range(property: &'static str, value: i32, min: i32, max: i32) -> Result<(), StateError> {
    if value < min || value > max {
        return Err(StateError::OutOfRange {
            property,
            value,
            min,
            max,
        });
    }
    Ok(())
}
