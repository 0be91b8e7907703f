//! What kind of mechanical support a block face offers.

use serde::{Deserialize, Serialize};

/// Support offered by a block face to a block attaching to it.
///
/// Placement and neighbor checks branch only on this value, never on the
/// concrete block kind providing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportType {
    None,
    Center,
    Full,
}

impl SupportType {
    /// Center and full faces can hold a center-mounted block (buttons, coral).
    pub fn has_center_support(self) -> bool {
        matches!(self, SupportType::Center | SupportType::Full)
    }

    /// Only a full face supports blocks resting on their edges (snow, rails).
    pub fn has_edge_support(self) -> bool {
        self == SupportType::Full
    }

    pub fn is_none(self) -> bool {
        self == SupportType::None
    }
}
