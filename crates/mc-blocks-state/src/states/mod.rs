//! Per-kind state records.

mod bamboo;
mod bell;
mod button;
mod coral;
mod farmland;
mod fire;
mod frosted_ice;
mod leaves;
mod liquid;
mod rail;
mod redstone;
mod snow_layer;

pub use bamboo::{Bamboo, BambooSapling, LeafSize};
pub use bell::{Bell, BellAttachment};
pub use button::{Button, ButtonMaterial};
pub use coral::{Coral, CoralBlock, CoralType, CoralTyped};
pub use farmland::Farmland;
pub use fire::Fire;
pub use frosted_ice::FrostedIce;
pub use leaves::{Leaves, TreeType};
pub use liquid::{Liquid, LiquidSpecies};
pub use rail::{Rail, RailShape};
pub use redstone::{RedstoneComparator, RedstoneOre, RedstoneRepeater};
pub use snow_layer::SnowLayer;
