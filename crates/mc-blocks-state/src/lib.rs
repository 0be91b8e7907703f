//! Block state data model: faces, geometry, packed metadata codec, and the
//! closed set of block kinds with their state records.

pub mod block;
pub mod codec;
pub mod error;
pub mod facing;
pub mod math;
pub mod seed;
pub mod states;
pub mod support;

pub use block::{Block, BlockKind, KindInfo, LegacyBlock};
pub use codec::{read_bounded_int, IdVariant, StateCodec};
pub use error::StateError;
pub use facing::{Axis, Facing, HorizontalFacing};
pub use math::{Aabb, BlockPos, Vec3};
pub use seed::{bamboo_max_height, position_seed};
pub use states::{
    Bamboo, BambooSapling, Bell, BellAttachment, Button, ButtonMaterial, Coral, CoralBlock,
    CoralType, CoralTyped, Farmland, Fire, FrostedIce, LeafSize, Leaves, Liquid, LiquidSpecies,
    Rail, RailShape, RedstoneComparator, RedstoneOre, RedstoneRepeater, SnowLayer, TreeType,
};
pub use support::SupportType;
