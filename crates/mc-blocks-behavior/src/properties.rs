//! Static per-kind block properties: hardness, tool, solidity, light, and
//! flammability.
//!
//! Values that depend on state (lit redstone ore, snow depth) are adjusted by
//! the behaviors; this table holds the kind-wide defaults.

use mc_blocks_state::BlockKind;

use crate::item::ToolType;

/// Properties for a single block kind.
#[derive(Debug, Clone, Copy)]
pub struct BlockInfo {
    pub kind: BlockKind,
    /// Mining hardness. `0.0` = instant break.
    pub hardness: f32,
    /// The preferred tool type.
    pub tool_type: ToolType,
    /// Drops only when broken with [`BlockInfo::tool_type`].
    pub requires_tool: bool,
    /// Whether entities collide with this block and liquids rest on it.
    pub solid: bool,
    pub transparent: bool,
    /// How much light is lost passing through, 0..15.
    pub light_filter: u8,
    pub light_emission: u8,
    /// Chance weight of nearby fire spreading next to this block.
    pub flame_encouragement: u8,
    /// Chance weight of this block burning away.
    pub flammability: u8,
}

impl BlockInfo {
    pub fn is_flammable(&self) -> bool {
        self.flammability > 0
    }
}

// Helper macro to reduce boilerplate in the data array.
macro_rules! block {
    ($kind:ident, $hardness:expr, solid, $tool:ident) => {
        block!($kind, $hardness, true, false, 15, $tool, false, 0, 0, 0)
    };
    ($kind:ident, $hardness:expr, solid, $tool:ident, required) => {
        block!($kind, $hardness, true, false, 15, $tool, true, 0, 0, 0)
    };
    ($kind:ident, $hardness:expr, solid, $tool:ident, burns $enc:expr, $flam:expr) => {
        block!($kind, $hardness, true, false, 15, $tool, false, 0, $enc, $flam)
    };
    ($kind:ident, $hardness:expr, transparent $filter:expr, $tool:ident) => {
        block!($kind, $hardness, true, true, $filter, $tool, false, 0, 0, 0)
    };
    ($kind:ident, $hardness:expr, flowable, $tool:ident) => {
        block!($kind, $hardness, false, true, 0, $tool, false, 0, 0, 0)
    };
    ($kind:ident, $hardness:expr, flowable, $tool:ident, burns $enc:expr, $flam:expr) => {
        block!($kind, $hardness, false, true, 0, $tool, false, 0, $enc, $flam)
    };
    ($kind:ident, $hardness:expr, $solid:expr, $transparent:expr, $filter:expr, $tool:ident,
     $required:expr, $emission:expr, $enc:expr, $flam:expr) => {
        BlockInfo {
            kind: BlockKind::$kind,
            hardness: $hardness,
            tool_type: ToolType::$tool,
            requires_tool: $required,
            solid: $solid,
            transparent: $transparent,
            light_filter: $filter,
            light_emission: $emission,
            flame_encouragement: $enc,
            flammability: $flam,
        }
    };
}

/// Properties of every kind, in [`BlockKind`] declaration order.
static BLOCK_DATA: &[BlockInfo] = &[
    // ===== Terrain =====
    block!(Air, 0.0, false, true, 0, None, false, 0, 0, 0),
    block!(Stone, 1.5, solid, Pickaxe, required),
    block!(Grass, 0.6, solid, Shovel),
    block!(Dirt, 0.5, solid, Shovel),
    block!(Cobblestone, 2.0, solid, Pickaxe, required),
    block!(Planks, 2.0, solid, Axe, burns 5, 20),
    block!(Sand, 0.5, solid, Shovel),
    block!(Gravel, 0.6, solid, Shovel),
    block!(Log, 2.0, solid, Axe, burns 5, 5),
    block!(Glass, 0.3, transparent 0, None),
    // ===== Plants =====
    block!(TallGrass, 0.0, flowable, Shears, burns 60, 100),
    block!(Dandelion, 0.0, flowable, None, burns 60, 100),
    block!(Poppy, 0.0, flowable, None, burns 60, 100),
    // ===== Misc terrain =====
    block!(Obsidian, 35.0, solid, Pickaxe, required),
    block!(Ice, 0.5, transparent 2, Pickaxe),
    block!(GrassPath, 0.6, transparent 0, Shovel),
    block!(Bamboo, 2.0, transparent 0, Axe),
    block!(BambooSapling, 0.0, flowable, None),
    block!(Bell, 5.0, transparent 0, Pickaxe),
    block!(StoneButton, 0.5, flowable, Pickaxe),
    block!(WoodenButton, 0.5, flowable, Axe),
    block!(Coral, 0.0, flowable, None),
    block!(DeadCoral, 0.0, flowable, None),
    block!(CoralBlock, 7.0, solid, Pickaxe, required),
    block!(Farmland, 0.6, transparent 0, Shovel),
    block!(Fire, 0.0, false, true, 0, None, false, 15, 0, 0),
    block!(FrostedIce, 2.5, transparent 2, Pickaxe),
    // ===== Leaves =====
    block!(OakLeaves, 0.2, false, true, 1, Shears, false, 0, 30, 60),
    block!(SpruceLeaves, 0.2, false, true, 1, Shears, false, 0, 30, 60),
    block!(BirchLeaves, 0.2, false, true, 1, Shears, false, 0, 30, 60),
    block!(JungleLeaves, 0.2, false, true, 1, Shears, false, 0, 30, 60),
    block!(AcaciaLeaves, 0.2, false, true, 1, Shears, false, 0, 30, 60),
    block!(DarkOakLeaves, 0.2, false, true, 1, Shears, false, 0, 30, 60),
    // ===== Liquids =====
    block!(Water, 100.0, false, true, 2, None, false, 0, 0, 0),
    block!(Lava, 100.0, false, true, 0, None, false, 15, 0, 0),
    // ===== Redstone =====
    block!(Rail, 0.7, flowable, Pickaxe),
    block!(RedstoneComparator, 0.0, flowable, None),
    block!(RedstoneOre, 3.0, solid, Pickaxe, required),
    block!(RedstoneRepeater, 0.0, flowable, None),
    block!(SnowLayer, 0.1, false, true, 0, Shovel, true, 0, 0, 0),
];

pub fn info(kind: BlockKind) -> &'static BlockInfo {
    &BLOCK_DATA[kind as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_kind_in_order() {
        let kinds: Vec<BlockKind> = BlockKind::all().collect();
        assert_eq!(kinds.len(), BLOCK_DATA.len());
        for (info, kind) in BLOCK_DATA.iter().zip(kinds) {
            assert_eq!(info.kind, kind);
        }
    }

    #[test]
    fn sample_properties() {
        assert!(info(BlockKind::Stone).solid);
        assert!(info(BlockKind::Stone).requires_tool);
        assert!(!info(BlockKind::Water).solid);
        assert!(info(BlockKind::OakLeaves).is_flammable());
        assert!(!info(BlockKind::Dirt).is_flammable());
        assert_eq!(info(BlockKind::Fire).light_emission, 15);
        assert!(info(BlockKind::Farmland).transparent);
        assert_eq!(info(BlockKind::SnowLayer).tool_type, ToolType::Shovel);
    }
}
