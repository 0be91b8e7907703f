//! The closed set of block kinds and their legacy `(id, meta)` storage form.
//!
//! A [`Block`] is a tagged value: stateless kinds are bare variants, stateful
//! kinds carry their state record. Identity attributes that the legacy format
//! stores in the metadata (leaf tree type, coral liveness) live in the record
//! too, but are packed as identity variant bits rather than state bits.

use serde::{Deserialize, Serialize};

use crate::codec::{IdVariant, StateCodec};
use crate::error::StateError;
use crate::states::{
    Bamboo, BambooSapling, Bell, Button, ButtonMaterial, Coral, CoralBlock, CoralTyped, Farmland,
    Fire, FrostedIce, Leaves, Liquid, LiquidSpecies, Rail, RedstoneComparator, RedstoneOre,
    RedstoneRepeater, SnowLayer, TreeType,
};

/// Fieldless discriminant of a [`Block`], including identity variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlockKind {
    Air,
    Stone,
    Grass,
    Dirt,
    Cobblestone,
    Planks,
    Sand,
    Gravel,
    Log,
    Glass,
    TallGrass,
    Dandelion,
    Poppy,
    Obsidian,
    Ice,
    GrassPath,
    Bamboo,
    BambooSapling,
    Bell,
    StoneButton,
    WoodenButton,
    Coral,
    DeadCoral,
    CoralBlock,
    Farmland,
    Fire,
    FrostedIce,
    OakLeaves,
    SpruceLeaves,
    BirchLeaves,
    JungleLeaves,
    AcaciaLeaves,
    DarkOakLeaves,
    Water,
    Lava,
    Rail,
    RedstoneComparator,
    RedstoneOre,
    RedstoneRepeater,
    SnowLayer,
}

/// Static storage data for one block kind.
#[derive(Debug, Clone, Copy)]
pub struct KindInfo {
    pub kind: BlockKind,
    pub name: &'static str,
    /// Legacy id for the primary identifier.
    pub id: u16,
    /// Legacy id used when the state selects [`IdVariant::Secondary`].
    pub secondary_id: Option<u16>,
    /// Identity bits OR-ed into the stored metadata.
    pub variant_meta: u8,
    /// Which metadata bits carry identity rather than state.
    pub variant_mask: u8,
}

macro_rules! kind {
    ($kind:ident, $name:expr, $id:expr) => {
        kind!($kind, $name, $id, None, 0, 0)
    };
    ($kind:ident, $name:expr, $id:expr, flat $second:expr) => {
        kind!($kind, $name, $id, Some($second), 0, 0)
    };
    ($kind:ident, $name:expr, $id:expr, variant $meta:expr, $mask:expr) => {
        kind!($kind, $name, $id, None, $meta, $mask)
    };
    ($kind:ident, $name:expr, $id:expr, $second:expr, $meta:expr, $mask:expr) => {
        KindInfo {
            kind: BlockKind::$kind,
            name: $name,
            id: $id,
            secondary_id: $second,
            variant_meta: $meta,
            variant_mask: $mask,
        }
    };
}

/// Storage data for every kind, in [`BlockKind`] declaration order.
static KIND_DATA: &[KindInfo] = &[
    // ===== Stateless =====
    kind!(Air, "air", 0, variant 0, 0xf),
    kind!(Stone, "stone", 1, variant 0, 0xf),
    kind!(Grass, "grass", 2, variant 0, 0xf),
    kind!(Dirt, "dirt", 3, variant 0, 0xf),
    kind!(Cobblestone, "cobblestone", 4, variant 0, 0xf),
    kind!(Planks, "planks", 5, variant 0, 0xf),
    kind!(Sand, "sand", 12, variant 0, 0xf),
    kind!(Gravel, "gravel", 13, variant 0, 0xf),
    kind!(Log, "log", 17, variant 0, 0xf),
    kind!(Glass, "glass", 20, variant 0, 0xf),
    kind!(TallGrass, "tallgrass", 31, variant 1, 0xf),
    kind!(Dandelion, "yellow_flower", 37, variant 0, 0xf),
    kind!(Poppy, "red_flower", 38, variant 0, 0xf),
    kind!(Obsidian, "obsidian", 49, variant 0, 0xf),
    kind!(Ice, "ice", 79, variant 0, 0xf),
    kind!(GrassPath, "grass_path", 198, variant 0, 0xf),
    // ===== Stateful =====
    kind!(Bamboo, "bamboo", 418),
    kind!(BambooSapling, "bamboo_sapling", 419),
    kind!(Bell, "bell", 461),
    kind!(StoneButton, "stone_button", 77),
    kind!(WoodenButton, "wooden_button", 143),
    kind!(Coral, "coral", 386, variant 0, 0x8),
    kind!(DeadCoral, "coral", 386, variant 0x8, 0x8),
    kind!(CoralBlock, "coral_block", 387),
    kind!(Farmland, "farmland", 60),
    kind!(Fire, "fire", 51),
    kind!(FrostedIce, "frosted_ice", 207),
    kind!(OakLeaves, "leaves", 18, variant 0, 0x3),
    kind!(SpruceLeaves, "leaves", 18, variant 1, 0x3),
    kind!(BirchLeaves, "leaves", 18, variant 2, 0x3),
    kind!(JungleLeaves, "leaves", 18, variant 3, 0x3),
    kind!(AcaciaLeaves, "leaves2", 161, variant 0, 0x3),
    kind!(DarkOakLeaves, "leaves2", 161, variant 1, 0x3),
    kind!(Water, "water", 8, flat 9),
    kind!(Lava, "lava", 10, flat 11),
    kind!(Rail, "rail", 66),
    kind!(RedstoneComparator, "comparator", 149, flat 150),
    kind!(RedstoneOre, "redstone_ore", 73, flat 74),
    kind!(RedstoneRepeater, "repeater", 93, flat 94),
    kind!(SnowLayer, "snow_layer", 78),
];

impl BlockKind {
    pub fn info(self) -> &'static KindInfo {
        &KIND_DATA[self as usize]
    }

    pub fn all() -> impl Iterator<Item = BlockKind> {
        KIND_DATA.iter().map(|info| info.kind)
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn leaves(tree_type: TreeType) -> Self {
        match tree_type {
            TreeType::Oak => BlockKind::OakLeaves,
            TreeType::Spruce => BlockKind::SpruceLeaves,
            TreeType::Birch => BlockKind::BirchLeaves,
            TreeType::Jungle => BlockKind::JungleLeaves,
            TreeType::Acacia => BlockKind::AcaciaLeaves,
            TreeType::DarkOak => BlockKind::DarkOakLeaves,
        }
    }
}

/// Legacy storage form: block id plus 4-bit metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegacyBlock {
    pub id: u16,
    pub meta: u8,
}

impl LegacyBlock {
    pub const fn new(id: u16, meta: u8) -> Self {
        Self { id, meta }
    }
}

/// One placed block and its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    Air,
    Stone,
    Grass,
    Dirt,
    Cobblestone,
    Planks,
    Sand,
    Gravel,
    Log,
    Glass,
    TallGrass,
    Dandelion,
    Poppy,
    Obsidian,
    Ice,
    GrassPath,
    Bamboo(Bamboo),
    BambooSapling(BambooSapling),
    Bell(Bell),
    Button(Button),
    Coral(Coral),
    CoralBlock(CoralBlock),
    Farmland(Farmland),
    Fire(Fire),
    FrostedIce(FrostedIce),
    Leaves(Leaves),
    Liquid(Liquid),
    Rail(Rail),
    RedstoneComparator(RedstoneComparator),
    RedstoneOre(RedstoneOre),
    RedstoneRepeater(RedstoneRepeater),
    SnowLayer(SnowLayer),
}

impl Default for Block {
    fn default() -> Self {
        Block::Air
    }
}

/// Forward a codec call to the state record, or use the stateless default.
macro_rules! with_state {
    ($block:expr, $s:ident => $body:expr, _ => $default:expr) => {
        match $block {
            Block::Bamboo($s) => $body,
            Block::BambooSapling($s) => $body,
            Block::Bell($s) => $body,
            Block::Button($s) => $body,
            Block::Coral($s) => $body,
            Block::CoralBlock($s) => $body,
            Block::Farmland($s) => $body,
            Block::Fire($s) => $body,
            Block::FrostedIce($s) => $body,
            Block::Leaves($s) => $body,
            Block::Liquid($s) => $body,
            Block::Rail($s) => $body,
            Block::RedstoneComparator($s) => $body,
            Block::RedstoneOre($s) => $body,
            Block::RedstoneRepeater($s) => $body,
            Block::SnowLayer($s) => $body,
            _ => $default,
        }
    };
}

impl Block {
    /// A block of `kind` with every state field at its default.
    pub fn new(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Air => Block::Air,
            BlockKind::Stone => Block::Stone,
            BlockKind::Grass => Block::Grass,
            BlockKind::Dirt => Block::Dirt,
            BlockKind::Cobblestone => Block::Cobblestone,
            BlockKind::Planks => Block::Planks,
            BlockKind::Sand => Block::Sand,
            BlockKind::Gravel => Block::Gravel,
            BlockKind::Log => Block::Log,
            BlockKind::Glass => Block::Glass,
            BlockKind::TallGrass => Block::TallGrass,
            BlockKind::Dandelion => Block::Dandelion,
            BlockKind::Poppy => Block::Poppy,
            BlockKind::Obsidian => Block::Obsidian,
            BlockKind::Ice => Block::Ice,
            BlockKind::GrassPath => Block::GrassPath,
            BlockKind::Bamboo => Block::Bamboo(Bamboo::default()),
            BlockKind::BambooSapling => Block::BambooSapling(BambooSapling::default()),
            BlockKind::Bell => Block::Bell(Bell::default()),
            BlockKind::StoneButton => Block::Button(Button::new(ButtonMaterial::Stone)),
            BlockKind::WoodenButton => Block::Button(Button::new(ButtonMaterial::Wood)),
            BlockKind::Coral => Block::Coral(Coral::default()),
            BlockKind::DeadCoral => Block::Coral(Coral {
                coral: CoralTyped {
                    dead: true,
                    ..CoralTyped::default()
                },
            }),
            BlockKind::CoralBlock => Block::CoralBlock(CoralBlock::default()),
            BlockKind::Farmland => Block::Farmland(Farmland::default()),
            BlockKind::Fire => Block::Fire(Fire::default()),
            BlockKind::FrostedIce => Block::FrostedIce(FrostedIce::default()),
            BlockKind::OakLeaves => Block::Leaves(Leaves::new(TreeType::Oak)),
            BlockKind::SpruceLeaves => Block::Leaves(Leaves::new(TreeType::Spruce)),
            BlockKind::BirchLeaves => Block::Leaves(Leaves::new(TreeType::Birch)),
            BlockKind::JungleLeaves => Block::Leaves(Leaves::new(TreeType::Jungle)),
            BlockKind::AcaciaLeaves => Block::Leaves(Leaves::new(TreeType::Acacia)),
            BlockKind::DarkOakLeaves => Block::Leaves(Leaves::new(TreeType::DarkOak)),
            BlockKind::Water => Block::Liquid(Liquid::source(LiquidSpecies::Water).flowing_form()),
            BlockKind::Lava => Block::Liquid(Liquid::source(LiquidSpecies::Lava).flowing_form()),
            BlockKind::Rail => Block::Rail(Rail::default()),
            BlockKind::RedstoneComparator => Block::RedstoneComparator(RedstoneComparator::default()),
            BlockKind::RedstoneOre => Block::RedstoneOre(RedstoneOre::default()),
            BlockKind::RedstoneRepeater => Block::RedstoneRepeater(RedstoneRepeater::default()),
            BlockKind::SnowLayer => Block::SnowLayer(SnowLayer::default()),
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Air => BlockKind::Air,
            Block::Stone => BlockKind::Stone,
            Block::Grass => BlockKind::Grass,
            Block::Dirt => BlockKind::Dirt,
            Block::Cobblestone => BlockKind::Cobblestone,
            Block::Planks => BlockKind::Planks,
            Block::Sand => BlockKind::Sand,
            Block::Gravel => BlockKind::Gravel,
            Block::Log => BlockKind::Log,
            Block::Glass => BlockKind::Glass,
            Block::TallGrass => BlockKind::TallGrass,
            Block::Dandelion => BlockKind::Dandelion,
            Block::Poppy => BlockKind::Poppy,
            Block::Obsidian => BlockKind::Obsidian,
            Block::Ice => BlockKind::Ice,
            Block::GrassPath => BlockKind::GrassPath,
            Block::Bamboo(_) => BlockKind::Bamboo,
            Block::BambooSapling(_) => BlockKind::BambooSapling,
            Block::Bell(_) => BlockKind::Bell,
            Block::Button(b) => match b.material {
                ButtonMaterial::Stone => BlockKind::StoneButton,
                ButtonMaterial::Wood => BlockKind::WoodenButton,
            },
            Block::Coral(c) if c.coral.dead => BlockKind::DeadCoral,
            Block::Coral(_) => BlockKind::Coral,
            Block::CoralBlock(_) => BlockKind::CoralBlock,
            Block::Farmland(_) => BlockKind::Farmland,
            Block::Fire(_) => BlockKind::Fire,
            Block::FrostedIce(_) => BlockKind::FrostedIce,
            Block::Leaves(l) => BlockKind::leaves(l.tree_type),
            Block::Liquid(l) => match l.species {
                LiquidSpecies::Water => BlockKind::Water,
                LiquidSpecies::Lava => BlockKind::Lava,
            },
            Block::Rail(_) => BlockKind::Rail,
            Block::RedstoneComparator(_) => BlockKind::RedstoneComparator,
            Block::RedstoneOre(_) => BlockKind::RedstoneOre,
            Block::RedstoneRepeater(_) => BlockKind::RedstoneRepeater,
            Block::SnowLayer(_) => BlockKind::SnowLayer,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn is_air(&self) -> bool {
        matches!(self, Block::Air)
    }

    pub fn as_liquid(&self) -> Option<&Liquid> {
        match self {
            Block::Liquid(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_liquid_mut(&mut self) -> Option<&mut Liquid> {
        match self {
            Block::Liquid(l) => Some(l),
            _ => None,
        }
    }

    /// Constant state bitmask of this block's kind.
    pub fn state_bitmask(&self) -> u8 {
        with_state!(self, s => state_bitmask_of(s), _ => 0)
    }

    /// Overwrite state fields from packed metadata, keeping the block's identity.
    pub fn read_state(&mut self, variant: IdVariant, meta: u8) -> Result<(), StateError> {
        with_state!(self, s => s.read_state(variant, meta), _ => Ok(()))
    }

    /// Pack the state fields. Never sets bits outside [`Block::state_bitmask`].
    pub fn encode(&self) -> u8 {
        with_state!(self, s => s.write_state(), _ => 0)
    }

    pub fn id_variant(&self) -> IdVariant {
        with_state!(self, s => s.id_variant(), _ => IdVariant::Primary)
    }

    /// Build a block of `kind` from packed state metadata.
    pub fn decode(kind: BlockKind, variant: IdVariant, meta: u8) -> Result<Self, StateError> {
        let mut block = Block::new(kind);
        block.read_state(variant, meta)?;
        Ok(block)
    }

    pub fn to_legacy(&self) -> LegacyBlock {
        let info = self.kind().info();
        let id = match (self.id_variant(), info.secondary_id) {
            (IdVariant::Secondary, Some(second)) => second,
            _ => info.id,
        };
        LegacyBlock::new(id, info.variant_meta | self.encode())
    }

    pub fn from_legacy(legacy: LegacyBlock) -> Result<Self, StateError> {
        let unknown = || StateError::UnknownBlockId {
            id: legacy.id,
            meta: legacy.meta,
        };
        let (info, variant) = KIND_DATA
            .iter()
            .find_map(|info| {
                if info.variant_meta != legacy.meta & info.variant_mask {
                    return None;
                }
                if info.id == legacy.id {
                    Some((info, IdVariant::Primary))
                } else if info.secondary_id == Some(legacy.id) {
                    Some((info, IdVariant::Secondary))
                } else {
                    None
                }
            })
            .ok_or_else(unknown)?;
        Block::decode(info.kind, variant, legacy.meta & !info.variant_mask)
    }
}

fn state_bitmask_of<S: StateCodec>(_state: &S) -> u8 {
    S::STATE_BITMASK
}
