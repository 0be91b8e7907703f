//! The block behavior contract and its dispatch over [`Block`].

use rand::RngCore;

use mc_blocks_state::{Aabb, Block, BlockPos, Facing, SupportType, Vec3};

use crate::blocks::{Grass, Plant, Simple};
use crate::entity::Entity;
use crate::item::{Item, ToolType};
use crate::properties::{self, BlockInfo};
use crate::transaction::{Actor, BlockTransaction, PlaceRequest};
use crate::world::BlockContext;

/// Hooks every block kind answers. Defaults describe a plain full cube.
pub trait BlockBehavior {
    /// The placed form of this behavior's state.
    fn to_block(&self) -> Block;

    fn info(&self) -> &'static BlockInfo {
        properties::info(self.to_block().kind())
    }

    fn is_solid(&self) -> bool {
        self.info().solid
    }

    fn is_transparent(&self) -> bool {
        self.info().transparent
    }

    fn is_flammable(&self) -> bool {
        self.info().is_flammable()
    }

    fn light_filter(&self) -> u8 {
        self.info().light_filter
    }

    fn light_emission(&self) -> u8 {
        self.info().light_emission
    }

    /// Whether placing a block here overwrites this one.
    fn can_be_replaced(&self) -> bool {
        false
    }

    /// Whether liquid may flow into this position.
    fn can_be_flowed_into(&self) -> bool {
        false
    }

    fn collision_boxes(&self) -> Vec<Aabb> {
        vec![Aabb::one()]
    }

    fn support_type(&self, _face: Facing) -> SupportType {
        SupportType::Full
    }

    /// Validate and adjust this block for placement, staging it on success.
    fn place(&self, tx: &mut BlockTransaction<'_>, req: &PlaceRequest) -> bool {
        tx.add_block(req.pos, self.to_block());
        true
    }

    fn on_nearby_block_change(&self, _ctx: &mut BlockContext<'_>, _pos: BlockPos) {}

    /// Returns true if the interaction was consumed.
    fn on_interact(
        &self,
        _ctx: &mut BlockContext<'_>,
        _pos: BlockPos,
        _item: &mut Item,
        _face: Facing,
        _click: Vec3,
        _actor: Option<&Actor>,
    ) -> bool {
        false
    }

    fn ticks_randomly(&self) -> bool {
        false
    }

    fn on_random_tick(&self, _ctx: &mut BlockContext<'_>, _pos: BlockPos) {}

    fn on_scheduled_update(&self, _ctx: &mut BlockContext<'_>, _pos: BlockPos) {}

    /// An entity fell onto this block.
    fn on_entity_land(&self, _ctx: &mut BlockContext<'_>, _pos: BlockPos, _entity: &mut dyn Entity) {}

    /// An entity is inside this block's space. Returns true if it was affected.
    fn on_entity_inside(&self, _ctx: &mut BlockContext<'_>, _pos: BlockPos, _entity: &mut dyn Entity) -> bool {
        false
    }

    fn drops_for_compatible_tool(&self, _item: &Item, _rng: &mut dyn RngCore) -> Vec<Item> {
        vec![Item::block(self.to_block().kind())]
    }

    /// Whether `item` harvests this block.
    fn is_tool_compatible(&self, item: &Item) -> bool {
        let info = self.info();
        !info.requires_tool || info.tool_type == ToolType::None || item.tool_type() == info.tool_type
    }

    fn drops_for(&self, item: &Item, rng: &mut dyn RngCore) -> Vec<Item> {
        if self.is_tool_compatible(item) {
            self.drops_for_compatible_tool(item, rng)
        } else {
            Vec::new()
        }
    }
}

/// Route a call to the behavior of the block's kind.
macro_rules! dispatch {
    ($block:expr, $b:ident => $body:expr) => {
        match $block {
            Block::Bamboo($b) => $body,
            Block::BambooSapling($b) => $body,
            Block::Bell($b) => $body,
            Block::Button($b) => $body,
            Block::Coral($b) => $body,
            Block::CoralBlock($b) => $body,
            Block::Farmland($b) => $body,
            Block::Fire($b) => $body,
            Block::FrostedIce($b) => $body,
            Block::Leaves($b) => $body,
            Block::Liquid($b) => $body,
            Block::Rail($b) => $body,
            Block::RedstoneComparator($b) => $body,
            Block::RedstoneOre($b) => $body,
            Block::RedstoneRepeater($b) => $body,
            Block::SnowLayer($b) => $body,
            Block::Grass => {
                let $b = &Grass;
                $body
            }
            Block::TallGrass | Block::Dandelion | Block::Poppy => {
                let $b = &Plant($block.kind());
                $body
            }
            _ => {
                let $b = &Simple($block.kind());
                $body
            }
        }
    };
}

impl BlockBehavior for Block {
    fn to_block(&self) -> Block {
        *self
    }

    fn light_emission(&self) -> u8 {
        dispatch!(self, b => b.light_emission())
    }

    fn can_be_replaced(&self) -> bool {
        dispatch!(self, b => b.can_be_replaced())
    }

    fn can_be_flowed_into(&self) -> bool {
        dispatch!(self, b => b.can_be_flowed_into())
    }

    fn collision_boxes(&self) -> Vec<Aabb> {
        dispatch!(self, b => b.collision_boxes())
    }

    fn support_type(&self, face: Facing) -> SupportType {
        dispatch!(self, b => b.support_type(face))
    }

    fn place(&self, tx: &mut BlockTransaction<'_>, req: &PlaceRequest) -> bool {
        dispatch!(self, b => b.place(tx, req))
    }

    fn on_nearby_block_change(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        dispatch!(self, b => b.on_nearby_block_change(ctx, pos))
    }

    fn on_interact(
        &self,
        ctx: &mut BlockContext<'_>,
        pos: BlockPos,
        item: &mut Item,
        face: Facing,
        click: Vec3,
        actor: Option<&Actor>,
    ) -> bool {
        dispatch!(self, b => b.on_interact(ctx, pos, item, face, click, actor))
    }

    fn ticks_randomly(&self) -> bool {
        dispatch!(self, b => b.ticks_randomly())
    }

    fn on_random_tick(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        dispatch!(self, b => b.on_random_tick(ctx, pos))
    }

    fn on_scheduled_update(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        dispatch!(self, b => b.on_scheduled_update(ctx, pos))
    }

    fn on_entity_land(&self, ctx: &mut BlockContext<'_>, pos: BlockPos, entity: &mut dyn Entity) {
        dispatch!(self, b => b.on_entity_land(ctx, pos, entity))
    }

    fn on_entity_inside(&self, ctx: &mut BlockContext<'_>, pos: BlockPos, entity: &mut dyn Entity) -> bool {
        dispatch!(self, b => b.on_entity_inside(ctx, pos, entity))
    }

    fn drops_for_compatible_tool(&self, item: &Item, rng: &mut dyn RngCore) -> Vec<Item> {
        dispatch!(self, b => b.drops_for_compatible_tool(item, rng))
    }
}

/// Whether the block on `face` of a neighbor offers center support toward it.
pub fn has_center_support(block: &Block, face: Facing) -> bool {
    block.support_type(face).has_center_support()
}
