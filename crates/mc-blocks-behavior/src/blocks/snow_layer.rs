//! Stackable snow layers.

use rand::RngCore;

use mc_blocks_state::{Aabb, Block, BlockPos, Facing, SnowLayer, SupportType};

use crate::behavior::BlockBehavior;
use crate::event::BlockEvent;
use crate::fallable;
use crate::item::{Item, ItemKind};
use crate::transaction::{BlockTransaction, PlaceRequest};
use crate::world::BlockContext;

/// Block light at which snow melts.
const MELT_LIGHT: u8 = 12;

impl BlockBehavior for SnowLayer {
    fn to_block(&self) -> Block {
        Block::SnowLayer(*self)
    }

    fn can_be_replaced(&self) -> bool {
        !self.is_full()
    }

    fn support_type(&self, _face: Facing) -> SupportType {
        if self.is_full() {
            SupportType::Full
        } else {
            SupportType::None
        }
    }

    fn collision_boxes(&self) -> Vec<Aabb> {
        let height = f64::from(self.layers()) / f64::from(SnowLayer::MAX_LAYERS);
        vec![Aabb::one().trim(Facing::Up, 1.0 - height)]
    }

    /// Placing onto existing snow adds a layer.
    fn place(&self, tx: &mut BlockTransaction<'_>, req: &PlaceRequest) -> bool {
        let mut snow = *self;
        if let Block::SnowLayer(existing) = tx.fetch_block(req.pos) {
            if existing.is_full() || snow.set_layers(existing.layers() + 1).is_err() {
                return false;
            }
        }
        if tx.fetch_block(req.pos.down()).support_type(Facing::Up) != SupportType::Full {
            return false;
        }
        tx.add_block(req.pos, Block::SnowLayer(snow));
        true
    }

    fn on_nearby_block_change(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        fallable::fall_if_unsupported(ctx, pos, self.to_block());
    }

    fn ticks_randomly(&self) -> bool {
        true
    }

    fn on_random_tick(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        if ctx.world.block_light_at(pos) < MELT_LIGHT {
            return;
        }
        let new_state = Block::Air;
        if ctx.call(&BlockEvent::Melt { pos, new_state }) {
            ctx.world.set_block(pos, new_state);
        }
    }

    fn drops_for_compatible_tool(&self, _item: &Item, _rng: &mut dyn RngCore) -> Vec<Item> {
        let count = (self.layers() / 2).max(1);
        vec![Item::new(ItemKind::Snowball, count)]
    }
}
