//! Tilled farmland: hydration from nearby water, drying out, and trampling.

use rand::{Rng, RngCore};
use tracing::trace;

use mc_blocks_state::{Aabb, Block, BlockKind, BlockPos, Facing, Farmland, LiquidSpecies};

use crate::behavior::BlockBehavior;
use crate::entity::Entity;
use crate::event::BlockEvent;
use crate::item::Item;
use crate::world::{BlockContext, World};

/// Horizontal reach of the water search.
const HYDRATION_RADIUS: i32 = 4;

fn can_hydrate(world: &dyn World, pos: BlockPos) -> bool {
    for y in 0..=1 {
        for x in -HYDRATION_RADIUS..=HYDRATION_RADIUS {
            for z in -HYDRATION_RADIUS..=HYDRATION_RADIUS {
                if matches!(
                    world.block_at(pos.offset(x, y, z)),
                    Block::Liquid(l) if l.species == LiquidSpecies::Water
                ) {
                    return true;
                }
            }
        }
    }
    false
}

impl BlockBehavior for Farmland {
    fn to_block(&self) -> Block {
        Block::Farmland(*self)
    }

    fn collision_boxes(&self) -> Vec<Aabb> {
        vec![Aabb::one().trim(Facing::Up, 1.0 / 16.0)]
    }

    fn on_nearby_block_change(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        if ctx.world.block_at(pos.up()).is_solid() {
            ctx.world.set_block(pos, Block::Dirt);
        }
    }

    fn ticks_randomly(&self) -> bool {
        true
    }

    fn on_random_tick(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        let wetness = self.wetness();
        if !can_hydrate(&*ctx.world, pos) {
            if wetness == 0 {
                ctx.world.set_block(pos, Block::Dirt);
            } else if let Ok(drier) = Farmland::new(wetness - 1) {
                ctx.world.set_block_with(pos, Block::Farmland(drier), false);
            }
        } else if wetness < Farmland::MAX_WETNESS {
            if let Ok(wet) = Farmland::new(Farmland::MAX_WETNESS) {
                ctx.world.set_block_with(pos, Block::Farmland(wet), false);
            }
        }
    }

    fn on_entity_land(&self, ctx: &mut BlockContext<'_>, pos: BlockPos, entity: &mut dyn Entity) {
        if !entity.is_living() || ctx.rng.gen::<f32>() >= entity.fall_distance() - 0.5 {
            return;
        }
        if ctx.call(&BlockEvent::Trample { pos }) {
            trace!("farmland at {:?} trampled", pos);
            ctx.world.set_block(pos, Block::Dirt);
        }
    }

    fn drops_for_compatible_tool(&self, _item: &Item, _rng: &mut dyn RngCore) -> Vec<Item> {
        vec![Item::block(BlockKind::Dirt)]
    }
}
