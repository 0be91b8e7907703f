//! Frosted ice, which ages in light and melts back into water.

use rand::{Rng, RngCore};

use mc_blocks_state::{Block, BlockKind, BlockPos, FrostedIce};

use crate::behavior::BlockBehavior;
use crate::event::BlockEvent;
use crate::item::Item;
use crate::world::{BlockContext, World};

const UPDATE_DELAY_MIN: u32 = 20;
const UPDATE_DELAY_MAX: u32 = 40;
/// Light at which fresh ice starts to age. Each age step lowers it by one.
const MELT_LIGHT: u8 = 12;

/// Whether at least `requirement` of the eight surrounding cells on this
/// layer are frosted ice.
fn check_adjacent_blocks(world: &dyn World, pos: BlockPos, requirement: usize) -> bool {
    let mut found = 0;
    for x in -1..=1 {
        for z in -1..=1 {
            if x == 0 && z == 0 {
                continue;
            }
            if matches!(world.block_at(pos.offset(x, 0, z)), Block::FrostedIce(_)) {
                found += 1;
                if found >= requirement {
                    return true;
                }
            }
        }
    }
    false
}

fn schedule_update(ctx: &mut BlockContext<'_>, pos: BlockPos) {
    let delay = ctx.rng.gen_range(UPDATE_DELAY_MIN..=UPDATE_DELAY_MAX);
    ctx.world.schedule_delayed_update(pos, delay);
}

/// Age the ice one step, or melt it if it is already at the last age.
/// Returns true when the ice was at its last age, even if melting was
/// cancelled.
fn try_melt(ice: &FrostedIce, ctx: &mut BlockContext<'_>, pos: BlockPos) -> bool {
    if ice.age() >= FrostedIce::MAX_AGE {
        let new_state = Block::new(BlockKind::Water);
        if ctx.call(&BlockEvent::Melt { pos, new_state }) {
            ctx.world.set_block(pos, new_state);
        }
        return true;
    }
    if let Ok(older) = FrostedIce::new(ice.age() + 1) {
        ctx.world.set_block(pos, Block::FrostedIce(older));
    }
    schedule_update(ctx, pos);
    false
}

impl BlockBehavior for FrostedIce {
    fn to_block(&self) -> Block {
        Block::FrostedIce(*self)
    }

    fn on_nearby_block_change(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        if !check_adjacent_blocks(&*ctx.world, pos, 2) {
            ctx.world.use_break_on(pos);
        } else {
            schedule_update(ctx, pos);
        }
    }

    fn ticks_randomly(&self) -> bool {
        true
    }

    fn on_random_tick(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        let exposed = !check_adjacent_blocks(&*ctx.world, pos, 4) || ctx.rng.gen_range(0..=2) == 0;
        let light = ctx.world.highest_adjacent_full_light_at(pos);
        if exposed && light >= MELT_LIGHT.saturating_sub(self.age()) {
            if try_melt(self, ctx, pos) {
                for side in pos.sides() {
                    if let Block::FrostedIce(neighbor) = ctx.world.block_at(side) {
                        try_melt(&neighbor, ctx, side);
                    }
                }
            }
        } else {
            schedule_update(ctx, pos);
        }
    }

    fn on_scheduled_update(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        self.on_random_tick(ctx, pos);
    }

    fn drops_for_compatible_tool(&self, _item: &Item, _rng: &mut dyn RngCore) -> Vec<Item> {
        Vec::new()
    }
}
