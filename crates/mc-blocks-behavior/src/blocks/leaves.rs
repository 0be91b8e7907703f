//! Leaves and their decay when cut off from a log.

use std::collections::HashSet;

use rand::{Rng, RngCore};
use tracing::trace;

use mc_blocks_state::{Block, BlockPos, Facing, Leaves, SupportType};

use crate::behavior::BlockBehavior;
use crate::event::BlockEvent;
use crate::item::{Item, ItemKind, ToolType};
use crate::transaction::{BlockTransaction, PlaceRequest};
use crate::world::{BlockContext, World};

/// How many leaves deep the log search walks.
const LOG_SEARCH_DISTANCE: u32 = 4;

/// Depth-first search for a log through connected leaves.
fn find_log(world: &dyn World, pos: BlockPos, visited: &mut HashSet<BlockPos>, distance: u32) -> bool {
    if !visited.insert(pos) {
        return false;
    }
    match world.block_at(pos) {
        Block::Log => true,
        Block::Leaves(_) if distance <= LOG_SEARCH_DISTANCE => Facing::ALL
            .into_iter()
            .any(|face| find_log(world, pos.side(face), visited, distance + 1)),
        _ => false,
    }
}

impl BlockBehavior for Leaves {
    fn to_block(&self) -> Block {
        Block::Leaves(*self)
    }

    fn support_type(&self, _face: Facing) -> SupportType {
        SupportType::None
    }

    /// Placed leaves are permanent.
    fn place(&self, tx: &mut BlockTransaction<'_>, req: &PlaceRequest) -> bool {
        let leaves = Leaves { no_decay: true, ..*self };
        tx.add_block(req.pos, Block::Leaves(leaves));
        true
    }

    fn on_nearby_block_change(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        if !self.no_decay && !self.check_decay {
            let flagged = Leaves { check_decay: true, ..*self };
            ctx.world.set_block_with(pos, Block::Leaves(flagged), false);
        }
    }

    fn ticks_randomly(&self) -> bool {
        !self.no_decay && self.check_decay
    }

    fn on_random_tick(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        if self.no_decay || !self.check_decay {
            return;
        }
        let allowed = ctx.call(&BlockEvent::LeavesDecay { pos });
        if !allowed || find_log(&*ctx.world, pos, &mut HashSet::new(), 0) {
            let settled = Leaves { check_decay: false, ..*self };
            ctx.world.set_block_with(pos, Block::Leaves(settled), false);
        } else {
            trace!("leaves at {:?} decayed", pos);
            ctx.world.use_break_on(pos);
        }
    }

    fn drops_for_compatible_tool(&self, item: &Item, rng: &mut dyn RngCore) -> Vec<Item> {
        if item.tool_type() == ToolType::Shears {
            return vec![Item::block(self.to_block().kind())];
        }
        let mut drops = Vec::new();
        if rng.gen_range(1..=20) == 1 {
            drops.push(Item::new(ItemKind::Sapling(self.tree_type), 1));
        }
        if self.tree_type.drops_apples() && rng.gen_range(1..=200) == 1 {
            drops.push(Item::new(ItemKind::Apple, 1));
        }
        if rng.gen_range(1..=50) == 1 {
            drops.push(Item::new(ItemKind::Stick, rng.gen_range(1..=2)));
        }
        drops
    }
}
