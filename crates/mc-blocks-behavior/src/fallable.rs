//! Blocks that fall when nothing holds them up (sand, gravel, snow).

use tracing::trace;

use mc_blocks_state::{Block, BlockPos};

use crate::behavior::BlockBehavior;
use crate::world::BlockContext;

/// Turn `block` at `pos` into a falling entity if the space below can be
/// replaced.
pub fn fall_if_unsupported(ctx: &mut BlockContext<'_>, pos: BlockPos, block: Block) -> bool {
    let below = ctx.world.block_at(pos.down());
    if !below.can_be_replaced() {
        return false;
    }
    trace!("{} at {:?} starts falling", block.name(), pos);
    ctx.world.set_block(pos, Block::Air);
    ctx.world.spawn_falling_block(pos, block);
    true
}
