//! Staged multi-block writes.

use std::collections::BTreeMap;

use tracing::trace;

use mc_blocks_state::{Block, BlockPos, Facing, HorizontalFacing, Vec3};

use crate::behavior::BlockBehavior;
use crate::item::Item;
use crate::world::{BlockContext, World};

/// Blocks staged for writing. Reads see staged blocks over the world's.
pub struct BlockTransaction<'w> {
    world: &'w dyn World,
    blocks: BTreeMap<BlockPos, Block>,
}

impl<'w> BlockTransaction<'w> {
    pub fn new(world: &'w dyn World) -> Self {
        Self {
            world,
            blocks: BTreeMap::new(),
        }
    }

    pub fn fetch_block(&self, pos: BlockPos) -> Block {
        self.blocks
            .get(&pos)
            .copied()
            .unwrap_or_else(|| self.world.block_at(pos))
    }

    pub fn add_block(&mut self, pos: BlockPos, block: Block) -> &mut Self {
        self.blocks.insert(pos, block);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn into_blocks(self) -> Vec<(BlockPos, Block)> {
        self.blocks.into_iter().collect()
    }
}

/// Write staged blocks in position order.
pub fn apply(world: &mut dyn World, blocks: Vec<(BlockPos, Block)>) {
    for (pos, block) in blocks {
        world.set_block(pos, block);
    }
}

/// Who is placing or interacting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// Horizontal direction the actor is looking.
    pub facing: HorizontalFacing,
}

/// A request to put a block at `pos`.
#[derive(Debug, Clone, Copy)]
pub struct PlaceRequest {
    /// Position being filled.
    pub pos: BlockPos,
    /// Face of the clicked block the new block is placed against.
    pub face: Facing,
    pub click: Vec3,
    pub item: Item,
    pub actor: Option<Actor>,
}

impl PlaceRequest {
    pub fn new(pos: BlockPos, face: Facing) -> Self {
        Self {
            pos,
            face,
            click: Vec3::ZERO,
            item: Item::empty(),
            actor: None,
        }
    }

    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actor = Some(actor);
        self
    }
}

/// Run `block`'s placement rules and commit the result if accepted.
///
/// A rejected placement writes nothing.
pub fn place_block(ctx: &mut BlockContext<'_>, block: Block, req: &PlaceRequest) -> bool {
    let blocks = {
        let mut tx = BlockTransaction::new(&*ctx.world);
        if !block.place(&mut tx, req) {
            trace!("rejected placement of {} at {:?}", block.name(), req.pos);
            return false;
        }
        tx.into_blocks()
    };
    apply(ctx.world, blocks);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::AllowAll;
    use crate::memory::MemoryWorld;
    use mc_blocks_state::{Bamboo, SnowLayer};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn staged_blocks_shadow_the_world() {
        let mut world = MemoryWorld::new();
        let pos = BlockPos::new(0, 1, 0);
        world.set_block_with(pos, Block::Stone, false);
        let mut tx = BlockTransaction::new(&world);
        assert!(tx.is_empty());
        tx.add_block(pos, Block::Dirt).add_block(pos.up(), Block::Sand);
        assert_eq!(tx.fetch_block(pos), Block::Dirt);
        assert_eq!(world.block_at(pos), Block::Stone);
        assert_eq!(tx.into_blocks(), vec![(pos, Block::Dirt), (pos.up(), Block::Sand)]);
    }

    #[test]
    fn rejected_placement_leaves_the_world_alone() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(4);
        let stalk = BlockPos::new(0, 1, 0);
        let snow = BlockPos::new(2, 1, 0);
        world.set_block_with(stalk.down(), Block::Stone, false);
        world.set_block_with(snow.down(), Block::Stone, false);
        world.set_block_with(snow, Block::SnowLayer(SnowLayer::new(8).unwrap()), false);
        let before: Vec<_> = world.blocks().collect();
        let pending = world.pending_updates();

        world.with_context(&mut AllowAll, &mut rng, |ctx| {
            let bamboo = Block::Bamboo(Bamboo::default());
            assert!(!place_block(ctx, bamboo, &PlaceRequest::new(stalk, Facing::Up)));
            let layer = Block::SnowLayer(SnowLayer::default());
            assert!(!place_block(ctx, layer, &PlaceRequest::new(snow, Facing::Up)));
        });

        assert_eq!(world.blocks().collect::<Vec<_>>(), before);
        assert_eq!(world.pending_updates(), pending);
    }
}
