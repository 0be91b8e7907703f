//! Plain rails. Track shape is kept as placed.

use mc_blocks_state::{Aabb, Block, BlockPos, Facing, Rail, SupportType};

use crate::behavior::BlockBehavior;
use crate::transaction::{BlockTransaction, PlaceRequest};
use crate::world::BlockContext;

fn has_bed(below: &Block) -> bool {
    below.support_type(Facing::Up).has_edge_support()
}

impl BlockBehavior for Rail {
    fn to_block(&self) -> Block {
        Block::Rail(*self)
    }

    fn can_be_flowed_into(&self) -> bool {
        true
    }

    fn collision_boxes(&self) -> Vec<Aabb> {
        Vec::new()
    }

    fn support_type(&self, _face: Facing) -> SupportType {
        SupportType::None
    }

    fn place(&self, tx: &mut BlockTransaction<'_>, req: &PlaceRequest) -> bool {
        if !has_bed(&tx.fetch_block(req.pos.down())) {
            return false;
        }
        tx.add_block(req.pos, self.to_block());
        true
    }

    /// Breaks when the bed goes, or when a slope loses the block it climbs onto.
    fn on_nearby_block_change(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        let unsupported = !has_bed(&ctx.world.block_at(pos.down()))
            || self
                .shape
                .ascending_toward()
                .is_some_and(|side| ctx.world.block_at(pos.side(side)).is_transparent());
        if unsupported {
            ctx.world.use_break_on(pos);
        }
    }
}
