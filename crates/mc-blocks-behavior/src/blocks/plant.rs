//! Small plants: tall grass and flowers.

use rand::RngCore;

use mc_blocks_state::{Aabb, Block, BlockKind, BlockPos, Facing, SupportType};

use crate::behavior::BlockBehavior;
use crate::item::{Item, ToolType};
use crate::transaction::{BlockTransaction, PlaceRequest};
use crate::world::BlockContext;

pub struct Plant(pub BlockKind);

fn can_grow_on(block: &Block) -> bool {
    matches!(block, Block::Grass | Block::Dirt | Block::Farmland(_))
}

impl BlockBehavior for Plant {
    fn to_block(&self) -> Block {
        Block::new(self.0)
    }

    fn can_be_replaced(&self) -> bool {
        self.0 == BlockKind::TallGrass
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
        if !can_grow_on(&tx.fetch_block(req.pos.down())) {
            return false;
        }
        tx.add_block(req.pos, self.to_block());
        true
    }

    fn on_nearby_block_change(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        if !can_grow_on(&ctx.world.block_at(pos.down())) {
            ctx.world.use_break_on(pos);
        }
    }

    fn drops_for_compatible_tool(&self, item: &Item, _rng: &mut dyn RngCore) -> Vec<Item> {
        if self.0 == BlockKind::TallGrass && item.tool_type() != ToolType::Shears {
            return Vec::new();
        }
        vec![Item::block(self.0)]
    }
}
