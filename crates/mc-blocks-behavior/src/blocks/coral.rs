//! Coral plants and coral blocks, which die when no water touches them.

use rand::{Rng, RngCore};
use tracing::debug;

use mc_blocks_state::{Aabb, Block, BlockPos, Coral, CoralBlock, CoralTyped, Facing, LiquidSpecies, SupportType};

use crate::behavior::{has_center_support, BlockBehavior};
use crate::event::BlockEvent;
use crate::item::{Item, ItemKind};
use crate::transaction::{BlockTransaction, PlaceRequest};
use crate::world::{BlockContext, World};

/// Delay range before a disturbed coral checks for water.
const DEATH_CHECK_MIN: u32 = 40;
const DEATH_CHECK_MAX: u32 = 200;

fn is_covered_with_water(world: &dyn World, pos: BlockPos) -> bool {
    pos.sides()
        .into_iter()
        .any(|side| matches!(world.block_at(side), Block::Liquid(l) if l.species == LiquidSpecies::Water))
}

fn schedule_death_check(ctx: &mut BlockContext<'_>, pos: BlockPos, coral: CoralTyped) {
    if !coral.dead {
        let delay = ctx.rng.gen_range(DEATH_CHECK_MIN..=DEATH_CHECK_MAX);
        ctx.world.schedule_delayed_update(pos, delay);
    }
}

/// Kill the coral at `pos` if it is alive and dry. `dead` is its dead form.
fn check_death(ctx: &mut BlockContext<'_>, pos: BlockPos, coral: CoralTyped, dead: Block) {
    if coral.dead || is_covered_with_water(&*ctx.world, pos) {
        return;
    }
    if ctx.call(&BlockEvent::Death { pos, new_state: dead }) {
        debug!("coral at {:?} dried out", pos);
        ctx.world.set_block(pos, dead);
    }
}

fn killed(coral: CoralTyped) -> CoralTyped {
    CoralTyped { dead: true, ..coral }
}

fn rests_on_center_support(below: &Block) -> bool {
    has_center_support(below, Facing::Up)
}

impl BlockBehavior for Coral {
    fn to_block(&self) -> Block {
        Block::Coral(*self)
    }

    fn collision_boxes(&self) -> Vec<Aabb> {
        Vec::new()
    }

    fn support_type(&self, _face: Facing) -> SupportType {
        SupportType::None
    }

    fn place(&self, tx: &mut BlockTransaction<'_>, req: &PlaceRequest) -> bool {
        if !rests_on_center_support(&tx.fetch_block(req.pos.down())) {
            return false;
        }
        tx.add_block(req.pos, self.to_block());
        true
    }

    fn on_nearby_block_change(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        if !rests_on_center_support(&ctx.world.block_at(pos.down())) {
            ctx.world.use_break_on(pos);
        } else {
            schedule_death_check(ctx, pos, self.coral);
        }
    }

    fn on_scheduled_update(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        let dead = Block::Coral(Coral { coral: killed(self.coral) });
        check_death(ctx, pos, self.coral, dead);
    }

    fn drops_for_compatible_tool(&self, _item: &Item, _rng: &mut dyn RngCore) -> Vec<Item> {
        Vec::new()
    }
}

impl BlockBehavior for CoralBlock {
    fn to_block(&self) -> Block {
        Block::CoralBlock(*self)
    }

    fn on_nearby_block_change(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        schedule_death_check(ctx, pos, self.coral);
    }

    fn on_scheduled_update(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        let dead = Block::CoralBlock(CoralBlock { coral: killed(self.coral) });
        check_death(ctx, pos, self.coral, dead);
    }

    /// Always the dead form.
    fn drops_for_compatible_tool(&self, _item: &Item, _rng: &mut dyn RngCore) -> Vec<Item> {
        vec![Item::new(ItemKind::DeadCoralBlock(self.coral.coral_type), 1)]
    }
}
