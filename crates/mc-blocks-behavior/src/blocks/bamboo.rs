//! Bamboo stalks and bamboo shoots.

use rand::{Rng, RngCore};
use tracing::trace;

use mc_blocks_state::{
    bamboo_max_height, Aabb, Bamboo, BambooSapling, Block, BlockKind, BlockPos, Facing, LeafSize,
    SupportType, Vec3,
};

use crate::behavior::BlockBehavior;
use crate::event::BlockEvent;
use crate::item::{Item, ItemKind};
use crate::transaction::{self, Actor, BlockTransaction, PlaceRequest};
use crate::world::{BlockContext, World};

/// Full light needed for a ready stalk to grow.
const GROW_LIGHT: u8 = 9;
/// Height from which new stem segments are thick.
const THICK_HEIGHT: i32 = 4;

fn is_soil(block: &Block) -> bool {
    matches!(block, Block::Dirt | Block::Grass | Block::Gravel | Block::Sand)
}

fn is_fertilizer(item: &Item) -> bool {
    item.kind == ItemKind::Fertilizer && !item.is_null()
}

fn is_bamboo_item(item: &Item) -> bool {
    item.kind == ItemKind::Block(BlockKind::Bamboo) && !item.is_null()
}

/// Topmost bamboo segment of the stalk containing `pos`.
fn seek_to_top(world: &dyn World, pos: BlockPos) -> (BlockPos, Bamboo) {
    let mut top = pos;
    let mut state = match world.block_at(pos) {
        Block::Bamboo(b) => b,
        _ => Bamboo::default(),
    };
    while let Block::Bamboo(above) = world.block_at(top.up()) {
        top = top.up();
        state = above;
    }
    (top, state)
}

/// Offer a growth to the hooks and write it if allowed.
fn commit_growth(ctx: &mut BlockContext<'_>, pos: BlockPos, blocks: Vec<(BlockPos, Block)>) -> bool {
    let event = BlockEvent::Grow {
        pos,
        blocks: blocks.clone(),
    };
    if !ctx.call(&event) {
        return false;
    }
    transaction::apply(ctx.world, blocks);
    true
}

/// Grow the stalk whose top segment is `bamboo` at `pos` by `amount`.
///
/// Fails if the space above is taken or the stalk is already `max_height`
/// tall.
fn grow(bamboo: &Bamboo, ctx: &mut BlockContext<'_>, pos: BlockPos, max_height: i32, amount: i32) -> bool {
    if !ctx.world.block_at(pos.up()).can_be_replaced() {
        return false;
    }
    let mut height = 1;
    while matches!(ctx.world.block_at(pos.offset(0, -height, 0)), Block::Bamboo(_)) {
        height += 1;
        if height >= max_height {
            return false;
        }
    }

    let new_height = height + amount;
    let stem = Bamboo {
        thick: bamboo.thick || new_height >= THICK_HEIGHT,
        leaf_size: LeafSize::None,
        ready: false,
    };
    let small = Bamboo {
        leaf_size: LeafSize::Small,
        ..stem
    };
    let big = Bamboo {
        leaf_size: LeafSize::Large,
        ..stem
    };

    let mut segments = match new_height {
        2 => vec![small],
        3 => vec![small, small],
        4 => vec![big, small, stem, stem],
        h if h > 4 => vec![big, big, small],
        _ => Vec::new(),
    };
    if new_height > 4 {
        let stems = amount.min(new_height - segments.len() as i32);
        segments.extend((0..stems).map(|_| stem));
    }

    let blocks = segments
        .into_iter()
        .enumerate()
        .map(|(idx, segment)| (pos.offset(0, amount - idx as i32, 0), Block::Bamboo(segment)))
        .collect();
    trace!("bamboo at {:?} growing to height {}", pos, new_height);
    commit_growth(ctx, pos, blocks)
}

fn max_height_at(pos: BlockPos) -> i32 {
    bamboo_max_height(pos.x, pos.z)
}

impl BlockBehavior for Bamboo {
    fn to_block(&self) -> Block {
        Block::Bamboo(*self)
    }

    /// The stalk sits in the north-west corner of its cell.
    fn collision_boxes(&self) -> Vec<Aabb> {
        let inset = 1.0 - (if self.thick { 3.0 } else { 2.0 }) / 16.0;
        vec![Aabb::one().trim(Facing::South, inset).trim(Facing::East, inset)]
    }

    fn support_type(&self, _face: Facing) -> SupportType {
        SupportType::None
    }

    fn place(&self, tx: &mut BlockTransaction<'_>, req: &PlaceRequest) -> bool {
        let below = tx.fetch_block(req.pos.down());
        if !is_soil(&below) && !matches!(below, Block::Bamboo(_)) {
            return false;
        }
        tx.add_block(req.pos, self.to_block());
        true
    }

    fn on_nearby_block_change(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        let below = ctx.world.block_at(pos.down());
        if !is_soil(&below) && !matches!(below, Block::Bamboo(_)) {
            ctx.world.use_break_on(pos);
        }
    }

    fn on_interact(
        &self,
        ctx: &mut BlockContext<'_>,
        pos: BlockPos,
        item: &mut Item,
        _face: Facing,
        _click: Vec3,
        _actor: Option<&Actor>,
    ) -> bool {
        if is_bamboo_item(item) {
            item.pop();
            return true;
        }
        if !is_fertilizer(item) {
            return false;
        }
        let (top, state) = seek_to_top(&*ctx.world, pos);
        let amount = ctx.rng.gen_range(1..=2);
        let grown = grow(&state, ctx, top, max_height_at(top), amount);
        if grown {
            item.pop();
        }
        grown
    }

    fn ticks_randomly(&self) -> bool {
        true
    }

    fn on_random_tick(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        let mut bamboo = *self;
        if bamboo.ready {
            bamboo.ready = false;
            if ctx.world.full_light_at(pos) < GROW_LIGHT || !grow(&bamboo, ctx, pos, max_height_at(pos), 1) {
                ctx.world.set_block(pos, Block::Bamboo(bamboo));
            }
        } else if ctx.world.block_at(pos.up()).can_be_replaced() {
            bamboo.ready = true;
            ctx.world.set_block(pos, Block::Bamboo(bamboo));
        }
    }
}

/// Turn the shoot at `pos` into a two-block stalk.
fn grow_sapling(ctx: &mut BlockContext<'_>, pos: BlockPos) -> bool {
    if !ctx.world.block_at(pos.up()).can_be_replaced() {
        return false;
    }
    let stalk = Bamboo::default();
    let top = Bamboo {
        leaf_size: LeafSize::Small,
        ..stalk
    };
    commit_growth(
        ctx,
        pos,
        vec![(pos, Block::Bamboo(stalk)), (pos.up(), Block::Bamboo(top))],
    )
}

impl BlockBehavior for BambooSapling {
    fn to_block(&self) -> Block {
        Block::BambooSapling(*self)
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
        if !is_soil(&tx.fetch_block(req.pos.down())) {
            return false;
        }
        tx.add_block(req.pos, self.to_block());
        true
    }

    fn on_nearby_block_change(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        if !is_soil(&ctx.world.block_at(pos.down())) {
            ctx.world.use_break_on(pos);
        }
    }

    fn on_interact(
        &self,
        ctx: &mut BlockContext<'_>,
        pos: BlockPos,
        item: &mut Item,
        _face: Facing,
        _click: Vec3,
        _actor: Option<&Actor>,
    ) -> bool {
        if is_fertilizer(item) && grow_sapling(ctx, pos) {
            item.pop();
            return true;
        }
        false
    }

    fn ticks_randomly(&self) -> bool {
        true
    }

    fn on_random_tick(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        let mut sapling = *self;
        if sapling.ready {
            sapling.ready = false;
            if ctx.world.full_light_at(pos) < GROW_LIGHT || !grow_sapling(ctx, pos) {
                ctx.world.set_block(pos, Block::BambooSapling(sapling));
            }
        } else if ctx.world.block_at(pos.up()).can_be_replaced() {
            sapling.ready = true;
            ctx.world.set_block(pos, Block::BambooSapling(sapling));
        }
    }

    fn drops_for_compatible_tool(&self, _item: &Item, _rng: &mut dyn RngCore) -> Vec<Item> {
        vec![Item::block(BlockKind::Bamboo)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{AllowAll, BlockEventKind, EventLog};
    use crate::memory::MemoryWorld;
    use crate::transaction::place_block;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f64 = 1e-9;

    fn stalk(world: &mut MemoryWorld, base: BlockPos, height: i32) {
        world.set_block_with(base.down(), Block::Dirt, false);
        for y in 0..height {
            world.set_block_with(base.offset(0, y, 0), Block::Bamboo(Bamboo::default()), false);
        }
    }

    fn column(world: &MemoryWorld, base: BlockPos) -> Vec<Bamboo> {
        let mut out = Vec::new();
        let mut pos = base;
        while let Block::Bamboo(b) = world.block_at(pos) {
            out.push(b);
            pos = pos.up();
        }
        out
    }

    #[test]
    fn box_sits_in_the_north_west_corner() {
        let thin = Bamboo::default().collision_boxes()[0];
        assert!((thin.max_x - 2.0 / 16.0).abs() < EPS);
        assert!((thin.max_z - 2.0 / 16.0).abs() < EPS);
        assert!(thin.min_x.abs() < EPS);
        let thick = Bamboo {
            thick: true,
            ..Bamboo::default()
        }
        .collision_boxes()[0];
        assert!((thick.max_x - 3.0 / 16.0).abs() < EPS);
        assert_eq!(Bamboo::default().support_type(Facing::Up), SupportType::None);
    }

    #[test]
    fn placement_needs_soil_or_bamboo() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        world.set_block_with(BlockPos::new(0, 0, 0), Block::Stone, false);
        world.set_block_with(BlockPos::new(1, 0, 0), Block::Sand, false);
        let bamboo = Block::Bamboo(Bamboo::default());
        world.with_context(&mut AllowAll, &mut rng, |ctx| {
            assert!(!place_block(ctx, bamboo, &PlaceRequest::new(BlockPos::new(0, 1, 0), Facing::Up)));
            assert!(place_block(ctx, bamboo, &PlaceRequest::new(BlockPos::new(1, 1, 0), Facing::Up)));
            assert!(place_block(ctx, bamboo, &PlaceRequest::new(BlockPos::new(1, 2, 0), Facing::Up)));
        });
        assert_eq!(world.block_at(BlockPos::new(0, 1, 0)), Block::Air);
        assert_eq!(world.block_at(BlockPos::new(1, 2, 0)), bamboo);
    }

    #[test]
    fn bamboo_item_is_consumed_without_growth() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let base = BlockPos::new(0, 1, 0);
        stalk(&mut world, base, 2);
        world.set_block_with(base.offset(0, 2, 0), Block::Stone, false);
        let before: Vec<_> = world.blocks().collect();
        let mut item = Item::new(ItemKind::Block(BlockKind::Bamboo), 2);
        let mut events = EventLog::new();
        let used = world.with_context(&mut events, &mut rng, |ctx| {
            Bamboo::default().on_interact(ctx, base, &mut item, Facing::North, Vec3::ZERO, None)
        });
        assert!(used);
        assert_eq!(item.count, 1);
        assert_eq!(events.count(BlockEventKind::Grow), 0);
        assert_eq!(world.blocks().collect::<Vec<_>>(), before);
    }

    #[test]
    fn fertilizer_grows_the_stalk() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let base = BlockPos::new(0, 1, 0);
        stalk(&mut world, base, 1);
        let mut item = Item::new(ItemKind::Fertilizer, 1);
        let mut events = EventLog::new();
        let used = world.with_context(&mut events, &mut rng, |ctx| {
            Bamboo::default().on_interact(ctx, base, &mut item, Facing::North, Vec3::ZERO, None)
        });
        assert!(used);
        assert!(item.is_null());
        assert_eq!(events.count(BlockEventKind::Grow), 1);
        let col = column(&world, base);
        assert!(col.len() == 2 || col.len() == 3);
        assert_eq!(col.last().map(|b| b.leaf_size), Some(LeafSize::Small));
    }

    #[test]
    fn growth_to_four_thickens_and_adds_big_leaves() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let base = BlockPos::new(0, 1, 0);
        stalk(&mut world, base, 3);
        let top = base.offset(0, 2, 0);
        let grown = world.with_context(&mut AllowAll, &mut rng, |ctx| grow(&Bamboo::default(), ctx, top, 16, 1));
        assert!(grown);
        let col = column(&world, base);
        assert_eq!(col.len(), 4);
        assert_eq!(col[3].leaf_size, LeafSize::Large);
        assert_eq!(col[2].leaf_size, LeafSize::Small);
        assert!(col.iter().all(|b| b.thick));
    }

    #[test]
    fn growth_stops_at_max_height() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let base = BlockPos::new(0, 1, 0);
        stalk(&mut world, base, 5);
        let top = base.offset(0, 4, 0);
        let grown = world.with_context(&mut AllowAll, &mut rng, |ctx| grow(&Bamboo::default(), ctx, top, 5, 1));
        assert!(!grown);
        assert_eq!(column(&world, base).len(), 5);
    }

    #[test]
    fn cancelled_growth_writes_nothing() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let base = BlockPos::new(0, 1, 0);
        stalk(&mut world, base, 1);
        let mut item = Item::new(ItemKind::Fertilizer, 1);
        let mut events = EventLog::cancelling([BlockEventKind::Grow]);
        let used = world.with_context(&mut events, &mut rng, |ctx| {
            Bamboo::default().on_interact(ctx, base, &mut item, Facing::North, Vec3::ZERO, None)
        });
        assert!(!used);
        assert_eq!(item.count, 1);
        assert_eq!(column(&world, base).len(), 1);
    }

    #[test]
    fn random_ticks_alternate_ready_and_grow() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let base = BlockPos::new(0, 1, 0);
        stalk(&mut world, base, 1);
        world.with_context(&mut AllowAll, &mut rng, |ctx| {
            Bamboo::default().on_random_tick(ctx, base);
        });
        let ready = world.block_at(base);
        assert_eq!(ready, Block::Bamboo(Bamboo { ready: true, ..Bamboo::default() }));
        world.with_context(&mut AllowAll, &mut rng, |ctx| ready.on_random_tick(ctx, base));
        assert_eq!(column(&world, base).len(), 2);
    }

    #[test]
    fn dark_stalk_only_clears_ready() {
        let mut world = MemoryWorld::new().with_sky_light(0);
        let mut rng = StdRng::seed_from_u64(1);
        let base = BlockPos::new(0, 1, 0);
        stalk(&mut world, base, 1);
        let ready = Block::Bamboo(Bamboo { ready: true, ..Bamboo::default() });
        world.set_block_with(base, ready, false);
        world.with_context(&mut AllowAll, &mut rng, |ctx| ready.on_random_tick(ctx, base));
        assert_eq!(column(&world, base), vec![Bamboo::default()]);
    }

    #[test]
    fn losing_soil_breaks_the_stalk() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let base = BlockPos::new(0, 1, 0);
        stalk(&mut world, base, 2);
        world.set_block(base.down(), Block::Stone);
        world.run_ticks(3, &mut AllowAll, &mut rng, 0);
        assert_eq!(world.block_at(base), Block::Air);
        assert_eq!(world.block_at(base.up()), Block::Air);
    }

    #[test]
    fn fertilized_shoot_becomes_a_stalk() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let pos = BlockPos::new(0, 1, 0);
        world.set_block_with(pos.down(), Block::Grass, false);
        world.set_block_with(pos, Block::BambooSapling(BambooSapling::default()), false);
        let mut item = Item::new(ItemKind::Fertilizer, 3);
        let used = world.with_context(&mut AllowAll, &mut rng, |ctx| {
            BambooSapling::default().on_interact(ctx, pos, &mut item, Facing::Up, Vec3::ZERO, None)
        });
        assert!(used);
        assert_eq!(item.count, 2);
        assert_eq!(world.block_at(pos), Block::Bamboo(Bamboo::default()));
        assert_eq!(
            world.block_at(pos.up()),
            Block::Bamboo(Bamboo {
                leaf_size: LeafSize::Small,
                ..Bamboo::default()
            })
        );
    }

    #[test]
    fn shoot_drops_bamboo() {
        let mut rng = StdRng::seed_from_u64(1);
        let drops = Block::BambooSapling(BambooSapling::default()).drops_for(&Item::empty(), &mut rng);
        assert_eq!(drops, vec![Item::block(BlockKind::Bamboo)]);
    }
}
