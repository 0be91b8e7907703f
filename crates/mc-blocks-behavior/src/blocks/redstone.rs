//! Redstone components: repeaters, comparators, and redstone ore.
//!
//! Only placement, interaction, and lighting are modeled. Signal propagation
//! is not.

use rand::{Rng, RngCore};

use mc_blocks_state::{
    Aabb, Block, BlockPos, Facing, HorizontalFacing, RedstoneComparator, RedstoneOre, RedstoneRepeater, SupportType,
    Vec3,
};

use crate::behavior::BlockBehavior;
use crate::item::{Item, ItemKind};
use crate::transaction::{Actor, BlockTransaction, PlaceRequest};
use crate::world::BlockContext;

/// Light given off by lit redstone ore.
const LIT_ORE_LIGHT: u8 = 9;

fn diode_box() -> Vec<Aabb> {
    vec![Aabb::one().trim(Facing::Up, 7.0 / 8.0)]
}

/// Diodes face away from whoever placed them.
fn diode_facing(req: &PlaceRequest, current: HorizontalFacing) -> HorizontalFacing {
    req.actor.map_or(current, |actor| actor.facing.opposite())
}

fn break_if_unsupported(ctx: &mut BlockContext<'_>, pos: BlockPos) {
    if ctx.world.block_at(pos.down()).is_transparent() {
        ctx.world.use_break_on(pos);
    }
}

impl BlockBehavior for RedstoneRepeater {
    fn to_block(&self) -> Block {
        Block::RedstoneRepeater(*self)
    }

    fn can_be_flowed_into(&self) -> bool {
        true
    }

    fn collision_boxes(&self) -> Vec<Aabb> {
        diode_box()
    }

    fn support_type(&self, _face: Facing) -> SupportType {
        SupportType::None
    }

    fn place(&self, tx: &mut BlockTransaction<'_>, req: &PlaceRequest) -> bool {
        if tx.fetch_block(req.pos.down()).is_transparent() {
            return false;
        }
        let mut repeater = *self;
        repeater.facing = diode_facing(req, self.facing);
        tx.add_block(req.pos, Block::RedstoneRepeater(repeater));
        true
    }

    fn on_nearby_block_change(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        break_if_unsupported(ctx, pos);
    }

    /// Cycles the delay 1, 2, 3, 4, 1.
    fn on_interact(
        &self,
        ctx: &mut BlockContext<'_>,
        pos: BlockPos,
        _item: &mut Item,
        _face: Facing,
        _click: Vec3,
        _actor: Option<&Actor>,
    ) -> bool {
        let mut repeater = *self;
        if repeater.set_delay(self.next_delay()).is_ok() {
            ctx.world.set_block(pos, Block::RedstoneRepeater(repeater));
        }
        true
    }
}

impl BlockBehavior for RedstoneComparator {
    fn to_block(&self) -> Block {
        Block::RedstoneComparator(*self)
    }

    fn can_be_flowed_into(&self) -> bool {
        true
    }

    fn collision_boxes(&self) -> Vec<Aabb> {
        diode_box()
    }

    fn support_type(&self, _face: Facing) -> SupportType {
        SupportType::None
    }

    fn place(&self, tx: &mut BlockTransaction<'_>, req: &PlaceRequest) -> bool {
        if tx.fetch_block(req.pos.down()).is_transparent() {
            return false;
        }
        let comparator = RedstoneComparator {
            facing: diode_facing(req, self.facing),
            ..*self
        };
        tx.add_block(req.pos, Block::RedstoneComparator(comparator));
        true
    }

    fn on_nearby_block_change(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        break_if_unsupported(ctx, pos);
    }

    /// Toggles subtract mode.
    fn on_interact(
        &self,
        ctx: &mut BlockContext<'_>,
        pos: BlockPos,
        _item: &mut Item,
        _face: Facing,
        _click: Vec3,
        _actor: Option<&Actor>,
    ) -> bool {
        let toggled = RedstoneComparator {
            subtract: !self.subtract,
            ..*self
        };
        ctx.world.set_block(pos, Block::RedstoneComparator(toggled));
        true
    }
}

impl BlockBehavior for RedstoneOre {
    fn to_block(&self) -> Block {
        Block::RedstoneOre(*self)
    }

    fn light_emission(&self) -> u8 {
        if self.lit {
            LIT_ORE_LIGHT
        } else {
            0
        }
    }

    /// Lights up but never consumes the interaction.
    fn on_interact(
        &self,
        ctx: &mut BlockContext<'_>,
        pos: BlockPos,
        _item: &mut Item,
        _face: Facing,
        _click: Vec3,
        _actor: Option<&Actor>,
    ) -> bool {
        if !self.lit {
            ctx.world.set_block(pos, Block::RedstoneOre(RedstoneOre { lit: true }));
        }
        false
    }

    fn ticks_randomly(&self) -> bool {
        true
    }

    fn on_random_tick(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        if self.lit {
            ctx.world.set_block(pos, Block::RedstoneOre(RedstoneOre { lit: false }));
        }
    }

    fn drops_for_compatible_tool(&self, _item: &Item, rng: &mut dyn RngCore) -> Vec<Item> {
        vec![Item::new(ItemKind::RedstoneDust, rng.gen_range(4..=5))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::AllowAll;
    use crate::item::ToolType;
    use crate::memory::MemoryWorld;
    use crate::transaction::place_block;
    use crate::world::World;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f64 = 1e-9;

    fn interact(world: &mut MemoryWorld, pos: BlockPos) -> bool {
        let mut rng = StdRng::seed_from_u64(6);
        let block = world.block_at(pos);
        let mut item = Item::empty();
        world.with_context(&mut AllowAll, &mut rng, |ctx| {
            block.on_interact(ctx, pos, &mut item, Facing::Up, Vec3::ZERO, None)
        })
    }

    #[test]
    fn repeater_cycles_its_delay() {
        let mut world = MemoryWorld::new();
        let pos = BlockPos::new(0, 1, 0);
        let repeater = RedstoneRepeater::new(HorizontalFacing::EAST, 3, false).unwrap();
        world.set_block_with(pos, Block::RedstoneRepeater(repeater), false);
        let mut seen = Vec::new();
        for _ in 0..3 {
            assert!(interact(&mut world, pos));
            match world.block_at(pos) {
                Block::RedstoneRepeater(r) => seen.push(r.delay()),
                other => panic!("expected a repeater, found {other:?}"),
            }
        }
        assert_eq!(seen, vec![4, 1, 2]);
    }

    #[test]
    fn comparator_toggles_subtract_mode() {
        let mut world = MemoryWorld::new();
        let pos = BlockPos::new(0, 1, 0);
        world.set_block_with(pos, Block::RedstoneComparator(RedstoneComparator::default()), false);
        assert!(interact(&mut world, pos));
        assert!(matches!(world.block_at(pos), Block::RedstoneComparator(c) if c.subtract));
        assert!(interact(&mut world, pos));
        assert!(matches!(world.block_at(pos), Block::RedstoneComparator(c) if !c.subtract));
    }

    #[test]
    fn diodes_face_away_from_the_placer_and_need_a_floor() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(6);
        world.set_block_with(BlockPos::new(0, 0, 0), Block::Stone, false);
        world.set_block_with(BlockPos::new(1, 0, 0), Block::Glass, false);
        let actor = Actor {
            facing: HorizontalFacing::NORTH,
        };
        world.with_context(&mut AllowAll, &mut rng, |ctx| {
            let on_stone = PlaceRequest::new(BlockPos::new(0, 1, 0), Facing::Up).with_actor(actor);
            let on_glass = PlaceRequest::new(BlockPos::new(1, 1, 0), Facing::Up).with_actor(actor);
            let repeater = Block::RedstoneRepeater(RedstoneRepeater::new(HorizontalFacing::EAST, 3, true).unwrap());
            assert!(place_block(ctx, repeater, &on_stone));
            assert!(!place_block(ctx, repeater, &on_glass));
        });
        match world.block_at(BlockPos::new(0, 1, 0)) {
            Block::RedstoneRepeater(r) => {
                assert_eq!(r.facing, HorizontalFacing::SOUTH);
                assert_eq!(r.delay(), 3);
                assert!(r.powered);
            }
            other => panic!("expected a repeater, found {other:?}"),
        }
        let b = RedstoneComparator::default().collision_boxes()[0];
        assert!((b.max_y - 1.0 / 8.0).abs() < EPS);
    }

    #[test]
    fn ore_lights_on_touch_and_dims_on_random_tick() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(6);
        let pos = BlockPos::new(0, 1, 0);
        world.set_block_with(pos, Block::RedstoneOre(RedstoneOre::default()), false);
        assert!(!interact(&mut world, pos));
        let lit = world.block_at(pos);
        assert_eq!(lit, Block::RedstoneOre(RedstoneOre { lit: true }));
        assert_eq!(lit.light_emission(), 9);
        assert_eq!(world.block_light_at(pos.up()), 8);
        world.with_context(&mut AllowAll, &mut rng, |ctx| lit.on_random_tick(ctx, pos));
        assert_eq!(world.block_at(pos), Block::RedstoneOre(RedstoneOre::default()));
    }

    #[test]
    fn ore_drops_dust_with_a_pickaxe() {
        let mut rng = StdRng::seed_from_u64(6);
        let ore = Block::RedstoneOre(RedstoneOre::default());
        assert!(ore.drops_for(&Item::empty(), &mut rng).is_empty());
        let drops = ore.drops_for(&Item::tool(ToolType::Pickaxe), &mut rng);
        assert_eq!(drops.len(), 1);
        assert_eq!(drops[0].kind, ItemKind::RedstoneDust);
        assert!((4..=5).contains(&drops[0].count));
    }
}
