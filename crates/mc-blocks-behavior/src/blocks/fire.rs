//! Fire: aging, burning out, destroying flammable neighbors, and spreading.

use rand::{Rng, RngCore};
use tracing::{debug, trace};

use mc_blocks_state::{Aabb, Block, BlockPos, Facing, Fire, SupportType};

use crate::behavior::BlockBehavior;
use crate::entity::{DamageCause, Entity};
use crate::event::BlockEvent;
use crate::item::Item;
use crate::world::{BlockContext, World};

/// Ticks between fire updates.
const UPDATE_DELAY_MIN: u32 = 30;
const UPDATE_DELAY_MAX: u32 = 40;
/// Burn chance bounds for side and vertical neighbors.
const SIDE_BURN_BOUND: u32 = 300;
const VERTICAL_BURN_BOUND: u32 = 350;
/// Age above which fire with nothing to burn goes out.
const IDLE_MAX_AGE: u8 = 3;

const FIRE_DAMAGE: f32 = 1.0;
const BURN_SECONDS: u32 = 8;

fn has_adjacent_flammable_blocks(world: &dyn World, pos: BlockPos) -> bool {
    pos.sides().into_iter().any(|side| world.block_at(side).is_flammable())
}

fn schedule_update(ctx: &mut BlockContext<'_>, pos: BlockPos) {
    let delay = ctx.rng.gen_range(UPDATE_DELAY_MIN..=UPDATE_DELAY_MAX);
    ctx.world.schedule_delayed_update(pos, delay);
}

/// Fire that may be one step older than `fire`.
fn offspring(fire: &Fire, ctx: &mut BlockContext<'_>) -> Fire {
    let age = fire.age() + (ctx.rng.gen_range(0..=4u8) >> 2);
    Fire::new(age.min(Fire::MAX_AGE)).unwrap_or(*fire)
}

/// Put `new_state` at `pos` if the spread is allowed.
fn spread_block(ctx: &mut BlockContext<'_>, source: BlockPos, pos: BlockPos, new_state: Fire) -> bool {
    let new_state = Block::Fire(new_state);
    if !ctx.call(&BlockEvent::Spread { pos, source, new_state }) {
        return false;
    }
    ctx.world.set_block(pos, new_state);
    true
}

fn burn_block(fire: &Fire, ctx: &mut BlockContext<'_>, pos: BlockPos, target: BlockPos, chance_bound: u32) {
    let block = ctx.world.block_at(target);
    if ctx.rng.gen_range(0..=chance_bound) >= u32::from(block.info().flammability) {
        return;
    }
    if !ctx.call(&BlockEvent::Burn { pos: target, cause: pos }) {
        return;
    }
    if ctx.world.block_at(target) != block {
        return;
    }
    debug!("fire at {:?} burned {} at {:?}", pos, block.name(), target);
    let spread = if ctx.rng.gen_range(0..=u32::from(fire.age()) + 9) < 5 {
        let new_fire = offspring(fire, ctx);
        spread_block(ctx, pos, target, new_fire)
    } else {
        false
    };
    if !spread {
        ctx.world.set_block(target, Block::Air);
    }
}

fn burn_blocks_around(fire: &Fire, ctx: &mut BlockContext<'_>, pos: BlockPos) {
    for facing in Facing::HORIZONTAL {
        burn_block(fire, ctx, pos, pos.side(facing), SIDE_BURN_BOUND);
    }
    burn_block(fire, ctx, pos, pos.up(), VERTICAL_BURN_BOUND);
    burn_block(fire, ctx, pos, pos.down(), VERTICAL_BURN_BOUND);
}

/// Try to light air in the box from one below to four above `pos`.
fn spread_fire(fire: &Fire, ctx: &mut BlockContext<'_>, pos: BlockPos) {
    let difficulty_bonus = ctx.world.difficulty().level() * 7;
    let age_divisor = i32::from(fire.age()) + 30;
    for y in -1..=4 {
        let chance_bound = 100 + if y > 1 { (y - 1) * 100 } else { 0 };
        for z in -1..=1 {
            for x in -1..=1 {
                if x == 0 && y == 0 && z == 0 {
                    continue;
                }
                let target = pos.offset(x, y, z);
                if !ctx.world.is_in_world(target) || !ctx.world.block_at(target).is_air() {
                    continue;
                }
                let encouragement = target
                    .sides()
                    .into_iter()
                    .map(|side| i32::from(ctx.world.block_at(side).info().flame_encouragement))
                    .max()
                    .unwrap_or(0);
                if encouragement <= 0 {
                    continue;
                }
                let max_chance = (encouragement + 40 + difficulty_bonus) / age_divisor;
                if max_chance > 0 && ctx.rng.gen_range(0..chance_bound) <= max_chance {
                    let new_fire = offspring(fire, ctx);
                    if spread_block(ctx, pos, target, new_fire) {
                        trace!("fire spread from {:?} to {:?}", pos, target);
                    }
                }
            }
        }
    }
}

impl BlockBehavior for Fire {
    fn to_block(&self) -> Block {
        Block::Fire(*self)
    }

    fn can_be_replaced(&self) -> bool {
        true
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

    fn on_nearby_block_change(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        if ctx.world.block_at(pos.down()).is_transparent() && !has_adjacent_flammable_blocks(&*ctx.world, pos) {
            ctx.world.set_block(pos, Block::Air);
        } else {
            schedule_update(ctx, pos);
        }
    }

    fn ticks_randomly(&self) -> bool {
        true
    }

    fn on_random_tick(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        let down = ctx.world.block_at(pos.down());
        let mut fire = *self;
        let mut result = None;
        if fire.age() < Fire::MAX_AGE && ctx.rng.gen_range(0..=2) == 0 {
            fire = Fire::new(fire.age() + 1).unwrap_or(fire);
            result = Some(Block::Fire(fire));
        }

        let mut can_spread = true;
        if fire.age() == Fire::MAX_AGE {
            if !down.is_flammable() && ctx.rng.gen_range(0..=3) == 3 {
                can_spread = false;
                result = Some(Block::Air);
            }
        } else if !has_adjacent_flammable_blocks(&*ctx.world, pos) {
            can_spread = false;
            if down.is_transparent() || fire.age() > IDLE_MAX_AGE {
                result = Some(Block::Air);
            }
        }

        if let Some(block) = result {
            ctx.world.set_block(pos, block);
        }
        schedule_update(ctx, pos);
        if can_spread {
            burn_blocks_around(&fire, ctx, pos);
            spread_fire(&fire, ctx, pos);
        }
    }

    fn on_scheduled_update(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        self.on_random_tick(ctx, pos);
    }

    fn on_entity_inside(&self, ctx: &mut BlockContext<'_>, pos: BlockPos, entity: &mut dyn Entity) -> bool {
        entity.attack(DamageCause::Fire, FIRE_DAMAGE);
        if !entity.is_projectile()
            && ctx.call(&BlockEvent::Combust {
                pos,
                seconds: BURN_SECONDS,
            })
        {
            entity.set_on_fire(BURN_SECONDS);
        }
        true
    }

    fn drops_for_compatible_tool(&self, _item: &Item, _rng: &mut dyn RngCore) -> Vec<Item> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::BasicEntity;
    use crate::event::{AllowAll, BlockEventKind, EventLog};
    use crate::memory::MemoryWorld;
    use mc_blocks_state::{Leaves, TreeType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fire(age: u8) -> Fire {
        Fire::new(age).unwrap()
    }

    fn leaves() -> Block {
        Block::Leaves(Leaves::new(TreeType::Oak))
    }

    #[test]
    fn fire_is_replaceable_and_has_no_box() {
        let f = Block::Fire(fire(0));
        assert!(f.can_be_replaced());
        assert!(f.can_be_flowed_into());
        assert!(f.collision_boxes().is_empty());
        assert_eq!(f.light_emission(), 15);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(f.drops_for(&Item::empty(), &mut rng).is_empty());
    }

    #[test]
    fn old_fire_with_nothing_to_burn_goes_out() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let pos = BlockPos::new(0, 1, 0);
        world.set_block_with(pos.down(), Block::Stone, false);
        let old = fire(10);
        world.set_block_with(pos, Block::Fire(old), false);
        world.with_context(&mut AllowAll, &mut rng, |ctx| old.on_random_tick(ctx, pos));
        assert_eq!(world.block_at(pos), Block::Air);
    }

    #[test]
    fn young_fire_on_stone_lingers_and_reschedules() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let pos = BlockPos::new(0, 1, 0);
        world.set_block_with(pos.down(), Block::Stone, false);
        let young = fire(0);
        world.set_block_with(pos, Block::Fire(young), false);
        world.with_context(&mut AllowAll, &mut rng, |ctx| young.on_random_tick(ctx, pos));
        assert!(matches!(world.block_at(pos), Block::Fire(f) if f.age() <= 1));
        let due = world.due_at(pos).unwrap();
        assert!((30..=40).contains(&due));
    }

    #[test]
    fn unsupported_fire_is_removed_on_neighbor_change() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let pos = BlockPos::new(0, 1, 0);
        world.set_block(pos, Block::Fire(fire(0)));
        world.run_ticks(1, &mut AllowAll, &mut rng, 0);
        assert_eq!(world.block_at(pos), Block::Air);
    }

    #[test]
    fn supported_fire_schedules_on_neighbor_change() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let pos = BlockPos::new(0, 1, 0);
        world.set_block_with(pos.down(), Block::Stone, false);
        world.set_block(pos, Block::Fire(fire(0)));
        world.run_ticks(1, &mut AllowAll, &mut rng, 0);
        assert!(world.is_scheduled(pos));
    }

    #[test]
    fn fire_consumes_surrounding_leaves() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(5);
        let pos = BlockPos::new(0, 1, 0);
        world.set_block_with(pos.down(), Block::Stone, false);
        for facing in Facing::HORIZONTAL {
            world.set_block_with(pos.side(facing), leaves(), false);
        }
        world.set_block_with(pos, Block::Fire(fire(0)), false);
        let mut events = EventLog::new();
        for _ in 0..40 {
            let block = world.block_at(pos);
            if !matches!(block, Block::Fire(_)) {
                break;
            }
            world.with_context(&mut events, &mut rng, |ctx| block.on_random_tick(ctx, pos));
        }
        assert!(events.count(BlockEventKind::Burn) > 0);
        assert!(world.count(|b| matches!(b, Block::Leaves(_))) < 4);
    }

    #[test]
    fn cancelled_burns_leave_blocks_intact() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(5);
        let pos = BlockPos::new(0, 1, 0);
        world.set_block_with(pos.down(), Block::Stone, false);
        for facing in Facing::HORIZONTAL {
            world.set_block_with(pos.side(facing), leaves(), false);
        }
        let f = fire(0);
        world.set_block_with(pos, Block::Fire(f), false);
        let mut events = EventLog::cancelling([BlockEventKind::Burn, BlockEventKind::Spread]);
        for _ in 0..20 {
            world.with_context(&mut events, &mut rng, |ctx| f.on_random_tick(ctx, pos));
        }
        assert!(events.count(BlockEventKind::Burn) > 0);
        assert_eq!(world.count(|b| matches!(b, Block::Leaves(_))), 4);
    }

    #[test]
    fn spread_only_lights_air_next_to_fuel() {
        let mut world = MemoryWorld::new().with_difficulty(crate::world::Difficulty::Hard);
        let mut rng = StdRng::seed_from_u64(9);
        let pos = BlockPos::new(0, 1, 0);
        for x in -2..=2 {
            for z in -2..=2 {
                world.set_block_with(BlockPos::new(x, 0, z), Block::Planks, false);
            }
        }
        let f = fire(0);
        world.set_block_with(pos, Block::Fire(f), false);
        let mut events = EventLog::cancelling([BlockEventKind::Burn]);
        for _ in 0..200 {
            world.with_context(&mut events, &mut rng, |ctx| {
                spread_fire(&f, ctx, pos);
            });
        }
        assert!(events.count(BlockEventKind::Spread) > 0);
        for event in &events.events {
            if let BlockEvent::Spread { pos: target, new_state, .. } = event {
                assert!(matches!(new_state, Block::Fire(_)));
                assert_eq!(target.y, 1, "no fuel reaches {target:?}");
            }
        }
    }

    #[test]
    fn entities_inside_burn() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let pos = BlockPos::new(0, 1, 0);
        let f = fire(0);
        let mut mob = BasicEntity::new(20.0);
        let mut arrow = BasicEntity::new(1.0);
        arrow.projectile = true;
        let mut events = EventLog::new();
        world.with_context(&mut events, &mut rng, |ctx| {
            assert!(f.on_entity_inside(ctx, pos, &mut mob));
            assert!(f.on_entity_inside(ctx, pos, &mut arrow));
        });
        assert_eq!(mob.health, 19.0);
        assert_eq!(mob.fire_seconds, 8);
        assert_eq!(arrow.fire_seconds, 0);
        assert_eq!(events.count(BlockEventKind::Combust), 1);

        let mut cancelled = EventLog::cancelling([BlockEventKind::Combust]);
        let mut other = BasicEntity::new(20.0);
        world.with_context(&mut cancelled, &mut rng, |ctx| f.on_entity_inside(ctx, pos, &mut other));
        assert_eq!(other.fire_seconds, 0);
        assert_eq!(other.health, 19.0);
    }
}
