//! Water and lava: decay propagation, source formation, and hardening.
//!
//! A liquid cell recomputes its decay from its horizontal neighbors on every
//! scheduled update, then pushes liquid down and, when it cannot fall, out
//! into the directions chosen by the world's [`FlowCostCalculator`].
//!
//! [`FlowCostCalculator`]: crate::flow_cost::FlowCostCalculator

use rand::RngCore;
use tracing::{debug, trace, warn};

use mc_blocks_state::{Aabb, Block, BlockPos, Facing, Liquid, LiquidSpecies, SupportType, Vec3};

use crate::behavior::BlockBehavior;
use crate::config::LiquidSettings;
use crate::entity::{DamageCause, Entity};
use crate::event::BlockEvent;
use crate::flow_cost::can_flow_into;
use crate::item::Item;
use crate::world::{BlockContext, World};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Decay at which a cell no longer holds liquid.
const DRY_DECAY: i32 = 8;
/// Smallest-neighbor search start, below every real decay.
const NO_NEIGHBOR: i32 = -100;
/// Horizontal water sources needed to form a new water source.
const WATER_MIN_ADJACENT_SOURCES: usize = 2;
/// Flowing lava at or below this decay hardens to cobblestone.
const COBBLESTONE_MAX_DECAY: u8 = 4;
const LAVA_DAMAGE: f32 = 4.0;
const LAVA_BURN_SECONDS: u32 = 8;
/// Downward pull added to the flow vector of blocked falling liquid.
const FALLING_PULL: f64 = -6.0;

// ---------------------------------------------------------------------------
// Per-species parameters
// ---------------------------------------------------------------------------

/// Ticks between flow updates.
pub fn tick_rate(species: LiquidSpecies, settings: &LiquidSettings) -> u32 {
    match species {
        LiquidSpecies::Water => settings.water_tick_rate,
        LiquidSpecies::Lava => settings.lava_tick_rate,
    }
}

/// Decay gained per block of horizontal flow.
pub fn flow_decay_per_block(species: LiquidSpecies, settings: &LiquidSettings) -> u8 {
    match species {
        LiquidSpecies::Water => 1,
        LiquidSpecies::Lava => settings.lava_flow_decay_per_block.max(1),
    }
}

/// Horizontal sources needed to turn a flowing cell into a source, if the
/// species forms sources at all.
pub fn min_adjacent_sources(species: LiquidSpecies) -> Option<usize> {
    match species {
        LiquidSpecies::Water => Some(WATER_MIN_ADJACENT_SOURCES),
        LiquidSpecies::Lava => None,
    }
}

/// Decay of `block` as seen from `liquid`: -1 unless it is the same species,
/// 0 when falling.
pub fn effective_flow_decay(liquid: &Liquid, block: &Block) -> i32 {
    match block {
        Block::Liquid(other) if other.is_same_species(liquid) => {
            if other.falling {
                0
            } else {
                i32::from(other.decay())
            }
        }
        _ => -1,
    }
}

fn is_water(block: &Block) -> bool {
    matches!(block, Block::Liquid(l) if l.species == LiquidSpecies::Water)
}

// ---------------------------------------------------------------------------
// Flow
// ---------------------------------------------------------------------------

/// One scheduled flow step of the liquid at `pos`.
fn update_flow(liquid: &Liquid, ctx: &mut BlockContext<'_>, pos: BlockPos) {
    let settings = ctx.world.liquid_settings();
    let per_block = flow_decay_per_block(liquid.species, &settings);
    let mut current = *liquid;

    if !current.is_source() {
        let mut smallest = NO_NEIGHBOR;
        let mut adjacent_sources = 0;
        for facing in Facing::HORIZONTAL {
            let neighbor = ctx.world.block_at(pos.side(facing));
            let decay = effective_flow_decay(&current, &neighbor);
            if decay < 0 {
                continue;
            }
            if matches!(neighbor, Block::Liquid(l) if l.is_same_species(&current) && l.is_source()) {
                adjacent_sources += 1;
            }
            if smallest < 0 || decay < smallest {
                smallest = decay;
            }
        }

        let mut new_decay = smallest + i32::from(per_block);
        if new_decay >= DRY_DECAY || smallest < 0 {
            new_decay = -1;
        }
        let mut falling = effective_flow_decay(&current, &ctx.world.block_at(pos.up())) >= 0;

        if let Some(min) = min_adjacent_sources(current.species) {
            if adjacent_sources >= min {
                let below = ctx.world.block_at(pos.down());
                let floor = below.is_solid()
                    || matches!(below, Block::Liquid(l) if l.is_same_species(&current) && l.is_source());
                if floor {
                    new_decay = 0;
                    falling = false;
                }
            }
        }

        if falling != current.falling || (!falling && new_decay != i32::from(current.decay())) {
            if !falling && new_decay < 0 {
                trace!("{} at {:?} dried up", current.species.name(), pos);
                ctx.world.set_block(pos, Block::Air);
                return;
            }
            current.falling = falling;
            let decay = if falling { 0 } else { new_decay as u8 };
            if let Err(e) = current.set_decay(decay) {
                warn!("{} at {:?}: {e}", current.species.name(), pos);
                return;
            }
            ctx.world.set_block(pos, Block::Liquid(current));
        }
    }

    let below_pos = pos.down();
    let below = ctx.world.block_at(below_pos);
    flow_into_block(ctx, &current, pos, below_pos, 0, true);

    if current.is_source() || !below.can_be_flowed_into() {
        let adjacent_decay = if current.falling {
            1
        } else {
            current.decay() + per_block
        };
        if i32::from(adjacent_decay) < DRY_DECAY {
            let mut calculator = ctx.world.flow_cost_calculator();
            let directions = calculator.optimal_flow_directions(&*ctx.world, pos, &current, per_block);
            for facing in directions {
                flow_into_block(ctx, &current, pos, pos.side(facing), adjacent_decay, false);
            }
        }
    }

    check_for_harden(ctx, &current, pos);
}

/// Spread `liquid` from `source` into `target`.
///
/// Lava reaching water turns the water to stone instead.
fn flow_into_block(
    ctx: &mut BlockContext<'_>,
    liquid: &Liquid,
    source: BlockPos,
    target: BlockPos,
    decay: u8,
    falling: bool,
) {
    let block = ctx.world.block_at(target);
    if liquid.species == LiquidSpecies::Lava && is_water(&block) {
        liquid_collide(ctx, target, Block::Stone);
        return;
    }
    if !can_flow_into(&*ctx.world, target) || block.as_liquid().is_some() {
        return;
    }

    let mut spread = liquid.flowing_form();
    spread.falling = falling;
    if let Err(e) = spread.set_decay(if falling { 0 } else { decay }) {
        warn!("{} spreading into {:?}: {e}", liquid.species.name(), target);
        return;
    }
    let new_state = Block::Liquid(spread);
    if !ctx.call(&BlockEvent::Spread {
        pos: target,
        source,
        new_state,
    }) {
        return;
    }
    if !block.is_air() {
        ctx.world.use_break_on(target);
    }
    ctx.world.set_block(target, new_state);
}

/// Lava touching water on any side but below hardens in place. Returns true
/// if a hardening was attempted.
fn check_for_harden(ctx: &mut BlockContext<'_>, liquid: &Liquid, pos: BlockPos) -> bool {
    if liquid.species != LiquidSpecies::Lava || liquid.falling {
        return false;
    }
    let touches_water = Facing::ALL
        .into_iter()
        .filter(|face| *face != Facing::Down)
        .any(|face| is_water(&ctx.world.block_at(pos.side(face))));
    if !touches_water {
        return false;
    }
    let result = if liquid.decay() == 0 {
        Block::Obsidian
    } else if liquid.decay() <= COBBLESTONE_MAX_DECAY {
        Block::Cobblestone
    } else {
        return false;
    };
    liquid_collide(ctx, pos, result)
}

/// Replace the liquid at `pos` with `result` after a liquid collision.
fn liquid_collide(ctx: &mut BlockContext<'_>, pos: BlockPos, result: Block) -> bool {
    if ctx.call(&BlockEvent::Form { pos, new_state: result }) {
        debug!("liquid at {:?} hardened into {}", pos, result.name());
        ctx.world.set_block(pos, result);
    }
    true
}

/// Direction entities are pushed by the liquid at `pos`, cached on `liquid`.
pub fn flow_vector(liquid: &mut Liquid, world: &dyn World, pos: BlockPos) -> Vec3 {
    if let Some(vector) = liquid.cached_flow_vector() {
        return vector;
    }
    let decay = effective_flow_decay(liquid, &Block::Liquid(*liquid));
    let mut vector = Vec3::ZERO;

    for facing in Facing::HORIZONTAL {
        let side_pos = pos.side(facing);
        let side = world.block_at(side_pos);
        let side_decay = effective_flow_decay(liquid, &side);
        let real = if side_decay < 0 {
            if !side.can_be_flowed_into() {
                continue;
            }
            let below_decay = effective_flow_decay(liquid, &world.block_at(side_pos.down()));
            if below_decay < 0 {
                continue;
            }
            below_decay - (decay - DRY_DECAY)
        } else {
            side_decay - decay
        };
        let (dx, _, dz) = facing.offset();
        vector = vector + Vec3::new(f64::from(dx * real), 0.0, f64::from(dz * real));
    }

    if liquid.falling {
        let enclosed = Facing::HORIZONTAL.into_iter().any(|facing| {
            let side = pos.side(facing);
            !can_flow_into(world, side) || !can_flow_into(world, side.up())
        });
        if enclosed {
            vector = vector.normalize() + Vec3::new(0.0, FALLING_PULL, 0.0);
        }
    }

    let vector = vector.normalize();
    liquid.cache_flow_vector(vector);
    vector
}

// ---------------------------------------------------------------------------
// Behavior
// ---------------------------------------------------------------------------

impl BlockBehavior for Liquid {
    fn to_block(&self) -> Block {
        Block::Liquid(*self)
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
        if !check_for_harden(ctx, self, pos) {
            let delay = tick_rate(self.species, &ctx.world.liquid_settings());
            ctx.world.schedule_delayed_update(pos, delay);
        }
    }

    fn on_scheduled_update(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        update_flow(self, ctx, pos);
    }

    fn on_entity_inside(&self, ctx: &mut BlockContext<'_>, pos: BlockPos, entity: &mut dyn Entity) -> bool {
        match self.species {
            LiquidSpecies::Water => {
                entity.reset_fall_distance();
                entity.extinguish();
            }
            LiquidSpecies::Lava => {
                entity.attack(DamageCause::Lava, LAVA_DAMAGE);
                if ctx.call(&BlockEvent::Combust {
                    pos,
                    seconds: LAVA_BURN_SECONDS,
                }) {
                    entity.set_on_fire(LAVA_BURN_SECONDS);
                }
                entity.reset_fall_distance();
            }
        }
        true
    }

    fn drops_for_compatible_tool(&self, _item: &Item, _rng: &mut dyn RngCore) -> Vec<Item> {
        Vec::new()
    }
}
