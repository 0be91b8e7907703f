//! An in-memory world that drives block behaviors tick by tick.

use std::collections::{BTreeMap, HashSet, VecDeque};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use tracing::{debug, trace, warn};

use mc_blocks_state::{Block, BlockPos, Facing};

use crate::behavior::BlockBehavior;
use crate::config::LiquidSettings;
use crate::event::EventHooks;
use crate::flow_cost::{FlowCostCalculator, MinimumCostFlowCalculator};
use crate::item::Item;
use crate::scheduler::TickScheduler;
use crate::world::{BlockContext, Difficulty, World};

/// Lowest buildable y.
pub const MIN_Y: i32 = -64;
/// One above the highest buildable y.
pub const MAX_Y: i32 = 320;

/// Upper bound on neighbor notifications handled in one tick.
const MAX_NEIGHBOR_UPDATES_PER_TICK: usize = 65_536;

/// Maximum light level.
const MAX_LIGHT: u8 = 15;

/// Sparse block storage with scheduled and neighbor update queues.
pub struct MemoryWorld {
    blocks: BTreeMap<BlockPos, Block>,
    scheduler: TickScheduler,
    neighbor_updates: VecDeque<BlockPos>,
    queued: HashSet<BlockPos>,
    current_tick: u64,
    difficulty: Difficulty,
    sky_light: u8,
    liquids: LiquidSettings,
    flow_calculator: fn() -> Box<dyn FlowCostCalculator>,
    drop_rng: StdRng,
    drops: Vec<(BlockPos, Item)>,
    bell_rings: Vec<(BlockPos, Facing)>,
    landed: Vec<(BlockPos, Block)>,
}

fn default_flow_calculator() -> Box<dyn FlowCostCalculator> {
    Box::new(MinimumCostFlowCalculator::new())
}

impl Default for MemoryWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self {
            blocks: BTreeMap::new(),
            scheduler: TickScheduler::new(),
            neighbor_updates: VecDeque::new(),
            queued: HashSet::new(),
            current_tick: 0,
            difficulty: Difficulty::default(),
            sky_light: MAX_LIGHT,
            liquids: LiquidSettings::default(),
            flow_calculator: default_flow_calculator,
            drop_rng: StdRng::seed_from_u64(0),
            drops: Vec::new(),
            bell_rings: Vec::new(),
            landed: Vec::new(),
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Sky light reaching every position, 0..15.
    pub fn with_sky_light(mut self, light: u8) -> Self {
        self.sky_light = light.min(MAX_LIGHT);
        self
    }

    pub fn with_liquids(mut self, liquids: LiquidSettings) -> Self {
        self.liquids = liquids;
        self
    }

    pub fn with_flow_calculator(mut self, factory: fn() -> Box<dyn FlowCostCalculator>) -> Self {
        self.flow_calculator = factory;
        self
    }

    /// Seed for the randomness used by drops.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.drop_rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    /// Items dropped by broken blocks, in break order.
    pub fn drops(&self) -> &[(BlockPos, Item)] {
        &self.drops
    }

    pub fn bell_rings(&self) -> &[(BlockPos, Facing)] {
        &self.bell_rings
    }

    /// Where falling blocks came to rest.
    pub fn landed(&self) -> &[(BlockPos, Block)] {
        &self.landed
    }

    pub fn is_scheduled(&self, pos: BlockPos) -> bool {
        self.scheduler.is_scheduled(pos)
    }

    pub fn due_at(&self, pos: BlockPos) -> Option<u64> {
        self.scheduler.due_at(pos)
    }

    pub fn pending_updates(&self) -> usize {
        self.scheduler.len()
    }

    /// Non-air blocks, ordered by position.
    pub fn blocks(&self) -> impl Iterator<Item = (BlockPos, Block)> + '_ {
        self.blocks.iter().map(|(pos, block)| (*pos, *block))
    }

    pub fn count(&self, predicate: impl Fn(&Block) -> bool) -> usize {
        self.blocks.values().filter(|b| predicate(b)).count()
    }

    /// Drop queued neighbor notifications, e.g. after building a fixture.
    pub fn clear_neighbor_updates(&mut self) {
        self.neighbor_updates.clear();
        self.queued.clear();
    }

    fn queue_neighbor_update(&mut self, pos: BlockPos) {
        if self.queued.insert(pos) {
            self.neighbor_updates.push_back(pos);
        }
    }

    /// Run `f` with a block context borrowing this world.
    pub fn with_context<R>(
        &mut self,
        events: &mut dyn EventHooks,
        rng: &mut dyn RngCore,
        f: impl FnOnce(&mut BlockContext<'_>) -> R,
    ) -> R {
        let mut ctx = BlockContext::new(self, events, rng);
        f(&mut ctx)
    }

    /// Advance one game tick: due scheduled updates, then neighbor
    /// notifications, then `random_ticks` random block ticks.
    pub fn tick(&mut self, events: &mut dyn EventHooks, rng: &mut dyn RngCore, random_ticks: usize) {
        self.current_tick += 1;

        for update in self.scheduler.drain_ready(self.current_tick) {
            let block = self.block_at(update.pos);
            trace!("scheduled update of {} at {:?}", block.name(), update.pos);
            let mut ctx = BlockContext::new(&mut *self, &mut *events, &mut *rng);
            block.on_scheduled_update(&mut ctx, update.pos);
        }

        self.process_neighbor_updates(events, rng);

        if !self.blocks.is_empty() && random_ticks > 0 {
            let positions: Vec<BlockPos> = self.blocks.keys().copied().collect();
            for _ in 0..random_ticks {
                let Some(&pos) = positions.choose(&mut *rng) else {
                    break;
                };
                let block = self.block_at(pos);
                if block.ticks_randomly() {
                    let mut ctx = BlockContext::new(&mut *self, &mut *events, &mut *rng);
                    block.on_random_tick(&mut ctx, pos);
                }
            }
            self.process_neighbor_updates(events, rng);
        }
    }

    /// Run `n` ticks.
    pub fn run_ticks(&mut self, n: u64, events: &mut dyn EventHooks, rng: &mut dyn RngCore, random_ticks: usize) {
        for _ in 0..n {
            self.tick(events, rng, random_ticks);
        }
    }

    /// Deliver queued nearby-block-change notifications until none are left.
    pub fn process_neighbor_updates(&mut self, events: &mut dyn EventHooks, rng: &mut dyn RngCore) {
        let mut handled = 0;
        while let Some(pos) = self.neighbor_updates.pop_front() {
            self.queued.remove(&pos);
            handled += 1;
            if handled > MAX_NEIGHBOR_UPDATES_PER_TICK {
                warn!(
                    "neighbor update limit reached, deferring {} updates",
                    self.neighbor_updates.len() + 1
                );
                self.queue_neighbor_update(pos);
                return;
            }
            let block = self.block_at(pos);
            if block.is_air() {
                continue;
            }
            let mut ctx = BlockContext::new(&mut *self, &mut *events, &mut *rng);
            block.on_nearby_block_change(&mut ctx, pos);
        }
    }
}

impl World for MemoryWorld {
    fn block_at(&self, pos: BlockPos) -> Block {
        let mut block = self.blocks.get(&pos).copied().unwrap_or(Block::Air);
        if let Some(liquid) = block.as_liquid_mut() {
            liquid.invalidate_flow_vector();
        }
        block
    }

    fn set_block_with(&mut self, pos: BlockPos, block: Block, update: bool) {
        if !self.is_in_world(pos) {
            debug!("ignoring write of {} outside the world at {:?}", block.name(), pos);
            return;
        }
        if block.is_air() {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, block);
        }
        if update {
            self.queue_neighbor_update(pos);
            for side in pos.sides() {
                self.queue_neighbor_update(side);
            }
        }
    }

    fn schedule_delayed_update(&mut self, pos: BlockPos, delay: u32) {
        self.scheduler.schedule(pos, u64::from(delay), self.current_tick);
    }

    fn use_break_on(&mut self, pos: BlockPos) -> bool {
        let block = self.block_at(pos);
        if block.is_air() {
            return false;
        }
        let items = block.drops_for(&Item::empty(), &mut self.drop_rng);
        debug!("{} broken at {:?}, {} drops", block.name(), pos, items.len());
        self.drops.extend(items.into_iter().map(|item| (pos, item)));
        self.set_block(pos, Block::Air);
        true
    }

    fn full_light_at(&self, pos: BlockPos) -> u8 {
        self.sky_light.max(self.block_light_at(pos))
    }

    fn block_light_at(&self, pos: BlockPos) -> u8 {
        self.blocks
            .iter()
            .filter_map(|(source, block)| {
                let emission = block.light_emission();
                if emission == 0 {
                    return None;
                }
                let distance = (source.x - pos.x).abs() + (source.y - pos.y).abs() + (source.z - pos.z).abs();
                Some(i32::from(emission) - distance)
            })
            .max()
            .map_or(0, |level| level.clamp(0, i32::from(MAX_LIGHT)) as u8)
    }

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn spawn_falling_block(&mut self, pos: BlockPos, block: Block) {
        let mut landing = pos;
        while landing.y > MIN_Y && self.block_at(landing.down()).can_be_replaced() {
            landing = landing.down();
        }
        if !self.block_at(landing).can_be_replaced() {
            debug!("falling {} from {:?} has nowhere to land", block.name(), pos);
            return;
        }
        trace!("falling {} from {:?} landed at {:?}", block.name(), pos, landing);
        self.set_block(landing, block);
        self.landed.push((landing, block));
    }

    fn broadcast_bell_ring(&mut self, pos: BlockPos, face_hit: Facing) {
        debug!("bell at {:?} rung on {:?}", pos, face_hit);
        self.bell_rings.push((pos, face_hit));
    }

    fn is_in_world(&self, pos: BlockPos) -> bool {
        (MIN_Y..MAX_Y).contains(&pos.y)
    }

    fn liquid_settings(&self) -> LiquidSettings {
        self.liquids
    }

    fn flow_cost_calculator(&self) -> Box<dyn FlowCostCalculator> {
        (self.flow_calculator)()
    }
}
