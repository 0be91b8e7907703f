//! The world as seen by block behaviors.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use mc_blocks_state::{Block, BlockPos, Facing};

use crate::config::LiquidSettings;
use crate::event::{BlockEvent, EventHooks};
use crate::flow_cost::{FlowCostCalculator, MinimumCostFlowCalculator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Peaceful,
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn level(self) -> i32 {
        match self {
            Difficulty::Peaceful => 0,
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }
}

/// Block storage plus the world services behaviors call into.
pub trait World {
    /// The block at `pos`. Unloaded or empty positions read as air.
    fn block_at(&self, pos: BlockPos) -> Block;

    /// Write a block. With `update`, the position and its six neighbors
    /// receive a nearby-block-change notification.
    fn set_block_with(&mut self, pos: BlockPos, block: Block, update: bool);

    fn set_block(&mut self, pos: BlockPos, block: Block) {
        self.set_block_with(pos, block, true);
    }

    /// Run the block's scheduled update after `delay` ticks.
    fn schedule_delayed_update(&mut self, pos: BlockPos, delay: u32);

    /// Break the block as if mined by nothing, dropping its items.
    fn use_break_on(&mut self, pos: BlockPos) -> bool;

    /// Combined sky and block light, 0..15.
    fn full_light_at(&self, pos: BlockPos) -> u8;

    /// Light emitted by nearby blocks only, 0..15.
    fn block_light_at(&self, pos: BlockPos) -> u8;

    fn difficulty(&self) -> Difficulty;

    /// Replace a falling block with an entity that lands somewhere below.
    fn spawn_falling_block(&mut self, pos: BlockPos, block: Block);

    /// Tell viewers that the bell at `pos` was struck on `face_hit`.
    fn broadcast_bell_ring(&mut self, pos: BlockPos, face_hit: Facing);

    fn is_in_world(&self, _pos: BlockPos) -> bool {
        true
    }

    fn liquid_settings(&self) -> LiquidSettings {
        LiquidSettings::default()
    }

    /// Flow-direction strategy used by liquids in this world.
    fn flow_cost_calculator(&self) -> Box<dyn FlowCostCalculator> {
        Box::new(MinimumCostFlowCalculator::new())
    }

    fn highest_adjacent_full_light_at(&self, pos: BlockPos) -> u8 {
        pos.sides()
            .into_iter()
            .map(|side| self.full_light_at(side))
            .max()
            .unwrap_or(0)
    }
}

/// Everything a behavior hook may touch while it runs.
pub struct BlockContext<'a> {
    pub world: &'a mut dyn World,
    pub events: &'a mut dyn EventHooks,
    pub rng: &'a mut dyn RngCore,
}

impl<'a> BlockContext<'a> {
    pub fn new(
        world: &'a mut dyn World,
        events: &'a mut dyn EventHooks,
        rng: &'a mut dyn RngCore,
    ) -> Self {
        Self { world, events, rng }
    }

    /// Offer an event to the hooks. Returns false if it was cancelled.
    pub fn call(&mut self, event: &BlockEvent) -> bool {
        self.events.allow(event)
    }
}
