//! Choosing the horizontal directions a liquid spreads in.
//!
//! Liquid prefers the shortest path to a drop. The default calculator does a
//! bounded depth-first search from each horizontal neighbor and keeps every
//! direction that ties for the lowest cost.

use std::collections::HashMap;

use mc_blocks_state::{Block, BlockPos, Facing, Liquid};

use crate::behavior::BlockBehavior;
use crate::world::World;

/// Cost of a direction with no reachable drop.
const UNREACHABLE_COST: u32 = 1000;
/// Search budget in decay levels; divided by the per-block decay.
const SEARCH_BUDGET: u32 = 4;

/// Picks the directions a spreading liquid flows in.
pub trait FlowCostCalculator {
    /// Horizontal faces of `origin` to spread into, in [`Facing::HORIZONTAL`] order.
    fn optimal_flow_directions(
        &mut self,
        world: &dyn World,
        origin: BlockPos,
        liquid: &Liquid,
        per_block: u8,
    ) -> Vec<Facing>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowStatus {
    CanFlowDown,
    CanFlow,
    Blocked,
}

/// Depth-first search for the nearest drop, memoized per call.
#[derive(Debug, Default)]
pub struct MinimumCostFlowCalculator {
    visited: HashMap<BlockPos, FlowStatus>,
}

impl MinimumCostFlowCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    fn status(&mut self, world: &dyn World, pos: BlockPos) -> FlowStatus {
        if let Some(status) = self.visited.get(&pos) {
            return *status;
        }
        let status = if !can_flow_into(world, pos) {
            FlowStatus::Blocked
        } else if world.block_at(pos.down()).can_be_flowed_into() {
            FlowStatus::CanFlowDown
        } else {
            FlowStatus::CanFlow
        };
        self.visited.insert(pos, status);
        status
    }

    #[allow(clippy::too_many_arguments)]
    fn flow_cost(
        &mut self,
        world: &dyn World,
        pos: BlockPos,
        accumulated: u32,
        max_cost: u32,
        origin_opposite: Facing,
        last_opposite: Option<Facing>,
    ) -> u32 {
        let mut cost = UNREACHABLE_COST;
        for facing in Facing::HORIZONTAL {
            if facing == origin_opposite || Some(facing) == last_opposite {
                continue;
            }
            let next = pos.side(facing);
            match self.status(world, next) {
                FlowStatus::Blocked => continue,
                FlowStatus::CanFlowDown => return accumulated,
                FlowStatus::CanFlow => {}
            }
            if accumulated >= max_cost {
                continue;
            }
            let real = self.flow_cost(
                world,
                next,
                accumulated + 1,
                max_cost,
                origin_opposite,
                Some(facing.opposite()),
            );
            cost = cost.min(real);
        }
        cost
    }
}

impl FlowCostCalculator for MinimumCostFlowCalculator {
    fn optimal_flow_directions(
        &mut self,
        world: &dyn World,
        origin: BlockPos,
        _liquid: &Liquid,
        per_block: u8,
    ) -> Vec<Facing> {
        self.visited.clear();
        let mut costs = [UNREACHABLE_COST; 4];
        let mut max_cost = SEARCH_BUDGET / u32::from(per_block.max(1));
        for (i, facing) in Facing::HORIZONTAL.into_iter().enumerate() {
            let pos = origin.side(facing);
            match self.status(world, pos) {
                FlowStatus::Blocked => {}
                FlowStatus::CanFlowDown => {
                    costs[i] = 0;
                    max_cost = 0;
                }
                FlowStatus::CanFlow if max_cost > 0 => {
                    costs[i] = self.flow_cost(world, pos, 1, max_cost, facing.opposite(), None);
                    max_cost = max_cost.min(costs[i]);
                }
                FlowStatus::CanFlow => {}
            }
        }

        let min = costs.iter().copied().min().unwrap_or(UNREACHABLE_COST);
        Facing::HORIZONTAL
            .into_iter()
            .zip(costs)
            .filter(|(_, cost)| *cost == min)
            .map(|(facing, _)| facing)
            .collect()
    }
}

/// Whether liquid may move into `pos`. Liquid sources are never overwritten.
pub fn can_flow_into(world: &dyn World, pos: BlockPos) -> bool {
    if !world.is_in_world(pos) {
        return false;
    }
    let block = world.block_at(pos);
    if !block.can_be_flowed_into() {
        return false;
    }
    !matches!(block, Block::Liquid(other) if other.is_source())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryWorld;
    use mc_blocks_state::LiquidSpecies;

    fn floor(world: &mut MemoryWorld, radius: i32) {
        for x in -radius..=radius {
            for z in -radius..=radius {
                world.set_block_with(BlockPos::new(x, 0, z), Block::Stone, false);
            }
        }
    }

    #[test]
    fn open_floor_spreads_everywhere() {
        let mut world = MemoryWorld::new();
        floor(&mut world, 8);
        let water = Liquid::source(LiquidSpecies::Water);
        let dirs = MinimumCostFlowCalculator::new().optimal_flow_directions(&world, BlockPos::new(0, 1, 0), &water, 1);
        assert_eq!(dirs, Facing::HORIZONTAL.to_vec());
    }

    #[test]
    fn adjacent_hole_wins() {
        let mut world = MemoryWorld::new();
        floor(&mut world, 8);
        world.set_block_with(BlockPos::new(1, 0, 0), Block::Air, false);
        let water = Liquid::source(LiquidSpecies::Water);
        let dirs = MinimumCostFlowCalculator::new().optimal_flow_directions(&world, BlockPos::new(0, 1, 0), &water, 1);
        assert_eq!(dirs, vec![Facing::East]);
    }

    #[test]
    fn distant_hole_pulls_flow_toward_it() {
        let mut world = MemoryWorld::new();
        floor(&mut world, 8);
        world.set_block_with(BlockPos::new(0, 0, -3), Block::Air, false);
        let water = Liquid::source(LiquidSpecies::Water);
        let dirs = MinimumCostFlowCalculator::new().optimal_flow_directions(&world, BlockPos::new(0, 1, 0), &water, 1);
        assert_eq!(dirs, vec![Facing::North]);
    }

    #[test]
    fn walls_are_skipped() {
        let mut world = MemoryWorld::new();
        floor(&mut world, 8);
        world.set_block_with(BlockPos::new(2, 0, 0), Block::Air, false);
        for facing in [Facing::North, Facing::South, Facing::West] {
            world.set_block_with(BlockPos::new(0, 1, 0).side(facing), Block::Stone, false);
        }
        let water = Liquid::source(LiquidSpecies::Water);
        let dirs = MinimumCostFlowCalculator::new().optimal_flow_directions(&world, BlockPos::new(0, 1, 0), &water, 1);
        assert_eq!(dirs, vec![Facing::East]);
    }

    #[test]
    fn nothing_reachable_ties_every_direction() {
        let mut world = MemoryWorld::new();
        floor(&mut world, 8);
        world.set_block_with(BlockPos::new(0, 1, -1), Block::Stone, false);
        let lava = Liquid::source(LiquidSpecies::Lava);
        let dirs = MinimumCostFlowCalculator::new().optimal_flow_directions(&world, BlockPos::new(0, 1, 0), &lava, 2);
        assert_eq!(dirs.len(), 4);
    }

    #[test]
    fn sources_block_flow() {
        let mut world = MemoryWorld::new();
        world.set_block_with(BlockPos::new(1, 1, 0), Block::Liquid(Liquid::source(LiquidSpecies::Lava)), false);
        assert!(!can_flow_into(&world, BlockPos::new(1, 1, 0)));
        let flowing = Liquid::flowing(LiquidSpecies::Water, 3, false).unwrap();
        world.set_block_with(BlockPos::new(2, 1, 0), Block::Liquid(flowing), false);
        assert!(can_flow_into(&world, BlockPos::new(2, 1, 0)));
        assert!(can_flow_into(&world, BlockPos::new(3, 1, 0)));
        world.set_block_with(BlockPos::new(4, 1, 0), Block::Stone, false);
        assert!(!can_flow_into(&world, BlockPos::new(4, 1, 0)));
        assert!(!can_flow_into(&world, BlockPos::new(0, crate::memory::MAX_Y, 0)));
    }
}
