//! Scripted worlds run by the simulator.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

use mc_blocks_behavior::{
    place_block, Actor, BlockBehavior, BlockEventKind, EventLog, Item, ItemKind, MemoryWorld, PlaceRequest,
    World,
};
use mc_blocks_state::{
    Block, BlockKind, BlockPos, Button, ButtonMaterial, Facing, Fire, HorizontalFacing, Leaves, Liquid,
    LiquidSpecies, SnowLayer, TreeType, Vec3,
};

use crate::config::SimConfig;

/// What a scenario left behind.
#[derive(Debug, Serialize)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub ticks: u64,
    /// Non-air blocks by name.
    pub blocks: BTreeMap<&'static str, usize>,
    /// Block events by kind, cancelled or not.
    pub events: BTreeMap<String, usize>,
    pub drops: usize,
}

impl ScenarioReport {
    fn collect(name: &'static str, world: &MemoryWorld, events: &EventLog) -> Self {
        let mut blocks = BTreeMap::new();
        for (_, block) in world.blocks() {
            *blocks.entry(block.name()).or_insert(0) += 1;
        }
        let mut counts = BTreeMap::new();
        for event in &events.events {
            *counts.entry(format!("{:?}", event.kind())).or_insert(0) += 1;
        }
        Self {
            name,
            ticks: world.current_tick(),
            blocks,
            events: counts,
            drops: world.drops().len(),
        }
    }

    pub fn block_count(&self, name: &str) -> usize {
        self.blocks.get(name).copied().unwrap_or(0)
    }

    pub fn event_count(&self, kind: &str) -> usize {
        self.events.get(kind).copied().unwrap_or(0)
    }
}

fn new_world(config: &SimConfig) -> MemoryWorld {
    MemoryWorld::new()
        .with_difficulty(config.world.difficulty)
        .with_sky_light(config.world.default_light)
        .with_liquids(config.liquids)
        .with_seed(config.world.seed)
}

fn floor(world: &mut MemoryWorld, radius: i32, block: Block) {
    for x in -radius..=radius {
        for z in -radius..=radius {
            world.set_block_with(BlockPos::new(x, 0, z), block, false);
        }
    }
}

fn run(world: &mut MemoryWorld, events: &mut EventLog, config: &SimConfig) {
    let mut rng = StdRng::seed_from_u64(config.world.seed);
    world.run_ticks(config.world.ticks, events, &mut rng, config.world.random_tick_speed);
}

/// A water source on an open stone floor.
pub fn water_basin(config: &SimConfig) -> ScenarioReport {
    let mut world = new_world(config);
    let mut events = EventLog::new();
    floor(&mut world, 10, Block::Stone);
    world.set_block(BlockPos::new(0, 1, 0), Block::Liquid(Liquid::source(LiquidSpecies::Water)));
    run(&mut world, &mut events, config);
    ScenarioReport::collect("water_basin", &world, &events)
}

/// Lava and water sources close enough to meet.
pub fn lava_meets_water(config: &SimConfig) -> ScenarioReport {
    let mut world = new_world(config);
    let mut events = EventLog::new();
    floor(&mut world, 10, Block::Stone);
    world.set_block(BlockPos::new(-2, 1, 0), Block::Liquid(Liquid::source(LiquidSpecies::Lava)));
    world.set_block(BlockPos::new(2, 1, 0), Block::Liquid(Liquid::source(LiquidSpecies::Water)));
    run(&mut world, &mut events, config);
    ScenarioReport::collect("lava_meets_water", &world, &events)
}

/// Fire lit in a clearing ringed by leaves, with a plank floor nearby.
pub fn forest_fire(config: &SimConfig) -> ScenarioReport {
    let mut world = new_world(config);
    let mut events = EventLog::new();
    floor(&mut world, 6, Block::Grass);
    for x in 2..=4 {
        for z in -2..=2 {
            world.set_block_with(BlockPos::new(x, 0, z), Block::Planks, false);
        }
    }
    let leaves = Block::Leaves(Leaves {
        no_decay: true,
        ..Leaves::new(TreeType::Oak)
    });
    let origin = BlockPos::new(0, 1, 0);
    for facing in Facing::HORIZONTAL {
        world.set_block_with(origin.side(facing), leaves, false);
    }
    world.set_block_with(origin.offset(0, 1, 0), leaves, false);
    world.set_block(origin, Block::Fire(Fire::default()));
    run(&mut world, &mut events, config);
    ScenarioReport::collect("forest_fire", &world, &events)
}

/// Player-style placements and interactions on a small platform.
pub fn placement(config: &SimConfig) -> ScenarioReport {
    let mut world = new_world(config);
    let mut events = EventLog::new();
    let mut rng = StdRng::seed_from_u64(config.world.seed);
    floor(&mut world, 4, Block::Stone);
    world.set_block_with(BlockPos::new(3, 0, 3), Block::Sand, false);
    world.set_block_with(BlockPos::new(3, -1, 3), Block::Stone, false);
    world.set_block_with(BlockPos::new(-3, 1, 0), Block::Stone, false);

    let actor = Actor {
        facing: HorizontalFacing::NORTH,
    };
    let snow_pos = BlockPos::new(0, 1, 0);
    let bamboo_pos = BlockPos::new(3, 1, 3);
    let button_pos = BlockPos::new(-2, 1, 0);

    world.with_context(&mut events, &mut rng, |ctx| {
        let snow = Block::SnowLayer(SnowLayer::default());
        let layers = (0..3)
            .filter(|_| place_block(ctx, snow, &PlaceRequest::new(snow_pos, Facing::Up)))
            .count();
        debug!("stacked {} snow layers", layers);

        let bell = PlaceRequest::new(BlockPos::new(1, 1, 2), Facing::Up).with_actor(actor);
        if !place_block(ctx, Block::new(BlockKind::Bell), &bell) {
            debug!("bell placement rejected at {:?}", bell.pos);
        }

        let button = Block::Button(Button::new(ButtonMaterial::Stone));
        if place_block(ctx, button, &PlaceRequest::new(button_pos, Facing::East)) {
            let placed = ctx.world.block_at(button_pos);
            let mut hand = Item::empty();
            placed.on_interact(ctx, button_pos, &mut hand, Facing::East, Vec3::ZERO, Some(&actor));
        }

        if place_block(ctx, Block::new(BlockKind::Bamboo), &PlaceRequest::new(bamboo_pos, Facing::Up)) {
            let stalk = ctx.world.block_at(bamboo_pos);
            let mut shoots = Item::new(ItemKind::Block(BlockKind::Bamboo), 1);
            if stalk.on_interact(ctx, bamboo_pos, &mut shoots, Facing::Up, Vec3::ZERO, Some(&actor)) {
                debug!("stalk took {} bamboo", 1 - shoots.count);
            }

            let mut stack = Item::new(ItemKind::Fertilizer, 4);
            while !stack.is_null() {
                let stalk = ctx.world.block_at(bamboo_pos);
                if !stalk.on_interact(ctx, bamboo_pos, &mut stack, Facing::Up, Vec3::ZERO, Some(&actor)) {
                    break;
                }
            }
        }
    });
    run(&mut world, &mut events, config);

    info!("bamboo grew {} times", events.count(BlockEventKind::Grow));
    ScenarioReport::collect("placement", &world, &events)
}

/// Every scenario, in a fixed order.
pub fn run_all(config: &SimConfig) -> Vec<ScenarioReport> {
    vec![
        water_basin(config),
        lava_meets_water(config),
        forest_fire(config),
        placement(config),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_blocks_state::bamboo_max_height;

    fn config() -> SimConfig {
        SimConfig::parse("[world]\nseed = 3\n\n[logging]\nlevel = \"info\"\n").unwrap()
    }

    #[test]
    fn water_fills_a_diamond() {
        let report = water_basin(&config());
        assert_eq!(report.block_count("water"), 113);
        assert_eq!(report.block_count("stone"), 21 * 21);
        assert_eq!(report.ticks, 400);
    }

    #[test]
    fn lava_and_water_harden() {
        let report = lava_meets_water(&config());
        assert!(report.event_count("Form") >= 1);
        let hardened = report.block_count("obsidian") + report.block_count("cobblestone") + report.block_count("stone");
        assert!(hardened > 21 * 21);
    }

    #[test]
    fn fire_burns_the_leaves() {
        let report = forest_fire(&config());
        assert!(report.event_count("Burn") >= 1);
        assert!(report.block_count("leaves") < 5);
    }

    #[test]
    fn placements_stack_and_grow() {
        let report = placement(&config());
        assert_eq!(report.block_count("snow_layer"), 1);
        assert_eq!(report.block_count("bell"), 1);
        assert_eq!(report.block_count("stone_button"), 1);
        assert!(report.block_count("bamboo") >= 5);
        assert!(report.event_count("Grow") >= 4);
        assert!(report.block_count("bamboo") <= bamboo_max_height(3, 3) as usize);
    }

    #[test]
    fn report_serializes() {
        let report = placement(&config());
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"name\":\"placement\""));
    }
}
