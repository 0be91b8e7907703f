//! Grass blocks: spreading, dying in the dark, and tool interactions.

use rand::{Rng, RngCore};

use mc_blocks_state::{Block, BlockKind, BlockPos, Facing, Farmland, Vec3};

use crate::behavior::BlockBehavior;
use crate::event::BlockEvent;
use crate::item::{Item, ItemKind, ToolType};
use crate::transaction::Actor;
use crate::world::BlockContext;

/// Light above grass below which it dies under an opaque block.
const DEATH_LIGHT: u8 = 4;
/// Light above grass needed before it spreads.
const SPREAD_LIGHT: u8 = 9;
const SPREAD_ATTEMPTS: usize = 4;

/// Bone meal: plants attempted, and how far from the clicked block.
const FERTILIZE_COUNT: usize = 8;
const FERTILIZE_RADIUS: i32 = 2;
const FERTILIZE_PLANTS: [BlockKind; 6] = [
    BlockKind::Dandelion,
    BlockKind::Poppy,
    BlockKind::TallGrass,
    BlockKind::TallGrass,
    BlockKind::TallGrass,
    BlockKind::TallGrass,
];

pub struct Grass;

/// Whether grass could live at `pos` given the light and the block above.
fn is_habitable(ctx: &BlockContext<'_>, pos: BlockPos) -> bool {
    ctx.world.full_light_at(pos.up()) >= DEATH_LIGHT && ctx.world.block_at(pos.up()).light_filter() < 2
}

/// Scatter plants on grass around `pos`.
pub fn grow_grass(ctx: &mut BlockContext<'_>, pos: BlockPos, count: usize, radius: i32) {
    for _ in 0..count {
        let x = ctx.rng.gen_range(pos.x - radius..=pos.x + radius);
        let z = ctx.rng.gen_range(pos.z - radius..=pos.z + radius);
        let plant = FERTILIZE_PLANTS[ctx.rng.gen_range(0..FERTILIZE_PLANTS.len())];
        let ground = BlockPos::new(x, pos.y, z);
        if ctx.world.block_at(ground.up()).is_air() && ctx.world.block_at(ground) == Block::Grass {
            ctx.world.set_block(ground.up(), Block::new(plant));
        }
    }
}

impl BlockBehavior for Grass {
    fn to_block(&self) -> Block {
        Block::Grass
    }

    fn ticks_randomly(&self) -> bool {
        true
    }

    fn on_random_tick(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        let light_above = ctx.world.full_light_at(pos.up());
        if light_above < DEATH_LIGHT && ctx.world.block_at(pos.up()).light_filter() >= 2 {
            let event = BlockEvent::Death {
                pos,
                new_state: Block::Dirt,
            };
            if ctx.call(&event) {
                ctx.world.set_block_with(pos, Block::Dirt, false);
            }
        } else if light_above >= SPREAD_LIGHT {
            for _ in 0..SPREAD_ATTEMPTS {
                let target = BlockPos::new(
                    ctx.rng.gen_range(pos.x - 1..=pos.x + 1),
                    ctx.rng.gen_range(pos.y - 3..=pos.y + 1),
                    ctx.rng.gen_range(pos.z - 1..=pos.z + 1),
                );
                if ctx.world.block_at(target) != Block::Dirt || !is_habitable(ctx, target) {
                    continue;
                }
                let event = BlockEvent::Spread {
                    pos: target,
                    source: pos,
                    new_state: Block::Grass,
                };
                if ctx.call(&event) {
                    ctx.world.set_block_with(target, Block::Grass, false);
                }
            }
        }
    }

    fn on_interact(
        &self,
        ctx: &mut BlockContext<'_>,
        pos: BlockPos,
        item: &mut Item,
        face: Facing,
        _click: Vec3,
        _actor: Option<&Actor>,
    ) -> bool {
        if face != Facing::Up {
            return false;
        }
        if item.kind == ItemKind::Fertilizer && !item.is_null() {
            item.pop();
            grow_grass(ctx, pos, FERTILIZE_COUNT, FERTILIZE_RADIUS);
            return true;
        }
        match item.tool_type() {
            ToolType::Hoe => {
                item.apply_damage(1);
                ctx.world.set_block(pos, Block::Farmland(Farmland::default()));
                true
            }
            ToolType::Shovel if ctx.world.block_at(pos.up()).is_air() => {
                item.apply_damage(1);
                ctx.world.set_block(pos, Block::GrassPath);
                true
            }
            _ => false,
        }
    }

    fn drops_for_compatible_tool(&self, _item: &Item, _rng: &mut dyn RngCore) -> Vec<Item> {
        vec![Item::block(BlockKind::Dirt)]
    }
}
