//! Stateless blocks with no behavior of their own beyond their kind.

use rand::RngCore;

use mc_blocks_state::{Aabb, Block, BlockKind, BlockPos, Facing, SupportType};

use crate::behavior::BlockBehavior;
use crate::event::BlockEvent;
use crate::fallable;
use crate::item::Item;
use crate::world::BlockContext;

/// Block light at which ice melts.
const ICE_MELT_LIGHT: u8 = 12;

pub struct Simple(pub BlockKind);

impl BlockBehavior for Simple {
    fn to_block(&self) -> Block {
        Block::new(self.0)
    }

    fn can_be_replaced(&self) -> bool {
        self.0 == BlockKind::Air
    }

    fn can_be_flowed_into(&self) -> bool {
        self.0 == BlockKind::Air
    }

    fn collision_boxes(&self) -> Vec<Aabb> {
        match self.0 {
            BlockKind::Air => Vec::new(),
            BlockKind::GrassPath => vec![Aabb::one().trim(Facing::Up, 1.0 / 16.0)],
            _ => vec![Aabb::one()],
        }
    }

    fn support_type(&self, _face: Facing) -> SupportType {
        if self.0 == BlockKind::Air {
            SupportType::None
        } else {
            SupportType::Full
        }
    }

    fn on_nearby_block_change(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        match self.0 {
            BlockKind::Sand | BlockKind::Gravel => {
                fallable::fall_if_unsupported(ctx, pos, self.to_block());
            }
            BlockKind::GrassPath => {
                if ctx.world.block_at(pos.up()).is_solid() {
                    ctx.world.set_block(pos, Block::Dirt);
                }
            }
            _ => {}
        }
    }

    fn ticks_randomly(&self) -> bool {
        self.0 == BlockKind::Ice
    }

    fn on_random_tick(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        if self.0 != BlockKind::Ice {
            return;
        }
        let light = pos
            .sides()
            .into_iter()
            .map(|side| ctx.world.block_light_at(side))
            .max()
            .unwrap_or(0);
        if light >= ICE_MELT_LIGHT {
            let new_state = Block::new(BlockKind::Water);
            if ctx.call(&BlockEvent::Melt { pos, new_state }) {
                ctx.world.set_block(pos, new_state);
            }
        }
    }

    fn drops_for_compatible_tool(&self, _item: &Item, _rng: &mut dyn RngCore) -> Vec<Item> {
        match self.0 {
            BlockKind::Air | BlockKind::Glass | BlockKind::Ice => Vec::new(),
            BlockKind::GrassPath => vec![Item::block(BlockKind::Dirt)],
            kind => vec![Item::block(kind)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{AllowAll, BlockEventKind, EventLog};
    use crate::item::ToolType;
    use crate::memory::MemoryWorld;
    use crate::world::World;
    use mc_blocks_state::Fire;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn ice_melts_next_to_bright_light() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(14);
        let pos = BlockPos::new(0, 1, 0);
        let ice = Block::new(BlockKind::Ice);
        world.set_block_with(pos, ice, false);
        world.with_context(&mut AllowAll, &mut rng, |ctx| ice.on_random_tick(ctx, pos));
        assert_eq!(world.block_at(pos), ice);

        world.set_block_with(pos.offset(2, 0, 0), Block::Fire(Fire::default()), false);
        let mut events = EventLog::cancelling([BlockEventKind::Melt]);
        world.with_context(&mut events, &mut rng, |ctx| ice.on_random_tick(ctx, pos));
        assert_eq!(world.block_at(pos), ice);

        world.with_context(&mut AllowAll, &mut rng, |ctx| ice.on_random_tick(ctx, pos));
        assert_eq!(world.block_at(pos), Block::new(BlockKind::Water));
    }

    #[test]
    fn covered_grass_path_reverts_to_dirt() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(14);
        let pos = BlockPos::new(0, 0, 0);
        world.set_block_with(pos, Block::GrassPath, false);
        world.set_block(pos.up(), Block::Stone);
        world.run_ticks(1, &mut AllowAll, &mut rng, 0);
        assert_eq!(world.block_at(pos), Block::Dirt);
    }

    #[test]
    fn sand_falls_to_the_ground() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(14);
        world.set_block_with(BlockPos::new(0, 0, 0), Block::Stone, false);
        world.set_block_with(BlockPos::new(0, 2, 0), Block::Stone, false);
        world.set_block_with(BlockPos::new(0, 3, 0), Block::Sand, false);
        world.set_block(BlockPos::new(0, 2, 0), Block::Air);
        world.run_ticks(1, &mut AllowAll, &mut rng, 0);
        assert_eq!(world.block_at(BlockPos::new(0, 3, 0)), Block::Air);
        assert_eq!(world.block_at(BlockPos::new(0, 1, 0)), Block::Sand);
    }

    #[test]
    fn drops_follow_the_kind() {
        let mut rng = StdRng::seed_from_u64(14);
        let pickaxe = Item::tool(ToolType::Pickaxe);
        assert!(Block::Stone.drops_for(&Item::empty(), &mut rng).is_empty());
        assert_eq!(Block::Stone.drops_for(&pickaxe, &mut rng), vec![Item::block(BlockKind::Stone)]);
        assert!(Block::Glass.drops_for(&pickaxe, &mut rng).is_empty());
        assert_eq!(
            Block::GrassPath.drops_for(&Item::empty(), &mut rng),
            vec![Item::block(BlockKind::Dirt)]
        );
        assert_eq!(Block::GrassPath.collision_boxes()[0].height(), 15.0 / 16.0);
    }
}
