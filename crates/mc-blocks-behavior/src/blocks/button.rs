//! Stone and wooden buttons.

use tracing::trace;

use mc_blocks_state::{Aabb, Block, BlockPos, Button, Facing, SupportType, Vec3};

use crate::behavior::{has_center_support, BlockBehavior};
use crate::item::Item;
use crate::transaction::{Actor, BlockTransaction, PlaceRequest};
use crate::world::BlockContext;

impl BlockBehavior for Button {
    fn to_block(&self) -> Block {
        Block::Button(*self)
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

    /// Mounts on the clicked face, which must offer center support.
    fn place(&self, tx: &mut BlockTransaction<'_>, req: &PlaceRequest) -> bool {
        let mount = tx.fetch_block(req.pos.side(req.face.opposite()));
        if !has_center_support(&mount, req.face) {
            return false;
        }
        let button = Button {
            facing: req.face,
            ..*self
        };
        tx.add_block(req.pos, Block::Button(button));
        true
    }

    fn on_nearby_block_change(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        let mount = ctx.world.block_at(pos.side(self.facing.opposite()));
        if !has_center_support(&mount, self.facing) {
            ctx.world.use_break_on(pos);
        }
    }

    fn on_interact(
        &self,
        ctx: &mut BlockContext<'_>,
        pos: BlockPos,
        _item: &mut Item,
        _face: Facing,
        _click: Vec3,
        _actor: Option<&Actor>,
    ) -> bool {
        if !self.pressed {
            let pressed = Button { pressed: true, ..*self };
            ctx.world.set_block(pos, Block::Button(pressed));
            ctx.world.schedule_delayed_update(pos, self.material.activation_ticks());
            trace!("button at {:?} pressed", pos);
        }
        true
    }

    fn on_scheduled_update(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        if self.pressed {
            let released = Button { pressed: false, ..*self };
            ctx.world.set_block(pos, Block::Button(released));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::AllowAll;
    use crate::memory::MemoryWorld;
    use crate::transaction::place_block;
    use crate::world::World;
    use mc_blocks_state::ButtonMaterial;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn placed_against_a_solid_face() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let pos = BlockPos::new(0, 1, 0);
        world.set_block_with(pos.side(Facing::West), Block::Stone, false);
        let button = Block::Button(Button::new(ButtonMaterial::Stone));
        world.with_context(&mut AllowAll, &mut rng, |ctx| {
            assert!(place_block(ctx, button, &PlaceRequest::new(pos, Facing::East)));
            assert!(!place_block(ctx, button, &PlaceRequest::new(pos.up(), Facing::East)));
        });
        match world.block_at(pos) {
            Block::Button(b) => assert_eq!(b.facing, Facing::East),
            other => panic!("expected a button, found {other:?}"),
        }
    }

    #[test]
    fn press_releases_after_activation_ticks() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let pos = BlockPos::new(0, 1, 0);
        world.set_block_with(pos.down(), Block::Stone, false);
        let button = Button {
            facing: Facing::Up,
            ..Button::new(ButtonMaterial::Wood)
        };
        world.set_block_with(pos, Block::Button(button), false);
        let mut item = Item::empty();
        let used = world.with_context(&mut AllowAll, &mut rng, |ctx| {
            button.on_interact(ctx, pos, &mut item, Facing::Up, Vec3::ZERO, None)
        });
        assert!(used);
        assert_eq!(world.due_at(pos), Some(30));
        assert_eq!(world.block_at(pos), Block::Button(Button { pressed: true, ..button }));

        world.run_ticks(29, &mut AllowAll, &mut rng, 0);
        assert_eq!(world.block_at(pos), Block::Button(Button { pressed: true, ..button }));
        world.run_ticks(1, &mut AllowAll, &mut rng, 0);
        assert_eq!(world.block_at(pos), Block::Button(button));
    }

    #[test]
    fn pressing_twice_keeps_the_first_schedule() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let pos = BlockPos::new(0, 1, 0);
        world.set_block_with(pos.down(), Block::Stone, false);
        let pressed = Button {
            facing: Facing::Up,
            pressed: true,
            ..Button::new(ButtonMaterial::Stone)
        };
        world.set_block_with(pos, Block::Button(pressed), false);
        let mut item = Item::empty();
        let used = world.with_context(&mut AllowAll, &mut rng, |ctx| {
            pressed.on_interact(ctx, pos, &mut item, Facing::Up, Vec3::ZERO, None)
        });
        assert!(used);
        assert!(!world.is_scheduled(pos));
    }

    #[test]
    fn breaks_without_its_mount() {
        let mut world = MemoryWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        let pos = BlockPos::new(0, 1, 0);
        world.set_block_with(pos.down(), Block::Stone, false);
        let button = Button {
            facing: Facing::Up,
            ..Button::new(ButtonMaterial::Stone)
        };
        world.set_block_with(pos, Block::Button(button), false);
        world.set_block(pos.down(), Block::Air);
        world.run_ticks(1, &mut AllowAll, &mut rng, 0);
        assert_eq!(world.block_at(pos), Block::Air);
    }
}
