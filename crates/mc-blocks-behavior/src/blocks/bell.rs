//! Bells hanging from floors, ceilings, and walls.

use mc_blocks_state::{Aabb, Bell, BellAttachment, Block, BlockPos, Facing, HorizontalFacing, SupportType, Vec3};

use crate::behavior::BlockBehavior;
use crate::item::Item;
use crate::transaction::{Actor, BlockTransaction, PlaceRequest};
use crate::world::{BlockContext, World};

/// Whether the neighbor on `face` offers any support back toward `pos`.
fn supported_by(block: &Block, face: Facing) -> bool {
    !block.support_type(face.opposite()).is_none()
}

fn supported_at(world: &dyn World, pos: BlockPos, face: Facing) -> bool {
    supported_by(&world.block_at(pos.side(face)), face)
}

impl BlockBehavior for Bell {
    fn to_block(&self) -> Block {
        Block::Bell(*self)
    }

    fn collision_boxes(&self) -> Vec<Aabb> {
        let facing = self.facing.get();
        let shape = match self.attachment {
            BellAttachment::Floor => Aabb::one().squash(facing.axis(), 0.25).trim(Facing::Up, 3.0 / 16.0),
            BellAttachment::Ceiling => Aabb::one().contract(0.25, 0.0, 0.25).trim(Facing::Down, 0.25),
            BellAttachment::OneWall | BellAttachment::TwoWalls => {
                let hanging = Aabb::one()
                    .squash(facing.rotate_y(true).axis(), 0.25)
                    .trim(Facing::Up, 1.0 / 16.0)
                    .trim(Facing::Down, 0.25);
                if self.attachment == BellAttachment::OneWall {
                    hanging.trim(facing, 3.0 / 16.0)
                } else {
                    hanging
                }
            }
        };
        vec![shape]
    }

    fn support_type(&self, _face: Facing) -> SupportType {
        SupportType::None
    }

    fn place(&self, tx: &mut BlockTransaction<'_>, req: &PlaceRequest) -> bool {
        let mut bell = *self;
        match req.face {
            Facing::Up => {
                if !supported_by(&tx.fetch_block(req.pos.down()), Facing::Down) {
                    return false;
                }
                if let Some(actor) = req.actor {
                    bell.facing = actor.facing.opposite();
                }
                bell.attachment = BellAttachment::Floor;
            }
            Facing::Down => {
                if !supported_by(&tx.fetch_block(req.pos.up()), Facing::Up) {
                    return false;
                }
                bell.attachment = BellAttachment::Ceiling;
            }
            face => {
                let Ok(facing) = HorizontalFacing::new(face) else {
                    return false;
                };
                bell.facing = facing;
                let back = face.opposite();
                if !supported_by(&tx.fetch_block(req.pos.side(back)), back) {
                    return false;
                }
                bell.attachment = if supported_by(&tx.fetch_block(req.pos.side(face)), face) {
                    BellAttachment::TwoWalls
                } else {
                    BellAttachment::OneWall
                };
            }
        }
        tx.add_block(req.pos, Block::Bell(bell));
        true
    }

    fn on_nearby_block_change(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        let facing = self.facing.get();
        let world = &*ctx.world;
        let attached = match self.attachment {
            BellAttachment::Ceiling => supported_at(world, pos, Facing::Up),
            BellAttachment::Floor => supported_at(world, pos, Facing::Down),
            BellAttachment::OneWall => supported_at(world, pos, facing.opposite()),
            BellAttachment::TwoWalls => {
                supported_at(world, pos, facing) && supported_at(world, pos, facing.opposite())
            }
        };
        if !attached {
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
        actor: Option<&Actor>,
    ) -> bool {
        let Some(actor) = actor else {
            return false;
        };
        let face_hit = actor.facing.get().opposite();
        if !self.is_valid_face_to_ring(face_hit) {
            return false;
        }
        ctx.world.broadcast_bell_ring(pos, face_hit);
        true
    }
}
