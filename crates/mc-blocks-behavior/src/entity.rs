//! The slice of entity behavior blocks interact with.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageCause {
    Fire,
    Lava,
}

/// An entity touching or landing on a block.
pub trait Entity {
    fn is_living(&self) -> bool;

    /// Arrows and other projectiles never catch fire from blocks.
    fn is_projectile(&self) -> bool {
        false
    }

    fn fall_distance(&self) -> f32;

    fn reset_fall_distance(&mut self);

    fn attack(&mut self, cause: DamageCause, amount: f32);

    fn set_on_fire(&mut self, seconds: u32);

    fn extinguish(&mut self);
}

/// A minimal living entity, used by the simulator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicEntity {
    pub health: f32,
    pub fall_distance: f32,
    pub fire_seconds: u32,
    pub projectile: bool,
}

impl BasicEntity {
    pub fn new(health: f32) -> Self {
        Self {
            health,
            ..Self::default()
        }
    }
}

impl Entity for BasicEntity {
    fn is_living(&self) -> bool {
        !self.projectile
    }

    fn is_projectile(&self) -> bool {
        self.projectile
    }

    fn fall_distance(&self) -> f32 {
        self.fall_distance
    }

    fn reset_fall_distance(&mut self) {
        self.fall_distance = 0.0;
    }

    fn attack(&mut self, _cause: DamageCause, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    fn set_on_fire(&mut self, seconds: u32) {
        self.fire_seconds = self.fire_seconds.max(seconds);
    }

    fn extinguish(&mut self) {
        self.fire_seconds = 0;
    }
}
