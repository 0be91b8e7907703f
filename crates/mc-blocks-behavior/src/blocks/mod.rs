//! Behaviors for each block kind, one module per family.

mod bamboo;
mod bell;
mod button;
mod coral;
mod farmland;
mod fire;
mod frosted_ice;
mod grass;
mod leaves;
mod plant;
mod rail;
mod redstone;
mod simple;
mod snow_layer;

pub use grass::{grow_grass, Grass};
pub use plant::Plant;
pub use simple::Simple;
