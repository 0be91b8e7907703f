//! Block behaviors and the liquid flow engine.
//!
//! Every [`Block`](mc_blocks_state::Block) answers the [`BlockBehavior`]
//! hooks: placement, neighbor updates, random and scheduled ticks, entity
//! contact, and drops. Behaviors reach the world through the [`World`] trait
//! and announce cancellable changes as [`BlockEvent`]s. [`MemoryWorld`] is a
//! small in-memory implementation that drives the hooks tick by tick.

pub mod behavior;
pub mod blocks;
pub mod config;
pub mod entity;
pub mod event;
pub mod fallable;
pub mod flow_cost;
pub mod item;
pub mod liquid;
pub mod memory;
pub mod properties;
pub mod scheduler;
pub mod transaction;
pub mod world;

pub use behavior::BlockBehavior;
pub use config::LiquidSettings;
pub use entity::{BasicEntity, DamageCause, Entity};
pub use event::{AllowAll, BlockEvent, BlockEventKind, EventHooks, EventLog};
pub use flow_cost::{FlowCostCalculator, MinimumCostFlowCalculator};
pub use item::{Item, ItemKind, ToolType};
pub use memory::MemoryWorld;
pub use scheduler::TickScheduler;
pub use transaction::{place_block, Actor, BlockTransaction, PlaceRequest};
pub use world::{BlockContext, Difficulty, World};
