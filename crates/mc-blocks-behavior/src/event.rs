//! Cancellable block events.
//!
//! Behaviors describe what they are about to do as a [`BlockEvent`] and ask
//! the injected [`EventHooks`] whether to proceed. The event bus itself lives
//! outside this crate.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use mc_blocks_state::{Block, BlockPos};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockEvent {
    /// A block turns into another by contact (lava hardening).
    Form { pos: BlockPos, new_state: Block },
    /// Liquid, fire, or grass spreads into a position.
    Spread {
        pos: BlockPos,
        source: BlockPos,
        new_state: Block,
    },
    /// Fire destroys a flammable block.
    Burn { pos: BlockPos, cause: BlockPos },
    /// An entity is about to be set on fire.
    Combust { pos: BlockPos, seconds: u32 },
    /// An entity lands on farmland hard enough to trample it.
    Trample { pos: BlockPos },
    Melt { pos: BlockPos, new_state: Block },
    /// A block dies (coral drying out, grass losing light).
    Death { pos: BlockPos, new_state: Block },
    /// A plant grows, possibly across several positions.
    Grow { pos: BlockPos, blocks: Vec<(BlockPos, Block)> },
    LeavesDecay { pos: BlockPos },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockEventKind {
    Form,
    Spread,
    Burn,
    Combust,
    Trample,
    Melt,
    Death,
    Grow,
    LeavesDecay,
}

impl BlockEvent {
    pub fn kind(&self) -> BlockEventKind {
        match self {
            BlockEvent::Form { .. } => BlockEventKind::Form,
            BlockEvent::Spread { .. } => BlockEventKind::Spread,
            BlockEvent::Burn { .. } => BlockEventKind::Burn,
            BlockEvent::Combust { .. } => BlockEventKind::Combust,
            BlockEvent::Trample { .. } => BlockEventKind::Trample,
            BlockEvent::Melt { .. } => BlockEventKind::Melt,
            BlockEvent::Death { .. } => BlockEventKind::Death,
            BlockEvent::Grow { .. } => BlockEventKind::Grow,
            BlockEvent::LeavesDecay { .. } => BlockEventKind::LeavesDecay,
        }
    }

    pub fn pos(&self) -> BlockPos {
        match self {
            BlockEvent::Form { pos, .. }
            | BlockEvent::Spread { pos, .. }
            | BlockEvent::Burn { pos, .. }
            | BlockEvent::Combust { pos, .. }
            | BlockEvent::Trample { pos }
            | BlockEvent::Melt { pos, .. }
            | BlockEvent::Death { pos, .. }
            | BlockEvent::Grow { pos, .. }
            | BlockEvent::LeavesDecay { pos } => *pos,
        }
    }
}

/// Receives every block event before it takes effect.
pub trait EventHooks {
    /// Returns false to cancel the event.
    fn allow(&mut self, event: &BlockEvent) -> bool;
}

/// Hooks that never cancel anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl EventHooks for AllowAll {
    fn allow(&mut self, _event: &BlockEvent) -> bool {
        true
    }
}

/// Records every event and cancels the configured kinds.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub events: Vec<BlockEvent>,
    cancelled: HashSet<BlockEventKind>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancelling(kinds: impl IntoIterator<Item = BlockEventKind>) -> Self {
        Self {
            events: Vec::new(),
            cancelled: kinds.into_iter().collect(),
        }
    }

    pub fn count(&self, kind: BlockEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventHooks for EventLog {
    fn allow(&mut self, event: &BlockEvent) -> bool {
        let allowed = !self.cancelled.contains(&event.kind());
        if !allowed {
            trace!("cancelled {:?} at {:?}", event.kind(), event.pos());
        }
        self.events.push(event.clone());
        allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_cancels_configured_kinds() {
        let mut log = EventLog::cancelling([BlockEventKind::Spread]);
        let pos = BlockPos::new(0, 0, 0);
        assert!(!log.allow(&BlockEvent::Spread {
            pos,
            source: pos,
            new_state: Block::Air
        }));
        assert!(log.allow(&BlockEvent::Trample { pos }));
        assert_eq!(log.count(BlockEventKind::Spread), 1);
        assert_eq!(log.events.len(), 2);
    }
}
