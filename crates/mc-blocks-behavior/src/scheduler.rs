//! Delayed block update queue.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use mc_blocks_state::BlockPos;

/// A block update scheduled for a future game tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledUpdate {
    pub pos: BlockPos,
    pub target_tick: u64,
    /// Insertion order, so updates due on the same tick run first-come first-served.
    seq: u64,
}

impl Ord for ScheduledUpdate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.target_tick
            .cmp(&other.target_tick)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for ScheduledUpdate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue for scheduled block updates, at most one live entry per position.
#[derive(Debug, Default)]
pub struct TickScheduler {
    queue: BinaryHeap<Reverse<ScheduledUpdate>>,
    /// Live target tick per position. Heap entries that disagree are stale.
    pending: HashMap<BlockPos, u64>,
    next_seq: u64,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an update at `pos` to fire `delay` ticks after `current_tick`.
    ///
    /// If the position already has an update due no later, the request is
    /// ignored. An earlier request replaces a later one.
    pub fn schedule(&mut self, pos: BlockPos, delay: u64, current_tick: u64) -> bool {
        let target_tick = current_tick + delay;
        if self.pending.get(&pos).is_some_and(|&t| t <= target_tick) {
            return false;
        }
        self.pending.insert(pos, target_tick);
        self.queue.push(Reverse(ScheduledUpdate {
            pos,
            target_tick,
            seq: self.next_seq,
        }));
        self.next_seq += 1;
        true
    }

    /// Drain all updates whose target tick is at or before `current_tick`.
    pub fn drain_ready(&mut self, current_tick: u64) -> Vec<ScheduledUpdate> {
        let mut ready = Vec::new();
        while self
            .queue
            .peek()
            .is_some_and(|Reverse(update)| update.target_tick <= current_tick)
        {
            let Some(Reverse(update)) = self.queue.pop() else {
                break;
            };
            if self.pending.get(&update.pos) != Some(&update.target_tick) {
                continue;
            }
            self.pending.remove(&update.pos);
            ready.push(update);
        }
        ready
    }

    pub fn is_scheduled(&self, pos: BlockPos) -> bool {
        self.pending.contains_key(&pos)
    }

    /// Tick at which the update for `pos` is due.
    pub fn due_at(&self, pos: BlockPos) -> Option<u64> {
        self.pending.get(&pos).copied()
    }

    /// Number of pending updates.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32) -> BlockPos {
        BlockPos::new(x, 0, 0)
    }

    #[test]
    fn scheduler_basic() {
        let mut s = TickScheduler::new();
        s.schedule(p(0), 5, 100);
        s.schedule(p(1), 10, 100);
        assert_eq!(s.len(), 2);

        assert!(s.drain_ready(104).is_empty());

        let ready = s.drain_ready(105);
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].pos, p(0));

        let ready = s.drain_ready(110);
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].pos, p(1));
        assert!(s.is_empty());
    }

    #[test]
    fn later_duplicate_is_ignored() {
        let mut s = TickScheduler::new();
        assert!(s.schedule(p(5), 1, 0));
        assert!(!s.schedule(p(5), 2, 0));
        assert_eq!(s.len(), 1);
        assert_eq!(s.due_at(p(5)), Some(1));
    }

    #[test]
    fn earlier_duplicate_replaces() {
        let mut s = TickScheduler::new();
        s.schedule(p(5), 30, 0);
        assert!(s.schedule(p(5), 5, 0));
        assert_eq!(s.len(), 1);
        let ready = s.drain_ready(5);
        assert_eq!(ready.len(), 1);
        // The stale entry at tick 30 must not fire again.
        assert!(s.drain_ready(30).is_empty());
    }

    #[test]
    fn same_tick_runs_in_insertion_order() {
        let mut s = TickScheduler::new();
        s.schedule(p(3), 5, 0);
        s.schedule(p(1), 5, 0);
        s.schedule(p(2), 5, 0);
        let order: Vec<BlockPos> = s.drain_ready(5).into_iter().map(|u| u.pos).collect();
        assert_eq!(order, vec![p(3), p(1), p(2)]);
    }

    #[test]
    fn is_scheduled_clears_after_drain() {
        let mut s = TickScheduler::new();
        assert!(!s.is_scheduled(p(0)));
        s.schedule(p(0), 5, 0);
        assert!(s.is_scheduled(p(0)));
        s.drain_ready(5);
        assert!(!s.is_scheduled(p(0)));
    }
}
