//! FIFO queue of pickups that could not be matched when they were requested.

use std::collections::VecDeque;

use crate::network::NodeId;

/// Strict FIFO: no priorities, no expiry, no deduplication. The same pickup may be queued
/// several times and is served once per entry.
#[derive(Debug, Clone, Default)]
pub struct Backlog {
    pending: VecDeque<NodeId>,
}

impl Backlog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a pickup and return its 1-based position.
    pub fn enqueue(&mut self, pickup: NodeId) -> usize {
        self.pending.push_back(pickup);
        self.pending.len()
    }

    pub fn dequeue(&mut self) -> Option<NodeId> {
        self.pending.pop_front()
    }

    /// Remove the oldest entry for which `accept` yields a value, leaving every other entry
    /// in its original order.
    pub fn take_first_with<T>(
        &mut self,
        mut accept: impl FnMut(NodeId) -> Option<T>,
    ) -> Option<(NodeId, T)> {
        let (index, value) = self
            .pending
            .iter()
            .enumerate()
            .find_map(|(index, pickup)| accept(*pickup).map(|value| (index, value)))?;
        let pickup = self.pending.remove(index)?;
        Some((pickup, value))
    }

    /// Queued pickups, oldest first.
    pub fn peek_all(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.pending.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub(crate) fn clear(&mut self) -> usize {
        let cleared = self.pending.len();
        self.pending.clear();
        cleared
    }
}
