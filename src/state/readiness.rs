use std::collections::HashSet;

use crate::state::registry::PlayerId;

/// Players who have signalled they are ready, independent of their connections.
#[derive(Debug, Clone, Default)]
pub struct ReadinessTracker {
    ready: HashSet<PlayerId>,
}

impl ReadinessTracker {
    /// Create a tracker with nobody ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a player as ready.
    pub fn mark_ready(&mut self, player: &str) {
        self.ready.insert(player.to_string());
    }

    /// Withdraw a player's readiness.
    pub fn mark_not_ready(&mut self, player: &str) {
        self.ready.remove(player);
    }

    /// Number of ready players.
    pub fn ready_count(&self) -> usize {
        self.ready.len()
    }

    /// Every live connection has a ready player behind it, and there is at least one.
    pub fn is_quorum(&self, active_count: usize) -> bool {
        let ready = self.ready_count();
        ready > 0 && ready == active_count
    }

    /// Forget every ready mark.
    pub fn clear(&mut self) {
        self.ready.clear();
    }
}
