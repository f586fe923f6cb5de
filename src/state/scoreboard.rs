use indexmap::IndexMap;

use crate::state::registry::PlayerId;

/// Running totals per player, kept in the order players first scored.
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    scores: IndexMap<PlayerId, u32>,
}

impl Scoreboard {
    /// Create an empty scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `points` to the player's total and return the new total.
    pub fn award(&mut self, player: &str, points: u32) -> u32 {
        let total = self.scores.entry(player.to_string()).or_insert(0);
        *total = total.saturating_add(points);
        *total
    }

    /// Copy of every total, suitable for a broadcast payload.
    pub fn snapshot(&self) -> IndexMap<PlayerId, u32> {
        self.scores.clone()
    }

    /// Drop every entry.
    pub fn reset(&mut self) {
        self.scores.clear();
    }
}
