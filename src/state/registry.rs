use dashmap::DashMap;
use tracing::debug;

/// Opaque identifier of a live transport session.
pub type ConnectionId = String;
/// Application-level player identity supplied by the client.
pub type PlayerId = String;

/// Live connections and the player each one has identified as.
///
/// Membership is a concurrent map so transport tasks can register without going through the
/// engine lock; the engine reads [`ConnectionRegistry::active_count`] inside its own critical
/// section.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    live: DashMap<ConnectionId, Option<PlayerId>>,
}

impl ConnectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to the live set. Registering twice keeps the existing binding.
    pub fn register(&self, connection: &str) {
        self.live.entry(connection.to_string()).or_insert(None);
    }

    /// Drop a connection.
    ///
    /// Returns `None` when the connection was not live, otherwise the player it was bound to.
    pub fn unregister(&self, connection: &str) -> Option<Option<PlayerId>> {
        self.live.remove(connection).map(|(_, player)| player)
    }

    /// Bind a live connection to a player; the last bind wins.
    ///
    /// Returns `false` when the connection is not live, in which case nothing is recorded.
    pub fn bind(&self, connection: &str, player: &str) -> bool {
        match self.live.get_mut(connection) {
            Some(mut slot) => {
                *slot = Some(player.to_string());
                true
            }
            None => {
                debug!(connection, player, "ignoring bind for unknown connection");
                false
            }
        }
    }

    /// Number of live connections, i.e. how many players must act before a round can advance.
    pub fn active_count(&self) -> usize {
        self.live.len()
    }
}
