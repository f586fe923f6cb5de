use axum::extract::ws::{Message, Utf8Bytes};
use dashmap::{DashMap, DashSet};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{dto::events::BroadcastEvent, state::registry::ConnectionId};

/// Fan-out channel the engine publishes state changes through.
///
/// Publishing is fire-and-forget: implementations must not block, must not call back into
/// the engine, and must drop unreachable recipients without failing the whole publish.
pub trait BroadcastBus: Send + Sync {
    /// Deliver `event` to every current subscriber on a best-effort basis.
    fn publish(&self, event: &BroadcastEvent);

    /// Drain the connections found unreachable by earlier publishes.
    ///
    /// The engine treats each of them as disconnected.
    fn take_unreachable(&self) -> Vec<ConnectionId> {
        Vec::new()
    }
}

/// Broadcast bus backed by the outbound channels of connected WebSocket clients.
#[derive(Debug, Default)]
pub struct SocketFanout {
    recipients: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
    /// Pruned recipients not yet collected by the engine.
    unreachable: DashSet<ConnectionId>,
}

impl SocketFanout {
    /// Create a fan-out with no recipients.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start delivering broadcasts to `tx`.
    pub fn subscribe(&self, connection: &str, tx: mpsc::UnboundedSender<Message>) {
        self.recipients.insert(connection.to_string(), tx);
    }

    /// Stop delivering broadcasts to `connection`.
    pub fn unsubscribe(&self, connection: &str) {
        self.recipients.remove(connection);
    }

    /// Number of subscribed recipients.
    pub fn recipient_count(&self) -> usize {
        self.recipients.len()
    }
}

impl BroadcastBus for SocketFanout {
    fn publish(&self, event: &BroadcastEvent) {
        let payload: Utf8Bytes = match serde_json::to_string(event) {
            Ok(text) => text.into(),
            Err(err) => {
                warn!(error = %err, "failed to serialize broadcast `{event:?}`");
                return;
            }
        };

        // Collect first: removing while iterating would deadlock the shard.
        let unreachable: Vec<ConnectionId> = self
            .recipients
            .iter()
            .filter(|entry| entry.value().send(Message::Text(payload.clone())).is_err())
            .map(|entry| entry.key().clone())
            .collect();

        for connection in unreachable {
            warn!(%connection, "writer closed, pruning broadcast recipient");
            self.recipients.remove(&connection);
            self.unreachable.insert(connection);
        }

        debug!(recipients = self.recipients.len(), "broadcast delivered");
    }

    fn take_unreachable(&self) -> Vec<ConnectionId> {
        let pending: Vec<ConnectionId> = self
            .unreachable
            .iter()
            .map(|entry| entry.key().clone())
            .collect();

        pending
            .into_iter()
            .filter_map(|connection| self.unreachable.remove(&connection))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_event(ready_count: usize) -> BroadcastEvent {
        BroadcastEvent::PlayersReady(crate::dto::events::PlayersReadyEvent { ready_count })
    }

    #[test]
    fn publish_reaches_every_subscriber() {
        let fanout = SocketFanout::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        fanout.subscribe("c1", tx1);
        fanout.subscribe("c2", tx2);

        fanout.publish(&ready_event(1));

        for rx in [&mut rx1, &mut rx2] {
            match rx.try_recv().unwrap() {
                Message::Text(text) => assert_eq!(
                    text.as_str(),
                    r#"{"type":"PLAYERS_READY","payload":{"readyCount":1}}"#
                ),
                other => panic!("unexpected frame {other:?}"),
            }
        }
    }

    #[test]
    fn closed_recipients_are_pruned_without_affecting_others() {
        let fanout = SocketFanout::new();
        let (live_tx, mut live_rx) = mpsc::unbounded_channel();
        let (dead_tx, dead_rx) = mpsc::unbounded_channel();
        fanout.subscribe("live", live_tx);
        fanout.subscribe("dead", dead_tx);
        drop(dead_rx);

        fanout.publish(&ready_event(0));

        assert_eq!(fanout.recipient_count(), 1);
        assert!(live_rx.try_recv().is_ok());
        assert_eq!(fanout.take_unreachable(), vec!["dead".to_string()]);
        assert!(fanout.take_unreachable().is_empty());
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let fanout = SocketFanout::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        fanout.subscribe("c1", tx);
        fanout.unsubscribe("c1");

        fanout.publish(&ready_event(0));
        assert!(rx.try_recv().is_err());
        assert!(fanout.take_unreachable().is_empty());
    }
}
