use axum::extract::ws::Message;
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use crate::{
    services::quiz_service,
    state::{ConnectionId, SharedState},
};

/// Register a freshly upgraded socket and subscribe its writer to broadcasts.
pub fn on_connect(state: &SharedState, tx: mpsc::UnboundedSender<Message>) -> ConnectionId {
    let connection = Uuid::new_v4().simple().to_string();
    state.connections().register(&connection);
    state.fanout().subscribe(&connection, tx);
    info!(
        %connection,
        active = state.connections().active_count(),
        subscribers = state.fanout().recipient_count(),
        "client connected"
    );
    connection
}

/// Tear down a closed socket: stop broadcasting to it and release its player's readiness.
pub async fn on_disconnect(state: &SharedState, connection: &str) {
    state.fanout().unsubscribe(connection);
    quiz_service::player_disconnected(state, connection).await;
    info!(
        connection,
        active = state.connections().active_count(),
        "client disconnected"
    );
}
