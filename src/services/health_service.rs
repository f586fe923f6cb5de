use crate::{dto::health::HealthResponse, state::SharedState};

/// Respond with a health payload including live connection and subscriber counts.
pub fn health_status(state: &SharedState) -> HealthResponse {
    HealthResponse::ok(
        state.connections().active_count(),
        state.fanout().recipient_count(),
    )
}
