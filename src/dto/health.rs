use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status (always "ok" while the process is serving).
    pub status: String,
    /// Number of live WebSocket connections.
    pub connections: usize,
    /// Number of sockets currently receiving broadcasts.
    pub subscribers: usize,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(connections: usize, subscribers: usize) -> Self {
        Self {
            status: "ok".to_string(),
            connections,
            subscribers,
        }
    }
}
