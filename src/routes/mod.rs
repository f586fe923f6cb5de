use axum::Router;

use crate::state::SharedState;

/// Swagger UI.
pub mod docs;
/// Health check route.
pub mod health;
/// Quiz control routes.
pub mod quiz;
/// WebSocket upgrade route.
pub mod websocket;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(websocket::router())
        .merge(quiz::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
