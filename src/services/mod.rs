/// Connection lifecycle hooks invoked by the transport adapter.
pub mod connection_service;
/// Routing table from client requests to quiz operations.
pub mod dispatch;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Quiz operations serialized through the shared engine.
pub mod quiz_service;
/// WebSocket connection and message handling service.
pub mod websocket_service;
