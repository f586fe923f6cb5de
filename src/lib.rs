//! Library crate for quiz-relay-back, exposing modules for binaries and integration tests.

pub mod config;
/// Wire payloads for REST and WebSocket clients.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// HTTP route tree.
pub mod routes;
/// Application services bridging transports and the quiz engine.
pub mod services;
/// Shared application state and the quiz core.
pub mod state;
