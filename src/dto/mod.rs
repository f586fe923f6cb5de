/// Outbound broadcast events.
pub mod events;
/// Health check payload.
pub mod health;
/// Phase as exposed over REST.
pub mod phase;
/// Question and song loading payloads.
pub mod question;
/// Session snapshot payload.
pub mod session;
/// Shared validation rules.
pub mod validation;
/// Inbound WebSocket requests.
pub mod ws;
