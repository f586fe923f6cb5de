use serde::Serialize;
use utoipa::ToSchema;

use crate::state::state_machine::GamePhase;

/// Publicly visible quiz phase exposed to REST clients.
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisibleGamePhase {
    /// No round started since the last reset.
    Idle,
    /// A question is outstanding.
    QuestionActive,
    /// Final scores have been published.
    GameOver,
}

impl From<GamePhase> for VisibleGamePhase {
    fn from(value: GamePhase) -> Self {
        match value {
            GamePhase::Idle => VisibleGamePhase::Idle,
            GamePhase::QuestionActive => VisibleGamePhase::QuestionActive,
            GamePhase::GameOver => VisibleGamePhase::GameOver,
        }
    }
}
