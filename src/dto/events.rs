//! Outbound broadcast envelope shared by every connected client.

use indexmap::IndexMap;
use serde::Serialize;

use crate::state::quiz::Question;

/// Event fanned out to every subscriber as `{"type": ..., "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BroadcastEvent {
    /// A new question is outstanding.
    Question(QuestionEvent),
    /// A player's total changed after a correct answer.
    ScoreUpdate(ScoreUpdateEvent),
    /// The question sequence is exhausted.
    GameOver(GameOverEvent),
    /// The number of ready players changed.
    PlayersReady(PlayersReadyEvent),
    /// A start request was refused because not every connection is ready.
    WaitingForPlayers(WaitingForPlayersEvent),
    /// A new question set was loaded.
    QuestionsUpdated(QuestionsUpdatedEvent),
    /// A request was rejected.
    Error(ErrorEvent),
}

impl BroadcastEvent {
    /// Shorthand for an [`BroadcastEvent::Error`] carrying `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ErrorEvent {
            message: message.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Question text and options, without the answer.
pub struct QuestionEvent {
    /// Prompt shown to players.
    pub question_text: String,
    /// Answer choices in presentation order.
    pub options: Vec<String>,
}

impl From<&Question> for QuestionEvent {
    fn from(question: &Question) -> Self {
        Self {
            question_text: question.text.clone(),
            options: question.options.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// New running total for one player.
pub struct ScoreUpdateEvent {
    /// Player who scored.
    pub player_id: String,
    /// Their total after the award.
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Final totals; players who never scored are absent.
pub struct GameOverEvent {
    /// Totals in the order players first scored.
    pub final_scores: IndexMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Size of the ready set after it changed.
pub struct PlayersReadyEvent {
    /// Players currently marked ready.
    pub ready_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Ready players versus live connections at the time of the refused start.
pub struct WaitingForPlayersEvent {
    /// Players marked ready.
    pub ready_count: usize,
    /// Live connections that all need a ready player.
    pub total_players: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Announces a replaced question set.
pub struct QuestionsUpdatedEvent {
    /// Number of questions now loaded.
    pub question_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Human-readable reason a request was rejected.
pub struct ErrorEvent {
    /// Rejection reason.
    pub message: String,
}
