use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{dto::phase::VisibleGamePhase, state::QuizSnapshot};

/// Current quiz session as exposed by `GET /quiz/session`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Current phase.
    pub phase: VisibleGamePhase,
    /// Number of questions presented so far; also the index of the next one.
    pub current_question_index: usize,
    /// Size of the loaded question set.
    pub question_count: usize,
    /// Players marked ready for the next start.
    pub ready_count: usize,
    /// Live connections; every one must answer before a question advances.
    pub active_count: usize,
    /// Player id to score, in the order players first scored.
    #[schema(value_type = Object)]
    pub scores: IndexMap<String, u32>,
}

impl From<QuizSnapshot> for SessionSnapshot {
    fn from(value: QuizSnapshot) -> Self {
        Self {
            phase: value.phase.into(),
            current_question_index: value.current_question_index,
            question_count: value.question_count,
            ready_count: value.ready_count,
            active_count: value.active_count,
            scores: value.scores,
        }
    }
}
