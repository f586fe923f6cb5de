use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::validation::{validate_answer_choices, validate_text},
    state::quiz::Question,
};

/// Incoming question definition.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInput {
    /// Prompt shown to players.
    pub question_text: String,
    /// Answer choices in presentation order.
    pub options: Vec<String>,
    /// Must match one of `options` exactly.
    pub correct_answer: String,
}

impl Validate for QuestionInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_text(&self.question_text) {
            errors.add("questionText", e);
        }

        if let Some(e) = self
            .options
            .iter()
            .find_map(|option| validate_text(option).err())
        {
            errors.add("options", e);
        }

        if let Err(e) = validate_answer_choices(self) {
            errors.add("correctAnswer", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<QuestionInput> for Question {
    fn from(value: QuestionInput) -> Self {
        Self {
            text: value.question_text,
            options: value.options,
            correct_answer: value.correct_answer,
        }
    }
}

/// Payload replacing the whole question set.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct LoadQuestionsRequest {
    /// Replacement questions; must not be empty.
    #[validate(nested)]
    pub questions: Vec<QuestionInput>,
}

/// Payload turning a song list into "name that song" questions.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LoadSongsRequest {
    /// Song titles; each becomes a question and an option of every question.
    pub songs: Vec<String>,
}

impl Validate for LoadSongsRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(e) = self.songs.iter().find_map(|song| validate_text(song).err()) {
            errors.add("songs", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
