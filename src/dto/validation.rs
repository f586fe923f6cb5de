//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::dto::question::QuestionInput;

/// Longest accepted question text or option, in characters.
pub const MAX_TEXT_LENGTH: usize = 512;

/// Validates that a text field is non-blank and not absurdly long.
///
/// # Examples
///
/// ```ignore
/// validate_text("What is 2 + 2?") // Ok
/// validate_text("   ")            // Err - blank
/// ```
pub fn validate_text(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("text_blank");
        err.message = Some("Text must not be blank".into());
        return Err(err);
    }

    let length = value.chars().count();
    if length > MAX_TEXT_LENGTH {
        let mut err = ValidationError::new("text_length");
        err.message = Some(
            format!("Text must be at most {MAX_TEXT_LENGTH} characters (got {length})").into(),
        );
        return Err(err);
    }

    Ok(())
}

/// Validates that a question offers options and that its correct answer is one of them.
pub fn validate_answer_choices(question: &QuestionInput) -> Result<(), ValidationError> {
    if question.options.is_empty() {
        let mut err = ValidationError::new("options_empty");
        err.message = Some("A question needs at least one option".into());
        return Err(err);
    }

    if !question
        .options
        .iter()
        .any(|option| option == &question.correct_answer)
    {
        let mut err = ValidationError::new("answer_not_an_option");
        err.message = Some(
            format!(
                "Correct answer `{}` is not one of the options",
                question.correct_answer
            )
            .into(),
        );
        return Err(err);
    }

    Ok(())
}
