//! Application-level configuration loading: scoring, round timeout, and the initial question set.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use crate::{
    dto::question::QuestionInput,
    state::{
        engine::DEFAULT_POINTS_PER_ANSWER,
        quiz::{Question, default_questions},
    },
};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "QUIZ_RELAY_BACK_CONFIG_PATH";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    points_per_correct_answer: u32,
    question_timeout: Option<Duration>,
    questions: Vec<Question>,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        questions = app_config.questions.len(),
                        timeout = ?app_config.question_timeout,
                        "loaded quiz config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a JSON config document. Invalid questions reject the whole document.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let raw = serde_json::from_str::<RawConfig>(contents)?;
        Self::try_from(raw)
    }

    /// Replace the initial question set.
    pub fn with_questions(mut self, questions: Vec<Question>) -> Self {
        self.questions = questions;
        self
    }

    /// Arm a timer on every question so idle rounds still advance.
    pub fn with_question_timeout(mut self, timeout: Duration) -> Self {
        self.question_timeout = Some(timeout);
        self
    }

    /// Points awarded for each correct answer.
    pub fn points_per_correct_answer(&self) -> u32 {
        self.points_per_correct_answer
    }

    /// How long a question stays open before the engine moves on regardless of submissions.
    pub fn question_timeout(&self) -> Option<Duration> {
        self.question_timeout
    }

    /// Questions the session starts with.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            points_per_correct_answer: DEFAULT_POINTS_PER_ANSWER,
            question_timeout: None,
            questions: default_questions(),
        }
    }
}

/// Reasons a config document is rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The document is not valid JSON for the expected shape.
    #[error("malformed config: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A configured question failed validation.
    #[error("invalid question set: {0}")]
    InvalidQuestions(#[from] validator::ValidationErrors),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    points_per_correct_answer: Option<u32>,
    #[serde(default)]
    question_timeout_secs: Option<u64>,
    #[serde(default)]
    questions: Option<Vec<QuestionInput>>,
}

impl TryFrom<RawConfig> for AppConfig {
    type Error = ConfigError;

    fn try_from(value: RawConfig) -> Result<Self, Self::Error> {
        let defaults = Self::default();
        let questions = match value.questions {
            Some(inputs) => {
                for input in &inputs {
                    input.validate()?;
                }
                inputs.into_iter().map(Question::from).collect()
            }
            None => defaults.questions,
        };

        Ok(Self {
            points_per_correct_answer: value
                .points_per_correct_answer
                .unwrap_or(defaults.points_per_correct_answer),
            question_timeout: value
                .question_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            questions,
        })
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
