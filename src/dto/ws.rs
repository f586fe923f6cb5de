use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dto::question::QuestionInput;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
/// Requests accepted from quiz WebSocket clients.
#[serde(tag = "type")]
pub enum ClientRequest {
    /// Replace the question set.
    #[serde(rename = "load-questions")]
    LoadQuestions {
        /// New questions.
        questions: Vec<QuestionInput>,
    },
    /// Replace the question set with song questions.
    #[serde(rename = "load-songs")]
    LoadSongs {
        /// Song titles.
        songs: Vec<String>,
    },
    /// Start a game once everyone is ready.
    #[serde(rename = "start")]
    Start,
    /// Answer the outstanding question.
    #[serde(rename = "submit")]
    Submit {
        /// Answering player.
        #[serde(default, rename = "playerId")]
        player_id: Option<String>,
        /// Chosen option.
        #[serde(default)]
        answer: Option<String>,
    },
    /// Mark a player ready and bind them to this connection.
    #[serde(rename = "player-ready")]
    PlayerReady {
        /// Player identity.
        #[serde(default, rename = "playerId")]
        player_id: Option<String>,
    },
    /// Withdraw a player's readiness.
    #[serde(rename = "player-unready")]
    PlayerUnready {
        /// Player identity.
        #[serde(default, rename = "playerId")]
        player_id: Option<String>,
    },
    /// Any other `type`; ignored.
    #[serde(other)]
    Unknown,
}

impl ClientRequest {
    /// Parse a text frame.
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_submit_with_missing_fields() {
        let request = ClientRequest::from_json_str(r#"{"type":"submit","playerId":"alice"}"#)
            .unwrap();
        match request {
            ClientRequest::Submit { player_id, answer } => {
                assert_eq!(player_id.as_deref(), Some("alice"));
                assert_eq!(answer, None);
            }
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn parses_bare_start() {
        assert!(matches!(
            ClientRequest::from_json_str(r#"{"type":"start"}"#).unwrap(),
            ClientRequest::Start
        ));
    }

    #[test]
    fn unknown_type_is_tolerated() {
        assert!(matches!(
            ClientRequest::from_json_str(r#"{"type":"dance"}"#).unwrap(),
            ClientRequest::Unknown
        ));
    }

    #[test]
    fn missing_type_is_an_error() {
        assert!(ClientRequest::from_json_str(r#"{"playerId":"alice"}"#).is_err());
    }
}
