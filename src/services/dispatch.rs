//! Routing table from inbound client requests to quiz operations.

use tracing::{debug, warn};

use crate::{
    dto::{
        question::{LoadQuestionsRequest, LoadSongsRequest},
        ws::ClientRequest,
    },
    services::quiz_service,
    state::SharedState,
};

/// Route one request from `connection` to the matching quiz operation.
///
/// Rejections are already broadcast by the engine, so they are only logged here.
pub async fn dispatch(state: &SharedState, connection: &str, request: ClientRequest) {
    match request {
        ClientRequest::LoadQuestions { questions } => {
            if let Err(err) =
                quiz_service::load_questions(state, LoadQuestionsRequest { questions }).await
            {
                warn!(connection, error = %err, "question set rejected");
            }
        }
        ClientRequest::LoadSongs { songs } => {
            if let Err(err) = quiz_service::load_songs(state, LoadSongsRequest { songs }).await {
                warn!(connection, error = %err, "song list rejected");
            }
        }
        ClientRequest::Start => {
            quiz_service::start(state).await;
        }
        ClientRequest::Submit { player_id, answer } => {
            quiz_service::submit(state, player_id.as_deref(), answer.as_deref()).await;
        }
        ClientRequest::PlayerReady { player_id } => {
            quiz_service::player_ready(state, connection, player_id.as_deref()).await;
        }
        ClientRequest::PlayerUnready { player_id } => {
            quiz_service::player_not_ready(state, connection, player_id.as_deref()).await;
        }
        ClientRequest::Unknown => {
            debug!(connection, "ignoring request of unknown type");
        }
    }
}
