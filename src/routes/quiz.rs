use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::{
        question::{LoadQuestionsRequest, LoadSongsRequest},
        session::SessionSnapshot,
    },
    error::AppError,
    services::quiz_service,
    state::SharedState,
};

/// Routes letting a host inspect and drive the quiz without a socket.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/quiz/session", get(session))
        .route("/quiz/questions", post(load_questions))
        .route("/quiz/songs", post(load_songs))
        .route("/quiz/start", post(start))
}

/// Current phase, progress, readiness, and scores.
#[utoipa::path(
    get,
    path = "/quiz/session",
    tag = "quiz",
    responses((status = 200, description = "Current session", body = SessionSnapshot))
)]
pub async fn session(State(state): State<SharedState>) -> Json<SessionSnapshot> {
    Json(quiz_service::session_snapshot(&state).await.into())
}

/// Replace the question set and reset the session.
#[utoipa::path(
    post,
    path = "/quiz/questions",
    tag = "quiz",
    request_body = LoadQuestionsRequest,
    responses(
        (status = 200, description = "Questions loaded", body = SessionSnapshot),
        (status = 400, description = "Empty or malformed question set")
    )
)]
pub async fn load_questions(
    State(state): State<SharedState>,
    Json(payload): Json<LoadQuestionsRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = quiz_service::load_questions(&state, payload).await?;
    Ok(Json(snapshot.into()))
}

/// Build "name that song" questions from a song list.
#[utoipa::path(
    post,
    path = "/quiz/songs",
    tag = "quiz",
    request_body = LoadSongsRequest,
    responses(
        (status = 200, description = "Song questions loaded", body = SessionSnapshot),
        (status = 400, description = "Empty or malformed song list")
    )
)]
pub async fn load_songs(
    State(state): State<SharedState>,
    Json(payload): Json<LoadSongsRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = quiz_service::load_songs(&state, payload).await?;
    Ok(Json(snapshot.into()))
}

/// Start a round if every connected player is ready; the outcome is broadcast to players.
#[utoipa::path(
    post,
    path = "/quiz/start",
    tag = "quiz",
    responses((status = 200, description = "Session after the start attempt", body = SessionSnapshot))
)]
pub async fn start(State(state): State<SharedState>) -> Json<SessionSnapshot> {
    Json(quiz_service::start(&state).await.into())
}
