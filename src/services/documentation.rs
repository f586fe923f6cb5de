use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the quiz relay backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::websocket::ws_handler,
        crate::routes::quiz::session,
        crate::routes::quiz::load_questions,
        crate::routes::quiz::load_songs,
        crate::routes::quiz::start,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::ws::ClientRequest,
            crate::dto::question::QuestionInput,
            crate::dto::question::LoadQuestionsRequest,
            crate::dto::question::LoadSongsRequest,
            crate::dto::session::SessionSnapshot,
            crate::dto::phase::VisibleGamePhase,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "quiz", description = "Quiz session control"),
        (name = "players", description = "WebSocket channel for quiz clients"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_quiz_routes() {
        let doc = ApiDoc::openapi();
        let paths = doc.paths.paths.keys().cloned().collect::<Vec<_>>();
        for expected in [
            "/healthcheck",
            "/ws",
            "/quiz/session",
            "/quiz/questions",
            "/quiz/songs",
            "/quiz/start",
        ] {
            assert!(paths.iter().any(|path| path == expected), "missing {expected}");
        }
    }
}
