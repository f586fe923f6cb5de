use tracing::{debug, info};
use validator::Validate;

use crate::{
    dto::question::{LoadQuestionsRequest, LoadSongsRequest},
    error::ServiceError,
    state::{
        QuizEngine, QuizSnapshot, SharedState, SubmitOutcome,
        quiz::{Question, questions_from_songs},
        state_machine::GamePhase,
    },
};

/// Validate and install a new question set.
pub async fn load_questions(
    state: &SharedState,
    request: LoadQuestionsRequest,
) -> Result<QuizSnapshot, ServiceError> {
    if let Err(err) = request.validate() {
        let err = ServiceError::from(err);
        return Err(state.with_engine(|engine| engine.reject(err)).await);
    }

    let questions = request
        .questions
        .into_iter()
        .map(Question::from)
        .collect::<Vec<_>>();
    install_questions(state, questions).await
}

/// Build one "name that song" question per song and install them.
pub async fn load_songs(
    state: &SharedState,
    request: LoadSongsRequest,
) -> Result<QuizSnapshot, ServiceError> {
    if let Err(err) = request.validate() {
        let err = ServiceError::from(err);
        return Err(state.with_engine(|engine| engine.reject(err)).await);
    }

    info!(songs = request.songs.len(), "building song questions");
    install_questions(state, questions_from_songs(&request.songs)).await
}

async fn install_questions(
    state: &SharedState,
    questions: Vec<Question>,
) -> Result<QuizSnapshot, ServiceError> {
    state
        .with_engine(|engine| {
            engine.load_questions(questions)?;
            Ok(engine.snapshot())
        })
        .await
}

/// Ask the engine to start a round and return the resulting state.
pub async fn start(state: &SharedState) -> QuizSnapshot {
    with_round_timer(state, |engine| {
        engine.start();
        engine.snapshot()
    })
    .await
}

/// Forward a player's answer.
pub async fn submit(
    state: &SharedState,
    player: Option<&str>,
    answer: Option<&str>,
) -> SubmitOutcome {
    let outcome = with_round_timer(state, |engine| engine.submit(player, answer)).await;
    debug!(?player, ?outcome, "submission handled");
    outcome
}

// Any broadcast can drop an unreachable connection and complete the round, so the
// readiness and disconnect paths arm the timer too.

/// Mark the player behind `connection` as ready.
pub async fn player_ready(state: &SharedState, connection: &str, player: Option<&str>) {
    with_round_timer(state, |engine| engine.player_ready(connection, player)).await;
}

/// Withdraw a player's readiness.
pub async fn player_not_ready(state: &SharedState, connection: &str, player: Option<&str>) {
    with_round_timer(state, |engine| engine.player_not_ready(connection, player)).await;
}

/// Drop a closed connection and whatever readiness it carried.
pub async fn player_disconnected(state: &SharedState, connection: &str) {
    with_round_timer(state, |engine| engine.player_disconnected(connection)).await;
}

/// Current session state.
pub async fn session_snapshot(state: &SharedState) -> QuizSnapshot {
    state.snapshot().await
}

/// Run an engine operation and arm the question timer when it put a new question out.
async fn with_round_timer<F, T>(state: &SharedState, f: F) -> T
where
    F: FnOnce(&mut QuizEngine) -> T,
{
    let (value, new_round) = state
        .with_engine(|engine| {
            let before = engine.round();
            let value = f(engine);
            let new_round = (engine.round() != before
                && engine.phase() == GamePhase::QuestionActive)
                .then(|| engine.round());
            (value, new_round)
        })
        .await;

    if let Some(round) = new_round {
        arm_round_timer(state, round);
    }
    value
}

/// Advance past `round` after the configured timeout unless players got there first.
fn arm_round_timer(state: &SharedState, round: u64) {
    let Some(limit) = state.config().question_timeout() else {
        return;
    };

    let state = state.clone();
    tokio::spawn(async move {
        tokio::time::sleep(limit).await;
        let expired = with_round_timer(&state, |engine| engine.expire_round(round)).await;
        if !expired {
            debug!(round, "question timer superseded");
        }
    });
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::extract::ws::Message;
    use tokio::sync::mpsc;

    use super::*;
    use crate::{config::AppConfig, dto::question::QuestionInput, state::AppState};

    fn connect(state: &SharedState, id: &str) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        state.connections().register(id);
        state.fanout().subscribe(id, tx);
        rx
    }

    fn frames(rx: &mut mpsc::UnboundedReceiver<Message>) -> Vec<serde_json::Value> {
        let mut out = Vec::new();
        while let Ok(Message::Text(text)) = rx.try_recv() {
            out.push(serde_json::from_str(text.as_str()).unwrap());
        }
        out
    }

    #[tokio::test]
    async fn invalid_question_is_rejected_and_broadcast() {
        let state = AppState::new(AppConfig::default());
        let mut rx = connect(&state, "c1");
        let before = session_snapshot(&state).await;

        let err = load_questions(
            &state,
            LoadQuestionsRequest {
                questions: vec![QuestionInput {
                    question_text: "Sky?".into(),
                    options: vec!["Blue".into()],
                    correct_answer: "Green".into(),
                }],
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert_eq!(session_snapshot(&state).await, before);
        let sent = frames(&mut rx);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["type"], "ERROR");
    }

    #[tokio::test]
    async fn songs_become_questions() {
        let state = AppState::new(AppConfig::default());
        let mut rx = connect(&state, "c1");

        let snapshot = load_songs(
            &state,
            LoadSongsRequest {
                songs: vec!["One".into(), "Two".into()],
            },
        )
        .await
        .unwrap();

        assert_eq!(snapshot.question_count, 2);
        assert_eq!(snapshot.phase, GamePhase::Idle);
        assert_eq!(
            frames(&mut rx),
            vec![serde_json::json!({"type": "QUESTIONS_UPDATED", "payload": {"questionCount": 2}})]
        );
    }

    #[tokio::test]
    async fn empty_song_list_is_invalid() {
        let state = AppState::new(AppConfig::default());
        let err = load_songs(&state, LoadSongsRequest { songs: Vec::new() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn idle_question_times_out() {
        let config = AppConfig::default()
            .with_questions(vec![Question::new("2+2?", ["3", "4"], "4")])
            .with_question_timeout(Duration::from_millis(50));
        let state = AppState::new(config);
        let mut rx = connect(&state, "c1");
        player_ready(&state, "c1", Some("alice")).await;

        let snapshot = start(&state).await;
        assert_eq!(snapshot.phase, GamePhase::QuestionActive);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(session_snapshot(&state).await.phase, GamePhase::GameOver);

        let types = frames(&mut rx)
            .into_iter()
            .map(|frame| frame["type"].as_str().unwrap_or_default().to_string())
            .collect::<Vec<_>>();
        assert_eq!(types, ["PLAYERS_READY", "QUESTION", "GAME_OVER"]);
    }

    #[tokio::test]
    async fn no_timer_without_timeout() {
        let state = AppState::new(AppConfig::default());
        connect(&state, "c1");
        player_ready(&state, "c1", Some("alice")).await;
        start(&state).await;

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(session_snapshot(&state).await.current_question_index, 1);
    }
}
