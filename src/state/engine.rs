use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, error, info};

use crate::{
    dto::events::{
        BroadcastEvent, GameOverEvent, PlayersReadyEvent, QuestionEvent, QuestionsUpdatedEvent,
        ScoreUpdateEvent, WaitingForPlayersEvent,
    },
    error::ServiceError,
    state::{
        bus::BroadcastBus,
        quiz::{Question, QuizSession},
        readiness::ReadinessTracker,
        registry::{ConnectionRegistry, PlayerId},
        scoreboard::Scoreboard,
        state_machine::{GameEvent, GamePhase, GameStateMachine},
    },
};

/// Points awarded for a correct answer unless configured otherwise.
pub const DEFAULT_POINTS_PER_ANSWER: u32 = 10;

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Missing fields or no question outstanding; nothing changed.
    Ignored,
    /// The player already answered the outstanding question.
    Duplicate,
    /// The answer was recorded.
    Recorded {
        /// Whether the answer scored.
        correct: bool,
        /// Whether this submission completed the round.
        advanced: bool,
    },
}

/// Point-in-time view of the engine, detached from the lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSnapshot {
    /// Current phase.
    pub phase: GamePhase,
    /// Number of questions presented so far in this game.
    pub current_question_index: usize,
    /// Size of the loaded question set.
    pub question_count: usize,
    /// Players marked ready.
    pub ready_count: usize,
    /// Live connections.
    pub active_count: usize,
    /// Identifier of the latest question emission.
    pub round: u64,
    /// Totals of players who have scored, in first-score order.
    pub scores: IndexMap<PlayerId, u32>,
}

/// Quiz coordinator: the single owner of phase, questions, readiness, submissions and scores.
///
/// Every mutating method expects exclusive access, so callers keep one instance behind a
/// single lock. Broadcasts go out through the [`BroadcastBus`] while that access is held.
pub struct QuizEngine {
    machine: GameStateMachine,
    session: QuizSession,
    readiness: ReadinessTracker,
    scoreboard: Scoreboard,
    /// Bumped every time a question goes out; lets round timers detect staleness.
    round: u64,
    points_per_answer: u32,
    connections: Arc<ConnectionRegistry>,
    bus: Arc<dyn BroadcastBus>,
}

impl QuizEngine {
    /// Create an idle engine over an initial question set.
    pub fn new(
        questions: Vec<Question>,
        points_per_answer: u32,
        connections: Arc<ConnectionRegistry>,
        bus: Arc<dyn BroadcastBus>,
    ) -> Self {
        Self {
            machine: GameStateMachine::new(),
            session: QuizSession::new(questions),
            readiness: ReadinessTracker::new(),
            scoreboard: Scoreboard::new(),
            round: 0,
            points_per_answer,
            connections,
            bus,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.machine.phase()
    }

    /// Identifier of the outstanding question emission.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Copy the observable state.
    pub fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot {
            phase: self.phase(),
            current_question_index: self.session.current_index(),
            question_count: self.session.questions().len(),
            ready_count: self.readiness.ready_count(),
            active_count: self.connections.active_count(),
            round: self.round,
            scores: self.scoreboard.snapshot(),
        }
    }

    /// Replace the question set and reset the session to idle.
    ///
    /// An empty set is rejected with [`ServiceError::InvalidInput`]; the rejection is also
    /// broadcast and nothing else changes.
    pub fn load_questions(&mut self, questions: Vec<Question>) -> Result<(), ServiceError> {
        if questions.is_empty() {
            return Err(self.reject(ServiceError::InvalidInput(
                "question set is empty".into(),
            )));
        }

        let count = questions.len();
        self.session.replace_questions(questions);
        self.scoreboard.reset();
        self.readiness.clear();
        self.transition(GameEvent::QuestionsLoaded);
        info!(count, "question set replaced");

        self.publish(BroadcastEvent::QuestionsUpdated(QuestionsUpdatedEvent {
            question_count: count,
        }));
        Ok(())
    }

    /// Start a round once every live connection has a ready player.
    pub fn start(&mut self) {
        if self.session.questions().is_empty() {
            self.publish(BroadcastEvent::error("no questions available"));
            return;
        }

        let ready_count = self.readiness.ready_count();
        let active_count = self.connections.active_count();
        if !self.readiness.is_quorum(active_count) {
            debug!(ready_count, active_count, "start refused, waiting for players");
            self.publish(BroadcastEvent::WaitingForPlayers(WaitingForPlayersEvent {
                ready_count,
                total_players: active_count,
            }));
            return;
        }

        if self.phase() == GamePhase::QuestionActive {
            self.publish(BroadcastEvent::error("a game is already in progress"));
            return;
        }

        self.session.rewind();
        self.scoreboard.reset();
        self.readiness.clear();
        self.transition(GameEvent::RoundStarted);
        info!(players = active_count, "quiz started");

        self.present_next_question();
    }

    /// Record a player's answer to the outstanding question.
    ///
    /// Only the first submission per player per question counts; repeats are never rescored.
    /// After every submission, repeats included, the engine moves on once as many players
    /// have answered as there are live connections.
    pub fn submit(&mut self, player: Option<&str>, answer: Option<&str>) -> SubmitOutcome {
        let (Some(player), Some(answer)) = (present(player), present(answer)) else {
            debug!("dropping submission with missing fields");
            return SubmitOutcome::Ignored;
        };
        if self.phase() != GamePhase::QuestionActive {
            debug!(player, "dropping submission outside an active question");
            return SubmitOutcome::Ignored;
        }
        let Some(question) = self.session.outstanding_question() else {
            return SubmitOutcome::Ignored;
        };
        let correct = question.is_correct(answer);
        let version = self.machine.version();

        if !self.session.record_submission(player) {
            debug!(player, "ignoring repeated submission");
            self.advance_if_complete();
            return SubmitOutcome::Duplicate;
        }

        if correct {
            let score = self.scoreboard.award(player, self.points_per_answer);
            self.publish(BroadcastEvent::ScoreUpdate(ScoreUpdateEvent {
                player_id: player.to_string(),
                score,
            }));
        }

        self.advance_if_complete();

        // A pruned recipient may already have completed the round during the score publish.
        let advanced = self.machine.version() != version;
        SubmitOutcome::Recorded { correct, advanced }
    }

    /// Mark the player behind `connection` as ready.
    pub fn player_ready(&mut self, connection: &str, player: Option<&str>) {
        let Some(player) = present(player) else {
            debug!(connection, "dropping ready request without player id");
            return;
        };

        self.readiness.mark_ready(player);
        self.connections.bind(connection, player);
        self.publish_ready_count();
    }

    /// Withdraw a player's readiness.
    pub fn player_not_ready(&mut self, connection: &str, player: Option<&str>) {
        let Some(player) = present(player) else {
            debug!(connection, "dropping unready request without player id");
            return;
        };

        self.readiness.mark_not_ready(player);
        self.publish_ready_count();
    }

    /// Forget a closed connection and the readiness of the player bound to it.
    ///
    /// The quorum shrinks with it, so the outstanding question advances when everyone still
    /// connected has already answered.
    pub fn player_disconnected(&mut self, connection: &str) {
        let Some(binding) = self.connections.unregister(connection) else {
            return;
        };

        if let Some(player) = binding {
            info!(connection, %player, "bound player disconnected");
            self.readiness.mark_not_ready(&player);
            self.publish_ready_count();
        }

        if self.advance_if_complete() {
            info!(connection, "remaining players had all answered");
        }
    }

    /// Advance past question emission `round` if it is still outstanding.
    ///
    /// Returns whether the engine moved on. Timers for superseded rounds are no-ops.
    pub fn expire_round(&mut self, round: u64) -> bool {
        if self.phase() != GamePhase::QuestionActive || self.round != round {
            return false;
        }

        info!(
            round,
            submitted = self.session.submission_count(),
            "question timed out"
        );
        self.advance();
        true
    }

    /// Broadcast a rejected request and hand the error back to the caller.
    pub fn reject(&mut self, err: ServiceError) -> ServiceError {
        self.publish(BroadcastEvent::error(err.to_string()));
        err
    }

    /// Move on once every live connection has answered the outstanding question.
    fn advance_if_complete(&mut self) -> bool {
        let submitted = self.session.submission_count();
        if self.phase() != GamePhase::QuestionActive
            || submitted == 0
            || submitted < self.connections.active_count()
        {
            return false;
        }

        self.advance();
        true
    }

    fn advance(&mut self) {
        self.session.clear_submissions();
        if self.session.has_next() {
            self.transition(GameEvent::NextQuestion);
        }
        self.present_next_question();
    }

    /// Emit the next question, or final scores when none remain.
    fn present_next_question(&mut self) {
        match self.session.take_next_question() {
            Some(question) => {
                self.round += 1;
                debug!(
                    round = self.round,
                    index = self.session.current_index(),
                    "presenting question"
                );
                self.publish(BroadcastEvent::Question(QuestionEvent::from(&question)));
            }
            None => {
                self.transition(GameEvent::QuestionsExhausted);
                info!("question sequence exhausted");
                self.publish(BroadcastEvent::GameOver(GameOverEvent {
                    final_scores: self.scoreboard.snapshot(),
                }));
            }
        }
    }

    fn publish_ready_count(&mut self) {
        self.publish(BroadcastEvent::PlayersReady(PlayersReadyEvent {
            ready_count: self.readiness.ready_count(),
        }));
    }

    fn transition(&mut self, event: GameEvent) {
        if let Err(err) = self.machine.apply(event) {
            error!(error = %err, "quiz engine attempted an invalid transition");
        }
    }

    /// Broadcast `event`, then treat every recipient the bus could not reach as disconnected.
    fn publish(&mut self, event: BroadcastEvent) {
        self.bus.publish(&event);
        for connection in self.bus.take_unreachable() {
            info!(%connection, "dropping connection whose writer closed");
            self.player_disconnected(&connection);
        }
    }
}

/// Treat blank strings the same as missing fields.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
