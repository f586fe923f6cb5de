use thiserror::Error;

/// High-level phases the quiz can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// No round has started since the last reset.
    #[default]
    Idle,
    /// A question is outstanding and players may submit answers.
    QuestionActive,
    /// The question sequence is exhausted and final scores were published.
    GameOver,
}

/// Events that can be applied to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new question set replaced the old one.
    QuestionsLoaded,
    /// Quorum reached; the first question is about to go out.
    RoundStarted,
    /// Every player answered (or the round timed out) and another question remains.
    NextQuestion,
    /// No question is left to ask.
    QuestionsExhausted,
}

/// Error returned when attempting to apply an invalid transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// The phase the state machine was in when the invalid event was received.
    pub from: GamePhase,
    /// The event that cannot be applied from this phase.
    pub event: GameEvent,
}

/// Phase state machine driving a quiz session.
#[derive(Debug, Clone, Default)]
pub struct GameStateMachine {
    phase: GamePhase,
    version: usize,
}

impl GameStateMachine {
    /// Create a new state machine initialised in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Number of transitions applied so far.
    pub fn version(&self) -> usize {
        self.version
    }

    /// Apply `event`, returning the phase it leads to.
    pub fn apply(&mut self, event: GameEvent) -> Result<GamePhase, InvalidTransition> {
        let next = self.compute_transition(event)?;
        self.phase = next;
        self.version += 1;
        Ok(next)
    }

    /// Compute a transition from an event if the transition is valid.
    fn compute_transition(&self, event: GameEvent) -> Result<GamePhase, InvalidTransition> {
        let next = match (self.phase, event) {
            (_, GameEvent::QuestionsLoaded) => GamePhase::Idle,
            (GamePhase::Idle | GamePhase::GameOver, GameEvent::RoundStarted) => {
                GamePhase::QuestionActive
            }
            (GamePhase::QuestionActive, GameEvent::NextQuestion) => GamePhase::QuestionActive,
            (GamePhase::QuestionActive, GameEvent::QuestionsExhausted) => GamePhase::GameOver,
            (from, event) => return Err(InvalidTransition { from, event }),
        };

        Ok(next)
    }
}
