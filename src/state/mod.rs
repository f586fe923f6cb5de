/// Broadcast fan-out to connected sockets.
pub mod bus;
/// Quiz coordinator owning every piece of session state.
pub mod engine;
/// Questions and the per-game question cursor.
pub mod quiz;
/// Ready-player set and quorum test.
pub mod readiness;
/// Live connections and player bindings.
pub mod registry;
/// Per-player running totals.
pub mod scoreboard;
/// Phase transitions.
pub mod state_machine;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::AppConfig;

pub use self::bus::{BroadcastBus, SocketFanout};
pub use self::engine::{QuizEngine, QuizSnapshot, SubmitOutcome};
pub use self::registry::{ConnectionId, ConnectionRegistry, PlayerId};

/// Handle to [`AppState`] shared by routes, sockets and timers.
pub type SharedState = Arc<AppState>;

/// Central application state: live connections, the broadcast fan-out, and the quiz engine.
pub struct AppState {
    config: Arc<AppConfig>,
    connections: Arc<ConnectionRegistry>,
    fanout: Arc<SocketFanout>,
    /// Single serialization point for every quiz mutation.
    engine: Mutex<QuizEngine>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The engine starts idle over the configured question set and publishes through the
    /// socket fan-out.
    pub fn new(config: AppConfig) -> SharedState {
        let connections = Arc::new(ConnectionRegistry::new());
        let fanout = Arc::new(SocketFanout::new());
        let engine = QuizEngine::new(
            config.questions().to_vec(),
            config.points_per_correct_answer(),
            connections.clone(),
            fanout.clone(),
        );

        Arc::new(Self {
            config: Arc::new(config),
            connections,
            fanout,
            engine: Mutex::new(engine),
        })
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> Arc<AppConfig> {
        self.config.clone()
    }

    /// Registry of live connections and their player bindings.
    pub fn connections(&self) -> &ConnectionRegistry {
        &self.connections
    }

    /// Outbound channels of connected sockets.
    pub fn fanout(&self) -> &SocketFanout {
        &self.fanout
    }

    /// Run `f` with exclusive access to the quiz engine.
    pub async fn with_engine<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut QuizEngine) -> T,
    {
        let mut engine = self.engine.lock().await;
        f(&mut engine)
    }

    /// Snapshot the quiz engine.
    pub async fn snapshot(&self) -> QuizSnapshot {
        self.engine.lock().await.snapshot()
    }
}
