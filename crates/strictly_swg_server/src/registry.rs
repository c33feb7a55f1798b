//! Registry of concurrent game sessions.

use crate::config::GameConfig;
use crate::error::ApiError;
use derive_getters::Getters;
use derive_new::new;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use strictly_swg::{Move, MoveSource, RoundResult, Session, SessionState};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// ID of the session that always exists and backs the single-game endpoints.
pub const DEFAULT_SESSION: &str = "default";

/// A session playing against a boxed opponent.
pub type GameSession = Session<Box<dyn MoveSource>>;

/// Builds the opponent for each new session.
pub type OpponentFactory = Arc<dyn Fn() -> Box<dyn MoveSource> + Send + Sync>;

/// Point-in-time copy of a session's state.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct SessionSnapshot {
    /// Session ID.
    id: SessionId,
    /// Session state at the time of the snapshot.
    state: SessionState,
}

/// Owns every running game. Cloning yields another handle to the same games.
///
/// Each session is independent; all access to a session happens under the
/// registry lock, so submissions to one game are serialized.
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, GameSession>>>,
    config: Arc<GameConfig>,
    opponents: OpponentFactory,
    next_id: Arc<AtomicU64>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a registry whose sessions draw opponents from `opponents`.
    ///
    /// The default session is created immediately.
    #[instrument(skip(opponents))]
    pub fn new(config: GameConfig, opponents: OpponentFactory) -> Self {
        info!("Creating session manager");
        let default_session = Session::new(*config.max_rounds(), opponents());
        let sessions = HashMap::from([(DEFAULT_SESSION.to_string(), default_session)]);
        Self {
            sessions: Arc::new(Mutex::new(sessions)),
            config: Arc::new(config),
            opponents,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Creates a registry with uniformly random opponents.
    ///
    /// With a configured seed, session `n` (counting from zero) is seeded
    /// with `seed + n`, so runs are reproducible.
    #[instrument]
    pub fn with_random_moves(config: GameConfig) -> Self {
        let game = config.clone();
        let created = AtomicU64::new(0);
        let opponents: OpponentFactory =
            Arc::new(move || game.opponent(created.fetch_add(1, Ordering::Relaxed)));
        Self::new(config, opponents)
    }

    /// Returns the game settings applied to new sessions.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, GameSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates a new session, generating an ID if none is given.
    #[instrument(skip(self))]
    pub fn create_session(
        &self,
        id: Option<SessionId>,
        max_rounds: Option<NonZeroU32>,
    ) -> Result<SessionSnapshot, ApiError> {
        let mut sessions = self.lock();

        let id = match id {
            Some(id) => id,
            None => loop {
                let candidate = format!("game-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
                if !sessions.contains_key(&candidate) {
                    break candidate;
                }
            },
        };

        if sessions.contains_key(&id) {
            warn!(session_id = %id, "Session already exists");
            return Err(ApiError::SessionExists(id));
        }

        let limit = *self.config.max_sessions();
        if sessions.len() >= limit {
            warn!(limit, "Session limit reached");
            return Err(ApiError::TooManySessions(limit));
        }

        let max_rounds = max_rounds.unwrap_or(*self.config.max_rounds());
        let session = Session::new(max_rounds, (self.opponents)());
        let snapshot = SessionSnapshot::new(id.clone(), session.state().clone());
        sessions.insert(id.clone(), session);

        info!(session_id = %id, max_rounds = max_rounds.get(), "Created new session");
        Ok(snapshot)
    }

    /// Plays one round in the given session.
    #[instrument(skip(self))]
    pub fn submit_move(&self, id: &str, user_move: Move) -> Result<RoundResult, ApiError> {
        let mut sessions = self.lock();
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))?;
        let result = session.submit_move(user_move)?;
        debug!(session_id = id, round = *result.round_number(), "Move accepted");
        Ok(result)
    }

    /// Starts the given session over.
    #[instrument(skip(self))]
    pub fn reset_session(&self, id: &str) -> Result<SessionSnapshot, ApiError> {
        let mut sessions = self.lock();
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))?;
        session.reset();
        Ok(SessionSnapshot::new(id.to_string(), session.state().clone()))
    }

    /// Returns a copy of the given session's state.
    #[instrument(skip(self))]
    pub fn snapshot(&self, id: &str) -> Result<SessionSnapshot, ApiError> {
        let sessions = self.lock();
        let session = sessions.get(id).ok_or_else(|| {
            debug!(session_id = id, "Session not found");
            ApiError::SessionNotFound(id.to_string())
        })?;
        Ok(SessionSnapshot::new(id.to_string(), session.state().clone()))
    }

    /// Lists all session IDs in sorted order.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Vec<SessionId> {
        let mut ids: Vec<_> = self.lock().keys().cloned().collect();
        ids.sort();
        debug!(count = ids.len(), "Listed sessions");
        ids
    }

    /// Removes a session. The default session cannot be removed.
    #[instrument(skip(self))]
    pub fn remove_session(&self, id: &str) -> Result<(), ApiError> {
        if id == DEFAULT_SESSION {
            warn!("Refusing to remove default session");
            return Err(ApiError::ProtectedSession(id.to_string()));
        }
        if self.lock().remove(id).is_none() {
            return Err(ApiError::SessionNotFound(id.to_string()));
        }
        info!(session_id = id, "Removed session");
        Ok(())
    }
}
