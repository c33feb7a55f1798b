//! REST API for playing Snake-Water-Gun over HTTP.
//!
//! The unscoped routes (`/move`, `/reset`, `/state`) operate on the default
//! session; `/sessions/{id}/...` addresses any session.

use crate::error::ApiError;
use crate::registry::{DEFAULT_SESSION, SessionId, SessionManager, SessionSnapshot};
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use strictly_swg::{FinalMessages, Move, Outcome, RoundResult, SessionError, Standing};
use tracing::{debug, info, instrument};

/// Request body for submitting a move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Move tag (`s`, `w`, `g`) or name.
    #[serde(rename = "move")]
    pub user_move: String,
}

/// A move taken from a [`MoveRequest`] body.
///
/// Anything other than a known move name or tag under `"move"` (missing,
/// `null`, a number) is rejected as [`SessionError::InvalidMove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveInput(pub Move);

impl<S: Send + Sync> FromRequest<S> for MoveInput {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<serde_json::Value>::from_request(req, state).await?;
        match body.get("move") {
            Some(serde_json::Value::String(tag)) => Ok(Self(tag.parse()?)),
            Some(other) => Err(SessionError::InvalidMove(other.to_string()).into()),
            None => Err(SessionError::InvalidMove(String::new()).into()),
        }
    }
}

/// Request body for creating a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSessionRequest {
    /// Requested session ID; generated if absent.
    pub id: Option<SessionId>,
    /// Rounds for this game; server default if absent.
    pub max_rounds: Option<NonZeroU32>,
}

/// Result of one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    /// Move submitted by the user.
    pub user_move: Move,
    /// Move played by the computer.
    pub comp_move: Move,
    /// Who won the round.
    pub result: Outcome,
    /// Display text for the round result.
    pub result_message: String,
    /// Number of the round just played.
    pub round: u32,
    /// User score after this round.
    pub user_score: u32,
    /// Computer score after this round.
    pub comp_score: u32,
    /// Rounds per game.
    pub max_rounds: u32,
    /// True if this round ended the game.
    pub game_over: bool,
    /// Final standing, on the last round only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standing: Option<Standing>,
    /// Final message, on the last round only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_message: Option<String>,
}

impl MoveResponse {
    /// Builds the response for a resolved round.
    pub fn new(result: &RoundResult, messages: &FinalMessages) -> Self {
        Self {
            user_move: *result.user_move(),
            comp_move: *result.computer_move(),
            result: *result.outcome(),
            result_message: messages.for_outcome(*result.outcome()).to_string(),
            round: *result.round_number(),
            user_score: *result.user_score(),
            comp_score: *result.computer_score(),
            max_rounds: *result.max_rounds(),
            game_over: result.is_final(),
            standing: *result.standing(),
            final_message: result
                .standing()
                .map(|standing| messages.for_standing(standing).to_string()),
        }
    }
}

/// Current state of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    /// Session ID.
    pub session_id: SessionId,
    /// Round about to be played; exceeds `maxRounds` once the game is over.
    pub round: u32,
    /// Round number to show the player, never above `maxRounds`.
    pub display_round: u32,
    /// Rounds resolved so far.
    pub rounds_played: u32,
    /// Rounds per game.
    pub max_rounds: u32,
    /// Rounds won by the user.
    pub user_score: u32,
    /// Rounds won by the computer.
    pub comp_score: u32,
    /// True once every round has been played.
    pub game_over: bool,
    /// Final standing, once the game is over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standing: Option<Standing>,
}

impl From<SessionSnapshot> for StateResponse {
    fn from(snapshot: SessionSnapshot) -> Self {
        let state = snapshot.state();
        let max_rounds = state.max_rounds().get();
        let game_over = state.is_terminated();
        Self {
            round: *state.current_round(),
            display_round: (*state.current_round()).min(max_rounds),
            rounds_played: state.rounds_played(),
            max_rounds,
            user_score: *state.user_score(),
            comp_score: *state.computer_score(),
            game_over,
            standing: game_over.then(|| state.standing()),
            session_id: snapshot.id().clone(),
        }
    }
}

/// Response body listing sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionList {
    /// Session IDs in sorted order.
    pub sessions: Vec<SessionId>,
}

/// Builds the application router.
#[instrument]
pub fn router(sessions: SessionManager) -> Router {
    info!("Building API router");
    Router::new()
        .route("/health", get(health))
        .route("/move", post(default_move))
        .route("/reset", post(default_reset))
        .route("/state", get(default_state))
        .route("/sessions", get(list_sessions).post(create_session))
        .route("/sessions/{id}", get(get_session).delete(delete_session))
        .route("/sessions/{id}/move", post(session_move))
        .route("/sessions/{id}/reset", post(session_reset))
        .layer(middleware::from_fn(allow_any_origin))
        .with_state(sessions)
}

/// Answers CORS preflights and marks every response as shareable.
async fn allow_any_origin(req: Request, next: Next) -> Response {
    let mut response = if req.method() == Method::OPTIONS {
        debug!(uri = %req.uri(), "Answering CORS preflight");
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    response
}

async fn health() -> &'static str {
    "ok"
}

fn play(sessions: &SessionManager, id: &str, user_move: Move) -> Result<MoveResponse, ApiError> {
    let result = sessions.submit_move(id, user_move)?;
    Ok(MoveResponse::new(&result, sessions.config().messages()))
}

#[instrument(skip(sessions))]
async fn default_move(
    State(sessions): State<SessionManager>,
    MoveInput(user_move): MoveInput,
) -> Result<Json<MoveResponse>, ApiError> {
    play(&sessions, DEFAULT_SESSION, user_move).map(Json)
}

#[instrument(skip(sessions))]
async fn session_move(
    State(sessions): State<SessionManager>,
    Path(id): Path<SessionId>,
    MoveInput(user_move): MoveInput,
) -> Result<Json<MoveResponse>, ApiError> {
    play(&sessions, &id, user_move).map(Json)
}

#[instrument(skip(sessions))]
async fn default_reset(
    State(sessions): State<SessionManager>,
) -> Result<Json<StateResponse>, ApiError> {
    let snapshot = sessions.reset_session(DEFAULT_SESSION)?;
    Ok(Json(snapshot.into()))
}

#[instrument(skip(sessions))]
async fn session_reset(
    State(sessions): State<SessionManager>,
    Path(id): Path<SessionId>,
) -> Result<Json<StateResponse>, ApiError> {
    let snapshot = sessions.reset_session(&id)?;
    Ok(Json(snapshot.into()))
}

#[instrument(skip(sessions))]
async fn default_state(
    State(sessions): State<SessionManager>,
) -> Result<Json<StateResponse>, ApiError> {
    let snapshot = sessions.snapshot(DEFAULT_SESSION)?;
    Ok(Json(snapshot.into()))
}

#[instrument(skip(sessions))]
async fn get_session(
    State(sessions): State<SessionManager>,
    Path(id): Path<SessionId>,
) -> Result<Json<StateResponse>, ApiError> {
    let snapshot = sessions.snapshot(&id)?;
    Ok(Json(snapshot.into()))
}

#[instrument(skip(sessions))]
async fn list_sessions(State(sessions): State<SessionManager>) -> Json<SessionList> {
    Json(SessionList {
        sessions: sessions.list_sessions(),
    })
}

#[instrument(skip(sessions, body))]
async fn create_session(
    State(sessions): State<SessionManager>,
    body: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StateResponse>), ApiError> {
    let Json(req) = body?;
    let snapshot = sessions.create_session(req.id, req.max_rounds)?;
    Ok((StatusCode::CREATED, Json(snapshot.into())))
}

#[instrument(skip(sessions))]
async fn delete_session(
    State(sessions): State<SessionManager>,
    Path(id): Path<SessionId>,
) -> Result<StatusCode, ApiError> {
    sessions.remove_session(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
