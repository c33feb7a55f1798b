//! HTTP API tests driving the router in-process.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::sync::Arc;
use strictly_swg::{Move, MoveSource, Outcome, ScriptedMoves, Standing};
use strictly_swg_server::{
    ErrorBody, GameConfig, MoveRequest, MoveResponse, SessionList, SessionManager, StateResponse,
    router,
};
use tower::ServiceExt;

/// Router whose sessions each replay `script` for the computer.
fn app(script: &'static [Move], max_rounds: u32) -> Router {
    let config = GameConfig::default().with_max_rounds(NonZeroU32::new(max_rounds).unwrap());
    let sessions = SessionManager::new(
        config,
        Arc::new(move || -> Box<dyn MoveSource> {
            Box::new(ScriptedMoves::new(script.iter().copied()).expect("non-empty script"))
        }),
    );
    router(sessions)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("valid request");

    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("readable body")
        .to_bytes()
        .to_vec();
    (status, bytes)
}

fn json<T: DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).expect("valid JSON body")
}

async fn play(app: &Router, uri: &str, tag: &str) -> (StatusCode, Vec<u8>) {
    let body = serde_json::to_string(&MoveRequest {
        user_move: tag.to_string(),
    })
    .expect("serializable request");
    send(app, Method::POST, uri, Some(&body)).await
}

#[tokio::test]
async fn test_move_response_shape() {
    let app = app(&[Move::Water], 10);
    let (status, body) = play(&app, "/move", "s").await;
    assert_eq!(status, StatusCode::OK);

    let raw: serde_json::Value = json(&body);
    assert_eq!(raw["userMove"], "s");
    assert_eq!(raw["compMove"], "w");
    assert_eq!(raw["result"], "User");
    assert_eq!(raw["userScore"], 1);
    assert_eq!(raw["compScore"], 0);
    assert_eq!(raw["round"], 1);
    assert_eq!(raw["gameOver"], false);
    assert!(raw.get("finalMessage").is_none());
}

#[tokio::test]
async fn test_full_game_over_http() {
    let app = app(&[Move::Water, Move::Gun, Move::Snake], 3);

    let mut last = None;
    for tag in ["s", "w", "g"] {
        let (status, body) = play(&app, "/move", tag).await;
        assert_eq!(status, StatusCode::OK);
        let response: MoveResponse = json(&body);
        assert_eq!(response.result, Outcome::UserWins);
        last = Some(response);
    }

    let last = last.unwrap();
    assert!(last.game_over);
    assert_eq!(last.user_score, 3);
    assert_eq!(last.standing, Some(Standing::UserAhead));
    assert_eq!(last.final_message.as_deref(), Some("🎉 You won the game!"));

    let (status, body) = play(&app, "/move", "s").await;
    assert_eq!(status, StatusCode::CONFLICT);
    let error: ErrorBody = json(&body);
    assert!(error.error.contains("Game over"));

    let (_, body) = send(&app, Method::GET, "/state", None).await;
    let state: StateResponse = json(&body);
    assert!(state.game_over);
    assert_eq!(state.round, 4);
    assert_eq!(state.display_round, 3);
    assert_eq!(state.user_score, 3);
    assert_eq!(state.standing, Some(Standing::UserAhead));
}

#[tokio::test]
async fn test_tied_game_message() {
    let app = app(&[Move::Snake], 2);
    play(&app, "/move", "snake").await;
    let (_, body) = play(&app, "/move", "S").await;
    let response: MoveResponse = json(&body);
    assert_eq!(response.result, Outcome::Draw);
    assert_eq!(response.standing, Some(Standing::Tied));
    assert_eq!(response.final_message.as_deref(), Some("🤝 The game is tied!"));
}

#[tokio::test]
async fn test_invalid_move_leaves_state() {
    let app = app(&[Move::Water], 10);
    let (status, body) = play(&app, "/move", "rock").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorBody = json(&body);
    assert!(error.error.contains("Invalid move"));

    let (_, body) = send(&app, Method::GET, "/state", None).await;
    let state: StateResponse = json(&body);
    assert_eq!(state.round, 1);
    assert_eq!(state.rounds_played, 0);
}

#[tokio::test]
async fn test_unusable_move_bodies_are_json_400() {
    let app = app(&[Move::Water], 10);

    for body in [r#"{"move":5}"#, "{}", r#"{"move":null}"#] {
        for uri in ["/move", "/sessions/default/move"] {
            let (status, bytes) = send(&app, Method::POST, uri, Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", uri, body);
            let error: ErrorBody = json(&bytes);
            assert!(error.error.contains("Invalid move"), "{}", error.error);
        }
    }

    let (status, bytes) = send(&app, Method::POST, "/move", Some("not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorBody = json(&bytes);
    assert!(error.error.contains("Malformed request"));

    let (_, bytes) = send(&app, Method::GET, "/state", None).await;
    let state: StateResponse = json(&bytes);
    assert_eq!(state.rounds_played, 0);
}

#[tokio::test]
async fn test_zero_round_session_is_json_400() {
    let app = app(&[Move::Water], 10);
    let (status, bytes) = send(&app, Method::POST, "/sessions", Some(r#"{"maxRounds":0}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorBody = json(&bytes);
    assert!(error.error.contains("Malformed request"));

    let (_, bytes) = send(&app, Method::GET, "/sessions", None).await;
    let list: SessionList = json(&bytes);
    assert_eq!(list.sessions, vec!["default".to_string()]);
}

#[tokio::test]
async fn test_reset() {
    let app = app(&[Move::Gun], 1);
    play(&app, "/move", "w").await;

    let (status, body) = send(&app, Method::POST, "/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    let state: StateResponse = json(&body);
    assert_eq!(state.round, 1);
    assert_eq!(state.user_score, 0);
    assert_eq!(state.comp_score, 0);
    assert!(!state.game_over);
    assert_eq!(state.standing, None);

    let (status, _) = play(&app, "/move", "w").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_session_lifecycle() {
    let app = app(&[Move::Water], 10);

    let (status, body) = send(
        &app,
        Method::POST,
        "/sessions",
        Some(r#"{"id":"alice","maxRounds":15}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: StateResponse = json(&body);
    assert_eq!(created.session_id, "alice");
    assert_eq!(created.max_rounds, 15);

    let (status, _) = send(&app, Method::POST, "/sessions", Some(r#"{"id":"alice"}"#)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = play(&app, "/sessions/alice/move", "g").await;
    assert_eq!(status, StatusCode::OK);
    let response: MoveResponse = json(&body);
    assert_eq!(response.result, Outcome::ComputerWins);
    assert_eq!(response.max_rounds, 15);

    let (_, body) = send(&app, Method::GET, "/sessions", None).await;
    let list: SessionList = json(&body);
    assert_eq!(list.sessions, vec!["alice".to_string(), "default".to_string()]);

    let (_, body) = send(&app, Method::GET, "/sessions/default", None).await;
    let default: StateResponse = json(&body);
    assert_eq!(default.rounds_played, 0);

    let (status, body) = send(&app, Method::POST, "/sessions/alice/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    let reset: StateResponse = json(&body);
    assert_eq!(reset.comp_score, 0);

    let (status, _) = send(&app, Method::DELETE, "/sessions/alice", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, "/sessions/alice", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, "/sessions/default", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_generated_session_id() {
    let app = app(&[Move::Water], 10);
    let (status, body) = send(&app, Method::POST, "/sessions", Some("{}")).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: StateResponse = json(&body);
    assert_eq!(created.session_id, "game-1");
    assert_eq!(created.max_rounds, 10);
}

#[tokio::test]
async fn test_unknown_session() {
    let app = app(&[Move::Water], 10);
    let (status, body) = play(&app, "/sessions/ghost/move", "s").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: ErrorBody = json(&body);
    assert!(error.error.contains("ghost"));
}

#[tokio::test]
async fn test_cors_headers() {
    let app = app(&[Move::Water], 10);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/move")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}
