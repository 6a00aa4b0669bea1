//! Router-level tests for the REST API front end.
//!
//! Requests are driven straight through the router with tower's
//! `oneshot`; no listener is bound.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::{Arc, RwLock};
use tictactoe::server::{self, SharedGame};
use tictactoe::Game;
use tower::ServiceExt;

fn app() -> (SharedGame, Router) {
    let game: SharedGame = Arc::new(RwLock::new(Game::new()));
    let router = server::router(game.clone());
    (game, router)
}

fn empty_board() -> Value {
    json!(vec![" "; 9])
}

fn get_state_request() -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri("/api/state")
        .body(Body::empty())
        .unwrap()
}

fn post_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Plays one move through a fresh oneshot of the router.
async fn play(router: &Router, position: i64) -> axum::response::Response {
    router
        .clone()
        .oneshot(post_request("/api/move", json!({ "position": position })))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_fresh_state_snapshot() {
    let (_, router) = app();

    let response = router.oneshot(get_state_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let state = body_json(response).await;
    assert_eq!(state["board"], empty_board());
    assert_eq!(state["currentPlayer"], "X");
    assert_eq!(state["winner"], " ");
    assert_eq!(state["gameOver"], false);
}

#[tokio::test]
async fn test_successful_move_returns_updated_snapshot() {
    let (_, router) = app();

    let response = play(&router, 4).await;
    assert_eq!(response.status(), StatusCode::OK);

    let state = body_json(response).await;
    assert_eq!(state["board"][4], "X");
    assert_eq!(state["currentPlayer"], "O");
    assert_eq!(state["gameOver"], false);
}

#[tokio::test]
async fn test_occupied_square_rejected() {
    let (_, router) = app();

    play(&router, 4).await;
    let response = play(&router, 4).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert!(error["error"].as_str().unwrap().contains("occupied"));
}

#[tokio::test]
async fn test_out_of_range_positions_rejected() {
    let (_, router) = app();

    for position in [-1, 9, 100] {
        let response = play(&router, position).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "position {position} should be rejected"
        );
        let error = body_json(response).await;
        assert!(error["error"].as_str().unwrap().contains("out of bounds"));
    }

    // The board is untouched.
    let state = body_json(router.oneshot(get_state_request()).await.unwrap()).await;
    assert_eq!(state["board"], empty_board());
}

#[tokio::test]
async fn test_malformed_move_requests_rejected() {
    // Scenario E: no usable position field, 400 + error payload, and
    // the shared game is unchanged.
    let (_, router) = app();

    let bodies = [
        json!({}),
        json!({ "position": "four" }),
        json!({ "position": 4.5 }),
        json!({ "pos": 4 }),
    ];
    for body in bodies {
        let response = router
            .clone()
            .oneshot(post_request("/api/move", body.clone()))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "body {body} should be rejected"
        );
        let error = body_json(response).await;
        assert!(error["error"].is_string());
    }

    // Entirely unparseable body.
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/move")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let state = body_json(router.oneshot(get_state_request()).await.unwrap()).await;
    assert_eq!(state["board"], empty_board());
    assert_eq!(state["currentPlayer"], "X");
}

#[tokio::test]
async fn test_row_win_over_http() {
    let (_, router) = app();

    for position in [0, 3, 1, 4] {
        let response = play(&router, position).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    let response = play(&router, 2).await;
    assert_eq!(response.status(), StatusCode::OK);

    let state = body_json(response).await;
    assert_eq!(state["winner"], "X");
    assert_eq!(state["gameOver"], true);
    assert_eq!(state["currentPlayer"], "X");
    assert_eq!(state["board"], json!(["X", "X", "X", "O", "O", " ", " ", " ", " "]));

    // Any further move reports the game is over.
    let response = play(&router, 8).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert!(error["error"].as_str().unwrap().contains("already over"));
}

#[tokio::test]
async fn test_reset_returns_fresh_snapshot() {
    let (_, router) = app();

    for position in [0, 3, 1, 4, 2] {
        play(&router, position).await;
    }

    let response = router
        .clone()
        .oneshot(post_request("/api/reset", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let state = body_json(response).await;
    assert_eq!(state["board"], empty_board());
    assert_eq!(state["currentPlayer"], "X");
    assert_eq!(state["winner"], " ");
    assert_eq!(state["gameOver"], false);
}

#[tokio::test]
async fn test_shared_handle_observes_http_moves() {
    // The router mutates the injected handle, not a private copy.
    let (game, router) = app();

    play(&router, 4).await;

    let guard = game.read().unwrap();
    assert_eq!(guard.state().history(), &[4]);
}

#[tokio::test]
async fn test_preflight_succeeds_on_every_api_route() {
    let (_, router) = app();

    for uri in ["/api/state", "/api/move", "/api/reset"] {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "preflight on {uri}");
        let headers = response.headers();
        assert_eq!(
            headers
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("http://localhost:3000")
        );
        assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
        assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS));
    }
}

#[tokio::test]
async fn test_cors_headers_on_regular_responses() {
    let (_, router) = app();

    let response = router.oneshot(get_state_request()).await.unwrap();
    assert!(
        response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}
