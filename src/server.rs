//! REST API front end serving a single shared game.
//!
//! Every client observes and mutates the same game instance. The engine
//! handle is injected into the router explicitly; mutations go through
//! the write lock, reads through the read lock.

use crate::game::{Game, GameState, MoveError};
use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

/// Shared handle to the one game instance behind the API.
///
/// A read/write lock: `GET /api/state` takes the read side, moves and
/// resets take the write side, so reads never observe a torn write.
pub type SharedGame = Arc<RwLock<Game>>;

/// Origin of the browser front end served during development.
const ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Request body for `POST /api/move`.
///
/// `i64` rather than `usize` so that a negative position parses and is
/// rejected as out of bounds instead of as a malformed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Board position to play (0-8, row-major).
    pub position: i64,
}

/// Error payload returned with every 400 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reason the request was rejected.
    pub error: String,
}

/// Snapshot of the game returned by every successful endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    /// Nine single-character cell markers, empty cells as a space.
    pub board: Vec<String>,
    /// Marker of the player to move (after a win: the winner).
    pub current_player: String,
    /// Marker of the winner, or a space while there is none.
    pub winner: String,
    /// True once the game has been won or drawn.
    pub game_over: bool,
}

impl From<&GameState> for StateResponse {
    fn from(state: &GameState) -> Self {
        Self {
            board: state
                .board()
                .squares()
                .iter()
                .map(|square| square.as_char().to_string())
                .collect(),
            current_player: state.current_player().to_string(),
            winner: state
                .status()
                .winner()
                .map_or_else(|| " ".to_string(), |p| p.to_string()),
            game_over: state.status().is_terminal(),
        }
    }
}

/// Builds the API router around a shared game handle.
pub fn router(game: SharedGame) -> Router {
    Router::new()
        .route("/api/state", get(get_state).options(preflight))
        .route("/api/move", post(post_move).options(preflight))
        .route("/api/reset", post(post_reset).options(preflight))
        .layer(axum::middleware::map_response(cors_headers))
        .layer(ServiceBuilder::new().map_request(log_request))
        .with_state(game)
}

/// Runs the API server until the process exits.
///
/// Failure to bind the listener is the one fatal startup error; it
/// aborts with context before any request is served.
pub async fn serve(host: &str, port: u16) -> Result<()> {
    let game: SharedGame = Arc::new(RwLock::new(Game::new()));
    let app = router(game);

    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))?;

    info!(host, port, "Tic-tac-toe API listening");
    info!("  GET  /api/state  - Get game state");
    info!("  POST /api/move   - Make a move");
    info!("  POST /api/reset  - Reset game");

    axum::serve(listener, app).await?;

    Ok(())
}

/// `GET /api/state` - current snapshot of the shared game.
#[instrument(skip(game))]
async fn get_state(State(game): State<SharedGame>) -> Json<StateResponse> {
    let game = game.read().unwrap();
    debug!(moves = game.state().history().len(), "Serving state");
    Json(StateResponse::from(game.state()))
}

/// `POST /api/move` - apply a move to the shared game.
///
/// Malformed bodies and rejected moves both answer 400 with a distinct
/// error payload; the game is unchanged in either case.
#[instrument(skip(game, payload))]
async fn post_move(
    State(game): State<SharedGame>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            warn!(error = %rejection, "Malformed move request");
            return bad_request("Invalid JSON: expected an integer 'position' field");
        }
    };

    let mut game = game.write().unwrap();
    let outcome = usize::try_from(request.position)
        .map_err(|_| MoveError::OutOfBounds)
        .and_then(|pos| game.make_move(pos));

    match outcome {
        Ok(()) => {
            info!(
                position = request.position,
                status = ?game.state().status(),
                "Move applied"
            );
            Json(StateResponse::from(game.state())).into_response()
        }
        Err(err) => {
            warn!(position = request.position, error = %err, "Move rejected");
            bad_request(&err.to_string())
        }
    }
}

/// `POST /api/reset` - restart the shared game from scratch.
#[instrument(skip(game))]
async fn post_reset(State(game): State<SharedGame>) -> Json<StateResponse> {
    let mut game = game.write().unwrap();
    game.reset();
    Json(StateResponse::from(game.state()))
}

/// CORS preflight for the `/api` namespace.
///
/// Answered without touching the engine; the CORS layer attaches the
/// headers on the way out.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Attaches the CORS headers to every response, preflight included.
async fn cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOWED_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

/// Request log line for every incoming call.
fn log_request(request: Request<Body>) -> Request<Body> {
    info!(method = %request.method(), uri = %request.uri(), "Incoming request");
    request
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
