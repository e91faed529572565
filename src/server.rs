//! HTTP API for playing races in a browser.
//!
//! Routes map one-to-one onto session operations and answer with JSON
//! [`BoardView`]s; page rendering is left to the client.

use crate::games::race::{BoardView, Die, GameError};
use crate::session::{SessionError, SessionManager};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info, instrument, warn};

/// Die shared by all requests.
pub type SharedDie = Arc<Mutex<Box<dyn Die + Send>>>;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    sessions: SessionManager,
    die: SharedDie,
}

impl AppState {
    /// Creates handler state from a session manager and a die.
    pub fn new(sessions: SessionManager, die: impl Die + Send + 'static) -> Self {
        let die: Box<dyn Die + Send> = Box::new(die);
        Self {
            sessions,
            die: Arc::new(Mutex::new(die)),
        }
    }

    /// Returns the session manager.
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }
}

/// Request body for starting a race.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGameRequest {
    /// Player names in seat order (2 to 4).
    pub player_names: Vec<String>,
}

/// Error body returned by every failing route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error kind.
    pub error: String,
    /// Human-readable description.
    pub message: String,
}

/// Failure of a route, rendered as an [`ErrorBody`].
#[derive(Debug, derive_more::From)]
pub enum ApiError {
    /// A session operation failed.
    Session(SessionError),
    /// The request body could not be read as JSON of the expected shape.
    Request(JsonRejection),
    /// The blocking task running the operation did not complete.
    #[from(ignore)]
    Task(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Session(SessionError::Game(e)) => {
                let status = match e {
                    GameError::InvalidPlayerCount(_) | GameError::InvalidRoll(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    GameError::NoActiveGame => StatusCode::NOT_FOUND,
                    GameError::GameAlreadyOver => StatusCode::CONFLICT,
                    GameError::CorruptState(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.code(), e.to_string())
            }
            ApiError::Session(e @ SessionError::Store(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", e.to_string())
            }
            ApiError::Request(rejection) => {
                (rejection.status(), "invalid_request", rejection.body_text())
            }
            ApiError::Task(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message.clone())
            }
        };

        if status.is_server_error() {
            error!(status = %status, error = %message, "Request failed");
        } else {
            warn!(status = %status, error = %message, "Request rejected");
        }

        let body = ErrorBody {
            error: code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

/// Runs a session operation on the blocking pool, off the async workers.
async fn blocking<T, F>(operation: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, SessionError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(operation)
        .await
        .map_err(|e| ApiError::Task(format!("Session task failed: {}", e)))?
        .map_err(ApiError::from)
}

/// Builds the router with all game routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/sessions/{session_id}/game",
            get(get_game).post(start_game).delete(reset_game),
        )
        .route("/sessions/{session_id}/game/roll", post(roll_die))
        .with_state(state)
}

/// Liveness check.
async fn health() -> &'static str {
    "ok"
}

/// Starts a race, replacing any game already in the session.
#[instrument(skip(state, payload))]
async fn start_game(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    payload: Result<Json<StartGameRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BoardView>), ApiError> {
    let Json(req) = payload?;
    let sessions = state.sessions.clone();
    let id = session_id.clone();
    let game = blocking(move || sessions.start_game(&id, &req.player_names)).await?;
    info!(session_id = %session_id, "Race started over HTTP");
    Ok((StatusCode::CREATED, Json(BoardView::from(&game))))
}

/// Returns the board for the session.
#[instrument(skip(state))]
async fn get_game(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<BoardView>, ApiError> {
    let sessions = state.sessions.clone();
    Ok(Json(blocking(move || sessions.view(&session_id)).await?))
}

/// Rolls for the current player.
///
/// The shared die is locked only for the draw itself.
#[instrument(skip(state))]
async fn roll_die(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<BoardView>, ApiError> {
    let sessions = state.sessions.clone();
    let die = Arc::clone(&state.die);
    let game = blocking(move || {
        let mut draw = || die.lock().unwrap_or_else(PoisonError::into_inner).roll();
        sessions.roll(&session_id, &mut draw)
    })
    .await?;
    Ok(Json(BoardView::from(&game)))
}

/// Discards the session's game.
#[instrument(skip(state))]
async fn reset_game(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let sessions = state.sessions.clone();
    blocking(move || sessions.restart(&session_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
