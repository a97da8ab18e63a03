//! Draughts Web API
//!
//! Local backend for a browser front end. Holds exactly one game behind a
//! mutex; every request locks it, so moves are applied one at a time.
//!
//! Routes:
//!   GET  /game            board, status and phase
//!   GET  /moves           legal moves for every piece of the player on move
//!   GET  /moves/{square}  legal moves for one piece
//!   POST /move            { "from": "B3", "to": "A4" } or { "notation": "B3-A4" }
//!   POST /reset           fresh game with the configured starting player
//!   GET  /health

use std::collections::BTreeMap;
use std::env;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use draughts_core::{
    notation, Color, DraughtsError, GameConfig, GameState, MoveError, MoveMap, MoveOutcome,
    NotationError, Phase, Position, Status,
};

/// Environment variable holding the bind address.
const ADDR_ENV: &str = "DRAUGHTS_ADDR";
const DEFAULT_ADDR: &str = "0.0.0.0:8000";

// =============================================================================
// Session State
// =============================================================================

struct AppStateInner {
    game: Mutex<GameState>,
}

impl AppStateInner {
    fn new(config: GameConfig) -> Self {
        Self {
            game: Mutex::new(GameState::setup_with(config)),
        }
    }

    /// A panic mid-request cannot leave the game half-updated (moves are
    /// applied atomically), so a poisoned lock is still usable.
    fn game(&self) -> MutexGuard<'_, GameState> {
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

type AppState = Arc<AppStateInner>;

// =============================================================================
// JSON Models
// =============================================================================

#[derive(Debug, Serialize)]
struct PieceModel {
    square: Position,
    color: Color,
    king: bool,
}

#[derive(Debug, Serialize)]
struct GameModel {
    pieces: Vec<PieceModel>,
    status: Status,
    phase: Phase,
    /// Squares of pieces that can move now
    movable: Vec<Position>,
    /// Text diagram, rank 8 on top
    diagram: String,
}

#[derive(Debug, Serialize)]
struct MovesModel {
    from: Position,
    moves: MoveMap,
}

#[derive(Deserialize)]
struct MoveRequest {
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    to: Option<String>,
    /// Alternative to from/to: "B3-A4" or "B3xD5"
    #[serde(default)]
    notation: Option<String>,
}

#[derive(Debug, Serialize)]
struct MoveResponse {
    outcome: MoveOutcome,
    game: GameModel,
}

#[derive(Serialize)]
struct HealthModel {
    status: String,
}

#[derive(Serialize)]
struct ErrorModel {
    detail: String,
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }
}

impl From<DraughtsError> for ApiError {
    fn from(e: DraughtsError) -> Self {
        let status = match e {
            DraughtsError::Move(MoveError::GameOver { .. }) => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            detail: e.to_string(),
        }
    }
}

impl From<NotationError> for ApiError {
    fn from(e: NotationError) -> Self {
        Self::bad_request(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorModel { detail: self.detail })).into_response()
    }
}

// =============================================================================
// Conversion Functions
// =============================================================================

fn game_to_model(game: &GameState) -> GameModel {
    GameModel {
        pieces: game
            .pieces()
            .map(|(square, piece)| PieceModel {
                square,
                color: piece.color,
                king: piece.is_king(),
            })
            .collect(),
        status: game.status(),
        phase: game.phase(),
        movable: game.movable_pieces(),
        diagram: game.board().to_string(),
    }
}

/// Resolve a request body to (from, to).
fn request_squares(req: &MoveRequest) -> Result<(Position, Position), ApiError> {
    if let Some(text) = &req.notation {
        return Ok(notation::parse_move(text)?);
    }
    match (&req.from, &req.to) {
        (Some(from), Some(to)) => Ok((notation::decode(from)?, notation::decode(to)?)),
        _ => Err(ApiError::bad_request("Specify from and to, or notation")),
    }
}

// =============================================================================
// API Endpoints
// =============================================================================

async fn get_game(State(state): State<AppState>) -> Json<GameModel> {
    let game = state.game();
    Json(game_to_model(&game))
}

async fn get_all_moves(State(state): State<AppState>) -> Json<BTreeMap<Position, MoveMap>> {
    let game = state.game();
    Json(game.legal_move_table())
}

async fn get_moves(
    State(state): State<AppState>,
    Path(square): Path<String>,
) -> Result<Json<MovesModel>, ApiError> {
    let from = notation::decode(&square)?;
    let game = state.game();
    Ok(Json(MovesModel {
        from,
        moves: game.legal_moves(from),
    }))
}

async fn make_move(
    State(state): State<AppState>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    let (from, to) = request_squares(&req)?;
    let mut game = state.game();
    let outcome = game.apply_move(from, to).map_err(|e| {
        warn!("rejected {from}->{to}: {e}");
        ApiError::from(e)
    })?;
    let played = notation::format_move(outcome.from, outcome.to, outcome.kind);
    info!("{played}");
    Ok(Json(MoveResponse {
        outcome,
        game: game_to_model(&game),
    }))
}

async fn reset_game(State(state): State<AppState>) -> Json<GameModel> {
    let mut game = state.game();
    let config = game.config();
    *game = GameState::setup_with(config);
    info!("new game, {} to move", game.current_player());
    Json(game_to_model(&game))
}

async fn health() -> Json<HealthModel> {
    Json(HealthModel {
        status: "ok".to_string(),
    })
}

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/game", get(get_game))
        .route("/moves", get(get_all_moves))
        .route("/moves/{square}", get(get_moves))
        .route("/move", post(make_move))
        .route("/reset", post(reset_game))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::from_env();
    let state: AppState = Arc::new(AppStateInner::new(config));

    let addr = env::var(ADDR_ENV).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "Draughts API running on http://{addr} ({} moves first)",
        config.starting_player
    );
    axum::serve(listener, router(state)).await
}
