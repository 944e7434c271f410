use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::chance::ChanceError;
use crate::commands::{BlackjackCommands, CommandError};
use crate::game::{BlackjackError, BlackjackService, CardSource, SessionRepository};
use crate::stats::{StatsError, StatsRepository, StatsService};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub blackjack: Arc<BlackjackService>,
    pub commands: Arc<BlackjackCommands>,
    pub stats: Arc<StatsService>,
    pub leaderboard_limit: usize,
}

impl AppState {
    /// Wires the game service to the stats store so every finished game is
    /// recorded.
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        stats_repository: Arc<dyn StatsRepository>,
        card_source: Arc<dyn CardSource>,
        leaderboard_limit: usize,
    ) -> Self {
        let stats = Arc::new(StatsService::new(stats_repository));
        let blackjack = Arc::new(
            BlackjackService::new(session_repository, card_source).with_recorder(stats.clone()),
        );
        let commands = Arc::new(BlackjackCommands::new(blackjack.clone()));

        Self {
            blackjack,
            commands,
            stats,
            leaderboard_limit,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<BlackjackError> for AppError {
    fn from(e: BlackjackError) -> Self {
        match e {
            BlackjackError::SessionAlreadyActive => AppError::Conflict(e.to_string()),
            BlackjackError::NoActiveSession => AppError::NotFound(e.to_string()),
        }
    }
}

impl From<CommandError> for AppError {
    fn from(e: CommandError) -> Self {
        match e {
            CommandError::UnknownAction(_) => AppError::BadRequest(e.to_string()),
            CommandError::Game(game) => game.into(),
        }
    }
}

impl From<StatsError> for AppError {
    fn from(e: StatsError) -> Self {
        match e {
            StatsError::Validation(msg) => AppError::BadRequest(msg),
        }
    }
}

impl From<ChanceError> for AppError {
    fn from(e: ChanceError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
