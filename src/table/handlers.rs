use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};

use super::types::{
    ActiveSessionsResponse, CoinFlipResponse, DiceQuery, LeaderboardQuery, LeaderboardResponse,
};
use crate::chance::{flip_coin, roll_dice, DiceRoll};
use crate::commands::{BlackjackCommands, CommandReply};
use crate::shared::{AppError, AppState};
use crate::stats::PlayerStats;

/// HTTP handler for blackjack actions
///
/// POST /blackjack/:player_key/:action
/// `action` is one of start, hit or stand
#[instrument(name = "blackjack_action", skip(state))]
pub async fn blackjack_action(
    State(state): State<AppState>,
    Path((player_key, action)): Path<(String, String)>,
) -> Result<Json<CommandReply>, AppError> {
    let action = BlackjackCommands::parse_action(&action)?;
    let reply = state.commands.handle(&player_key, action).await?;

    info!(
        active = reply.active,
        outcome = ?reply.outcome,
        "Blackjack action handled"
    );

    Ok(Json(reply))
}

/// HTTP handler for the current table
///
/// GET /blackjack/:player_key
#[instrument(name = "show_table", skip(state))]
pub async fn show_table(
    State(state): State<AppState>,
    Path(player_key): Path<String>,
) -> Result<Json<CommandReply>, AppError> {
    Ok(Json(state.commands.show(&player_key).await?))
}

/// GET /dashboard/sessions
pub async fn active_sessions(
    State(state): State<AppState>,
) -> Result<Json<ActiveSessionsResponse>, AppError> {
    let active_sessions = state.blackjack.active_sessions().await?;
    Ok(Json(ActiveSessionsResponse { active_sessions }))
}

/// GET /stats/:player_key
#[instrument(name = "player_stats", skip(state))]
pub async fn player_stats(
    State(state): State<AppState>,
    Path(player_key): Path<String>,
) -> Result<Json<PlayerStats>, AppError> {
    Ok(Json(state.stats.player_stats(&player_key).await?))
}

/// DELETE /stats/:player_key
#[instrument(name = "reset_player_stats", skip(state))]
pub async fn reset_player_stats(
    State(state): State<AppState>,
    Path(player_key): Path<String>,
) -> Result<StatusCode, AppError> {
    state.stats.reset_player_stats(&player_key).await?;
    info!("Player stats reset");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /stats?limit=N
#[instrument(name = "leaderboard", skip(state))]
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let limit = query.limit.unwrap_or(state.leaderboard_limit);
    let players = state.stats.leaderboard(limit).await?;

    info!(player_count = players.len(), "Leaderboard listed");

    Ok(Json(LeaderboardResponse { players }))
}

/// GET /chance/coin
pub async fn coin_flip() -> Json<CoinFlipResponse> {
    let side = flip_coin(&mut rand::rng());
    Json(CoinFlipResponse { side })
}

/// GET /chance/dice?count=&sides=
pub async fn dice_roll(Query(query): Query<DiceQuery>) -> Result<Json<DiceRoll>, AppError> {
    let roll = roll_dice(
        &mut rand::rng(),
        query.count.unwrap_or(1),
        query.sides.unwrap_or(6),
    )?;
    Ok(Json(roll))
}
