// Public API - what other modules can use
pub use handlers::{
    active_sessions, blackjack_action, coin_flip, dice_roll, leaderboard, player_stats,
    reset_player_stats, show_table,
};
pub use types::{
    ActiveSessionsResponse, CoinFlipResponse, DiceQuery, LeaderboardQuery, LeaderboardResponse,
};

// Internal modules
mod handlers;
mod types;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::shared::AppState;

/// All HTTP routes served to the bot front-end and the dashboard
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/blackjack/:player_key", get(show_table))
        .route("/blackjack/:player_key/:action", post(blackjack_action))
        .route("/dashboard/sessions", get(active_sessions))
        .route("/stats", get(leaderboard))
        .route(
            "/stats/:player_key",
            get(player_stats).delete(reset_player_stats),
        )
        .route("/chance/coin", get(coin_flip))
        .route("/chance/dice", get(dice_roll))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
