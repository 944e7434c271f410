use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blackjack_table::{
    game::{CardSource, InMemorySessionRepository, RandomDeck},
    router,
    stats::InMemoryStatsRepository,
    AppState, Config,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blackjack_table=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    info!(?config, "Starting blackjack table");

    let card_source: Arc<dyn CardSource> = match config.deck_seed {
        Some(seed) => Arc::new(RandomDeck::seeded(seed)),
        None => Arc::new(RandomDeck::new()),
    };

    // Everything lives in memory; a restart clears running games and stats.
    let app_state = AppState::new(
        Arc::new(InMemorySessionRepository::new()),
        Arc::new(InMemoryStatsRepository::new()),
        card_source,
        config.leaderboard_limit,
    );

    let app = router(app_state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, addr = %config.bind_addr, "Failed to bind");
            std::process::exit(1);
        }
    };
    info!("Server running on http://{}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server stopped with an error");
    }
}
