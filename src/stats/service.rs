use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, instrument};

use super::{models::PlayerStats, repository::StatsRepository, StatsError};
use crate::game::{OutcomeRecorder, Resolution};

pub const MAX_LEADERBOARD: usize = 100;

pub struct StatsService {
    repository: Arc<dyn StatsRepository>,
}

impl StatsService {
    pub fn new(repository: Arc<dyn StatsRepository>) -> Self {
        Self { repository }
    }

    /// Stats for a player, zeroed if they never finished a game
    pub async fn player_stats(&self, player_key: &str) -> Result<PlayerStats, StatsError> {
        Ok(self
            .repository
            .get_player_stats(player_key)
            .await?
            .unwrap_or_else(|| PlayerStats::empty(player_key)))
    }

    pub async fn leaderboard(&self, limit: usize) -> Result<Vec<PlayerStats>, StatsError> {
        if limit == 0 || limit > MAX_LEADERBOARD {
            return Err(StatsError::Validation(format!(
                "Leaderboard limit must be between 1 and {}",
                MAX_LEADERBOARD
            )));
        }
        self.repository.leaderboard(limit).await
    }

    pub async fn reset_player_stats(&self, player_key: &str) -> Result<(), StatsError> {
        self.repository.reset_player_stats(player_key).await
    }
}

#[async_trait]
impl OutcomeRecorder for StatsService {
    /// A failed write only costs the stats entry, never the game result.
    #[instrument(skip(self, resolution), fields(player_key = %resolution.player_key))]
    async fn record(&self, resolution: &Resolution) {
        match self
            .repository
            .record_outcome(&resolution.player_key, resolution.outcome, Utc::now())
            .await
        {
            Ok(stats) => debug!(
                games_played = stats.games_played,
                wins = stats.wins,
                "Recorded game outcome"
            ),
            Err(e) => error!(error = %e, "Failed to record game outcome"),
        }
    }
}
