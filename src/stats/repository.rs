use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{models::PlayerStats, StatsError};
use crate::game::{Outcome, Winner};

#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn record_outcome(
        &self,
        player_key: &str,
        outcome: Outcome,
        played_at: DateTime<Utc>,
    ) -> Result<PlayerStats, StatsError>;
    async fn get_player_stats(&self, player_key: &str) -> Result<Option<PlayerStats>, StatsError>;
    /// Players ordered by wins, then best streak, then fewest games
    async fn leaderboard(&self, limit: usize) -> Result<Vec<PlayerStats>, StatsError>;
    async fn reset_player_stats(&self, player_key: &str) -> Result<(), StatsError>;
}

#[derive(Debug, Default)]
pub struct InMemoryStatsRepository {
    players: Arc<RwLock<HashMap<String, PlayerStats>>>,
}

impl InMemoryStatsRepository {
    pub fn new() -> Self {
        Self {
            players: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl StatsRepository for InMemoryStatsRepository {
    async fn record_outcome(
        &self,
        player_key: &str,
        outcome: Outcome,
        played_at: DateTime<Utc>,
    ) -> Result<PlayerStats, StatsError> {
        let mut players = self.players.write().await;
        let stats = players
            .entry(player_key.to_string())
            .or_insert_with(|| PlayerStats::empty(player_key));

        stats.games_played += 1;
        stats.last_played = Some(played_at);

        match outcome.winner() {
            Winner::Player => {
                stats.wins += 1;
                stats.current_win_streak += 1;
                stats.best_win_streak = stats.best_win_streak.max(stats.current_win_streak);
            }
            Winner::Dealer => {
                stats.losses += 1;
                stats.current_win_streak = 0;
            }
            // A push neither extends nor breaks a streak.
            Winner::Nobody => stats.pushes += 1,
        }

        match outcome {
            Outcome::PlayerBlackjack => stats.blackjacks += 1,
            Outcome::PlayerBust => stats.busts += 1,
            _ => {}
        }

        Ok(stats.clone())
    }

    async fn get_player_stats(&self, player_key: &str) -> Result<Option<PlayerStats>, StatsError> {
        let players = self.players.read().await;
        Ok(players.get(player_key).cloned())
    }

    async fn leaderboard(&self, limit: usize) -> Result<Vec<PlayerStats>, StatsError> {
        let players = self.players.read().await;
        let mut ranked: Vec<PlayerStats> = players.values().cloned().collect();
        ranked.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then(b.best_win_streak.cmp(&a.best_win_streak))
                .then(a.games_played.cmp(&b.games_played))
                .then(a.player_key.cmp(&b.player_key))
        });
        ranked.truncate(limit);
        Ok(ranked)
    }

    async fn reset_player_stats(&self, player_key: &str) -> Result<(), StatsError> {
        let mut players = self.players.write().await;
        players.remove(player_key);
        Ok(())
    }
}
