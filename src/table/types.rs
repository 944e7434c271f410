use serde::{Deserialize, Serialize};

use crate::chance::CoinSide;
use crate::stats::PlayerStats;

/// Query for GET /stats
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub players: Vec<PlayerStats>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActiveSessionsResponse {
    pub active_sessions: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CoinFlipResponse {
    pub side: CoinSide,
}

/// Query for GET /chance/dice, one six-sided die by default
#[derive(Debug, Deserialize)]
pub struct DiceQuery {
    pub count: Option<u32>,
    pub sides: Option<u32>,
}
