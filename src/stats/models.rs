use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player_key: String,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    /// Wins by natural 21 on the deal, also counted in `wins`
    pub blackjacks: u32,
    pub busts: u32,
    pub current_win_streak: u32,
    pub best_win_streak: u32,
    pub last_played: Option<DateTime<Utc>>,
}

impl PlayerStats {
    pub fn empty(player_key: &str) -> Self {
        Self {
            player_key: player_key.to_string(),
            ..Self::default()
        }
    }

    /// Share of decided games won, pushes excluded
    pub fn win_rate(&self) -> f64 {
        let decided = self.wins + self.losses;
        if decided == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(decided)
        }
    }
}
