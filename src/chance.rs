// Coin flips and dice rolls for the `/coinflip` and `/roll` commands.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const MAX_DICE: u32 = 20;
pub const MIN_SIDES: u32 = 2;
pub const MAX_SIDES: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChanceError {
    #[error("You can roll between 1 and {} dice, not {0}", MAX_DICE)]
    DiceCount(u32),
    #[error("Dice need between {} and {} sides, not {0}", MIN_SIDES, MAX_SIDES)]
    DiceSides(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoinSide {
    Heads,
    Tails,
}

impl fmt::Display for CoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinSide::Heads => write!(f, "Heads"),
            CoinSide::Tails => write!(f, "Tails"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub sides: u32,
    pub rolls: Vec<u32>,
    pub total: u32,
}

pub fn flip_coin<R: Rng>(rng: &mut R) -> CoinSide {
    if rng.random_bool(0.5) {
        CoinSide::Heads
    } else {
        CoinSide::Tails
    }
}

pub fn roll_dice<R: Rng>(
    rng: &mut R,
    count: u32,
    sides: u32,
) -> Result<DiceRoll, ChanceError> {
    if count == 0 || count > MAX_DICE {
        return Err(ChanceError::DiceCount(count));
    }
    if !(MIN_SIDES..=MAX_SIDES).contains(&sides) {
        return Err(ChanceError::DiceSides(sides));
    }

    let rolls: Vec<u32> = (0..count).map(|_| rng.random_range(1..=sides)).collect();
    let total = rolls.iter().sum();
    Ok(DiceRoll {
        sides,
        rolls,
        total,
    })
}
