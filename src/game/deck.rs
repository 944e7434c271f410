use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use super::cards::{Card, Rank, Suit};

/// Source of cards for a table.
///
/// The table plays with an infinite deck: every draw is independent of the
/// previous ones and nothing is ever exhausted.
pub trait CardSource: Send + Sync {
    fn draw_card(&self) -> Card;
}

/// Uniform random draws over the 13 ranks, with replacement.
pub struct RandomDeck {
    rng: Mutex<StdRng>,
}

impl Default for RandomDeck {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomDeck {
    /// Deck seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Deck with a reproducible draw sequence
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl CardSource for RandomDeck {
    fn draw_card(&self) -> Card {
        // A poisoned rng is still a valid rng.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let rank = Rank::ALL[rng.random_range(0..Rank::ALL.len())];
        let suit = Suit::ALL[rng.random_range(0..Suit::ALL.len())];
        Card::new(rank, suit)
    }
}

/// Deterministic source that deals a scripted sequence of ranks in order.
///
/// Once the script runs out every further draw yields `fallback`.
pub struct StackedDeck {
    script: Mutex<VecDeque<Rank>>,
    fallback: Rank,
}

impl StackedDeck {
    pub fn new(ranks: impl IntoIterator<Item = Rank>) -> Self {
        Self::with_fallback(ranks, Rank::Two)
    }

    pub fn with_fallback(ranks: impl IntoIterator<Item = Rank>, fallback: Rank) -> Self {
        Self {
            script: Mutex::new(ranks.into_iter().collect()),
            fallback,
        }
    }

    /// Appends more ranks to the end of the script
    pub fn push(&self, ranks: impl IntoIterator<Item = Rank>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(ranks);
    }

    pub fn remaining(&self) -> usize {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl CardSource for StackedDeck {
    fn draw_card(&self) -> Card {
        let rank = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(self.fallback);
        Card::from(rank)
    }
}
