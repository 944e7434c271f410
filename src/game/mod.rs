// Public API
pub use cards::{Card, Rank, Suit};
pub use dealer::{next_state, play_dealer, DealerState, DEALER_STANDS_ON};
pub use deck::{CardSource, RandomDeck, StackedDeck};
pub use errors::BlackjackError;
pub use hand::{hand_value, Hand, BLACKJACK};
pub use repository::{InMemorySessionRepository, SessionRepository};
pub use service::{BlackjackService, OutcomeRecorder};
pub use session::{GameSession, Outcome, Resolution, TableView, Turn, Winner};

// Internal modules
mod cards;
mod dealer;
mod deck;
mod errors;
mod hand;
mod repository;
mod service;
mod session;
