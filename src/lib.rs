// Library crate for the blackjack table service
// This file exposes the public API for integration tests

pub mod chance;
pub mod commands;
pub mod config;
pub mod game;
pub mod shared;
pub mod stats;
pub mod table;

// Re-export commonly used types for easier access in tests
pub use commands::{Action, BlackjackCommands, CommandReply};
pub use config::Config;
pub use game::{BlackjackError, BlackjackService, Outcome};
pub use shared::{AppError, AppState};
pub use table::router;
