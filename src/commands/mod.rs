// Turns chat input into game operations and game results into replies.
// Front-ends (bot, dashboard) only ever see CommandReply.

pub use reply::{CommandReply, HIDDEN_CARD};

mod reply;

use std::str::FromStr;
use std::sync::Arc;
use strum_macros::{Display, EnumString};
use thiserror::Error;
use tracing::{info, instrument};

use crate::game::{BlackjackError, BlackjackService, Turn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Action {
    #[strum(to_string = "start", serialize = "play", serialize = "deal")]
    Start,
    Hit,
    Stand,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown action '{0}'. Use start, hit or stand.")]
    UnknownAction(String),

    #[error(transparent)]
    Game(#[from] BlackjackError),
}

pub struct BlackjackCommands {
    service: Arc<BlackjackService>,
}

impl BlackjackCommands {
    pub fn new(service: Arc<BlackjackService>) -> Self {
        Self { service }
    }

    pub fn parse_action(input: &str) -> Result<Action, CommandError> {
        Action::from_str(input.trim()).map_err(|_| CommandError::UnknownAction(input.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn handle(
        &self,
        player_key: &str,
        action: Action,
    ) -> Result<CommandReply, CommandError> {
        info!("Handling blackjack command");

        let reply = match action {
            Action::Start => turn_reply(self.service.start(player_key).await?),
            Action::Hit => turn_reply(self.service.hit(player_key).await?),
            Action::Stand => CommandReply::resolved(&self.service.stand(player_key).await?),
        };

        Ok(reply)
    }

    /// Current table. Fails with `NoActiveSession` when the player has no game.
    pub async fn show(&self, player_key: &str) -> Result<CommandReply, CommandError> {
        let view = self.service.peek(player_key).await?;
        Ok(CommandReply::in_progress(&view))
    }

    /// Parses raw chat input and always produces something to show the user.
    pub async fn respond(&self, player_key: &str, input: &str) -> CommandReply {
        let result = match Self::parse_action(input) {
            Ok(action) => self.handle(player_key, action).await,
            Err(e) => Err(e),
        };

        result.unwrap_or_else(|e| error_reply(&e))
    }
}

fn turn_reply(turn: Turn) -> CommandReply {
    match turn {
        Turn::InProgress(view) => CommandReply::in_progress(&view),
        Turn::Resolved(resolution) => CommandReply::resolved(&resolution),
    }
}

pub fn error_reply(error: &CommandError) -> CommandReply {
    let title = match error {
        CommandError::Game(BlackjackError::SessionAlreadyActive) => "Game in progress",
        CommandError::Game(BlackjackError::NoActiveSession) => "No game in progress",
        CommandError::UnknownAction(_) => "Unknown action",
    };
    CommandReply::failure(title, error.to_string())
}
