use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlackjackError {
    #[error("You already have a game in progress. Finish it before starting a new one.")]
    SessionAlreadyActive,

    #[error("You don't have a game in progress. Start a new game first.")]
    NoActiveSession,
}
