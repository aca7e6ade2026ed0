use thiserror::Error;

use service::errors::ServiceError;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("store error: {0}")]
    Service(#[from] ServiceError),
    #[error("platform error: {0}")]
    Platform(#[from] serenity::Error),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

/// Why a slash command payload could not be turned into a [`crate::commands::Command`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("missing option: {0}")]
    MissingOption(&'static str),
    #[error("option {0} has the wrong type")]
    WrongType(&'static str),
}

impl CommandParseError {
    /// Text shown to the caller.
    pub fn user_message(&self) -> &'static str {
        match self {
            CommandParseError::UnknownCommand(_) => "Unknown command.",
            CommandParseError::MissingOption(_) | CommandParseError::WrongType(_) => "Invalid command options.",
        }
    }
}
