//! Error taxonomy for the bot. Fetch failures carry the URL and how many
//! attempts were spent; configuration and usage problems are reported before
//! any network activity.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("request to {url} failed after {attempts} attempts: {reason}")]
    Network {
        url: String,
        attempts: u32,
        reason: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Usage(String),

    #[error("telegram delivery failed: {0}")]
    Messenger(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
