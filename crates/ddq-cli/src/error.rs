use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ddq_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Speech is not available: {0}")]
    SpeechUnavailable(String),
    #[error("Voice must be an index from `ddq voices` or `default`, got '{0}'")]
    InvalidVoice(String),
    #[error("Not available offline: {0}")]
    NotAvailableOffline(String),
}
