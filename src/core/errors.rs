use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexankiError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("HTTP error {status} from {url}")]
    BadStatus { status: String, url: String },

    #[error("AnkiConnect error: {0}")]
    AnkiConnect(String),

    #[error("Lookup failed for '{word}': {reason}")]
    LookupFailed { word: String, reason: String },

    #[error("Failed to load deck file: {0}")]
    FailedToLoadDecks(String),

    #[error("LexankiError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for LexankiError {
    fn from(error: std::io::Error) -> Self {
        LexankiError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for LexankiError {
    fn from(error: reqwest::Error) -> Self {
        LexankiError::Reqwest(Box::new(error))
    }
}
