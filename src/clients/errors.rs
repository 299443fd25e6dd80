use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the query operations and the metadata client.
#[derive(Error, Debug)]
pub enum Error {
    #[error("No search terms specified")]
    NoSearchTerms,

    #[error("Could not find anything")]
    NothingFound,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Pipe input error: {0}")]
    PipeInput(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
