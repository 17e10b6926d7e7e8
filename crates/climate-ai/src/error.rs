//! Error types for climate-ai

use thiserror::Error;

/// AI collaborator error type
#[derive(Error, Debug)]
pub enum Error {
    /// No credentials have been saved yet
    #[error("Please set up your API key first!")]
    NotConfigured,

    /// A settings field was left empty
    #[error("Please fill in all fields!")]
    IncompleteConfig { field: &'static str },

    #[error("Please enter a topic!")]
    EmptyTopic,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the API
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The reply held no JSON array of questions
    #[error("Could not create quiz questions")]
    NoQuestions,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("RON error: {0}")]
    RonWrite(#[from] ron::Error),

    /// Generated questions failed validation
    #[error(transparent)]
    Content(#[from] climate_core::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
