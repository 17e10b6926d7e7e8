//! Error types for climate-core

use thiserror::Error;

/// Core error type
///
/// Gameplay never produces errors: messages that arrive in the wrong phase
/// are ignored and timeouts are ordinary transitions. Errors only come from
/// loading content tables.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Invalid content: {0}")]
    InvalidContent(String),

    #[error("Duplicate definition: {0}")]
    DuplicateDefinition(String),

    #[error("Catalog too small: need {needed} items, have {available}")]
    CatalogTooSmall { needed: usize, available: usize },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
