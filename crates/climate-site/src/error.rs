//! Error types for climate-site

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// Origins must be absolute http(s) URLs
    #[error("Invalid site origin: {0}")]
    InvalidOrigin(String),

    #[error("QR size must be between {min} and {max} pixels, got {size}")]
    InvalidSize { size: u32, min: u32, max: u32 },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
