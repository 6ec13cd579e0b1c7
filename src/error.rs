//! Error types for meme composition and export

use thiserror::Error;

/// Result type alias for memekit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while composing, configuring or exporting a meme
#[derive(Error, Debug)]
pub enum Error {
    /// No source image, a zero-area image, or a render that does not match it
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Export was attempted on a draft that has not been composed yet
    #[error("Meme has no rendered image; compose it before sharing")]
    MissingRender,

    /// Font file could not be read or parsed
    #[error("Font error: {0}")]
    FontError(String),

    /// Invalid text style configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Image decoding or encoding failed
    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}
