//! Error types for slide deck extraction and rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting, parsing, or rendering a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The source markdown does not exist.
    #[error("Input file not found: {}", .0.display())]
    MissingInputFile(PathBuf),

    /// The deck configuration could not be loaded.
    #[error("Invalid deck configuration: {0}")]
    ConfigError(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error (for PPTX).
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// A written deck is missing required parts.
    #[error("Invalid or corrupted deck: {0}")]
    CorruptedDeck(String),
}
