//! Error types for deckfit library.

use std::io;
use thiserror::Error;

/// Result type alias for deckfit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or loading a deck.
///
/// Layout and pagination never fail; these errors only surface when a
/// value is constructed, deserialized, read or written.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON input could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Page geometry or engine configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A section violates the elements-or-subsections rule.
    #[error("Invalid section: {0}")]
    InvalidSection(String),

    /// A table row does not match the header width.
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    /// Error during rendering (JSON, outline).
    #[error("Rendering error: {0}")]
    Render(String),
}
