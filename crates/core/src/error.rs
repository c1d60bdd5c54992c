//! Error types for the slide-deck workspace.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while persisting or exporting a presentation.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("Failed to read or write file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to (de)serialize a document snapshot.
    #[error("Snapshot serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing key-value store rejected an operation.
    #[error("Storage error: {0}")]
    Storage(String),

    /// ZIP container error during export.
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML generation error during export.
    #[error("XML error: {0}")]
    Xml(String),

    /// An image source could not be resolved or decoded.
    #[error("Image error: {0}")]
    Image(String),

    /// Export failed as a whole.
    #[error("Export error: {0}")]
    Export(String),
}
