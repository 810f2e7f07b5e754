//! Error types for the analysis pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Pipeline error.
#[derive(Debug, Error)]
pub enum Error {
    /// Empty, mis-shaped or otherwise unusable array input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The image file could not be read or decoded.
    #[error("cannot decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// An operation needed an image but none was given.
    #[error("no image loaded")]
    MissingImage,
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
