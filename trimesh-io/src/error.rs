//! Error types for mesh I/O operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while loading or saving a mesh.
///
/// This is a closed taxonomy: every failure a codec or the dispatch layer
/// can produce maps onto one of these kinds.
#[derive(Debug, Error)]
pub enum IoError {
    /// The file or directory does not exist.
    #[error("the file or directory does not exist: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// The target file already exists and overwriting was not allowed.
    #[error("the specified file already exists: {path}")]
    FileAlreadyExists {
        /// Path of the existing file.
        path: PathBuf,
    },

    /// An I/O error that is not a missing file.
    #[error("an unknown I/O error occurred: {0}")]
    UnknownIo(#[from] std::io::Error),

    /// The path's extension does not match any supported format.
    #[error("the file format is not supported: .{extension}")]
    UnsupportedFormat {
        /// The unrecognized extension.
        extension: String,
    },

    /// Read data is invalid; the file might be corrupted.
    #[error("read data is invalid, the file might be corrupted: {message}")]
    InvalidData {
        /// Description of what was invalid.
        message: String,
    },

    /// The provided filepath is not valid.
    #[error("the provided filepath is not valid")]
    InvalidFilepath,
}

impl IoError {
    /// Create an `InvalidData` error with the given message.
    #[must_use]
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }
}
