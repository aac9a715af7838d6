//! Error types for bundling and bundle reading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while producing or reading a bundle
#[derive(Debug, Error)]
pub enum BundleError {
    /// A required input file is missing or unreadable
    #[error("input file '{}' not found or unreadable: {source}", .path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be created or written
    #[error("failed to write output file '{}': {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output was written but could not be marked executable
    #[error("failed to set executable permissions on '{}': {source}", .path.display())]
    PermissionUpdate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is too short to hold a trailer, or its trailer is invalid
    #[error("not a valid bundle: {reason}")]
    NotABundle { reason: String },

    /// Other I/O failure while reading a bundle
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
