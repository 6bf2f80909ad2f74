//! Map loading error types.

use std::path::PathBuf;

/// Errors that can occur when reading a map payload.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// The text contains no `{` at all
    #[error("no JSON object found in map payload")]
    NoObject,

    /// JSON was malformed or did not match the map layout
    #[error("invalid map JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading the map file failed
    #[error("failed to read map file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
