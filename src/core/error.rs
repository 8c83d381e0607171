//! Error types.
//!
//! Only a handful of failures ever reach the embedding application:
//! a catalog that cannot be loaded, a catalog too small to deal, and
//! storage backend failures (which the game itself logs and absorbs).

use std::path::PathBuf;

/// Failure loading a card catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog is not valid JSON or does not match the record shape.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A record's `date` is not a signed integer.
    #[error("catalog entry {index} has unparsable date {value:?}")]
    InvalidDate {
        /// Position of the record in the catalog.
        index: usize,
        /// The raw date string.
        value: String,
    },

    /// The catalog file could not be read.
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

/// Fatal engine failure reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Not enough cards to deal a game.
    #[error("catalog has {found} cards, at least {required} are needed to deal a game")]
    CatalogTooSmall {
        /// Cards available.
        found: usize,
        /// Cards required.
        required: usize,
    },
}

/// Failure inside a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem access failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        /// Path involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The value could not be serialized.
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The key cannot be used by this backend.
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
}
