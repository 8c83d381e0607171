//! Core engine types: RNG, configuration, errors.
//!
//! These have no knowledge of cards or game rules.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{EngineConfig, DEFAULT_STORAGE_KEY, MIN_DEAL_SIZE};
pub use error::{CatalogError, EngineError, StorageError};
pub use rng::GameRng;
