//! Game session: phase, board, active card, score, and deck cursor.
//!
//! ## Key Types
//!
//! - `Phase`: Closed set of session phases
//! - `GameSession`: The state machine itself
//! - `PlacementOutcome`: What a placement attempt did
//! - `PersistedSnapshot`: Durable form of a `Playing` session

pub mod snapshot;
pub mod state;

pub use snapshot::PersistedSnapshot;
pub use state::{GameSession, IgnoreReason, PlacementOutcome, Phase};
