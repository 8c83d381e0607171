//! # timeline-engine
//!
//! Engine for a single-player timeline card game: the player is dealt one
//! event at a time and must slot it into a growing, year-ordered row of
//! events. One wrong placement ends the game; placing every card wins it.
//!
//! ## Design Principles
//!
//! 1. **Pure rules**: Whether a placement is correct is decided by one
//!    pure function over the board and the card.
//!
//! 2. **Owned state**: A game session is an explicitly owned value. The
//!    storage backend is injected, never global.
//!
//! 3. **Presentation stays outside**: Messages, timers and drag visuals
//!    never influence game state.
//!
//! ## Modules
//!
//! - `core`: Configuration, errors, RNG
//! - `cards`: Event records, the catalog, card ids
//! - `deck`: Building and shuffling a game's deck
//! - `rules`: The placement validator
//! - `session`: Game state machine and snapshots
//! - `persistence`: Storage backends and the snapshot gateway
//! - `feedback`: Placement messages and presentation timers
//! - `interaction`: Drag, touch and tap gestures
//! - `game`: `TimelineGame`, everything wired together

pub mod core;
pub mod cards;
pub mod deck;
pub mod rules;
pub mod session;
pub mod persistence;
pub mod feedback;
pub mod interaction;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    CatalogError, EngineConfig, EngineError, GameRng, StorageError,
    DEFAULT_STORAGE_KEY, MIN_DEAL_SIZE,
};

pub use crate::cards::{BoardCard, CardId, Catalog, EventRecord, LocalizedText};

pub use crate::deck::Deck;

pub use crate::rules::{is_valid_insertion, valid_positions};

pub use crate::session::{GameSession, IgnoreReason, PersistedSnapshot, Phase, PlacementOutcome};

pub use crate::persistence::{FileStorage, MemoryStorage, PersistenceGateway, Storage};

pub use crate::feedback::{FeedbackEvent, FeedbackMessage, MessageKind, Tone};

pub use crate::interaction::{
    DropTarget, GestureEvent, InputSource, InteractionController, PlacementSink, Point, Rect,
    SlotLayout,
};

pub use crate::game::{PresentationCue, TimelineGame};
