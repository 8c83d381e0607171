//! Playable game: session, persistence and presentation wired together.

pub mod engine;

pub use engine::{PresentationCue, TimelineGame};
