//! Presentation feedback: placement messages and paced timers.
//!
//! Feedback is emitted by the game and consumed by the host. None of it
//! feeds back into game state.

pub mod message;
pub mod timer;

pub use message::{FeedbackEvent, FeedbackMessage, MessageKind, Tone};
pub use timer::{DeferredAction, FiredTimer, Generation, TimerId, TimerQueue};
