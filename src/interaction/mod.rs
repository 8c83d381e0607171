//! Pointer and touch input.
//!
//! The host translates its native events into [`GestureEvent`]s and
//! supplies a [`HitTest`] for the current layout. The controller forwards
//! at most one placement per gesture to a [`PlacementSink`].

pub mod controller;
pub mod geometry;

pub use controller::{
    DragState, GestureEvent, GestureState, InputSource, InteractionController, PlacementSink,
};
pub use geometry::{DropTarget, HitTest, Point, Rect, SlotLayout};
