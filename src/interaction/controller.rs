//! One gesture state machine for mouse drags, touch drags and taps.
//!
//! ```text
//!   Idle ──Start──▶ Dragging ──Move──▶ Dragging
//!    ▲                 │
//!    └──End / Cancel───┘   End over a target places exactly once
//! ```
//!
//! Drag visuals (proxy position, hovered slot) live here and never reach
//! the game. The only thing that crosses over is a placement position.

use tracing::{debug, trace};

use super::geometry::{DropTarget, HitTest, Point, Rect};

/// Device that produced a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Mouse or pen via drag-and-drop.
    Mouse,
    /// Touch screen.
    Touch,
}

/// Raw input, already translated from host events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// Pointer went down on the active card.
    Start {
        /// Device.
        source: InputSource,
        /// Pointer position.
        pointer: Point,
        /// Bounds of the active card at that moment.
        card_bounds: Rect,
    },
    /// Pointer moved.
    Move {
        /// Device.
        source: InputSource,
        /// Pointer position.
        pointer: Point,
    },
    /// Pointer released.
    End {
        /// Device.
        source: InputSource,
        /// Pointer position.
        pointer: Point,
    },
    /// The host aborted the gesture.
    Cancel,
    /// Click or tap on a drop target.
    Tap {
        /// The slot that was clicked.
        target: DropTarget,
        /// Set when the host saw this click follow a pointer release
        /// rather than a fresh press.
        synthesized: bool,
    },
}

impl GestureEvent {
    /// A deliberate click or tap on `target`.
    #[must_use]
    pub fn tap(target: DropTarget) -> Self {
        Self::Tap {
            target,
            synthesized: false,
        }
    }

    /// A click the host derived from a pointer release over `target`.
    #[must_use]
    pub fn release_click(target: DropTarget) -> Self {
        Self::Tap {
            target,
            synthesized: true,
        }
    }
}

/// Receives placement requests from the controller.
pub trait PlacementSink {
    /// Try to place the active card at `position`.
    fn attempt_placement(&mut self, position: usize);

    /// Whether a drag may begin. Defaults to always.
    fn accepts_placement(&self) -> bool {
        true
    }
}

/// A drag in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    /// Device that owns the gesture.
    pub source: InputSource,
    /// Pointer offset from the card's top-left at grab time.
    pub grab_offset: Point,
    /// Latest pointer position.
    pub pointer: Point,
    /// Slot under the pointer.
    pub hovered: Option<DropTarget>,
}

/// Controller state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    /// No gesture.
    #[default]
    Idle,
    /// Dragging the active card.
    Dragging(DragState),
}

/// Turns gestures into at most one placement each.
///
/// ## Usage
///
/// ```
/// use timeline_engine::interaction::{
///     GestureEvent, InputSource, InteractionController, PlacementSink, Point, Rect, SlotLayout,
/// };
///
/// #[derive(Default)]
/// struct Recorder(Vec<usize>);
///
/// impl PlacementSink for Recorder {
///     fn attempt_placement(&mut self, position: usize) {
///         self.0.push(position);
///     }
/// }
///
/// let layout = SlotLayout::row(Point::new(0.0, 0.0), 100.0, 100.0, 3);
/// let mut controller = InteractionController::new();
/// let mut sink = Recorder::default();
///
/// let source = InputSource::Mouse;
/// let card_bounds = Rect::new(0.0, 200.0, 80.0, 120.0);
/// let pointer = Point::new(10.0, 210.0);
/// let start = GestureEvent::Start { source, pointer, card_bounds };
/// controller.handle(start, &layout, &mut sink);
///
/// let pointer = Point::new(250.0, 50.0);
/// controller.handle(GestureEvent::End { source, pointer }, &layout, &mut sink);
///
/// assert_eq!(sink.0, vec![2]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    state: GestureState,
    /// Release target whose synthesized click must not place again.
    /// Deliberate taps are never swallowed.
    swallow_tap: Option<DropTarget>,
}

impl InteractionController {
    /// An idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one event. Returns the target placed on, if any.
    pub fn handle<H, P>(
        &mut self,
        event: GestureEvent,
        hit: &H,
        sink: &mut P,
    ) -> Option<DropTarget>
    where
        H: HitTest + ?Sized,
        P: PlacementSink + ?Sized,
    {
        let swallow_tap = self.swallow_tap.take();

        match event {
            GestureEvent::Start {
                source,
                pointer,
                card_bounds,
            } => {
                if self.is_dragging() {
                    trace!(?source, "second gesture start ignored");
                    return None;
                }
                if !sink.accepts_placement() {
                    trace!("drag start ignored, nothing to place");
                    return None;
                }
                self.state = GestureState::Dragging(DragState {
                    source,
                    grab_offset: pointer - card_bounds.origin(),
                    pointer,
                    hovered: hit.drop_target_at(pointer),
                });
                debug!(?source, "drag started");
                None
            }
            GestureEvent::Move { source, pointer } => {
                if let GestureState::Dragging(drag) = &mut self.state {
                    if drag.source == source {
                        drag.pointer = pointer;
                        drag.hovered = hit.drop_target_at(pointer);
                    }
                }
                None
            }
            GestureEvent::End { source, pointer } => {
                let GestureState::Dragging(drag) = self.state else {
                    trace!(?source, "release without gesture ignored");
                    return None;
                };
                if drag.source != source {
                    return None;
                }
                self.state = GestureState::Idle;

                let target = hit.drop_target_at(pointer)?;
                self.swallow_tap = Some(target);
                debug!(%target, "drag released over target");
                sink.attempt_placement(target.index());
                Some(target)
            }
            GestureEvent::Cancel => {
                self.state = GestureState::Idle;
                None
            }
            GestureEvent::Tap {
                target,
                synthesized,
            } => {
                if self.is_dragging() {
                    trace!(%target, "tap during drag ignored");
                    return None;
                }
                if synthesized && swallow_tap == Some(target) {
                    trace!(%target, "click from drag release swallowed");
                    return None;
                }
                sink.attempt_placement(target.index());
                Some(target)
            }
        }
    }

    /// Drop any gesture in progress.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.swallow_tap = None;
    }

    // === Observers ===

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Check if a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    /// Latest pointer position of the drag.
    #[must_use]
    pub fn drag_position(&self) -> Option<Point> {
        match self.state {
            GestureState::Dragging(drag) => Some(drag.pointer),
            GestureState::Idle => None,
        }
    }

    /// Where the dragged card's top-left should be drawn.
    #[must_use]
    pub fn proxy_origin(&self) -> Option<Point> {
        match self.state {
            GestureState::Dragging(drag) => Some(drag.pointer - drag.grab_offset),
            GestureState::Idle => None,
        }
    }

    /// Slot to highlight.
    #[must_use]
    pub fn hovered_target(&self) -> Option<DropTarget> {
        match self.state {
            GestureState::Dragging(drag) => drag.hovered,
            GestureState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::SlotLayout;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<usize>,
        closed: bool,
    }

    impl PlacementSink for Recorder {
        fn attempt_placement(&mut self, position: usize) {
            self.calls.push(position);
        }

        fn accepts_placement(&self) -> bool {
            !self.closed
        }
    }

    fn setup() -> (InteractionController, SlotLayout, Recorder) {
        // Slots 0..3 across the top, 100px each
        let layout = SlotLayout::row(Point::new(0.0, 0.0), 100.0, 100.0, 3);
        (InteractionController::new(), layout, Recorder::default())
    }

    const CARD: Rect = Rect::new(100.0, 300.0, 80.0, 120.0);

    fn start(source: InputSource, x: f64, y: f64) -> GestureEvent {
        GestureEvent::Start {
            source,
            pointer: Point::new(x, y),
            card_bounds: CARD,
        }
    }

    fn moved(source: InputSource, x: f64, y: f64) -> GestureEvent {
        GestureEvent::Move {
            source,
            pointer: Point::new(x, y),
        }
    }

    fn end(source: InputSource, x: f64, y: f64) -> GestureEvent {
        GestureEvent::End {
            source,
            pointer: Point::new(x, y),
        }
    }

    fn tap(index: usize) -> GestureEvent {
        GestureEvent::tap(DropTarget::new(index))
    }

    #[test]
    fn test_drag_over_target_places_once() {
        let (mut c, layout, mut sink) = setup();

        c.handle(start(InputSource::Touch, 110.0, 320.0), &layout, &mut sink);
        c.handle(moved(InputSource::Touch, 150.0, 200.0), &layout, &mut sink);
        c.handle(moved(InputSource::Touch, 250.0, 50.0), &layout, &mut sink);
        let placed = c.handle(end(InputSource::Touch, 250.0, 50.0), &layout, &mut sink);

        assert_eq!(placed, Some(DropTarget::new(2)));
        assert_eq!(sink.calls, vec![2]);
        assert_eq!(c.state(), &GestureState::Idle);
    }

    #[test]
    fn test_release_outside_targets_places_nothing() {
        let (mut c, layout, mut sink) = setup();

        c.handle(start(InputSource::Mouse, 110.0, 320.0), &layout, &mut sink);
        c.handle(moved(InputSource::Mouse, 50.0, 50.0), &layout, &mut sink);
        c.handle(end(InputSource::Mouse, 500.0, 500.0), &layout, &mut sink);

        assert!(sink.calls.is_empty());
        assert!(!c.is_dragging());
        assert_eq!(c.hovered_target(), None);
        assert_eq!(c.drag_position(), None);
    }

    #[test]
    fn test_drag_visuals() {
        let (mut c, layout, mut sink) = setup();

        c.handle(start(InputSource::Touch, 110.0, 320.0), &layout, &mut sink);
        assert_eq!(c.hovered_target(), None);
        assert_eq!(c.proxy_origin(), Some(CARD.origin()));

        c.handle(moved(InputSource::Touch, 160.0, 40.0), &layout, &mut sink);
        assert_eq!(c.drag_position(), Some(Point::new(160.0, 40.0)));
        assert_eq!(c.proxy_origin(), Some(Point::new(150.0, 20.0)));
        assert_eq!(c.hovered_target(), Some(DropTarget::new(1)));
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn test_second_start_ignored() {
        let (mut c, layout, mut sink) = setup();

        c.handle(start(InputSource::Mouse, 110.0, 320.0), &layout, &mut sink);
        c.handle(start(InputSource::Touch, 170.0, 410.0), &layout, &mut sink);

        let GestureState::Dragging(drag) = *c.state() else {
            panic!("expected drag");
        };
        assert_eq!(drag.source, InputSource::Mouse);
        assert_eq!(drag.grab_offset, Point::new(10.0, 20.0));
    }

    #[test]
    fn test_foreign_source_release_ignored() {
        let (mut c, layout, mut sink) = setup();

        c.handle(start(InputSource::Mouse, 110.0, 320.0), &layout, &mut sink);
        c.handle(end(InputSource::Touch, 50.0, 50.0), &layout, &mut sink);

        assert!(c.is_dragging());
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn test_stray_release_ignored() {
        let (mut c, layout, mut sink) = setup();
        let placed = c.handle(end(InputSource::Mouse, 50.0, 50.0), &layout, &mut sink);

        assert_eq!(placed, None);
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn test_tap_places_when_idle() {
        let (mut c, layout, mut sink) = setup();
        c.handle(tap(0), &layout, &mut sink);
        assert_eq!(sink.calls, vec![0]);
    }

    #[test]
    fn test_tap_during_drag_ignored() {
        let (mut c, layout, mut sink) = setup();

        c.handle(start(InputSource::Mouse, 110.0, 320.0), &layout, &mut sink);
        c.handle(tap(1), &layout, &mut sink);

        assert!(sink.calls.is_empty());
        assert!(c.is_dragging());
    }

    #[test]
    fn test_click_from_release_swallowed() {
        let (mut c, layout, mut sink) = setup();

        c.handle(start(InputSource::Mouse, 110.0, 320.0), &layout, &mut sink);
        c.handle(end(InputSource::Mouse, 150.0, 50.0), &layout, &mut sink);
        let click = GestureEvent::release_click(DropTarget::new(1));
        assert_eq!(c.handle(click, &layout, &mut sink), None);
        assert_eq!(sink.calls, vec![1]);

        // Only one click per release
        c.handle(click, &layout, &mut sink);
        assert_eq!(sink.calls, vec![1, 1]);
    }

    #[test]
    fn test_deliberate_tap_after_drop_places() {
        let (mut c, layout, mut sink) = setup();

        c.handle(start(InputSource::Mouse, 110.0, 320.0), &layout, &mut sink);
        c.handle(end(InputSource::Mouse, 150.0, 50.0), &layout, &mut sink);
        let placed = c.handle(tap(1), &layout, &mut sink);

        assert_eq!(placed, Some(DropTarget::new(1)));
        assert_eq!(sink.calls, vec![1, 1]);
    }

    #[test]
    fn test_release_click_on_other_slot_places() {
        let (mut c, layout, mut sink) = setup();

        c.handle(start(InputSource::Mouse, 110.0, 320.0), &layout, &mut sink);
        c.handle(end(InputSource::Mouse, 150.0, 50.0), &layout, &mut sink);
        let click = GestureEvent::release_click(DropTarget::new(2));
        c.handle(click, &layout, &mut sink);

        assert_eq!(sink.calls, vec![1, 2]);
    }

    #[test]
    fn test_swallow_cleared_by_other_events() {
        let (mut c, layout, mut sink) = setup();

        c.handle(start(InputSource::Mouse, 110.0, 320.0), &layout, &mut sink);
        c.handle(end(InputSource::Mouse, 150.0, 50.0), &layout, &mut sink);
        c.handle(moved(InputSource::Mouse, 20.0, 20.0), &layout, &mut sink);
        let click = GestureEvent::release_click(DropTarget::new(1));
        c.handle(click, &layout, &mut sink);

        assert_eq!(sink.calls, vec![1, 1]);
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let (mut c, layout, mut sink) = setup();

        c.handle(start(InputSource::Touch, 110.0, 320.0), &layout, &mut sink);
        c.handle(GestureEvent::Cancel, &layout, &mut sink);
        c.handle(end(InputSource::Touch, 50.0, 50.0), &layout, &mut sink);

        assert!(sink.calls.is_empty());
        assert!(!c.is_dragging());
    }

    #[test]
    fn test_closed_sink_refuses_drag() {
        let (mut c, layout, mut sink) = setup();
        sink.closed = true;

        c.handle(start(InputSource::Mouse, 110.0, 320.0), &layout, &mut sink);
        assert!(!c.is_dragging());
    }

    #[test]
    fn test_reset() {
        let (mut c, layout, mut sink) = setup();
        c.handle(start(InputSource::Mouse, 110.0, 320.0), &layout, &mut sink);

        c.reset();
        assert_eq!(c.state(), &GestureState::Idle);
        assert_eq!(c.proxy_origin(), None);
    }
}
