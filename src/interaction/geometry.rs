//! Screen-space geometry and drop-target hit testing.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A position in client coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// An axis-aligned rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Check if a point lies inside (edges inclusive on the top-left,
    /// exclusive on the bottom-right so adjacent slots never overlap).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x + self.width
            && point.y < self.y + self.height
    }
}

/// An insertion slot on the board.
///
/// Slot `0` is before the first card; slot `k` is immediately after
/// `board[k - 1]`. The index is exactly the position passed to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DropTarget(usize);

impl DropTarget {
    /// Slot with a given index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Slot before the first card.
    #[must_use]
    pub const fn before_first() -> Self {
        Self(0)
    }

    /// Slot right after the card at `board_index`.
    #[must_use]
    pub const fn after_card(board_index: usize) -> Self {
        Self(board_index + 1)
    }

    /// Insertion position.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Parse a `data-drop-zone` attribute value.
    ///
    /// Missing markers are conventionally `-1`; that and any other
    /// non-index value yield `None`.
    #[must_use]
    pub fn from_attribute(value: &str) -> Option<Self> {
        value.trim().parse::<usize>().ok().map(Self)
    }
}

impl std::fmt::Display for DropTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}

/// Finds the drop target under a point.
pub trait HitTest {
    /// The drop target under `point`, if any.
    fn drop_target_at(&self, point: Point) -> Option<DropTarget>;
}

impl<F> HitTest for F
where
    F: Fn(Point) -> Option<DropTarget>,
{
    fn drop_target_at(&self, point: Point) -> Option<DropTarget> {
        self(point)
    }
}

/// Drop-target rectangles as laid out on screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SlotLayout {
    slots: Vec<(DropTarget, Rect)>,
}

impl SlotLayout {
    /// Create an empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slot (builder pattern).
    #[must_use]
    pub fn with_slot(mut self, target: DropTarget, bounds: Rect) -> Self {
        self.slots.push((target, bounds));
        self
    }

    /// Lay out `count` equal slots in a horizontal row starting at `origin`.
    #[must_use]
    pub fn row(origin: Point, slot_width: f64, slot_height: f64, count: usize) -> Self {
        let slots = (0..count)
            .map(|i| {
                // Slot counts are tiny; no precision concern
                #[allow(clippy::cast_precision_loss)]
                let x = origin.x + slot_width * i as f64;
                (DropTarget::new(i), Rect::new(x, origin.y, slot_width, slot_height))
            })
            .collect();
        Self { slots }
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if there are no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl HitTest for SlotLayout {
    fn drop_target_at(&self, point: Point) -> Option<DropTarget> {
        // Later slots render on top
        self.slots
            .iter()
            .rev()
            .find(|(_, bounds)| bounds.contains(point))
            .map(|(target, _)| *target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_half_open() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(29.9, 29.9)));
        assert!(!rect.contains(Point::new(30.0, 15.0)));
        assert!(!rect.contains(Point::new(9.9, 15.0)));
    }

    #[test]
    fn test_point_arithmetic() {
        let grab = Point::new(105.0, 52.0) - Point::new(100.0, 40.0);
        assert_eq!(grab, Point::new(5.0, 12.0));
        assert_eq!(Point::new(1.0, 1.0) + grab, Point::new(6.0, 13.0));
    }

    #[test]
    fn test_drop_target_indexing() {
        assert_eq!(DropTarget::before_first().index(), 0);
        assert_eq!(DropTarget::after_card(0).index(), 1);
        assert_eq!(DropTarget::after_card(4).index(), 5);
        assert_eq!(DropTarget::new(2).to_string(), "Slot(2)");
    }

    #[test]
    fn test_drop_target_from_attribute() {
        assert_eq!(DropTarget::from_attribute("3"), Some(DropTarget::new(3)));
        assert_eq!(DropTarget::from_attribute(" 0 "), Some(DropTarget::new(0)));
        assert_eq!(DropTarget::from_attribute("-1"), None);
        assert_eq!(DropTarget::from_attribute(""), None);
        assert_eq!(DropTarget::from_attribute("two"), None);
    }

    #[test]
    fn test_row_layout_hit_testing() {
        let layout = SlotLayout::row(Point::new(0.0, 100.0), 50.0, 80.0, 3);
        assert_eq!(layout.len(), 3);

        assert_eq!(layout.drop_target_at(Point::new(10.0, 120.0)), Some(DropTarget::new(0)));
        assert_eq!(layout.drop_target_at(Point::new(120.0, 120.0)), Some(DropTarget::new(2)));
        assert_eq!(layout.drop_target_at(Point::new(160.0, 120.0)), None);
        assert_eq!(layout.drop_target_at(Point::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_overlapping_slots_prefer_topmost() {
        let layout = SlotLayout::new()
            .with_slot(DropTarget::new(0), Rect::new(0.0, 0.0, 100.0, 100.0))
            .with_slot(DropTarget::new(1), Rect::new(50.0, 0.0, 100.0, 100.0));
        assert_eq!(layout.drop_target_at(Point::new(75.0, 10.0)), Some(DropTarget::new(1)));
    }

    #[test]
    fn test_closure_hit_test() {
        let everywhere = |_: Point| Some(DropTarget::new(7));
        assert_eq!(everywhere.drop_target_at(Point::default()), Some(DropTarget::new(7)));
    }
}
