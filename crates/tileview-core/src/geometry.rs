#![forbid(unsafe_code)]

//! Geometric primitives.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An integer pixel rectangle for viewports, layout bounds, and hit testing.
///
/// Uses rendering-surface coordinates: origin at the bottom-left, `y`
/// increasing upward. A rectangle with zero area is valid but not drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Bottom edge (inclusive).
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Top edge (exclusive).
    #[inline]
    pub const fn top(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has no drawable area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a pixel is inside the rectangle (half-open on the right/top).
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.top()
    }

    /// Check if `other` lies entirely within this rectangle.
    ///
    /// An empty `other` positioned inside the bounds counts as contained.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.top() <= self.top()
    }

    /// Create a new rectangle inside the current one with the given margin.
    ///
    /// The bottom margin raises `y`; extents never go below zero.
    pub fn inner(&self, margin: Sides) -> Rect {
        let x = self.x.saturating_add(margin.left);
        let y = self.y.saturating_add(margin.bottom);
        let width = self
            .width
            .saturating_sub(margin.left)
            .saturating_sub(margin.right)
            .max(0);
        let height = self
            .height
            .saturating_sub(margin.bottom)
            .saturating_sub(margin.top)
            .max(0);

        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

/// Per-side pixel margins, in viewport order (left, right, bottom, top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sides {
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
    pub top: i32,
}

impl Sides {
    /// No margin on any side.
    pub const ZERO: Self = Self::all(0);

    /// Create new sides with equal values.
    pub const fn all(val: i32) -> Self {
        Self {
            left: val,
            right: val,
            bottom: val,
            top: val,
        }
    }

    /// Create new sides with specific values.
    pub const fn new(left: i32, right: i32, bottom: i32, top: i32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub const fn horizontal_sum(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// Sum of bottom and top.
    #[inline]
    pub const fn vertical_sum(&self) -> i32 {
        self.bottom.saturating_add(self.top)
    }

    /// True when every side is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.left == 0 && self.right == 0 && self.bottom == 0 && self.top == 0
    }

    /// True when any side is negative.
    #[inline]
    pub const fn has_negative(&self) -> bool {
        self.left < 0 || self.right < 0 || self.bottom < 0 || self.top < 0
    }
}

#[cfg(test)]
mod tests {
    use super::{Rect, Sides};
    use proptest::prelude::*;

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2, 3, 4, 5);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 7));
        assert!(!rect.contains(6, 3));
        assert!(!rect.contains(2, 8));
        assert!(!rect.contains(1, 3));
    }

    #[test]
    fn rect_edges_are_y_up() {
        let rect = Rect::new(10, 20, 30, 40);
        assert_eq!(rect.right(), 40);
        assert_eq!(rect.top(), 60);
        assert_eq!(Rect::new(i32::MAX - 1, 0, 5, 5).right(), i32::MAX);
    }

    #[test]
    fn zero_area_is_empty() {
        assert!(Rect::new(0, 0, 0, 10).is_empty());
        assert!(Rect::new(0, 0, 10, 0).is_empty());
        assert!(Rect::new(0, 0, -3, 10).is_empty());
        assert!(!Rect::new(0, 0, 3, 10).is_empty());
    }

    #[test]
    fn rect_inner_raises_bottom() {
        let rect = Rect::new(0, 0, 10, 10);
        let inner = rect.inner(Sides::new(4, 2, 3, 1));
        assert_eq!(inner, Rect::new(4, 3, 4, 6));
        assert!(rect.contains_rect(&inner));
    }

    #[test]
    fn rect_inner_never_negative() {
        let rect = Rect::new(0, 0, 4, 4);
        let inner = rect.inner(Sides::all(3));
        assert_eq!(inner.width, 0);
        assert_eq!(inner.height, 0);
    }

    #[test]
    fn sides_sums_and_flags() {
        let sides = Sides::new(4, 2, 3, 1);
        assert_eq!(sides.horizontal_sum(), 6);
        assert_eq!(sides.vertical_sum(), 4);
        assert!(!sides.is_zero());
        assert!(Sides::ZERO.is_zero());
        assert!(Sides::new(0, -1, 0, 0).has_negative());
    }

    proptest! {
        #[test]
        fn inner_is_contained_in_outer(
            x in -50i32..50, y in -50i32..50, w in 0i32..100, h in 0i32..100,
            left in 0i32..60, right in 0i32..60, bottom in 0i32..60, top in 0i32..60,
        ) {
            let rect = Rect::new(x, y, w, h);
            let inner = rect.inner(Sides::new(left, right, bottom, top));
            prop_assert!(inner.width >= 0 && inner.height >= 0);
            if left + right <= w && bottom + top <= h {
                prop_assert!(rect.contains_rect(&inner));
            }
        }
    }
}
