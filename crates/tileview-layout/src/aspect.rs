//! Aspect-ratio correction for tab viewports.
//!
//! Ratios are height / width. Correction only ever shrinks: either the width
//! (when the locked shape is taller than the box) or the height.
//!
//! # Invariants
//!
//! 1. The corrected size never exceeds the input size on either axis.
//! 2. Feeding a corrected size back in returns it unchanged. The no-change
//!    test compares rounded integers, so floating-point error in one frame
//!    cannot shift the next frame's viewport by a pixel.

use serde::{Deserialize, Serialize};
use tileview_core::geometry::Rect;

use crate::tab::BrowserTab;

/// Per-tab aspect lock, owned and persisted by the tab.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectLock {
    pub locked: bool,
    /// Height / width.
    pub ratio: f32,
}

impl AspectLock {
    pub const UNLOCKED: Self = Self {
        locked: false,
        ratio: 1.0,
    };

    #[must_use]
    pub const fn locked(ratio: f32) -> Self {
        Self {
            locked: true,
            ratio,
        }
    }

    /// Lock matching the shape of a `width` x `height` box.
    #[must_use]
    pub fn from_size(width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            return None;
        }
        Some(Self::locked(height as f32 / width as f32))
    }

    /// Locked with a ratio the correction can use.
    #[must_use]
    pub fn is_active(self) -> bool {
        self.locked && ratio_is_usable(self.ratio)
    }
}

impl Default for AspectLock {
    fn default() -> Self {
        Self::UNLOCKED
    }
}

fn ratio_is_usable(ratio: f32) -> bool {
    ratio.is_finite() && ratio > 0.0
}

fn round_f64_to_i32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    if value >= f64::from(i32::MAX) {
        return i32::MAX;
    }
    if value <= f64::from(i32::MIN) {
        return i32::MIN;
    }
    value.round() as i32
}

/// Shrink `width` x `height` so that `height ≈ width * ratio`.
///
/// Degenerate input (non-positive size, unusable ratio) is returned as-is.
#[must_use]
pub fn adjust_for_aspect_ratio(width: i32, height: i32, ratio: f32) -> (i32, i32) {
    if width <= 0 || height <= 0 || !ratio_is_usable(ratio) {
        return (width, height);
    }

    let ratio = f64::from(ratio);
    let preferred_height = round_f64_to_i32(f64::from(width) * ratio);
    if preferred_height == height {
        return (width, height);
    }

    if preferred_height > height {
        let scale = f64::from(height) / f64::from(preferred_height);
        // Floor keeps round(new_width * ratio) <= height, so the height
        // re-derived below satisfies the equality test on the next call.
        let new_width = (f64::from(width) * scale).floor() as i32;
        let new_height = round_f64_to_i32(f64::from(new_width) * ratio).min(height);
        (new_width, new_height)
    } else {
        (width, preferred_height)
    }
}

/// Offset that centers a box inside `leftover` spare pixels.
///
/// Spare space of one pixel or less is left alone so rounding at integer
/// boundaries does not make the viewport jitter.
#[inline]
pub(crate) const fn center_offset(leftover: i32) -> i32 {
    if leftover > 1 { leftover / 2 } else { 0 }
}

/// Shrink `rect` to `ratio` and center the result inside the original.
#[must_use]
pub fn adjust_rect_for_aspect_ratio(rect: Rect, ratio: f32) -> Rect {
    let (width, height) = adjust_for_aspect_ratio(rect.width, rect.height, ratio);
    Rect::new(
        rect.x + center_offset(rect.width - width),
        rect.y + center_offset(rect.height - height),
        width,
        height,
    )
}

/// Size a tab inside `bounds`, honoring its aspect lock.
///
/// With `lock_all` set, a tab that has never been locked is first locked to
/// the shape of `bounds`; that lock persists on the tab.
pub fn fit_tab_viewport<T: BrowserTab + ?Sized>(tab: &mut T, bounds: Rect, lock_all: bool) -> Rect {
    if lock_all
        && !tab.is_aspect_ratio_locked()
        && let Some(lock) = AspectLock::from_size(bounds.width, bounds.height)
    {
        tracing::debug!(
            target: "tileview.layout",
            tab_index = %tab.tab_index(),
            ratio = lock.ratio,
            "auto-locking tab aspect ratio"
        );
        tab.set_aspect_ratio(lock.ratio);
        tab.set_aspect_ratio_locked(true);
    }

    let lock = tab.aspect_lock();
    if !lock.is_active() {
        return bounds;
    }
    adjust_rect_for_aspect_ratio(bounds, lock.ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab::TabState;
    use proptest::prelude::*;

    #[test]
    fn matching_shape_is_unchanged() {
        assert_eq!(adjust_for_aspect_ratio(500, 400, 0.8), (500, 400));
    }

    #[test]
    fn wide_box_shrinks_width() {
        // 400x100 with a square lock: preferred height 400 > 100.
        assert_eq!(adjust_for_aspect_ratio(400, 100, 1.0), (100, 100));
    }

    #[test]
    fn tall_box_shrinks_height() {
        assert_eq!(adjust_for_aspect_ratio(100, 400, 1.0), (100, 100));
        assert_eq!(adjust_for_aspect_ratio(200, 400, 0.5), (200, 100));
    }

    #[test]
    fn rounding_within_half_pixel_is_stable() {
        // 333 * 0.3 = 99.9 rounds to 100: no change even though not exact.
        assert_eq!(adjust_for_aspect_ratio(333, 100, 0.3), (333, 100));
    }

    #[test]
    fn degenerate_input_is_passed_through() {
        assert_eq!(adjust_for_aspect_ratio(0, 100, 1.0), (0, 100));
        assert_eq!(adjust_for_aspect_ratio(100, -4, 1.0), (100, -4));
        assert_eq!(adjust_for_aspect_ratio(100, 50, 0.0), (100, 50));
        assert_eq!(adjust_for_aspect_ratio(100, 50, f32::NAN), (100, 50));
    }

    #[test]
    fn large_ratio_converges_in_one_step() {
        // Width from height / ratio would be 33.3; re-deriving height keeps it stable.
        let first = adjust_for_aspect_ratio(100, 100, 3.0);
        assert_eq!(first, (33, 99));
        assert_eq!(adjust_for_aspect_ratio(first.0, first.1, 3.0), first);
    }

    #[test]
    fn rect_adjust_centers_result() {
        let rect = adjust_rect_for_aspect_ratio(Rect::new(10, 20, 400, 100), 1.0);
        assert_eq!(rect, Rect::new(160, 20, 100, 100));
    }

    #[test]
    fn one_pixel_leftover_is_not_centered() {
        assert_eq!(center_offset(1), 0);
        assert_eq!(center_offset(0), 0);
        assert_eq!(center_offset(2), 1);
        assert_eq!(center_offset(7), 3);
    }

    #[test]
    fn lock_all_sets_ratio_from_bounds_once() {
        let mut tab = TabState::new(1);
        let bounds = Rect::new(0, 0, 500, 400);
        let viewport = fit_tab_viewport(&mut tab, bounds, true);
        assert_eq!(viewport, bounds);
        assert!(tab.aspect_lock.locked);
        assert!((tab.aspect_lock.ratio - 0.8).abs() < 1e-6);

        // A later, differently shaped box keeps the persisted ratio.
        let viewport = fit_tab_viewport(&mut tab, Rect::new(0, 0, 1000, 400), true);
        assert_eq!(viewport, Rect::new(250, 0, 500, 400));
        assert!((tab.aspect_lock.ratio - 0.8).abs() < 1e-6);
    }

    #[test]
    fn unlocked_tab_fills_bounds() {
        let mut tab = TabState::new(1);
        let bounds = Rect::new(3, 4, 50, 60);
        assert_eq!(fit_tab_viewport(&mut tab, bounds, false), bounds);
        assert!(!tab.aspect_lock.locked);
    }

    proptest! {
        #[test]
        fn adjustment_is_idempotent(
            width in 1i32..4000,
            height in 1i32..4000,
            ratio in 0.05f32..20.0,
        ) {
            let once = adjust_for_aspect_ratio(width, height, ratio);
            let twice = adjust_for_aspect_ratio(once.0, once.1, ratio);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn adjustment_never_grows(
            width in 1i32..4000,
            height in 1i32..4000,
            ratio in 0.05f32..20.0,
        ) {
            let (w, h) = adjust_for_aspect_ratio(width, height, ratio);
            prop_assert!(w <= width && h <= height);
            prop_assert!(w >= 0 && h >= 0);
        }

        #[test]
        fn adjusted_rect_stays_inside(
            x in -100i32..100, y in -100i32..100,
            width in 1i32..2000, height in 1i32..2000,
            ratio in 0.05f32..20.0,
        ) {
            let outer = Rect::new(x, y, width, height);
            prop_assert!(outer.contains_rect(&adjust_rect_for_aspect_ratio(outer, ratio)));
        }
    }
}
