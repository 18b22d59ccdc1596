//! Free-form (manual) tab placement.
//!
//! Each tab carries its own percentage box inside the window plus a stacking
//! order. Output is sorted front-to-back: the first placement is frontmost,
//! so renderers draw the list in reverse and hit-testing walks it forward.

use serde::{Deserialize, Serialize};
use tileview_core::geometry::Rect;

use crate::aspect::fit_tab_viewport;
use crate::tab::{BrowserTab, TabIndex};

/// Percentage bounds of a tab within its window, `[0, 100]` on each axis.
///
/// `min_y` is the bottom edge (Y-up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManualTabGeometry {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    /// Higher values are drawn in front.
    #[serde(default)]
    pub stacking_order: i32,
    #[serde(default = "default_displayed")]
    pub displayed: bool,
}

fn default_displayed() -> bool {
    true
}

impl Default for ManualTabGeometry {
    fn default() -> Self {
        Self::new(0.0, 100.0, 0.0, 100.0)
    }
}

impl ManualTabGeometry {
    #[must_use]
    pub const fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            stacking_order: 0,
            displayed: true,
        }
    }

    #[must_use]
    pub const fn with_stacking_order(mut self, stacking_order: i32) -> Self {
        self.stacking_order = stacking_order;
        self
    }

    #[must_use]
    pub const fn with_displayed(mut self, displayed: bool) -> Self {
        self.displayed = displayed;
        self
    }

    /// Pixel box inside `window`. Inverted percentages give a non-positive size.
    #[must_use]
    pub fn to_pixels(&self, window: Rect) -> Rect {
        let px = |percent: f32, extent: i32| {
            let percent = f64::from(percent.clamp(0.0, 100.0));
            (f64::from(extent) * percent / 100.0).round() as i32
        };
        let left = px(self.min_x, window.width);
        let right = px(self.max_x, window.width);
        let bottom = px(self.min_y, window.height);
        let top = px(self.max_y, window.height);
        Rect::new(window.x + left, window.y + bottom, right - left, top - bottom)
    }
}

/// One placed tab in a manual layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualPlacement {
    /// Position of the tab in the input slice.
    pub position: usize,
    pub tab_index: TabIndex,
    pub stacking_order: i32,
    /// Percentage box in pixels, before aspect locking.
    pub bounds: Rect,
    /// Tab viewport after aspect locking, centered in `bounds`.
    pub viewport: Rect,
}

/// Result of a manual solve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualLayout {
    /// Front-to-back.
    pub placements: Vec<ManualPlacement>,
    /// Displayed tabs skipped for a non-positive size.
    pub rejected: usize,
}

/// Place displayed tabs by their percentage boxes.
///
/// Ties in stacking order keep input order, the earlier tab in front.
pub fn solve_manual_layout<T: BrowserTab>(
    window: Rect,
    tabs: &mut [T],
    lock_all: bool,
) -> ManualLayout {
    let mut order: Vec<(usize, ManualTabGeometry)> = tabs
        .iter()
        .enumerate()
        .map(|(position, tab)| (position, tab.manual_geometry()))
        .filter(|(_, geometry)| geometry.displayed)
        .collect();
    // Stable sort, so equal orders keep list order.
    order.sort_by(|a, b| b.1.stacking_order.cmp(&a.1.stacking_order));

    let mut layout = ManualLayout::default();
    for (position, geometry) in order {
        let tab = &mut tabs[position];
        let bounds = geometry.to_pixels(window);
        if bounds.is_empty() {
            tracing::debug!(
                target: "tileview.layout",
                tab_index = %tab.tab_index(),
                width = bounds.width,
                height = bounds.height,
                "skipping manual tab with collapsed bounds"
            );
            layout.rejected += 1;
            continue;
        }
        let viewport = fit_tab_viewport(tab, bounds, lock_all);
        if viewport.is_empty() {
            tracing::debug!(
                target: "tileview.layout",
                tab_index = %tab.tab_index(),
                "skipping manual tab collapsed by aspect lock"
            );
            layout.rejected += 1;
            continue;
        }
        layout.placements.push(ManualPlacement {
            position,
            tab_index: tab.tab_index(),
            stacking_order: geometry.stacking_order,
            bounds,
            viewport,
        });
    }
    layout
}
