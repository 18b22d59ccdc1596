//! Tab margins and the model viewport.
//!
//! The model viewport is the tab viewport minus the tab's margins. Margins
//! that would leave no room on an axis are rejected as a whole: the model
//! viewport falls back to the unmodified tab viewport.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tileview_core::geometry::{Rect, Sides};

use crate::tab::TabIndex;

/// Source of per-tab pixel margins for a given viewport size.
pub trait MarginProvider {
    fn margins(&self, tab_index: TabIndex, viewport_width: i32, viewport_height: i32) -> Sides;
}

impl<F> MarginProvider for F
where
    F: Fn(TabIndex, i32, i32) -> Sides,
{
    fn margins(&self, tab_index: TabIndex, viewport_width: i32, viewport_height: i32) -> Sides {
        self(tab_index, viewport_width, viewport_height)
    }
}

/// Provider with zero margins for every tab.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMargins;

impl MarginProvider for NoMargins {
    fn margins(&self, _tab_index: TabIndex, _width: i32, _height: i32) -> Sides {
        Sides::ZERO
    }
}

/// Margins as percentages of the viewport width (left/right) and height (bottom/top).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarginPercents {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl MarginPercents {
    #[must_use]
    pub const fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    #[must_use]
    pub fn to_pixels(self, width: i32, height: i32) -> Sides {
        let px = |percent: f32, extent: i32| {
            (f64::from(extent) * f64::from(percent) / 100.0).round() as i32
        };
        Sides::new(
            px(self.left, width),
            px(self.right, width),
            px(self.bottom, height),
            px(self.top, height),
        )
    }
}

/// Percentage margins per tab, with an optional value applied to every tab.
#[derive(Debug, Clone, Default)]
pub struct GapsAndMargins {
    tab_margins: FxHashMap<TabIndex, MarginPercents>,
    all_tabs: Option<MarginPercents>,
}

impl GapsAndMargins {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tab_margins(&mut self, tab_index: TabIndex, margins: MarginPercents) {
        self.tab_margins.insert(tab_index, margins);
    }

    /// Use `margins` for every tab, overriding per-tab values; `None` restores them.
    pub fn set_all_tabs_margins(&mut self, margins: Option<MarginPercents>) {
        self.all_tabs = margins;
    }

    #[must_use]
    pub fn tab_margins(&self, tab_index: TabIndex) -> MarginPercents {
        self.all_tabs
            .or_else(|| self.tab_margins.get(&tab_index).copied())
            .unwrap_or_default()
    }
}

impl MarginProvider for GapsAndMargins {
    fn margins(&self, tab_index: TabIndex, viewport_width: i32, viewport_height: i32) -> Sides {
        self.tab_margins(tab_index).to_pixels(viewport_width, viewport_height)
    }
}

/// Shrink `tab_viewport` by the tab's margins.
pub fn reduce_margins<M: MarginProvider + ?Sized>(
    tab_viewport: Rect,
    tab_index: TabIndex,
    provider: &M,
) -> Rect {
    let margins = provider.margins(tab_index, tab_viewport.width, tab_viewport.height);
    if margins.is_zero() {
        return tab_viewport;
    }
    if margins.has_negative()
        || margins.horizontal_sum() >= tab_viewport.width
        || margins.vertical_sum() >= tab_viewport.height
    {
        tracing::warn!(
            target: "tileview.layout",
            tab_index = %tab_index,
            viewport_width = tab_viewport.width,
            viewport_height = tab_viewport.height,
            left = margins.left,
            right = margins.right,
            bottom = margins.bottom,
            top = margins.top,
            "tab margins do not fit the viewport, ignoring them"
        );
        return tab_viewport;
    }
    tab_viewport.inner(margins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margins_shrink_each_side() {
        let provider = |_: TabIndex, _: i32, _: i32| Sides::new(10, 20, 5, 15);
        let model = reduce_margins(Rect::new(100, 200, 300, 400), TabIndex(0), &provider);
        assert_eq!(model, Rect::new(110, 205, 270, 380));
    }

    #[test]
    fn oversize_margins_are_rejected_whole() {
        let provider = |_: TabIndex, _: i32, _: i32| Sides::new(60, 60, 0, 0);
        let tab = Rect::new(0, 0, 100, 100);
        assert_eq!(reduce_margins(tab, TabIndex(0), &provider), tab);
    }

    #[test]
    fn margins_exactly_filling_an_axis_are_rejected() {
        let provider = |_: TabIndex, _: i32, _: i32| Sides::new(0, 0, 50, 50);
        let tab = Rect::new(0, 0, 100, 100);
        assert_eq!(reduce_margins(tab, TabIndex(0), &provider), tab);
    }

    #[test]
    fn negative_margins_are_rejected() {
        let provider = |_: TabIndex, _: i32, _: i32| Sides::new(-5, 0, 0, 0);
        let tab = Rect::new(0, 0, 100, 100);
        assert_eq!(reduce_margins(tab, TabIndex(0), &provider), tab);
    }

    #[test]
    fn percentage_margins_scale_with_viewport() {
        let mut margins = GapsAndMargins::new();
        margins.set_tab_margins(TabIndex(3), MarginPercents::new(10.0, 5.0, 2.5, 0.0));
        assert_eq!(margins.margins(TabIndex(3), 200, 400), Sides::new(20, 10, 10, 0));
        assert_eq!(margins.margins(TabIndex(4), 200, 400), Sides::ZERO);
    }

    #[test]
    fn all_tabs_margins_override_per_tab() {
        let mut margins = GapsAndMargins::new();
        margins.set_tab_margins(TabIndex(1), MarginPercents::new(10.0, 0.0, 0.0, 0.0));
        margins.set_all_tabs_margins(Some(MarginPercents::new(1.0, 1.0, 1.0, 1.0)));
        assert_eq!(margins.margins(TabIndex(1), 100, 100), Sides::all(1));
        assert_eq!(margins.margins(TabIndex(9), 100, 100), Sides::all(1));

        margins.set_all_tabs_margins(None);
        assert_eq!(margins.margins(TabIndex(1), 100, 100), Sides::new(10, 0, 0, 0));
    }

    #[test]
    fn no_margins_keeps_viewport() {
        let tab = Rect::new(1, 2, 3, 4);
        assert_eq!(reduce_margins(tab, TabIndex(0), &NoMargins), tab);
    }
}
