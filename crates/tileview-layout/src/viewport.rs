//! Viewport content records: the output unit of a layout pass.
//!
//! A [`ViewportContent`] is built once per visible slot or tab and never
//! edited afterwards. The only state it gains later are lazily computed
//! caches (chart data, one pixel-to-model transform per slice plane); each is
//! filled at most once and dies with the record when the next pass replaces
//! the whole list.

use std::cell::OnceCell;

use tileview_core::geometry::Rect;

use crate::error::{LayoutError, Result};
use crate::slice::{SliceLayoutStyle, SlicePlane, SlicePlaneHit, SliceQuadrantLayout};
use crate::tab::{SpacerTabHandle, TabIndex, WindowIndex};
use crate::transform::{OrthoBounds, PixelToModelTransform};

/// What occupies a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportTab {
    Tab(TabIndex),
    Spacer(SpacerTabHandle),
    /// Grid cell left over after all tabs were placed.
    Empty,
}

/// Chart-data sub-viewport and its transform, filled by the chart renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDataViewport {
    pub viewport: Rect,
    pub transform: PixelToModelTransform,
}

#[derive(Debug, Clone)]
pub struct ViewportContent {
    window_index: WindowIndex,
    window_before_aspect_lock: Rect,
    window_viewport: Rect,
    tab_before_aspect_lock: Rect,
    tab_viewport: Rect,
    model_viewport: Rect,
    content: ViewportTab,
    grid_cell: Option<(usize, usize)>,
    slice_layout: Option<SliceLayoutStyle>,
    slice_gap: i32,
    highlighted: bool,
    chart_data: OnceCell<ChartDataViewport>,
    plane_transforms: [OnceCell<PixelToModelTransform>; 3],
}

/// Construction parameters, filled by the engine.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ViewportParts {
    pub window_index: WindowIndex,
    pub window_before_aspect_lock: Rect,
    pub window_viewport: Rect,
    pub tab_before_aspect_lock: Rect,
    pub tab_viewport: Rect,
    pub model_viewport: Rect,
    pub content: ViewportTab,
    pub grid_cell: Option<(usize, usize)>,
    pub slice_layout: Option<SliceLayoutStyle>,
    pub slice_gap: i32,
    pub highlighted: bool,
}

impl ViewportContent {
    pub(crate) fn new(parts: ViewportParts) -> Self {
        Self {
            window_index: parts.window_index,
            window_before_aspect_lock: parts.window_before_aspect_lock,
            window_viewport: parts.window_viewport,
            tab_before_aspect_lock: parts.tab_before_aspect_lock,
            tab_viewport: parts.tab_viewport,
            model_viewport: parts.model_viewport,
            content: parts.content,
            grid_cell: parts.grid_cell,
            slice_layout: parts.slice_layout,
            slice_gap: parts.slice_gap,
            highlighted: parts.highlighted,
            chart_data: OnceCell::new(),
            plane_transforms: [OnceCell::new(), OnceCell::new(), OnceCell::new()],
        }
    }

    #[must_use]
    pub fn window_index(&self) -> WindowIndex {
        self.window_index
    }

    #[must_use]
    pub fn window_before_aspect_lock(&self) -> Rect {
        self.window_before_aspect_lock
    }

    #[must_use]
    pub fn window_viewport(&self) -> Rect {
        self.window_viewport
    }

    /// Cell or manual box the tab was given, before aspect locking.
    #[must_use]
    pub fn tab_before_aspect_lock(&self) -> Rect {
        self.tab_before_aspect_lock
    }

    #[must_use]
    pub fn tab_viewport(&self) -> Rect {
        self.tab_viewport
    }

    /// Tab viewport minus margins; where content is drawn.
    #[must_use]
    pub fn model_viewport(&self) -> Rect {
        self.model_viewport
    }

    #[must_use]
    pub fn content(&self) -> ViewportTab {
        self.content
    }

    #[must_use]
    pub fn browser_tab_index(&self) -> Option<TabIndex> {
        match self.content {
            ViewportTab::Tab(index) => Some(index),
            _ => None,
        }
    }

    #[must_use]
    pub fn spacer_tab(&self) -> Option<SpacerTabHandle> {
        match self.content {
            ViewportTab::Spacer(handle) => Some(handle),
            _ => None,
        }
    }

    /// `(row, column)` in grid layouts.
    #[must_use]
    pub fn grid_cell(&self) -> Option<(usize, usize)> {
        self.grid_cell
    }

    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Hit test against the tab viewport.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.tab_viewport.contains(x, y)
    }

    #[must_use]
    pub fn slice_layout_style(&self) -> Option<SliceLayoutStyle> {
        self.slice_layout
    }

    /// Slice panels over the model viewport, for tabs in all-planes view.
    #[must_use]
    pub fn slice_layout(&self) -> Option<SliceQuadrantLayout> {
        self.slice_layout
            .map(|style| SliceQuadrantLayout::with_gap(self.model_viewport, style, self.slice_gap))
    }

    /// Slice panel under a mouse pixel.
    #[must_use]
    pub fn slice_plane_at(&self, x: i32, y: i32) -> Option<SlicePlaneHit> {
        self.slice_layout()?.plane_at(x, y)
    }

    /// Viewport in which `plane` is drawn: its panel in all-planes view, the
    /// whole model viewport otherwise.
    #[must_use]
    pub fn plane_viewport(&self, plane: SlicePlane) -> Rect {
        match self.slice_layout() {
            Some(layout) => layout.viewport(plane),
            None => self.model_viewport,
        }
    }

    /// Pixel-to-model transform of `plane`, built on first request.
    ///
    /// `bounds` supplies the orthographic extent for the plane's viewport and
    /// only runs on a cache miss.
    pub fn plane_transform<F>(&self, plane: SlicePlane, bounds: F) -> &PixelToModelTransform
    where
        F: FnOnce(SlicePlane, Rect) -> OrthoBounds,
    {
        self.plane_transforms[plane.slot()].get_or_init(|| {
            let viewport = self.plane_viewport(plane);
            PixelToModelTransform::new(viewport, bounds(plane, viewport))
        })
    }

    /// Cached transform of `plane`, if one was built this pass.
    #[must_use]
    pub fn cached_plane_transform(&self, plane: SlicePlane) -> Option<&PixelToModelTransform> {
        self.plane_transforms[plane.slot()].get()
    }

    #[must_use]
    pub fn chart_data(&self) -> Option<&ChartDataViewport> {
        self.chart_data.get()
    }

    /// Store the chart-data viewport. Settable once per pass.
    pub fn set_chart_data(&self, chart_data: ChartDataViewport) -> Result<()> {
        self.chart_data
            .set(chart_data)
            .map_err(|_| LayoutError::ChartDataAlreadySet)
    }
}
