//! The layout pass: window state and tabs in, viewport records out.
//!
//! [`ViewportLayoutEngine::layout`] runs one complete pass. It picks the
//! single, grid or manual path from the window's [`TileLayoutPolicy`], asks
//! the collaborators (tabs, spacer lookup, margin provider) what it needs,
//! and returns a [`LayoutPass`] owning the new [`ViewportContent`] list.
//! Nothing from a previous pass is reused.
//!
//! [`WindowViewports`] keeps the current pass of one window and falls back
//! to it when a relayout fails.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tileview_core::geometry::Rect;

use crate::aspect::fit_tab_viewport;
use crate::config::LayoutConfig;
use crate::debug::{LayoutDebugger, LayoutRecord};
use crate::error::{LayoutError, Result};
use crate::grid::{GridMode, GridSpec, solve_grid_sizes};
use crate::manual::solve_manual_layout;
use crate::margin::{MarginProvider, reduce_margins};
use crate::pick::FramePickTable;
use crate::slice::{SliceLayoutStyle, SlicePlane, SlicePlaneHit};
use crate::slots::{PlacedSlot, SlotContent, apply_centering_correction, assign_tab_slots};
use crate::tab::{BrowserTab, SpacerLookup, TabIndex, WindowIndex};
use crate::viewport::{ViewportContent, ViewportParts, ViewportTab};

/// How a window arranges its tabs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileLayoutPolicy {
    /// One tab fills the window.
    #[default]
    Single,
    Grid(GridMode),
    /// Each tab sits in its own percentage box.
    Manual,
}

/// Path a layout pass took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    Single,
    Grid,
    Manual,
}

/// Per-window input of a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowLayoutState {
    pub window_index: WindowIndex,
    pub window_before_aspect_lock: Rect,
    /// Drawable window area after the window's own aspect lock.
    pub window_viewport: Rect,
    pub policy: TileLayoutPolicy,
    /// Lock every tab to the shape of the area it is first given.
    pub lock_all_tabs: bool,
    pub highlighted_tab: Option<TabIndex>,
    /// Tab shown by the single-tab policy.
    pub selected_tab: Option<TabIndex>,
}

impl WindowLayoutState {
    #[must_use]
    pub fn new(window_index: WindowIndex, window_viewport: Rect) -> Self {
        Self {
            window_index,
            window_before_aspect_lock: window_viewport,
            window_viewport,
            policy: TileLayoutPolicy::default(),
            lock_all_tabs: false,
            highlighted_tab: None,
            selected_tab: None,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: TileLayoutPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_window_before_aspect_lock(mut self, window: Rect) -> Self {
        self.window_before_aspect_lock = window;
        self
    }

    #[must_use]
    pub fn with_lock_all_tabs(mut self, lock_all_tabs: bool) -> Self {
        self.lock_all_tabs = lock_all_tabs;
        self
    }

    #[must_use]
    pub fn with_highlighted_tab(mut self, tab_index: Option<TabIndex>) -> Self {
        self.highlighted_tab = tab_index;
        self
    }

    #[must_use]
    pub fn with_selected_tab(mut self, tab_index: Option<TabIndex>) -> Self {
        self.selected_tab = tab_index;
        self
    }
}

/// Output of one layout pass.
#[derive(Debug, Clone)]
pub struct LayoutPass {
    window_index: WindowIndex,
    mode: LayoutMode,
    /// Front-to-back.
    viewports: Vec<ViewportContent>,
    picks: FramePickTable,
}

impl LayoutPass {
    fn new(window_index: WindowIndex, mode: LayoutMode, viewports: Vec<ViewportContent>) -> Self {
        let picks = FramePickTable::build(&viewports);
        Self {
            window_index,
            mode,
            viewports,
            picks,
        }
    }

    #[must_use]
    pub fn window_index(&self) -> WindowIndex {
        self.window_index
    }

    #[must_use]
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Viewports front-to-back; the order hit-testing uses.
    #[must_use]
    pub fn viewports(&self) -> &[ViewportContent] {
        &self.viewports
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.viewports.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.viewports.is_empty()
    }

    /// Viewports back-to-front, so overlapping manual tabs paint correctly.
    pub fn render_order(&self) -> impl DoubleEndedIterator<Item = &ViewportContent> + '_ {
        self.viewports.iter().rev()
    }

    /// Frontmost viewport whose tab viewport contains the pixel.
    #[must_use]
    pub fn viewport_at(&self, x: i32, y: i32) -> Option<&ViewportContent> {
        self.viewports.iter().find(|viewport| viewport.contains(x, y))
    }

    /// Slice panel under the pixel, for tabs in all-planes view.
    #[must_use]
    pub fn slice_plane_at(&self, x: i32, y: i32) -> Option<SlicePlaneHit> {
        self.viewport_at(x, y)?.slice_plane_at(x, y)
    }

    #[must_use]
    pub fn pick_table(&self) -> &FramePickTable {
        &self.picks
    }

    /// Resolve an identification id read back from the frame.
    #[must_use]
    pub fn pick(&self, id: u32) -> Option<(&ViewportContent, Option<SlicePlane>)> {
        let target = self.picks.resolve(id)?;
        Some((self.viewports.get(target.viewport)?, target.plane))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewportLayoutEngine {
    config: LayoutConfig,
    debugger: Option<Arc<LayoutDebugger>>,
}

impl ViewportLayoutEngine {
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            debugger: None,
        })
    }

    #[must_use]
    pub fn with_debugger(mut self, debugger: Arc<LayoutDebugger>) -> Self {
        self.debugger = Some(debugger);
        self
    }

    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Run one layout pass for `window`.
    ///
    /// Fails only on contract violations: a negative window size or an
    /// invalid custom grid. Missing spacers, oversize margins and collapsed
    /// manual boxes are logged and skipped.
    pub fn layout<T, S, M>(
        &self,
        window: &WindowLayoutState,
        tabs: &mut [T],
        spacers: &S,
        margins: &M,
    ) -> Result<LayoutPass>
    where
        T: BrowserTab,
        S: SpacerLookup + ?Sized,
        M: MarginProvider + ?Sized,
    {
        let area = window.window_viewport;
        if area.width < 0 || area.height < 0 {
            return Err(LayoutError::InvalidWindow {
                width: area.width,
                height: area.height,
            });
        }

        let (mode, mut record, viewports) = match &window.policy {
            TileLayoutPolicy::Grid(GridMode::Automatic) if tabs.len() == 1 => {
                self.layout_single(window, tabs, margins)
            }
            TileLayoutPolicy::Single => self.layout_single(window, tabs, margins),
            TileLayoutPolicy::Grid(grid) => {
                let spec = grid.grid_spec(tabs.len());
                self.layout_grid(window, &spec, tabs, spacers, margins)?
            }
            TileLayoutPolicy::Manual => self.layout_manual(window, tabs, margins),
        };

        record.tab_viewports = viewports.iter().map(ViewportContent::tab_viewport).collect();
        tracing::trace!(
            target: "tileview.layout",
            window_index = window.window_index,
            mode = ?mode,
            width = area.width,
            height = area.height,
            viewports = viewports.len(),
            dropped = record.dropped_tabs,
            rejected = record.rejected_tabs,
            "layout pass complete"
        );
        if let Some(debugger) = &self.debugger {
            debugger.record(record);
        }
        Ok(LayoutPass::new(window.window_index, mode, viewports))
    }

    fn content(&self, window: &WindowLayoutState, parts: PartsBuilder) -> ViewportContent {
        let highlighted = matches!(
            (parts.content, window.highlighted_tab),
            (ViewportTab::Tab(index), Some(highlighted)) if index == highlighted
        );
        ViewportContent::new(ViewportParts {
            window_index: window.window_index,
            window_before_aspect_lock: window.window_before_aspect_lock,
            window_viewport: window.window_viewport,
            tab_before_aspect_lock: parts.tab_before_aspect_lock,
            tab_viewport: parts.tab_viewport,
            model_viewport: parts.model_viewport,
            content: parts.content,
            grid_cell: parts.grid_cell,
            slice_layout: parts.slice_layout,
            slice_gap: self.config.slice_panel_gap,
            highlighted,
        })
    }

    fn tab_content<T, M>(
        &self,
        window: &WindowLayoutState,
        tab: &T,
        bounds: Rect,
        tab_viewport: Rect,
        grid_cell: Option<(usize, usize)>,
        margins: &M,
    ) -> ViewportContent
    where
        T: BrowserTab,
        M: MarginProvider + ?Sized,
    {
        let tab_index = tab.tab_index();
        self.content(
            window,
            PartsBuilder {
                tab_before_aspect_lock: bounds,
                tab_viewport,
                model_viewport: reduce_margins(tab_viewport, tab_index, margins),
                content: ViewportTab::Tab(tab_index),
                grid_cell,
                slice_layout: tab.slice_layout(),
            },
        )
    }

    fn layout_single<T, M>(
        &self,
        window: &WindowLayoutState,
        tabs: &[T],
        margins: &M,
    ) -> (LayoutMode, LayoutRecord, Vec<ViewportContent>)
    where
        T: BrowserTab,
        M: MarginProvider + ?Sized,
    {
        let area = window.window_viewport;
        let record = LayoutRecord::new(window.window_index, LayoutMode::Single, area);
        let selected = window
            .selected_tab
            .and_then(|index| tabs.iter().find(|tab| tab.tab_index() == index))
            .or_else(|| tabs.first());

        let viewport = match selected {
            Some(tab) => self.tab_content(window, tab, area, area, None, margins),
            // No tab: an empty viewport still takes annotation input.
            None => self.content(window, PartsBuilder::blank(area, ViewportTab::Empty, None)),
        };
        (LayoutMode::Single, record, vec![viewport])
    }

    fn layout_grid<T, S, M>(
        &self,
        window: &WindowLayoutState,
        spec: &GridSpec,
        tabs: &mut [T],
        spacers: &S,
        margins: &M,
    ) -> Result<(LayoutMode, LayoutRecord, Vec<ViewportContent>)>
    where
        T: BrowserTab,
        S: SpacerLookup + ?Sized,
        M: MarginProvider + ?Sized,
    {
        let area = window.window_viewport;
        let sizes = solve_grid_sizes(area, spec)?;
        let assignment = assign_tab_slots(
            window.window_index,
            area,
            spec,
            &sizes,
            tabs.len(),
            spacers,
        )?;

        let mut placed: Vec<PlacedSlot> = assignment
            .slots
            .iter()
            .map(|slot| {
                let viewport = match slot.content {
                    SlotContent::Tab(position) => {
                        fit_tab_viewport(&mut tabs[position], slot.cell, window.lock_all_tabs)
                    }
                    SlotContent::Spacer(_) | SlotContent::Empty => slot.cell,
                };
                PlacedSlot {
                    slot: *slot,
                    viewport,
                }
            })
            .collect();

        let mut record = LayoutRecord::new(window.window_index, LayoutMode::Grid, area);
        record.dropped_tabs = assignment.dropped_tabs;
        if self.config.centering_correction {
            let used = apply_centering_correction(area, &sizes, &mut placed);
            record.used_row_heights = Some(used.row_heights);
            record.used_column_widths = Some(used.column_widths);
        }
        record.row_heights = sizes.row_heights;
        record.column_widths = sizes.column_widths;

        let viewports = placed
            .iter()
            .map(|p| {
                let grid_cell = Some((p.slot.row, p.slot.column));
                match p.slot.content {
                    SlotContent::Tab(position) => self.tab_content(
                        window,
                        &tabs[position],
                        p.slot.cell,
                        p.viewport,
                        grid_cell,
                        margins,
                    ),
                    SlotContent::Spacer(handle) => self.content(
                        window,
                        PartsBuilder::blank(p.viewport, ViewportTab::Spacer(handle), grid_cell),
                    ),
                    SlotContent::Empty => self.content(
                        window,
                        PartsBuilder::blank(p.viewport, ViewportTab::Empty, grid_cell),
                    ),
                }
            })
            .collect();
        Ok((LayoutMode::Grid, record, viewports))
    }

    fn layout_manual<T, M>(
        &self,
        window: &WindowLayoutState,
        tabs: &mut [T],
        margins: &M,
    ) -> (LayoutMode, LayoutRecord, Vec<ViewportContent>)
    where
        T: BrowserTab,
        M: MarginProvider + ?Sized,
    {
        let area = window.window_viewport;
        let layout = solve_manual_layout(area, tabs, window.lock_all_tabs);
        let mut record = LayoutRecord::new(window.window_index, LayoutMode::Manual, area);
        record.rejected_tabs = layout.rejected;

        let viewports = layout
            .placements
            .iter()
            .map(|p| {
                self.tab_content(window, &tabs[p.position], p.bounds, p.viewport, None, margins)
            })
            .collect();
        (LayoutMode::Manual, record, viewports)
    }
}

/// Geometry and content of one viewport, before window-level fields are
/// filled in.
struct PartsBuilder {
    tab_before_aspect_lock: Rect,
    tab_viewport: Rect,
    model_viewport: Rect,
    content: ViewportTab,
    grid_cell: Option<(usize, usize)>,
    slice_layout: Option<SliceLayoutStyle>,
}

impl PartsBuilder {
    /// Spacer or empty slot: no margins, no slices.
    fn blank(area: Rect, content: ViewportTab, grid_cell: Option<(usize, usize)>) -> Self {
        Self {
            tab_before_aspect_lock: area,
            tab_viewport: area,
            model_viewport: area,
            content,
            grid_cell,
            slice_layout: None,
        }
    }
}

/// Current viewports of one window.
#[derive(Debug, Clone, Default)]
pub struct WindowViewports {
    engine: ViewportLayoutEngine,
    current: Option<LayoutPass>,
}

impl WindowViewports {
    #[must_use]
    pub fn new(engine: ViewportLayoutEngine) -> Self {
        Self {
            engine,
            current: None,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&LayoutPass> {
        self.current.as_ref()
    }

    /// Replace the current pass with a fresh one.
    ///
    /// A failed pass is logged and the previous viewports stay in place, so
    /// the window keeps drawing last frame's layout.
    pub fn relayout<T, S, M>(
        &mut self,
        window: &WindowLayoutState,
        tabs: &mut [T],
        spacers: &S,
        margins: &M,
    ) -> Option<&LayoutPass>
    where
        T: BrowserTab,
        S: SpacerLookup + ?Sized,
        M: MarginProvider + ?Sized,
    {
        match self.engine.layout(window, tabs, spacers, margins) {
            Ok(pass) => self.current = Some(pass),
            Err(err) => {
                tracing::error!(
                    target: "tileview.layout",
                    window_index = window.window_index,
                    error = %err,
                    "relayout failed, keeping previous viewports"
                );
            }
        }
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
