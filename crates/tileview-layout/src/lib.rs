#![forbid(unsafe_code)]

//! Viewport composition and tile layout.
//!
//! Turns a window rectangle, a list of tabs and a layout policy into the
//! pixel rectangles each tab, its margins and its slice panels are drawn in.
//! Hit-testing runs on the same records, so what is clicked is what was drawn.
//!
//! Coordinates are integer pixels with the origin at the bottom-left corner
//! and Y growing upward.
//!
//! # Example
//!
//! ```
//! use tileview_layout::{
//!     GridMode, NoMargins, NoSpacers, Rect, TabState, TileLayoutPolicy, ViewportLayoutEngine,
//!     WindowLayoutState,
//! };
//!
//! let window = WindowLayoutState::new(0, Rect::from_size(1000, 800))
//!     .with_policy(TileLayoutPolicy::Grid(GridMode::Automatic));
//! let mut tabs: Vec<TabState> = (0..4).map(TabState::new).collect();
//!
//! let pass = ViewportLayoutEngine::default()
//!     .layout(&window, &mut tabs, &NoSpacers, &NoMargins)
//!     .unwrap();
//! assert_eq!(pass.viewports()[0].tab_viewport(), Rect::new(0, 400, 500, 400));
//! ```

pub mod aspect;
pub mod config;
pub mod debug;
pub mod engine;
pub mod error;
pub mod grid;
pub mod manual;
pub mod manual_edit;
pub mod margin;
pub mod pick;
pub mod slice;
pub mod slots;
pub mod tab;
pub mod transform;
pub mod viewport;

pub use aspect::{
    AspectLock, adjust_for_aspect_ratio, adjust_rect_for_aspect_ratio, fit_tab_viewport,
};
pub use config::LayoutConfig;
pub use debug::{LayoutDebugger, LayoutRecord};
pub use engine::{
    LayoutMode, LayoutPass, TileLayoutPolicy, ViewportLayoutEngine, WindowLayoutState,
    WindowViewports,
};
pub use error::{GridAxis, LayoutError, Result};
pub use grid::{
    GridCellKind, GridElement, GridMode, GridSizes, GridSpec, Stretch, automatic_rows_columns,
    solve_grid_sizes,
};
pub use manual::{ManualLayout, ManualPlacement, ManualTabGeometry, solve_manual_layout};
pub use manual_edit::{ManualLayoutCommand, bring_to_front, send_to_back};
pub use margin::{GapsAndMargins, MarginPercents, MarginProvider, NoMargins, reduce_margins};
pub use pick::{BACKGROUND_PICK_ID, FramePickTable, PickTarget};
pub use slice::{SLICE_PANEL_GAP, SliceLayoutStyle, SlicePlane, SlicePlaneHit, SliceQuadrantLayout};
pub use slots::{GridSlot, PlacedSlot, SlotAssignment, SlotContent, UsedExtents};
pub use tab::{
    BrowserTab, NoSpacers, SpacerKey, SpacerLookup, SpacerRegistry, SpacerTabHandle, TabIndex,
    TabState, WindowIndex,
};
pub use tileview_core::geometry::{Rect, Sides};
pub use transform::{OrthoBounds, PixelToModelTransform};
pub use viewport::{ChartDataViewport, ViewportContent, ViewportTab};
