//! Sub-viewports for the volume all-planes view.
//!
//! A tab showing a volume in all-planes view splits its viewport into one
//! panel per orthogonal slice plane, separated by a fixed gap:
//!
//! ```text
//!   Column          Row               Grid
//!  +--------+   +----+----+----+   +--------+--------+
//!  | Para   |   |    |    |    |   | Para   | Coronal|
//!  +--------+   |Para|Cor |Axi |   +--------+--------+
//!  | Coronal|   |    |    |    |   | unused | Axial  |
//!  +--------+   |    |    |    |   +--------+--------+
//!  | Axial  |   +----+----+----+
//!  +--------+
//! ```
//!
//! The same geometry answers the inverse query, so a mouse click resolves to
//! the panel it was drawn in.

use serde::{Deserialize, Serialize};
use tileview_core::geometry::Rect;

/// Gap in pixels between slice panels.
pub const SLICE_PANEL_GAP: i32 = 2;

/// Orthogonal slice planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlicePlane {
    Axial,
    Coronal,
    Parasagittal,
}

impl SlicePlane {
    /// Fixed enumeration order used by hit testing.
    pub const ALL: [SlicePlane; 3] = [Self::Axial, Self::Coronal, Self::Parasagittal];

    pub(crate) const fn slot(self) -> usize {
        match self {
            Self::Axial => 0,
            Self::Coronal => 1,
            Self::Parasagittal => 2,
        }
    }
}

/// Arrangement of the slice panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceLayoutStyle {
    /// Three full-width bands stacked vertically.
    Column,
    /// Three full-height bands side by side.
    Row,
    /// 2x2 quadrants with the bottom-left one unused.
    Grid,
}

/// A resolved panel under a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlicePlaneHit {
    pub plane: SlicePlane,
    pub viewport: Rect,
}

/// Solved slice panels of one viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceQuadrantLayout {
    style: SliceLayoutStyle,
    /// Indexed by [`SlicePlane::slot`].
    planes: [Rect; 3],
}

impl SliceQuadrantLayout {
    /// Lay out `area` with the default panel gap.
    #[must_use]
    pub fn new(area: Rect, style: SliceLayoutStyle) -> Self {
        Self::with_gap(area, style, SLICE_PANEL_GAP)
    }

    #[must_use]
    pub fn with_gap(area: Rect, style: SliceLayoutStyle, gap: i32) -> Self {
        let gap = gap.max(0);
        match style {
            SliceLayoutStyle::Column => {
                let band = (area.height.saturating_sub(gap.saturating_mul(2)) / 3).max(0);
                let at = |i: i32| {
                    let y = area.y.saturating_add(i.saturating_mul(band.saturating_add(gap)));
                    Rect::new(area.x, y, area.width.max(0), band)
                };
                Self {
                    style,
                    planes: [at(0), at(1), at(2)],
                }
            }
            SliceLayoutStyle::Row => {
                let band = (area.width.saturating_sub(gap.saturating_mul(2)) / 3).max(0);
                let at = |i: i32| {
                    let x = area.x.saturating_add(i.saturating_mul(band.saturating_add(gap)));
                    Rect::new(x, area.y, band, area.height.max(0))
                };
                Self {
                    style,
                    planes: [at(2), at(1), at(0)],
                }
            }
            SliceLayoutStyle::Grid => {
                let half_width = (area.width.saturating_sub(gap) / 2).max(0);
                let half_height = (area.height.saturating_sub(gap) / 2).max(0);
                let left = area.x;
                let right = area.x.saturating_add(half_width).saturating_add(gap);
                let bottom = area.y;
                let top = area.y.saturating_add(half_height).saturating_add(gap);
                let quadrant = |x: i32, y: i32| Rect::new(x, y, half_width, half_height);
                Self {
                    style,
                    // Bottom-left stays empty.
                    planes: [
                        quadrant(right, bottom),
                        quadrant(right, top),
                        quadrant(left, top),
                    ],
                }
            }
        }
    }

    #[must_use]
    pub const fn style(&self) -> SliceLayoutStyle {
        self.style
    }

    /// Panel of `plane`.
    #[must_use]
    pub const fn viewport(&self, plane: SlicePlane) -> Rect {
        self.planes[plane.slot()]
    }

    /// Each plane with its panel, in hit-test order.
    pub fn iter(&self) -> impl Iterator<Item = (SlicePlane, Rect)> + '_ {
        SlicePlane::ALL
            .into_iter()
            .map(|plane| (plane, self.viewport(plane)))
    }

    /// Panel under pixel `(x, y)`, or `None` in the unused quadrant, a gap,
    /// or outside the layout.
    #[must_use]
    pub fn plane_at(&self, x: i32, y: i32) -> Option<SlicePlaneHit> {
        self.iter()
            .find(|(_, viewport)| viewport.contains(x, y))
            .map(|(plane, viewport)| SlicePlaneHit { plane, viewport })
    }
}
