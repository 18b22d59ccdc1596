//! Grid sizing: rows and columns of a tiled window.
//!
//! Row order is top-to-bottom. Heights come out top-to-bottom too, but cell
//! rectangles are assembled bottom-up to match the Y-up viewport convention.
//!
//! # Invariants
//!
//! 1. `sum(row_heights) == window.height` and `sum(column_widths) == window.width`,
//!    exactly, for any valid spec and non-negative window.
//! 2. Every size is non-negative; the rounding remainder lands on the last
//!    row/column.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tileview_core::geometry::Rect;

use crate::error::{GridAxis, LayoutError, Result};

/// What a grid row or column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridCellKind {
    #[default]
    Tab,
    /// Blank region; any cell on a spacer row or column is a spacer cell.
    Space,
}

/// How much of the window extent a row or column takes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stretch {
    /// Share of the space left over after all percentages.
    Weight(f32),
    /// Fixed percentage of the window extent. When no weight shares the
    /// axis, percentages are scaled to fill it.
    Percent(f32),
}

impl Stretch {
    fn value(self) -> f32 {
        match self {
            Self::Weight(v) | Self::Percent(v) => v,
        }
    }
}

impl Default for Stretch {
    fn default() -> Self {
        Self::Weight(1.0)
    }
}

/// One row or column descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridElement {
    pub kind: GridCellKind,
    #[serde(default)]
    pub stretch: Stretch,
}

impl GridElement {
    #[must_use]
    pub const fn tab() -> Self {
        Self {
            kind: GridCellKind::Tab,
            stretch: Stretch::Weight(1.0),
        }
    }

    #[must_use]
    pub const fn space() -> Self {
        Self {
            kind: GridCellKind::Space,
            stretch: Stretch::Weight(1.0),
        }
    }

    #[must_use]
    pub const fn with_stretch(mut self, stretch: Stretch) -> Self {
        self.stretch = stretch;
        self
    }
}

/// Rows and columns of a tile grid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: Vec<GridElement>,
    pub columns: Vec<GridElement>,
}

impl GridSpec {
    #[must_use]
    pub fn new(rows: Vec<GridElement>, columns: Vec<GridElement>) -> Self {
        Self { rows, columns }
    }

    /// Equal-weight tab rows and columns.
    #[must_use]
    pub fn uniform(rows: usize, columns: usize) -> Self {
        Self {
            rows: vec![GridElement::tab(); rows],
            columns: vec![GridElement::tab(); columns],
        }
    }

    /// Near-square grid for `tab_count` tabs.
    #[must_use]
    pub fn automatic(tab_count: usize) -> Self {
        let (rows, columns) = automatic_rows_columns(tab_count);
        Self::uniform(rows, columns)
    }

    /// Number of cells that can hold a tab (neither row nor column is a spacer).
    #[must_use]
    pub fn tab_slot_count(&self) -> usize {
        let tab_rows = self
            .rows
            .iter()
            .filter(|e| e.kind == GridCellKind::Tab)
            .count();
        let tab_columns = self
            .columns
            .iter()
            .filter(|e| e.kind == GridCellKind::Tab)
            .count();
        tab_rows * tab_columns
    }

    #[must_use]
    pub fn is_spacer_cell(&self, row: usize, column: usize) -> bool {
        self.rows.get(row).map(|e| e.kind) == Some(GridCellKind::Space)
            || self.columns.get(column).map(|e| e.kind) == Some(GridCellKind::Space)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows.is_empty() || self.columns.is_empty() {
            return Err(LayoutError::EmptyGrid {
                rows: self.rows.len(),
                columns: self.columns.len(),
            });
        }
        validate_stretch(GridAxis::Row, &self.rows)?;
        validate_stretch(GridAxis::Column, &self.columns)
    }
}

fn validate_stretch(axis: GridAxis, elements: &[GridElement]) -> Result<()> {
    for (index, element) in elements.iter().enumerate() {
        let value = element.stretch.value();
        if !value.is_finite() || value < 0.0 {
            return Err(LayoutError::InvalidStretch { axis, index, value });
        }
    }
    Ok(())
}

/// Grid selection policy for a tiled window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridMode {
    /// Row/column count chosen from the tab count.
    Automatic,
    /// User-specified rows and columns with stretch factors.
    Custom(GridSpec),
}

impl GridMode {
    /// Grid to use for `tab_count` tabs.
    #[must_use]
    pub fn grid_spec(&self, tab_count: usize) -> Cow<'_, GridSpec> {
        match self {
            Self::Automatic => Cow::Owned(GridSpec::automatic(tab_count)),
            Self::Custom(spec) => Cow::Borrowed(spec),
        }
    }
}

/// Rows and columns for the automatic grid, as `(rows, columns)`.
#[must_use]
pub fn automatic_rows_columns(tab_count: usize) -> (usize, usize) {
    match tab_count {
        0 | 1 => (1, 1),
        2 => (1, 2),
        3 => (1, 3),
        4 => (2, 2),
        5..=6 => (2, 3),
        7..=8 => (2, 4),
        9 => (3, 3),
        10..=12 => (3, 4),
        13..=16 => (4, 4),
        17..=20 => (4, 5),
        21..=25 => (5, 5),
        26..=30 => (5, 6),
        31..=36 => (6, 6),
        n => {
            let mut columns = (n as f64).sqrt().ceil() as usize;
            while columns * columns < n {
                columns += 1;
            }
            (n.div_ceil(columns), columns)
        }
    }
}

/// Solved row heights (top-to-bottom) and column widths (left-to-right).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridSizes {
    pub row_heights: Vec<i32>,
    pub column_widths: Vec<i32>,
}

impl GridSizes {
    #[must_use]
    pub fn rows(&self) -> usize {
        self.row_heights.len()
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.column_widths.len()
    }

    /// Pixel rectangle of one cell inside `window`. Row 0 is the top row.
    pub fn cell_rect(&self, window: Rect, row: usize, column: usize) -> Result<Rect> {
        if row >= self.rows() || column >= self.columns() {
            return Err(LayoutError::CellOutOfRange {
                row,
                column,
                rows: self.rows(),
                columns: self.columns(),
            });
        }
        let x = window.x + self.column_widths[..column].iter().sum::<i32>();
        let height = self.row_heights[row];
        let top = window.top() - self.row_heights[..row].iter().sum::<i32>();
        Ok(Rect::new(x, top - height, self.column_widths[column], height))
    }
}

/// Solve row heights and column widths of `spec` inside `window`.
pub fn solve_grid_sizes(window: Rect, spec: &GridSpec) -> Result<GridSizes> {
    spec.validate()?;
    if window.width < 0 || window.height < 0 {
        return Err(LayoutError::InvalidWindow {
            width: window.width,
            height: window.height,
        });
    }
    Ok(GridSizes {
        row_heights: distribute(window.height, &spec.rows),
        column_widths: distribute(window.width, &spec.columns),
    })
}

/// Split `total` pixels between `elements`. Percentages are served first,
/// weights share what is left, and the last element absorbs the remainder.
fn distribute(total: i32, elements: &[GridElement]) -> Vec<i32> {
    if elements.is_empty() {
        return Vec::new();
    }
    let total = total.max(0);
    let extent = f64::from(total);

    let mut percent_sum = 0.0f64;
    let mut weight_sum = 0.0f64;
    for element in elements {
        match element.stretch {
            Stretch::Percent(p) => percent_sum += f64::from(p),
            Stretch::Weight(w) => weight_sum += f64::from(w),
        }
    }
    // Percentages alone must cover the extent: scale them up when nothing
    // else takes the rest, down when they overshoot.
    let percent_base = if percent_sum > 100.0 || (weight_sum == 0.0 && percent_sum > 0.0) {
        percent_sum
    } else {
        100.0
    };
    let weighted_space = extent * (1.0 - percent_sum / percent_base);

    let mut sizes: Vec<i32> = elements
        .iter()
        .map(|element| {
            let size = match element.stretch {
                Stretch::Percent(p) => extent * f64::from(p) / percent_base,
                Stretch::Weight(w) if weight_sum > 0.0 => {
                    weighted_space * f64::from(w) / weight_sum
                }
                Stretch::Weight(_) => 0.0,
            };
            (size.floor() as i32).clamp(0, total)
        })
        .collect();

    let assigned: i64 = sizes.iter().map(|&s| i64::from(s)).sum();
    let mut remainder = i64::from(total) - assigned;
    if remainder >= 0 {
        if let Some(last) = sizes.last_mut() {
            *last += remainder as i32;
        }
        return sizes;
    }
    // Float error pushed a floor past an integer boundary: take it back
    // from the end.
    for size in sizes.iter_mut().rev() {
        let take = remainder.unsigned_abs().min(*size as u64) as i32;
        *size -= take;
        remainder += i64::from(take);
        if remainder == 0 {
            break;
        }
    }
    sizes
}
