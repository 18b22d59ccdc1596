//! Assigning tabs to grid cells.
//!
//! Cells are walked row-major, top row first. A cell on a spacer row or
//! column holds that position's spacer tab; every other cell takes the next
//! tab in list order. Cells left over once the tabs run out stay in the
//! layout as empty slots, so the region still receives input. Tabs left over
//! once the cells run out are dropped from the pass.

use tileview_core::geometry::Rect;

use crate::aspect::center_offset;
use crate::error::Result;
use crate::grid::{GridSizes, GridSpec};
use crate::tab::{SpacerKey, SpacerLookup, SpacerTabHandle, WindowIndex};

/// What a grid cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotContent {
    /// Position of the tab in the input slice.
    Tab(usize),
    Spacer(SpacerTabHandle),
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSlot {
    pub row: usize,
    pub column: usize,
    pub cell: Rect,
    pub content: SlotContent,
}

/// Outcome of walking a grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotAssignment {
    pub slots: Vec<GridSlot>,
    /// Tabs with no cell left this pass.
    pub dropped_tabs: usize,
}

/// Walk the grid and assign `tab_count` tabs to its cells.
///
/// Spacer cells whose spacer tab cannot be found are logged and left out.
pub fn assign_tab_slots<S: SpacerLookup + ?Sized>(
    window_index: WindowIndex,
    window: Rect,
    spec: &GridSpec,
    sizes: &GridSizes,
    tab_count: usize,
    spacers: &S,
) -> Result<SlotAssignment> {
    let mut assignment = SlotAssignment::default();
    let mut next_tab = 0usize;

    for row in 0..sizes.rows() {
        for column in 0..sizes.columns() {
            let cell = sizes.cell_rect(window, row, column)?;
            let content = if spec.is_spacer_cell(row, column) {
                let key = SpacerKey::new(window_index, row, column);
                match spacers.spacer_tab(key) {
                    Some(handle) => SlotContent::Spacer(handle),
                    None => {
                        tracing::warn!(
                            target: "tileview.layout",
                            window_index,
                            row,
                            column,
                            "spacer tab not found, skipping cell"
                        );
                        continue;
                    }
                }
            } else if next_tab < tab_count {
                next_tab += 1;
                SlotContent::Tab(next_tab - 1)
            } else {
                SlotContent::Empty
            };
            assignment.slots.push(GridSlot {
                row,
                column,
                cell,
                content,
            });
        }
    }

    assignment.dropped_tabs = tab_count - next_tab;
    if assignment.dropped_tabs > 0 {
        tracing::debug!(
            target: "tileview.layout",
            window_index,
            dropped = assignment.dropped_tabs,
            "more tabs than grid cells, extra tabs not shown"
        );
    }
    Ok(assignment)
}

/// A grid slot with its tab viewport decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedSlot {
    pub slot: GridSlot,
    /// Tab viewport after aspect locking; the whole cell for spacer and
    /// empty slots.
    pub viewport: Rect,
}

/// Tightest row heights and column widths of the placed content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedExtents {
    pub row_heights: Vec<i32>,
    pub column_widths: Vec<i32>,
}

/// Legacy vertical centering of aspect-locked content.
///
/// Rows are shrunk to the tallest viewport they hold and the block of rows is
/// centered vertically in the window. Columns are measured but left in place:
/// saved layouts depend on this Y-only behavior.
pub fn apply_centering_correction(
    window: Rect,
    sizes: &GridSizes,
    placed: &mut [PlacedSlot],
) -> UsedExtents {
    let mut used = UsedExtents {
        row_heights: vec![0; sizes.rows()],
        column_widths: vec![0; sizes.columns()],
    };
    for p in placed.iter() {
        let row = &mut used.row_heights[p.slot.row];
        *row = (*row).max(p.viewport.height);
        let column = &mut used.column_widths[p.slot.column];
        *column = (*column).max(p.viewport.width);
    }

    let used_height: i32 = used.row_heights.iter().sum();
    if used_height >= window.height {
        return used;
    }
    let y_offset = (window.height - used_height) / 2;

    let mut row_tops = Vec::with_capacity(used.row_heights.len());
    let mut top = window.top() - y_offset;
    for height in &used.row_heights {
        row_tops.push(top);
        top -= height;
    }

    for p in placed.iter_mut() {
        let row_height = used.row_heights[p.slot.row];
        let row_bottom = row_tops[p.slot.row] - row_height;
        p.slot.cell.y = row_bottom;
        p.slot.cell.height = row_height;
        p.viewport.y = row_bottom + center_offset(row_height - p.viewport.height);
    }
    used
}
