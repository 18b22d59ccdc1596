//! Contract violations reported by the layout engine.
//!
//! Only programmer errors live here. Recoverable conditions (a missing
//! spacer tab, margins larger than the viewport, a collapsed manual box
//! while dragging) are logged and skipped inside the pass instead.

use std::fmt;

use thiserror::Error;

use crate::tab::TabIndex;

/// Grid axis named in stretch and range errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    Row,
    Column,
}

impl fmt::Display for GridAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => f.write_str("row"),
            Self::Column => f.write_str("column"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("window viewport has negative size {width}x{height}")]
    InvalidWindow { width: i32, height: i32 },
    #[error("grid needs at least one row and one column (rows={rows}, columns={columns})")]
    EmptyGrid { rows: usize, columns: usize },
    #[error("invalid {axis} stretch at index {index}: {value}")]
    InvalidStretch {
        axis: GridAxis,
        index: usize,
        value: f32,
    },
    #[error("cell ({row}, {column}) is outside a {rows}x{columns} grid")]
    CellOutOfRange {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
    #[error("edit lists differ in length: tabs={tabs}, before={before}, after={after}")]
    LengthMismatch {
        tabs: usize,
        before: usize,
        after: usize,
    },
    #[error("tab {0} is not part of this layout")]
    TabNotFound(TabIndex),
    #[error("chart data viewport was already set for this pass")]
    ChartDataAlreadySet,
    #[error("slice panel gap must be non-negative, got {0}")]
    InvalidSliceGap(i32),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
