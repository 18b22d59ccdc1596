#![forbid(unsafe_code)]

//! Layout pass debugging utilities.
//!
//! Provides introspection into layout passes:
//! - Recording of solved grid sizes and produced tab viewports
//! - Detection of sum and containment violations
//! - A plain-text report
//!
//! Recording is a no-op unless explicitly enabled at runtime.
//!
//! # Usage
//!
//! ```ignore
//! use tileview_layout::debug::LayoutDebugger;
//!
//! let debugger = LayoutDebugger::new();
//! debugger.set_enabled(true);
//! let engine = ViewportLayoutEngine::default().with_debugger(debugger.clone());
//!
//! // ... run layout passes ...
//!
//! for record in debugger.violations() {
//!     eprintln!("window {}: {:?}", record.window_index, record.row_heights);
//! }
//! ```

use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tileview_core::geometry::Rect;

use crate::engine::LayoutMode;
use crate::tab::WindowIndex;

/// A record of a single layout pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRecord {
    pub window_index: WindowIndex,
    pub mode: LayoutMode,
    /// Window viewport after aspect locking.
    pub window: Rect,
    /// Grid row heights, top-to-bottom (grid mode only).
    pub row_heights: Vec<i32>,
    /// Grid column widths, left-to-right (grid mode only).
    pub column_widths: Vec<i32>,
    /// Row heights after centering correction, if it ran.
    pub used_row_heights: Option<Vec<i32>>,
    /// Column widths measured by centering correction, if it ran.
    pub used_column_widths: Option<Vec<i32>>,
    /// Tab viewports in output order.
    pub tab_viewports: Vec<Rect>,
    /// Tabs without a grid cell.
    pub dropped_tabs: usize,
    /// Manual tabs skipped for a non-positive size.
    pub rejected_tabs: usize,
}

impl LayoutRecord {
    pub fn new(window_index: WindowIndex, mode: LayoutMode, window: Rect) -> Self {
        Self {
            window_index,
            mode,
            window,
            row_heights: Vec::new(),
            column_widths: Vec::new(),
            used_row_heights: None,
            used_column_widths: None,
            tab_viewports: Vec::new(),
            dropped_tabs: 0,
            rejected_tabs: 0,
        }
    }

    /// Row heights sum to the window height (vacuously true outside grid mode).
    pub fn row_sum_matches(&self) -> bool {
        self.row_heights.is_empty() || self.row_heights.iter().sum::<i32>() == self.window.height
    }

    /// Column widths sum to the window width (vacuously true outside grid mode).
    pub fn column_sum_matches(&self) -> bool {
        self.column_widths.is_empty()
            || self.column_widths.iter().sum::<i32>() == self.window.width
    }

    /// Every tab viewport lies inside the window.
    pub fn viewports_contained(&self) -> bool {
        self.tab_viewports
            .iter()
            .all(|vp| self.window.contains_rect(vp))
    }

    pub fn is_consistent(&self) -> bool {
        self.row_sum_matches() && self.column_sum_matches() && self.viewports_contained()
    }

    pub fn summary(&self) -> String {
        let mut s = String::new();
        let _ = writeln!(
            s,
            "window {} ({:?}): {}x{} at ({}, {})",
            self.window_index,
            self.mode,
            self.window.width,
            self.window.height,
            self.window.x,
            self.window.y
        );
        if !self.row_heights.is_empty() {
            let _ = writeln!(s, "  Rows: {:?}", self.row_heights);
            let _ = writeln!(s, "  Cols: {:?}", self.column_widths);
        }
        if let Some(used) = &self.used_row_heights {
            let _ = writeln!(s, "  Centered rows: {used:?}");
        }
        if let Some(used) = &self.used_column_widths {
            let _ = writeln!(s, "  Measured cols: {used:?}");
        }
        let _ = writeln!(s, "  Viewports: {}", self.tab_viewports.len());
        if self.dropped_tabs > 0 {
            let _ = writeln!(s, "  Dropped tabs: {}", self.dropped_tabs);
        }
        if self.rejected_tabs > 0 {
            let _ = writeln!(s, "  Rejected tabs: {}", self.rejected_tabs);
        }
        if !self.row_sum_matches() {
            let _ = writeln!(s, "  ⚠ ROW SUM MISMATCH");
        }
        if !self.column_sum_matches() {
            let _ = writeln!(s, "  ⚠ COLUMN SUM MISMATCH");
        }
        if !self.viewports_contained() {
            let _ = writeln!(s, "  ⚠ VIEWPORT OUTSIDE WINDOW");
        }
        s
    }
}

/// Layout pass debugger.
///
/// Collects layout records for introspection. Thread-safe via internal
/// synchronization; can be shared across windows.
#[derive(Debug)]
pub struct LayoutDebugger {
    enabled: AtomicBool,
    records: Mutex<Vec<LayoutRecord>>,
}

impl LayoutDebugger {
    /// Create a new debugger wrapped in Arc (disabled by default).
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            enabled: AtomicBool::new(false),
            records: Mutex::new(Vec::new()),
        })
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Toggle debugging on/off, returning the new state.
    pub fn toggle(&self) -> bool {
        !self.enabled.fetch_xor(true, Ordering::Relaxed)
    }

    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }

    pub fn record(&self, record: LayoutRecord) {
        if !self.enabled() {
            return;
        }
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }

    pub fn snapshot(&self) -> Vec<LayoutRecord> {
        self.records
            .lock()
            .ok()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Records breaking the sum or containment invariant.
    pub fn violations(&self) -> Vec<LayoutRecord> {
        self.snapshot()
            .into_iter()
            .filter(|r| !r.is_consistent())
            .collect()
    }

    pub fn report(&self) -> String {
        let records = self.snapshot();
        let violations = records.iter().filter(|r| !r.is_consistent()).count();

        let mut s = String::new();
        let _ = writeln!(
            s,
            "=== Layout Debug Report ({} passes, {} violations) ===",
            records.len(),
            violations
        );
        for record in &records {
            let _ = write!(s, "\n{}", record.summary());
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_record() -> LayoutRecord {
        let mut record = LayoutRecord::new(0, LayoutMode::Grid, Rect::from_size(100, 50));
        record.row_heights = vec![25, 25];
        record.column_widths = vec![50, 50];
        record.tab_viewports = vec![Rect::new(0, 25, 50, 25), Rect::new(50, 25, 50, 25)];
        record
    }

    #[test]
    fn consistent_record() {
        let record = grid_record();
        assert!(record.row_sum_matches());
        assert!(record.column_sum_matches());
        assert!(record.viewports_contained());
    }

    #[test]
    fn sum_mismatch_is_detected() {
        let mut record = grid_record();
        record.row_heights = vec![25, 24];
        assert!(!record.row_sum_matches());
        assert!(record.summary().contains("ROW SUM MISMATCH"));
    }

    #[test]
    fn escaped_viewport_is_detected() {
        let mut record = grid_record();
        record.tab_viewports.push(Rect::new(90, 0, 20, 10));
        assert!(!record.viewports_contained());
    }

    #[test]
    fn manual_records_skip_sum_checks() {
        let record = LayoutRecord::new(1, LayoutMode::Manual, Rect::from_size(10, 10));
        assert!(record.is_consistent());
    }

    #[test]
    fn debugger_disabled_by_default() {
        let debugger = LayoutDebugger::new();
        assert!(!debugger.enabled());
    }

    #[test]
    fn debugger_toggle() {
        let debugger = LayoutDebugger::new();
        assert!(debugger.toggle());
        assert!(debugger.enabled());
        assert!(!debugger.toggle());
        assert!(!debugger.enabled());
    }

    #[test]
    fn debugger_record_when_disabled() {
        let debugger = LayoutDebugger::new();
        debugger.record(grid_record());
        assert!(debugger.snapshot().is_empty());
    }

    #[test]
    fn debugger_record_and_clear() {
        let debugger = LayoutDebugger::new();
        debugger.set_enabled(true);
        debugger.record(grid_record());
        let mut bad = grid_record();
        bad.column_widths = vec![10];
        debugger.record(bad);
        assert_eq!(debugger.snapshot().len(), 2);
        assert_eq!(debugger.violations().len(), 1);

        let report = debugger.report();
        assert!(report.contains("2 passes, 1 violations"));
        assert!(report.contains("COLUMN SUM MISMATCH"));

        debugger.clear();
        assert!(debugger.snapshot().is_empty());
    }
}
