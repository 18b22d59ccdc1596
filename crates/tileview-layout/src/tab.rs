//! Collaborator interfaces: tabs and spacer tabs.
//!
//! The engine borrows tabs for the length of one layout pass. It reads their
//! aspect lock and manual geometry, and writes back exactly one thing: the
//! one-time aspect auto-lock applied under the window's "lock all" policy.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::aspect::AspectLock;
use crate::grid::{GridCellKind, GridSpec};
use crate::manual::ManualTabGeometry;
use crate::slice::SliceLayoutStyle;

/// Index of a browser window.
pub type WindowIndex = usize;

/// Stable identifier of a tab across layout passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabIndex(pub u32);

impl TabIndex {
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TabIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tab as seen by the layout engine.
pub trait BrowserTab {
    fn tab_index(&self) -> TabIndex;

    fn is_aspect_ratio_locked(&self) -> bool;

    /// Locked height / width ratio. Meaningful only while locked.
    fn aspect_ratio(&self) -> f32;

    fn set_aspect_ratio(&mut self, ratio: f32);

    fn set_aspect_ratio_locked(&mut self, locked: bool);

    /// Percentage box used by the manual (free-form) layout.
    fn manual_geometry(&self) -> ManualTabGeometry {
        ManualTabGeometry::default()
    }

    fn set_manual_geometry(&mut self, _geometry: ManualTabGeometry) {}

    /// Arrangement of the orthogonal slice panels when the tab shows a
    /// volume in all-planes view, `None` otherwise.
    fn slice_layout(&self) -> Option<SliceLayoutStyle> {
        None
    }

    fn aspect_lock(&self) -> AspectLock {
        AspectLock {
            locked: self.is_aspect_ratio_locked(),
            ratio: self.aspect_ratio(),
        }
    }
}

impl<T: BrowserTab + ?Sized> BrowserTab for Box<T> {
    fn tab_index(&self) -> TabIndex {
        (**self).tab_index()
    }

    fn is_aspect_ratio_locked(&self) -> bool {
        (**self).is_aspect_ratio_locked()
    }

    fn aspect_ratio(&self) -> f32 {
        (**self).aspect_ratio()
    }

    fn set_aspect_ratio(&mut self, ratio: f32) {
        (**self).set_aspect_ratio(ratio);
    }

    fn set_aspect_ratio_locked(&mut self, locked: bool) {
        (**self).set_aspect_ratio_locked(locked);
    }

    fn manual_geometry(&self) -> ManualTabGeometry {
        (**self).manual_geometry()
    }

    fn set_manual_geometry(&mut self, geometry: ManualTabGeometry) {
        (**self).set_manual_geometry(geometry);
    }

    fn slice_layout(&self) -> Option<SliceLayoutStyle> {
        (**self).slice_layout()
    }
}

/// Plain-data tab used by hosts without their own tab type, and by tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabState {
    pub tab_index: TabIndex,
    #[serde(default)]
    pub aspect_lock: AspectLock,
    #[serde(default)]
    pub manual_geometry: ManualTabGeometry,
    #[serde(default)]
    pub slice_layout: Option<SliceLayoutStyle>,
}

impl TabState {
    #[must_use]
    pub fn new(tab_index: u32) -> Self {
        Self {
            tab_index: TabIndex(tab_index),
            aspect_lock: AspectLock::default(),
            manual_geometry: ManualTabGeometry::default(),
            slice_layout: None,
        }
    }

    #[must_use]
    pub fn with_aspect_lock(mut self, ratio: f32) -> Self {
        self.aspect_lock = AspectLock::locked(ratio);
        self
    }

    #[must_use]
    pub fn with_manual_geometry(mut self, geometry: ManualTabGeometry) -> Self {
        self.manual_geometry = geometry;
        self
    }

    #[must_use]
    pub fn with_slice_layout(mut self, style: SliceLayoutStyle) -> Self {
        self.slice_layout = Some(style);
        self
    }
}

impl BrowserTab for TabState {
    fn tab_index(&self) -> TabIndex {
        self.tab_index
    }

    fn is_aspect_ratio_locked(&self) -> bool {
        self.aspect_lock.locked
    }

    fn aspect_ratio(&self) -> f32 {
        self.aspect_lock.ratio
    }

    fn set_aspect_ratio(&mut self, ratio: f32) {
        self.aspect_lock.ratio = ratio;
    }

    fn set_aspect_ratio_locked(&mut self, locked: bool) {
        self.aspect_lock.locked = locked;
    }

    fn manual_geometry(&self) -> ManualTabGeometry {
        self.manual_geometry
    }

    fn set_manual_geometry(&mut self, geometry: ManualTabGeometry) {
        self.manual_geometry = geometry;
    }

    fn slice_layout(&self) -> Option<SliceLayoutStyle> {
        self.slice_layout
    }
}

/// Grid position of a spacer cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpacerKey {
    pub window_index: WindowIndex,
    pub row: usize,
    pub column: usize,
}

impl SpacerKey {
    #[must_use]
    pub const fn new(window_index: WindowIndex, row: usize, column: usize) -> Self {
        Self {
            window_index,
            row,
            column,
        }
    }
}

/// Opaque handle to a spacer tab's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpacerTabHandle(u32);

/// Lookup of pre-existing spacer tabs by grid position.
pub trait SpacerLookup {
    fn spacer_tab(&self, key: SpacerKey) -> Option<SpacerTabHandle>;
}

/// Spacer lookup that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpacers;

impl SpacerLookup for NoSpacers {
    fn spacer_tab(&self, _key: SpacerKey) -> Option<SpacerTabHandle> {
        None
    }
}

/// Owner of the spacer tabs of all windows.
#[derive(Debug, Clone, Default)]
pub struct SpacerRegistry {
    spacers: FxHashMap<SpacerKey, SpacerTabHandle>,
    next_handle: u32,
}

impl SpacerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the spacer at `key`, creating it first if needed.
    pub fn insert(&mut self, key: SpacerKey) -> SpacerTabHandle {
        if let Some(handle) = self.spacers.get(&key) {
            return *handle;
        }
        let handle = SpacerTabHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.spacers.insert(key, handle);
        handle
    }

    /// Create a spacer for every spacer cell of `spec` in the given window.
    pub fn ensure_for_grid(&mut self, window_index: WindowIndex, spec: &GridSpec) {
        for (row, row_element) in spec.rows.iter().enumerate() {
            for (column, column_element) in spec.columns.iter().enumerate() {
                if row_element.kind == GridCellKind::Space
                    || column_element.kind == GridCellKind::Space
                {
                    self.insert(SpacerKey::new(window_index, row, column));
                }
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spacers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spacers.is_empty()
    }
}

impl SpacerLookup for SpacerRegistry {
    fn spacer_tab(&self, key: SpacerKey) -> Option<SpacerTabHandle> {
        self.spacers.get(&key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridElement;

    #[test]
    fn registry_insert_is_stable() {
        let mut registry = SpacerRegistry::new();
        let key = SpacerKey::new(0, 1, 2);
        let first = registry.insert(key);
        let second = registry.insert(key);
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.spacer_tab(key), Some(first));
        assert_eq!(registry.spacer_tab(SpacerKey::new(1, 1, 2)), None);
    }

    #[test]
    fn ensure_for_grid_covers_spacer_rows_and_columns() {
        let spec = GridSpec::new(
            vec![GridElement::tab(), GridElement::space()],
            vec![GridElement::space(), GridElement::tab(), GridElement::tab()],
        );
        let mut registry = SpacerRegistry::new();
        registry.ensure_for_grid(3, &spec);
        // Row 0: only column 0 is a spacer; row 1: all three columns.
        assert_eq!(registry.len(), 4);
        assert!(registry.spacer_tab(SpacerKey::new(3, 0, 0)).is_some());
        assert!(registry.spacer_tab(SpacerKey::new(3, 0, 1)).is_none());
        assert!(registry.spacer_tab(SpacerKey::new(3, 1, 2)).is_some());
    }

    #[test]
    fn tab_state_round_trips_aspect_lock() {
        let mut tab = TabState::new(7);
        assert!(!tab.is_aspect_ratio_locked());
        tab.set_aspect_ratio(0.5);
        tab.set_aspect_ratio_locked(true);
        assert_eq!(tab.aspect_lock(), AspectLock::locked(0.5));
        assert_eq!(tab.tab_index(), TabIndex(7));
    }

    #[test]
    fn boxed_tabs_forward_to_inner() {
        let mut tab: Box<dyn BrowserTab> = Box::new(TabState::new(2).with_aspect_lock(2.0));
        assert!(tab.is_aspect_ratio_locked());
        tab.set_aspect_ratio_locked(false);
        assert!(!tab.aspect_lock().locked);
        assert_eq!(tab.tab_index().get(), 2);
    }
}
