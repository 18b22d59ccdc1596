//! Identification ids for picking, scoped to one layout pass.
//!
//! Renderers that resolve clicks by drawing flat identification colors need a
//! reverse map from id to what was drawn. The table lives inside the
//! [`LayoutPass`](crate::engine::LayoutPass) that produced the viewports and
//! is dropped with it, so ids never leak across frames.

use rustc_hash::FxHashMap;

use crate::slice::SlicePlane;
use crate::viewport::{ViewportContent, ViewportTab};

/// Id reserved for "nothing drawn here".
pub const BACKGROUND_PICK_ID: u32 = 0;

/// What a pick id stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PickTarget {
    /// Index into the pass's viewport list.
    pub viewport: usize,
    /// Slice panel for all-planes tabs, `None` for the whole viewport.
    pub plane: Option<SlicePlane>,
}

#[derive(Debug, Clone, Default)]
pub struct FramePickTable {
    by_id: FxHashMap<u32, PickTarget>,
    by_target: FxHashMap<PickTarget, u32>,
}

impl FramePickTable {
    /// Assign ids to every tab viewport (and each slice panel of
    /// all-planes tabs), in list order.
    pub(crate) fn build(viewports: &[ViewportContent]) -> Self {
        let mut table = Self::default();
        let mut next_id = BACKGROUND_PICK_ID + 1;
        for (index, viewport) in viewports.iter().enumerate() {
            if !matches!(viewport.content(), ViewportTab::Tab(_)) {
                continue;
            }
            let mut insert = |plane: Option<SlicePlane>| {
                let target = PickTarget {
                    viewport: index,
                    plane,
                };
                table.by_id.insert(next_id, target);
                table.by_target.insert(target, next_id);
                next_id += 1;
            };
            if viewport.slice_layout_style().is_some() {
                for plane in SlicePlane::ALL {
                    insert(Some(plane));
                }
            } else {
                insert(None);
            }
        }
        table
    }

    #[must_use]
    pub fn id_for(&self, viewport: usize, plane: Option<SlicePlane>) -> Option<u32> {
        self.by_target.get(&PickTarget { viewport, plane }).copied()
    }

    #[must_use]
    pub fn resolve(&self, id: u32) -> Option<PickTarget> {
        self.by_id.get(&id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
