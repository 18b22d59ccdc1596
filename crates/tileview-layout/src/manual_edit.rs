//! Edits to manual (free-form) tab geometry, as reversible commands.
//!
//! Each command carries its before and after values so an undo stack can
//! apply and revert it without looking anything else up.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::manual::ManualTabGeometry;
use crate::tab::{BrowserTab, TabIndex};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManualLayoutCommand {
    /// Move or resize one or more tabs.
    SetGeometry {
        tab_indices: Vec<TabIndex>,
        before: Vec<ManualTabGeometry>,
        after: Vec<ManualTabGeometry>,
    },
    SetStackingOrder {
        tab_index: TabIndex,
        before: i32,
        after: i32,
    },
    SetDisplayed {
        tab_index: TabIndex,
        before: bool,
        after: bool,
    },
}

fn position_of<T: BrowserTab>(tabs: &[T], tab_index: TabIndex) -> Result<usize> {
    tabs.iter()
        .position(|tab| tab.tab_index() == tab_index)
        .ok_or(LayoutError::TabNotFound(tab_index))
}

impl ManualLayoutCommand {
    /// Snapshot the current geometry of `tab_indices` and build a command
    /// that replaces it with `after`.
    pub fn set_geometry<T: BrowserTab>(
        tabs: &[T],
        tab_indices: Vec<TabIndex>,
        after: Vec<ManualTabGeometry>,
    ) -> Result<Self> {
        let before = tab_indices
            .iter()
            .map(|&index| position_of(tabs, index).map(|p| tabs[p].manual_geometry()))
            .collect::<Result<Vec<_>>>()?;
        let command = Self::SetGeometry {
            tab_indices,
            before,
            after,
        };
        command.check_lengths()?;
        Ok(command)
    }

    fn check_lengths(&self) -> Result<()> {
        if let Self::SetGeometry {
            tab_indices,
            before,
            after,
        } = self
            && (tab_indices.len() != before.len() || tab_indices.len() != after.len())
        {
            return Err(LayoutError::LengthMismatch {
                tabs: tab_indices.len(),
                before: before.len(),
                after: after.len(),
            });
        }
        Ok(())
    }

    /// Tabs touched by this command.
    #[must_use]
    pub fn tab_indices(&self) -> &[TabIndex] {
        match self {
            Self::SetGeometry { tab_indices, .. } => tab_indices,
            Self::SetStackingOrder { tab_index, .. } | Self::SetDisplayed { tab_index, .. } => {
                std::slice::from_ref(tab_index)
            }
        }
    }

    pub fn apply<T: BrowserTab>(&self, tabs: &mut [T]) -> Result<()> {
        self.write(tabs, false)
    }

    pub fn revert<T: BrowserTab>(&self, tabs: &mut [T]) -> Result<()> {
        self.write(tabs, true)
    }

    /// Resolves every tab before touching any, so a failed command leaves
    /// `tabs` unchanged.
    fn write<T: BrowserTab>(&self, tabs: &mut [T], undo: bool) -> Result<()> {
        self.check_lengths()?;
        let positions = self
            .tab_indices()
            .iter()
            .map(|&index| position_of(tabs, index))
            .collect::<Result<Vec<_>>>()?;

        match self {
            Self::SetGeometry { before, after, .. } => {
                let values = if undo { before } else { after };
                for (&position, geometry) in positions.iter().zip(values) {
                    let tab = &mut tabs[position];
                    let current = tab.manual_geometry();
                    // Stacking and visibility have their own commands.
                    tab.set_manual_geometry(ManualTabGeometry {
                        stacking_order: current.stacking_order,
                        displayed: current.displayed,
                        ..*geometry
                    });
                }
            }
            Self::SetStackingOrder { before, after, .. } => {
                let order = if undo { *before } else { *after };
                let tab = &mut tabs[positions[0]];
                let geometry = tab.manual_geometry().with_stacking_order(order);
                tab.set_manual_geometry(geometry);
            }
            Self::SetDisplayed { before, after, .. } => {
                let displayed = if undo { *before } else { *after };
                let tab = &mut tabs[positions[0]];
                let geometry = tab.manual_geometry().with_displayed(displayed);
                tab.set_manual_geometry(geometry);
            }
        }
        Ok(())
    }
}

/// Command moving `tab_index` in front of every other tab.
pub fn bring_to_front<T: BrowserTab>(
    tabs: &[T],
    tab_index: TabIndex,
) -> Result<ManualLayoutCommand> {
    let position = position_of(tabs, tab_index)?;
    let before = tabs[position].manual_geometry().stacking_order;
    let front = tabs
        .iter()
        .enumerate()
        .filter(|&(p, _)| p != position)
        .map(|(_, tab)| tab.manual_geometry().stacking_order)
        .max();
    let after = match front {
        Some(order) if order >= before => order.saturating_add(1),
        _ => before,
    };
    Ok(ManualLayoutCommand::SetStackingOrder {
        tab_index,
        before,
        after,
    })
}

/// Command moving `tab_index` behind every other tab.
pub fn send_to_back<T: BrowserTab>(tabs: &[T], tab_index: TabIndex) -> Result<ManualLayoutCommand> {
    let position = position_of(tabs, tab_index)?;
    let before = tabs[position].manual_geometry().stacking_order;
    let back = tabs
        .iter()
        .enumerate()
        .filter(|&(p, _)| p != position)
        .map(|(_, tab)| tab.manual_geometry().stacking_order)
        .min();
    let after = match back {
        Some(order) if order <= before => order.saturating_sub(1),
        _ => before,
    };
    Ok(ManualLayoutCommand::SetStackingOrder {
        tab_index,
        before,
        after,
    })
}
