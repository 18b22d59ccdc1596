//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::slice::SLICE_PANEL_GAP;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Shrink grid rows to their aspect-locked content and center the rows
    /// vertically. Kept for layouts saved by older versions.
    pub centering_correction: bool,
    /// Gap in pixels between all-planes slice panels.
    pub slice_panel_gap: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            centering_correction: false,
            slice_panel_gap: SLICE_PANEL_GAP,
        }
    }
}

impl LayoutConfig {
    #[must_use]
    pub fn with_centering_correction(mut self, enabled: bool) -> Self {
        self.centering_correction = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.slice_panel_gap < 0 {
            return Err(LayoutError::InvalidSliceGap(self.slice_panel_gap));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LayoutConfig::default();
        assert!(!config.centering_correction);
        assert_eq!(config.slice_panel_gap, 2);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: LayoutConfig =
            serde_json::from_str(r#"{"centering_correction": true}"#).expect("valid json");
        assert!(config.centering_correction);
        assert_eq!(config.slice_panel_gap, SLICE_PANEL_GAP);
    }

    #[test]
    fn negative_gap_is_rejected() {
        let config = LayoutConfig {
            slice_panel_gap: -1,
            ..LayoutConfig::default()
        };
        assert_eq!(config.validate(), Err(LayoutError::InvalidSliceGap(-1)));
    }
}
