//! Popup configuration.
//!
//! # Design
//! - Keep the handful of tunables in one value passed to the controller at construction.
//! - Defaults match the shipped popup markup; dev mode is opt-in.

/// Vertical offset, in pixels, between a selector row and its highlight bar.
pub const DEFAULT_HIGHLIGHT_OFFSET_PX: i32 = 7;

/// Site identifier used when the focused window has no active tab.
pub const UNKNOWN_SITE: &str = "unknown site";

/// Runtime settings for the popup controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopupConfig {
    /// Exposes developer-only controls (the reset button) and verbose logging.
    pub dev_mode: bool,
    /// Offset subtracted from a row's `offsetTop` when positioning the highlight.
    pub highlight_offset_px: i32,
    /// Site identifier used when no active tab can be resolved.
    pub unknown_site: String,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            dev_mode: false,
            highlight_offset_px: DEFAULT_HIGHLIGHT_OFFSET_PX,
            unknown_site: UNKNOWN_SITE.to_string(),
        }
    }
}

impl PopupConfig {
    /// Return a copy with developer mode toggled.
    #[must_use]
    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    /// Log filter directive matching the configured mode.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.dev_mode { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::{PopupConfig, UNKNOWN_SITE};

    #[test]
    fn defaults_match_popup_markup() {
        let config = PopupConfig::default();
        assert!(!config.dev_mode);
        assert_eq!(config.highlight_offset_px, 7);
        assert_eq!(config.unknown_site, UNKNOWN_SITE);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn dev_mode_raises_log_level() {
        let config = PopupConfig::default().with_dev_mode(true);
        assert!(config.dev_mode);
        assert_eq!(config.log_level(), "debug");
    }
}
