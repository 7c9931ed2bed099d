//! Collaborators the popup talks to but does not own.
//!
//! # Design
//! - Settings persistence, filter math and tab propagation live in other extension scripts.
//! - Store and filter calls are synchronous and assumed to succeed; only the tab query is async.
//! - Traits are object-safe where the web layer needs dynamic dispatch.

use crate::core::cvd::CvdType;
use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Global defaults plus per-site delta overrides.
pub trait SettingsStore {
    /// Stored default CVD type; may be empty or otherwise invalid.
    fn default_type(&self) -> String;
    /// Persist the default CVD type (empty string clears it).
    fn set_default_type(&mut self, value: &str);
    /// Stored default severity in `[0, 1]`.
    fn default_severity(&self) -> f64;
    /// Persist the default severity.
    fn set_default_severity(&mut self, value: f64);
    /// Stored default delta.
    fn default_delta(&self) -> f64;
    /// Persist the default delta.
    fn set_default_delta(&mut self, value: f64);
    /// Whether correction is enabled by default.
    fn default_enable(&self) -> bool;
    /// Persist the enabled flag.
    fn set_default_enable(&mut self, value: bool);
    /// Delta for a site, falling back to the default when no override exists.
    fn site_delta(&self, site: &str) -> f64;
    /// Persist a per-site delta override.
    fn set_site_delta(&mut self, site: &str, value: f64);
    /// Remove every per-site delta override.
    fn reset_site_deltas(&mut self);
}

/// Correction filter computation and application, used for the popup swatches.
pub trait ColorFilter {
    /// Opaque filter descriptor produced by the filter scripts.
    type Filter;

    /// Compute the correction filter for a type and severity.
    fn correction_filter(&self, cvd: Option<CvdType>, severity: f64) -> Self::Filter;
    /// Apply a filter to the popup document.
    fn inject(&mut self, filter: &Self::Filter);
    /// Remove any applied filter.
    fn clear(&mut self);
}

/// Background coordinator that pushes settings to every open tab.
pub trait BackgroundPage {
    /// Ask the background page to refresh filters on all tabs.
    fn update_tabs(&mut self);
}

/// Message catalogue lookup.
pub trait Localizer {
    /// Display text for a message key.
    fn message(&self, key: &str) -> String;
}

/// Window/tab queries exposed by the browser.
#[async_trait(?Send)]
pub trait Browser {
    /// Last focused window, populated with its tabs.
    ///
    /// # Errors
    ///
    /// Returns an error when the browser call fails or returns an unexpected payload.
    async fn last_focused_window(&self) -> Result<BrowserWindow>;

    /// Site identifier for a tab URL.
    fn site_from_url(&self, url: &str) -> String;
}

/// Browser window as returned by a populated window query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct BrowserWindow {
    /// Tabs in the window, in strip order.
    #[serde(default)]
    pub tabs: Vec<BrowserTab>,
}

impl BrowserWindow {
    /// First tab flagged as active.
    #[must_use]
    pub fn active_tab(&self) -> Option<&BrowserTab> {
        self.tabs.iter().find(|tab| tab.active)
    }
}

/// Minimal tab projection used to derive the site.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct BrowserTab {
    /// Whether the tab is the selected tab of its window.
    #[serde(default)]
    pub active: bool,
    /// Tab URL; absent when the extension lacks permission to read it.
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::BrowserWindow;

    #[test]
    fn window_payload_decodes_with_missing_fields() -> Result<(), serde_json::Error> {
        let window: BrowserWindow = serde_json::from_str(
            r#"{"id":4,"tabs":[{"active":false,"url":"https://a.test/"},{"active":true}]}"#,
        )?;
        assert_eq!(window.tabs.len(), 2);
        let active = window.active_tab().map(|tab| tab.url.clone());
        assert_eq!(active, Some(None));
        Ok(())
    }

    #[test]
    fn window_without_tabs_has_no_active_tab() -> Result<(), serde_json::Error> {
        let window: BrowserWindow = serde_json::from_str("{}")?;
        assert!(window.active_tab().is_none());
        Ok(())
    }
}
