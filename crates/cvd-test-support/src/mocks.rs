//! In-memory collaborators for controller tests.

use async_trait::async_trait;
use cvd_popup::core::ports::{
    BackgroundPage, Browser, BrowserTab, BrowserWindow, ColorFilter, Localizer, SettingsStore,
};
use cvd_popup::{CvdType, PopupError, Result};
use std::collections::HashMap;

/// Settings store held in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    /// Stored default type (may be empty or invalid).
    pub default_type: String,
    /// Stored default severity.
    pub default_severity: f64,
    /// Stored default delta.
    pub default_delta: f64,
    /// Stored enabled flag.
    pub default_enable: bool,
    /// Per-site delta overrides.
    pub site_deltas: HashMap<String, f64>,
}

impl MemoryStore {
    /// Empty store: no type, zero severity and delta, disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stored default type.
    #[must_use]
    pub fn with_type(mut self, value: &str) -> Self {
        self.default_type = value.to_string();
        self
    }

    /// Set the stored default severity.
    #[must_use]
    pub fn with_severity(mut self, value: f64) -> Self {
        self.default_severity = value;
        self
    }

    /// Set the stored default delta.
    #[must_use]
    pub fn with_delta(mut self, value: f64) -> Self {
        self.default_delta = value;
        self
    }

    /// Set the stored enabled flag.
    #[must_use]
    pub fn with_enable(mut self, value: bool) -> Self {
        self.default_enable = value;
        self
    }

    /// Add a per-site delta override.
    #[must_use]
    pub fn with_site_delta(mut self, site: &str, value: f64) -> Self {
        self.site_deltas.insert(site.to_string(), value);
        self
    }
}

impl SettingsStore for MemoryStore {
    fn default_type(&self) -> String {
        self.default_type.clone()
    }

    fn set_default_type(&mut self, value: &str) {
        self.default_type = value.to_string();
    }

    fn default_severity(&self) -> f64 {
        self.default_severity
    }

    fn set_default_severity(&mut self, value: f64) {
        self.default_severity = value;
    }

    fn default_delta(&self) -> f64 {
        self.default_delta
    }

    fn set_default_delta(&mut self, value: f64) {
        self.default_delta = value;
    }

    fn default_enable(&self) -> bool {
        self.default_enable
    }

    fn set_default_enable(&mut self, value: bool) {
        self.default_enable = value;
    }

    fn site_delta(&self, site: &str) -> f64 {
        self.site_deltas
            .get(site)
            .copied()
            .unwrap_or(self.default_delta)
    }

    fn set_site_delta(&mut self, site: &str, value: f64) {
        self.site_deltas.insert(site.to_string(), value);
    }

    fn reset_site_deltas(&mut self) {
        self.site_deltas.clear();
    }
}

/// Filter descriptor recorded by [`RecordingFilter`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewFilter {
    /// Type the filter was computed for.
    pub cvd: Option<CvdType>,
    /// Severity the filter was computed for.
    pub severity: f64,
}

/// Filter collaborator that records every injection and clear.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingFilter {
    /// Filters injected, oldest first.
    pub injected: Vec<PreviewFilter>,
    /// Number of clear calls.
    pub clears: usize,
}

impl RecordingFilter {
    /// Most recently injected filter.
    #[must_use]
    pub fn last_injected(&self) -> Option<PreviewFilter> {
        self.injected.last().copied()
    }
}

impl ColorFilter for RecordingFilter {
    type Filter = PreviewFilter;

    fn correction_filter(&self, cvd: Option<CvdType>, severity: f64) -> PreviewFilter {
        PreviewFilter { cvd, severity }
    }

    fn inject(&mut self, filter: &PreviewFilter) {
        self.injected.push(*filter);
    }

    fn clear(&mut self) {
        self.clears += 1;
    }
}

/// Background page that counts tab refresh requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountingBackground {
    /// Number of `update_tabs` calls.
    pub updates: usize,
}

impl BackgroundPage for CountingBackground {
    fn update_tabs(&mut self) {
        self.updates += 1;
    }
}

/// Localizer backed by a fixed message table; unknown keys echo back.
#[derive(Clone, Debug, Default)]
pub struct StaticLocalizer {
    messages: HashMap<String, String>,
}

impl StaticLocalizer {
    /// Build from `(key, text)` pairs.
    #[must_use]
    pub fn new(messages: &[(&str, &str)]) -> Self {
        Self {
            messages: messages
                .iter()
                .map(|(key, text)| ((*key).to_string(), (*text).to_string()))
                .collect(),
        }
    }
}

impl Localizer for StaticLocalizer {
    fn message(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// Browser returning a canned focused window; `None` simulates a failed query.
#[derive(Clone, Debug, Default)]
pub struct FakeBrowser {
    window: Option<BrowserWindow>,
}

impl FakeBrowser {
    /// Browser whose focused window has a single active tab at `url`.
    #[must_use]
    pub fn with_active_url(url: &str) -> Self {
        Self::with_window(BrowserWindow {
            tabs: vec![
                BrowserTab {
                    active: false,
                    url: Some("https://background.test/".to_string()),
                },
                BrowserTab {
                    active: true,
                    url: Some(url.to_string()),
                },
            ],
        })
    }

    /// Browser returning the given window.
    #[must_use]
    pub const fn with_window(window: BrowserWindow) -> Self {
        Self {
            window: Some(window),
        }
    }

    /// Browser whose window query fails.
    #[must_use]
    pub const fn failing() -> Self {
        Self { window: None }
    }
}

#[async_trait(?Send)]
impl Browser for FakeBrowser {
    async fn last_focused_window(&self) -> Result<BrowserWindow> {
        self.window.clone().ok_or_else(|| PopupError::Bridge {
            operation: "windows.getLastFocused",
            detail: "no focused window".to_string(),
        })
    }

    fn site_from_url(&self, url: &str) -> String {
        let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
        rest.split(['/', '?', '#']).next().unwrap_or_default().to_string()
    }
}
