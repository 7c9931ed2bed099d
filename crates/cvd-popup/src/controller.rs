//! Popup controller: event handlers, settings sync and setup flow.
//!
//! # Design
//! - The controller owns its collaborators and the popup state (site, phase, selection, restore snapshot).
//! - `update` is the single synchronization point after every settings mutation.
//! - An invalid stored type is the only recoverable failure; it is answered by forcing setup.
//! - Element lookups propagate [`PopupError`]; callers decide how to report them.

use crate::config::PopupConfig;
use crate::core::cvd::CvdType;
use crate::core::dom::{Document, classes, create_test_row, ids, parse_number, radio_id};
use crate::core::phase::{PopupPhase, RestoreSnapshot};
use crate::core::ports::{BackgroundPage, Browser, ColorFilter, Localizer, SettingsStore};
use crate::error::Result;
use tracing::{debug, warn};

/// Result of synchronizing the popup with stored settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum SyncOutcome {
    /// Fields now mirror the store and tabs were asked to refresh.
    Synced,
    /// Stored type is not a valid CVD type; nothing was changed.
    NeedsSetup,
}

impl SyncOutcome {
    /// Boolean form of the outcome (`true` when the sync was performed).
    #[must_use]
    pub const fn is_synced(self) -> bool {
        matches!(self, Self::Synced)
    }
}

/// Controller behind the popup's controls.
#[derive(Debug)]
pub struct PopupController<D, S, F, B> {
    config: PopupConfig,
    document: D,
    store: S,
    filter: F,
    background: B,
    site: Option<String>,
    phase: PopupPhase,
    selection: Option<CvdType>,
    restore: Option<RestoreSnapshot>,
}

impl<D, S, F, B> PopupController<D, S, F, B>
where
    D: Document,
    S: SettingsStore,
    F: ColorFilter,
    B: BackgroundPage,
{
    /// Build a controller in the initial setup step with no site resolved.
    pub fn new(config: PopupConfig, document: D, store: S, filter: F, background: B) -> Self {
        Self {
            config,
            document,
            store,
            filter,
            background,
            site: None,
            phase: PopupPhase::default(),
            selection: None,
            restore: None,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &PopupConfig {
        &self.config
    }

    /// Document the controller renders into.
    #[must_use]
    pub const fn document(&self) -> &D {
        &self.document
    }

    /// Settings store backing the popup.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Filter collaborator used for the swatch preview.
    #[must_use]
    pub const fn filter(&self) -> &F {
        &self.filter
    }

    /// Background coordinator.
    #[must_use]
    pub const fn background(&self) -> &B {
        &self.background
    }

    /// Site resolved at startup, if initialization has completed.
    #[must_use]
    pub fn site(&self) -> Option<&str> {
        self.site.as_deref()
    }

    /// Current phase of the popup.
    #[must_use]
    pub const fn phase(&self) -> PopupPhase {
        self.phase
    }

    /// Type currently selected through the radio buttons.
    #[must_use]
    pub const fn cvd_type_selection(&self) -> Option<CvdType> {
        self.selection
    }

    /// Snapshot held while setup is open.
    #[must_use]
    pub const fn restore_snapshot(&self) -> Option<&RestoreSnapshot> {
        self.restore.as_ref()
    }

    /// Check exactly the radio for `selection` and move the row highlight onto it.
    ///
    /// # Errors
    ///
    /// Returns an error when a selector row or the highlight is missing.
    pub fn set_cvd_type_selection(&mut self, selection: Option<CvdType>) -> Result<()> {
        self.document.set_hidden(ids::ROW_HIGHLIGHT, true)?;
        for cvd in CvdType::ALL {
            let id = radio_id(cvd);
            if selection == Some(cvd) {
                self.document.set_checked(&id, true)?;
                let top = self.document.parent_offset_top(&id)? - self.config.highlight_offset_px;
                self.document.set_top(ids::ROW_HIGHLIGHT, top)?;
                self.document.set_hidden(ids::ROW_HIGHLIGHT, false)?;
            } else {
                self.document.set_checked(&id, false)?;
            }
        }
        self.selection = selection;
        Ok(())
    }

    /// Re-evaluate the phase and style the controls for it.
    ///
    /// # Errors
    ///
    /// Returns an error when a control is missing or the severity slider holds a non-number.
    pub fn update_controls(&mut self) -> Result<()> {
        self.phase = self.phase.select(self.selection.is_some());
        let activated = self.phase.is_activated();
        self.document
            .set_class(ids::FLEX_CONTAINER, classes::ACTIVATED, activated)?;

        let main_disabled = !self.phase.main_controls_enabled();
        for id in [ids::ENABLE, ids::DELTA, ids::SETUP] {
            self.document.set_disabled(id, main_disabled)?;
        }
        if activated {
            return Ok(());
        }

        let step_two = self.phase.step_two_enabled();
        self.document
            .set_class(ids::FIRST_STEP, classes::ACTIVE, !step_two)?;
        self.document
            .set_class(ids::SECOND_STEP, classes::ACTIVE, step_two)?;
        self.document.set_disabled(ids::SEVERITY, !step_two)?;
        self.document.set_disabled(ids::RESET, !step_two)?;
        if step_two {
            let severity = self.number_field(ids::SEVERITY)?;
            self.on_severity_change(severity)?;
        }
        Ok(())
    }

    /// Refresh the controls from the store and propagate settings to all tabs.
    ///
    /// # Errors
    ///
    /// Returns an error when a control is missing; an invalid stored type is reported as
    /// [`SyncOutcome::NeedsSetup`] instead.
    pub fn update(&mut self) -> Result<SyncOutcome> {
        let stored = self.store.default_type();
        let Some(cvd) = CvdType::from_stored(&stored) else {
            debug!(stored_type = %stored, "update skipped: no valid CVD type");
            return Ok(SyncOutcome::NeedsSetup);
        };

        let delta = match self.site.as_deref() {
            Some(site) => self.store.site_delta(site),
            None => self.store.default_delta(),
        };
        self.document.set_value(ids::DELTA, &delta.to_string())?;
        let severity = self.store.default_severity();
        self.document
            .set_value(ids::SEVERITY, &severity.to_string())?;

        if !self.phase.is_activated() {
            self.set_cvd_type_selection(Some(cvd))?;
        }
        let enabled = self.store.default_enable();
        self.document.set_checked(ids::ENABLE, enabled)?;

        debug!(
            delta,
            severity,
            cvd_type = %cvd,
            enabled,
            site = self.site.as_deref().unwrap_or_default(),
            "update"
        );
        self.background.update_tabs();
        Ok(SyncOutcome::Synced)
    }

    /// Delta slider moved.
    ///
    /// # Errors
    ///
    /// Propagates control lookup failures from [`Self::update`].
    pub fn on_delta_change(&mut self, value: f64) -> Result<()> {
        debug!(value, site = self.site.as_deref().unwrap_or_default(), "delta changed");
        if let Some(site) = self.site.as_deref() {
            self.store.set_site_delta(site, value);
        }
        self.store.set_default_delta(value);
        let _ = self.update()?;
        Ok(())
    }

    /// Severity slider moved; also previews the filter on the swatches.
    ///
    /// # Errors
    ///
    /// Propagates control lookup failures from [`Self::update`].
    pub fn on_severity_change(&mut self, value: f64) -> Result<()> {
        debug!(value, site = self.site.as_deref().unwrap_or_default(), "severity changed");
        self.store.set_default_severity(value);
        let _ = self.update()?;
        self.preview(self.selection, value);
        Ok(())
    }

    /// A type radio was chosen (or the selection was cleared).
    ///
    /// # Errors
    ///
    /// Propagates control lookup failures.
    pub fn on_type_change(&mut self, selection: Option<CvdType>) -> Result<()> {
        let stored = CvdType::stored(selection);
        debug!(cvd_type = stored, site = self.site.as_deref().unwrap_or_default(), "type changed");
        self.set_cvd_type_selection(selection)?;
        self.store.set_default_type(stored);
        let _ = self.update()?;
        self.document.set_value(ids::SEVERITY, "0")?;
        self.update_controls()
    }

    /// Enable checkbox toggled; an unusable configuration sends the user back to setup.
    ///
    /// # Errors
    ///
    /// Propagates control lookup failures.
    pub fn on_enable_change(&mut self, enabled: bool) -> Result<()> {
        debug!(enabled, site = self.site.as_deref().unwrap_or_default(), "enable changed");
        self.store.set_default_enable(enabled);
        if self.update()? == SyncOutcome::NeedsSetup {
            self.on_setup_click()?;
        }
        Ok(())
    }

    /// Drop every per-site delta override.
    ///
    /// # Errors
    ///
    /// Propagates control lookup failures from [`Self::update`].
    pub fn on_reset(&mut self) -> Result<()> {
        debug!("reset site deltas");
        self.store.reset_site_deltas();
        let _ = self.update()?;
        Ok(())
    }

    /// Enter setup, remembering the current type and severity for a later cancel.
    ///
    /// # Errors
    ///
    /// Propagates control lookup failures.
    pub fn on_setup_click(&mut self) -> Result<()> {
        let snapshot = RestoreSnapshot {
            cvd_type: self.store.default_type(),
            severity: self.store.default_severity(),
        };
        let selection = CvdType::from_stored(&snapshot.cvd_type);
        self.phase = self.phase.enter_setup(selection.is_some());
        self.set_cvd_type_selection(selection)?;
        self.document
            .set_value(ids::SEVERITY, &snapshot.severity.to_string())?;
        self.restore = Some(snapshot);
        self.update_controls()
    }

    /// Confirm setup. Without a selected type the popup stays in setup and keeps its snapshot.
    ///
    /// # Errors
    ///
    /// Propagates control lookup failures.
    pub fn on_ok_click(&mut self) -> Result<()> {
        self.close_setup()?;
        if self.phase.is_activated() {
            self.restore = None;
        }
        Ok(())
    }

    /// Abandon setup, writing back the settings captured when it began.
    ///
    /// Setup only closes when the restored type is valid; otherwise the popup returns to the
    /// first step with the preview cleared.
    ///
    /// # Errors
    ///
    /// Propagates control lookup failures.
    pub fn on_cancel_click(&mut self) -> Result<()> {
        let Some(snapshot) = self.restore.take() else {
            return self.close_setup();
        };
        debug!(
            cvd_type = %snapshot.cvd_type,
            severity = snapshot.severity,
            "restore previous settings"
        );
        self.store.set_default_type(&snapshot.cvd_type);
        self.store.set_default_severity(snapshot.severity);
        let restored = CvdType::from_stored(&snapshot.cvd_type);
        self.set_cvd_type_selection(restored)?;
        self.document
            .set_value(ids::SEVERITY, &snapshot.severity.to_string())?;
        self.close_setup()?;
        let _ = self.update()?;
        if restored.is_some() {
            self.preview(restored, snapshot.severity);
        } else {
            self.filter.clear();
            self.restore = Some(snapshot);
        }
        Ok(())
    }

    /// Reset button: clear site overrides and stored defaults, returning to the first setup step.
    ///
    /// # Errors
    ///
    /// Propagates control lookup failures.
    pub fn on_reset_click(&mut self) -> Result<()> {
        self.on_reset()?;
        self.store.set_default_severity(0.0);
        self.store.set_default_type(CvdType::stored(None));
        self.store.set_default_enable(false);
        self.document.set_value(ids::SEVERITY, "0")?;
        self.document.set_checked(ids::ENABLE, false)?;
        self.set_cvd_type_selection(None)?;
        self.update_controls()?;
        self.filter.clear();
        Ok(())
    }

    /// Localize labels, gate developer controls and build the selector rows.
    ///
    /// # Errors
    ///
    /// Returns an error when the markup is missing an expected element.
    pub fn prepare(&mut self, localizer: &dyn Localizer) -> Result<()> {
        let localized = self.document.localize(localizer)?;
        debug!(localized, "localized popup text");
        self.document
            .set_hidden(ids::RESET, !self.config.dev_mode)?;
        for cvd in CvdType::ALL {
            self.document
                .append_row(ids::SWATCHES, &create_test_row(cvd))?;
        }
        Ok(())
    }

    /// Record the site and run the first sync; invalid settings open setup.
    ///
    /// # Errors
    ///
    /// Propagates control lookup failures.
    pub fn start(&mut self, site: String) -> Result<SyncOutcome> {
        debug!(site = %site, "init: active tab update");
        self.site = Some(site);
        let outcome = self.update()?;
        match outcome {
            SyncOutcome::Synced => self.close_setup()?,
            SyncOutcome::NeedsSetup => self.on_setup_click()?,
        }
        Ok(outcome)
    }

    /// Full startup sequence: [`Self::prepare`], [`resolve_site`], then [`Self::start`].
    ///
    /// # Errors
    ///
    /// Propagates control lookup failures.
    pub async fn initialize<Br>(
        &mut self,
        localizer: &dyn Localizer,
        browser: &Br,
    ) -> Result<SyncOutcome>
    where
        Br: Browser + ?Sized,
    {
        self.prepare(localizer)?;
        let site = resolve_site(browser, &self.config).await;
        self.start(site)
    }

    fn close_setup(&mut self) -> Result<()> {
        self.phase = self.phase.close_setup(self.selection.is_some());
        self.update_controls()
    }

    fn preview(&mut self, selection: Option<CvdType>, severity: f64) {
        let filter = self.filter.correction_filter(selection, severity);
        self.filter.inject(&filter);
        self.document.force_restyle();
    }

    fn number_field(&self, id: &str) -> Result<f64> {
        parse_number(id, &self.document.value(id)?)
    }
}

/// Derive the site of the focused window's active tab, falling back to the configured sentinel.
pub async fn resolve_site<Br>(browser: &Br, config: &PopupConfig) -> String
where
    Br: Browser + ?Sized,
{
    let window = match browser.last_focused_window().await {
        Ok(window) => window,
        Err(err) => {
            warn!(error = %err, "focused window query failed");
            return config.unknown_site.clone();
        }
    };
    match window.active_tab().and_then(|tab| tab.url.as_deref()) {
        Some(url) => browser.site_from_url(url),
        None => config.unknown_site.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::SyncOutcome;

    #[test]
    fn only_synced_counts_as_synced() {
        assert!(SyncOutcome::Synced.is_synced());
        assert!(!SyncOutcome::NeedsSetup.is_synced());
    }
}
