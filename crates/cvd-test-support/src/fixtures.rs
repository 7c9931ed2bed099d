//! Prebuilt controllers over the fake collaborators.

use crate::document::FakeDocument;
use crate::mocks::{CountingBackground, MemoryStore, RecordingFilter};
use cvd_popup::core::dom::{Document, create_test_row, ids};
use cvd_popup::{CvdType, PopupConfig, PopupController, Result};

/// Controller type used throughout the integration suites.
pub type TestPopup = PopupController<FakeDocument, MemoryStore, RecordingFilter, CountingBackground>;

/// Popup markup with the selector rows already appended.
///
/// # Errors
///
/// Returns an error if the fake markup lacks the swatches container.
pub fn document_with_rows() -> Result<FakeDocument> {
    let mut document = FakeDocument::popup();
    for cvd in CvdType::ALL {
        document.append_row(ids::SWATCHES, &create_test_row(cvd))?;
    }
    Ok(document)
}

/// Controller with rows rendered but no site resolved and no startup sync.
///
/// # Errors
///
/// Returns an error if the fake markup lacks the swatches container.
pub fn popup(store: MemoryStore) -> Result<TestPopup> {
    Ok(PopupController::new(
        PopupConfig::default(),
        document_with_rows()?,
        store,
        RecordingFilter::default(),
        CountingBackground::default(),
    ))
}

/// Controller after a completed startup for `site`.
///
/// # Errors
///
/// Propagates controller errors from startup.
pub fn started_popup(store: MemoryStore, site: &str) -> Result<TestPopup> {
    let mut popup = popup(store)?;
    let _ = popup.start(site.to_string())?;
    Ok(popup)
}
