//! Element lookup capability and popup markup vocabulary.
//!
//! # Design
//! - The controller addresses controls by id only, so a fake registry can stand in for the document.
//! - Every lookup is fallible; a missing element is reported, never assumed.
//! - Row construction is described as data and materialised by the [`Document`] implementation.

use crate::core::cvd::CvdType;
use crate::core::ports::Localizer;
use crate::error::{PopupError, Result};

/// Element ids present in the popup markup.
pub mod ids {
    /// Outer container; carries the `activated` class outside of setup.
    pub const FLEX_CONTAINER: &str = "flex-container";
    /// Enable/disable checkbox.
    pub const ENABLE: &str = "enable";
    /// Color rotation slider.
    pub const DELTA: &str = "delta";
    /// Button that re-enters setup.
    pub const SETUP: &str = "setup";
    /// Severity slider (setup step two).
    pub const SEVERITY: &str = "severity";
    /// Button that clears stored settings (developer mode only).
    pub const RESET: &str = "reset";
    /// Button confirming setup.
    pub const OK: &str = "ok";
    /// Button abandoning setup.
    pub const CANCEL: &str = "cancel";
    /// Step one panel (type choice).
    pub const FIRST_STEP: &str = "firstStep";
    /// Step two panel (severity).
    pub const SECOND_STEP: &str = "secondStep";
    /// Parent of the selector rows.
    pub const SWATCHES: &str = "swatches";
    /// Bar drawn behind the selected row.
    pub const ROW_HIGHLIGHT: &str = "row-highlight";
}

/// Class names toggled by the controller.
pub mod classes {
    /// Set on the container when setup is closed.
    pub const ACTIVATED: &str = "activated";
    /// Set on the setup step currently in focus.
    pub const ACTIVE: &str = "active";
    /// Applied to each selector row label.
    pub const ROW: &str = "row";
}

/// Attribute naming the message key for localized elements.
pub const I18N_ATTRIBUTE: &str = "i18n-content";

/// Shared radio group name for the selector rows.
pub const CVD_RADIO_GROUP: &str = "cvdType";

/// Id of the radio input for a CVD type.
#[must_use]
pub fn radio_id(cvd: CvdType) -> String {
    format!("select-{}", cvd.as_str())
}

/// Whether a `document.readyState` value means the DOM has been parsed.
///
/// `DOMContentLoaded` has already fired for both `interactive` and `complete`.
#[must_use]
pub fn dom_parsed(ready_state: &str) -> bool {
    ready_state != "loading"
}

/// Parse a slider or field value, rejecting anything that is not a finite number.
///
/// # Errors
///
/// Returns [`PopupError::InvalidNumber`] naming the control when parsing fails.
pub fn parse_number(id: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| PopupError::InvalidNumber {
            field: id.to_string(),
            value: raw.to_string(),
        })
}

/// Description of one labeled selector row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestRow {
    /// Type selected by this row.
    pub cvd: CvdType,
    /// Id of the radio input.
    pub input_id: String,
    /// Radio group name.
    pub name: &'static str,
    /// Radio value (stored type name).
    pub value: &'static str,
    /// Accessible label for the radio.
    pub aria_label: &'static str,
    /// Visible label text.
    pub text: &'static str,
}

/// Build the row description for a CVD type.
#[must_use]
pub fn create_test_row(cvd: CvdType) -> TestRow {
    TestRow {
        cvd,
        input_id: radio_id(cvd),
        name: CVD_RADIO_GROUP,
        value: cvd.as_str(),
        aria_label: cvd.as_str(),
        text: cvd.label(),
    }
}

/// Element lookup and mutation used by the popup controller.
pub trait Document {
    /// Current value of an input.
    ///
    /// # Errors
    ///
    /// Returns an error when the element is missing or is not an input.
    fn value(&self, id: &str) -> Result<String>;

    /// Replace the value of an input.
    ///
    /// # Errors
    ///
    /// Returns an error when the element is missing or is not an input.
    fn set_value(&mut self, id: &str, value: &str) -> Result<()>;

    /// Set the checked state of a checkbox or radio.
    ///
    /// # Errors
    ///
    /// Returns an error when the element is missing or is not an input.
    fn set_checked(&mut self, id: &str, checked: bool) -> Result<()>;

    /// Enable or disable a control.
    ///
    /// # Errors
    ///
    /// Returns an error when the element is missing or cannot be disabled.
    fn set_disabled(&mut self, id: &str, disabled: bool) -> Result<()>;

    /// Show or hide an element.
    ///
    /// # Errors
    ///
    /// Returns an error when the element is missing.
    fn set_hidden(&mut self, id: &str, hidden: bool) -> Result<()>;

    /// Add (`present == true`) or remove a class.
    ///
    /// # Errors
    ///
    /// Returns an error when the element is missing.
    fn set_class(&mut self, id: &str, class: &str, present: bool) -> Result<()>;

    /// `offsetTop` of the element's parent, in pixels.
    ///
    /// # Errors
    ///
    /// Returns an error when the element or its parent is missing.
    fn parent_offset_top(&self, id: &str) -> Result<i32>;

    /// Position an element by its `top` style, in pixels.
    ///
    /// # Errors
    ///
    /// Returns an error when the element is missing or the style rejects the value.
    fn set_top(&mut self, id: &str, top_px: i32) -> Result<()>;

    /// Append a labeled radio row under `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error when the parent is missing or the row cannot be built.
    fn append_row(&mut self, parent: &str, row: &TestRow) -> Result<()>;

    /// Replace the text of every element carrying [`I18N_ATTRIBUTE`]; returns how many changed.
    ///
    /// # Errors
    ///
    /// Returns an error when the document cannot be queried.
    fn localize(&mut self, localizer: &dyn Localizer) -> Result<usize>;

    /// Force a style recomputation so freshly injected filters apply.
    fn force_restyle(&self);
}

#[cfg(test)]
mod tests {
    use super::{CVD_RADIO_GROUP, create_test_row, dom_parsed, parse_number, radio_id};
    use crate::core::cvd::CvdType;
    use crate::error::PopupError;

    #[test]
    fn test_row_describes_labeled_radio() {
        let row = create_test_row(CvdType::Tritanomaly);
        assert_eq!(row.input_id, "select-TRITANOMALY");
        assert_eq!(row.name, CVD_RADIO_GROUP);
        assert_eq!(row.value, "TRITANOMALY");
        assert_eq!(row.aria_label, "TRITANOMALY");
        assert_eq!(row.text, "Tritanomaly");
    }

    #[test]
    fn radio_ids_are_unique() {
        let a = radio_id(CvdType::Protanomaly);
        let b = radio_id(CvdType::Deuteranomaly);
        assert_ne!(a, b);
    }

    #[test]
    fn slider_values_parse_as_numbers() {
        assert!(matches!(parse_number("severity", " 0.4 "), Ok(value) if (value - 0.4).abs() < f64::EPSILON));
        assert!(matches!(
            parse_number("delta", "NaN"),
            Err(PopupError::InvalidNumber { ref field, .. }) if field == "delta"
        ));
        assert!(parse_number("delta", "").is_err());
    }

    #[test]
    fn interactive_document_counts_as_parsed() {
        assert!(!dom_parsed("loading"));
        assert!(dom_parsed("interactive"));
        assert!(dom_parsed("complete"));
    }
}
