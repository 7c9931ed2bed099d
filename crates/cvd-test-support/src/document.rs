//! In-memory element registry standing in for the popup document.

use cvd_popup::core::dom::{Document, TestRow, classes, ids};
use cvd_popup::core::ports::Localizer;
use cvd_popup::{PopupError, Result};
use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};

/// Vertical spacing between appended selector rows, in pixels.
pub const ROW_SPACING_PX: i32 = 30;

/// State of one fake element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FakeElement {
    /// Input value.
    pub value: String,
    /// Checked state for checkboxes and radios.
    pub checked: bool,
    /// Disabled flag.
    pub disabled: bool,
    /// Hidden flag.
    pub hidden: bool,
    /// Class list.
    pub classes: BTreeSet<String>,
    /// Text content.
    pub text: String,
    /// Localization key carried by the element.
    pub i18n_key: Option<String>,
    /// `offsetTop` of the element.
    pub offset_top: i32,
    /// `top` style last applied, in pixels.
    pub top_px: Option<i32>,
    /// Parent element id.
    pub parent: Option<String>,
    /// Radio group name, for appended rows.
    pub name: Option<String>,
    /// Accessible label, for appended rows.
    pub aria_label: Option<String>,
    /// Child element ids in insertion order.
    pub children: Vec<String>,
}

/// Fake [`Document`] keyed by element id.
#[derive(Debug, Default)]
pub struct FakeDocument {
    elements: BTreeMap<String, FakeElement>,
    restyles: Cell<usize>,
}

impl FakeDocument {
    /// Registry with every element the popup markup provides.
    #[must_use]
    pub fn popup() -> Self {
        let mut doc = Self::default();
        for id in [
            ids::FLEX_CONTAINER,
            ids::ENABLE,
            ids::SETUP,
            ids::RESET,
            ids::OK,
            ids::CANCEL,
            ids::FIRST_STEP,
            ids::SECOND_STEP,
            ids::SWATCHES,
            ids::ROW_HIGHLIGHT,
        ] {
            doc.insert(id, FakeElement::default());
        }
        for id in [ids::DELTA, ids::SEVERITY] {
            doc.insert(
                id,
                FakeElement {
                    value: "0".to_string(),
                    ..FakeElement::default()
                },
            );
        }
        doc.insert(
            "title",
            FakeElement {
                i18n_key: Some("appName".to_string()),
                ..FakeElement::default()
            },
        );
        doc.insert(
            "severity-label",
            FakeElement {
                i18n_key: Some("severityLabel".to_string()),
                ..FakeElement::default()
            },
        );
        doc
    }

    /// Remove an element to simulate incomplete markup.
    #[must_use]
    pub fn without(mut self, id: &str) -> Self {
        self.elements.remove(id);
        self
    }

    /// Insert or replace an element.
    pub fn insert(&mut self, id: &str, element: FakeElement) {
        self.elements.insert(id.to_string(), element);
    }

    /// Element state by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FakeElement> {
        self.elements.get(id)
    }

    /// Whether the element carries a class.
    #[must_use]
    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.get(id).is_some_and(|el| el.classes.contains(class))
    }

    /// Whether the element is disabled.
    #[must_use]
    pub fn is_disabled(&self, id: &str) -> bool {
        self.get(id).is_some_and(|el| el.disabled)
    }

    /// Whether the element is hidden.
    #[must_use]
    pub fn is_hidden(&self, id: &str) -> bool {
        self.get(id).is_some_and(|el| el.hidden)
    }

    /// Whether the element is checked.
    #[must_use]
    pub fn checked(&self, id: &str) -> bool {
        self.get(id).is_some_and(|el| el.checked)
    }

    /// Raw value of an input, empty when missing.
    #[must_use]
    pub fn value_of(&self, id: &str) -> String {
        self.get(id).map(|el| el.value.clone()).unwrap_or_default()
    }

    /// Number of forced style recomputations.
    #[must_use]
    pub fn restyles(&self) -> usize {
        self.restyles.get()
    }

    fn lookup(&self, id: &str) -> Result<&FakeElement> {
        self.elements.get(id).ok_or_else(|| PopupError::missing(id))
    }

    fn lookup_mut(&mut self, id: &str) -> Result<&mut FakeElement> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| PopupError::missing(id))
    }
}

impl Document for FakeDocument {
    fn value(&self, id: &str) -> Result<String> {
        Ok(self.lookup(id)?.value.clone())
    }

    fn set_value(&mut self, id: &str, value: &str) -> Result<()> {
        self.lookup_mut(id)?.value = value.to_string();
        Ok(())
    }

    fn set_checked(&mut self, id: &str, checked: bool) -> Result<()> {
        self.lookup_mut(id)?.checked = checked;
        Ok(())
    }

    fn set_disabled(&mut self, id: &str, disabled: bool) -> Result<()> {
        self.lookup_mut(id)?.disabled = disabled;
        Ok(())
    }

    fn set_hidden(&mut self, id: &str, hidden: bool) -> Result<()> {
        self.lookup_mut(id)?.hidden = hidden;
        Ok(())
    }

    fn set_class(&mut self, id: &str, class: &str, present: bool) -> Result<()> {
        let element = self.lookup_mut(id)?;
        if present {
            element.classes.insert(class.to_string());
        } else {
            element.classes.remove(class);
        }
        Ok(())
    }

    fn parent_offset_top(&self, id: &str) -> Result<i32> {
        let parent = self
            .lookup(id)?
            .parent
            .clone()
            .ok_or_else(|| PopupError::missing(&format!("{id} (parent)")))?;
        Ok(self.lookup(&parent)?.offset_top)
    }

    fn set_top(&mut self, id: &str, top_px: i32) -> Result<()> {
        self.lookup_mut(id)?.top_px = Some(top_px);
        Ok(())
    }

    fn append_row(&mut self, parent: &str, row: &TestRow) -> Result<()> {
        let position = i32::try_from(self.lookup(parent)?.children.len()).unwrap_or(i32::MAX);
        let label_id = format!("{}-row", row.input_id);
        self.insert(
            &label_id,
            FakeElement {
                classes: BTreeSet::from([classes::ROW.to_string()]),
                text: row.text.to_string(),
                offset_top: ROW_SPACING_PX.saturating_mul(position.saturating_add(1)),
                parent: Some(parent.to_string()),
                children: vec![row.input_id.clone()],
                ..FakeElement::default()
            },
        );
        self.insert(
            &row.input_id,
            FakeElement {
                value: row.value.to_string(),
                parent: Some(label_id.clone()),
                name: Some(row.name.to_string()),
                aria_label: Some(row.aria_label.to_string()),
                ..FakeElement::default()
            },
        );
        self.lookup_mut(parent)?.children.push(label_id);
        Ok(())
    }

    fn localize(&mut self, localizer: &dyn Localizer) -> Result<usize> {
        let mut localized = 0;
        for element in self.elements.values_mut() {
            if let Some(key) = &element.i18n_key {
                element.text = localizer.message(key);
                localized += 1;
            }
        }
        Ok(localized)
    }

    fn force_restyle(&self) {
        self.restyles.set(self.restyles.get() + 1);
    }
}
