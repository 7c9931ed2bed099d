//! [`Document`] backed by the live popup DOM.

use crate::core::dom::{Document, I18N_ATTRIBUTE, TestRow, classes, dom_parsed};
use crate::core::ports::Localizer;
use crate::error::{PopupError, Result};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, HtmlInputElement, Window};

/// Handle to the popup document; clones share the same DOM.
#[derive(Clone, Debug)]
pub(crate) struct WebDocument {
    window: Window,
    document: web_sys::Document,
}

impl WebDocument {
    pub(crate) fn new(window: Window) -> Result<Self> {
        let document = window.document().ok_or_else(|| PopupError::Bridge {
            operation: "window.document",
            detail: "popup window has no document".to_string(),
        })?;
        Ok(Self { window, document })
    }

    pub(crate) fn ready(&self) -> bool {
        dom_parsed(&self.document.ready_state())
    }

    pub(crate) const fn raw(&self) -> &web_sys::Document {
        &self.document
    }

    pub(crate) fn element(&self, id: &str) -> Result<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| PopupError::missing(id))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| PopupError::UnexpectedElement {
                id: id.to_string(),
                expected: "HtmlElement",
            })
    }

    pub(crate) fn input(&self, id: &str) -> Result<HtmlInputElement> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| PopupError::missing(id))?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| PopupError::UnexpectedElement {
                id: id.to_string(),
                expected: "HtmlInputElement",
            })
    }

    fn create<T: JsCast>(&self, tag: &'static str) -> Result<T> {
        self.document
            .create_element(tag)
            .map_err(dom_error("createElement"))?
            .dyn_into::<T>()
            .map_err(|_| PopupError::Bridge {
                operation: "createElement",
                detail: format!("<{tag}> has an unexpected element type"),
            })
    }
}

impl Document for WebDocument {
    fn value(&self, id: &str) -> Result<String> {
        Ok(self.input(id)?.value())
    }

    fn set_value(&mut self, id: &str, value: &str) -> Result<()> {
        self.input(id)?.set_value(value);
        Ok(())
    }

    fn set_checked(&mut self, id: &str, checked: bool) -> Result<()> {
        self.input(id)?.set_checked(checked);
        Ok(())
    }

    fn set_disabled(&mut self, id: &str, disabled: bool) -> Result<()> {
        // Covers both inputs and buttons.
        self.element(id)?
            .toggle_attribute_with_force("disabled", disabled)
            .map_err(dom_error("toggleAttribute"))?;
        Ok(())
    }

    fn set_hidden(&mut self, id: &str, hidden: bool) -> Result<()> {
        self.element(id)?.set_hidden(hidden);
        Ok(())
    }

    fn set_class(&mut self, id: &str, class: &str, present: bool) -> Result<()> {
        self.element(id)?
            .class_list()
            .toggle_with_force(class, present)
            .map_err(dom_error("classList.toggle"))?;
        Ok(())
    }

    fn parent_offset_top(&self, id: &str) -> Result<i32> {
        let parent = self
            .element(id)?
            .parent_element()
            .ok_or_else(|| PopupError::missing(&format!("{id} (parent)")))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| PopupError::UnexpectedElement {
                id: format!("{id} (parent)"),
                expected: "HtmlElement",
            })?;
        Ok(parent.offset_top())
    }

    fn set_top(&mut self, id: &str, top_px: i32) -> Result<()> {
        self.element(id)?
            .style()
            .set_property("top", &format!("{top_px}px"))
            .map_err(dom_error("style.top"))
    }

    fn append_row(&mut self, parent: &str, row: &TestRow) -> Result<()> {
        let container = self.element(parent)?;
        let label: HtmlElement = self.create("label")?;
        label
            .class_list()
            .add_1(classes::ROW)
            .map_err(dom_error("classList.add"))?;

        let button: HtmlInputElement = self.create("input")?;
        button.set_id(&row.input_id);
        button.set_name(row.name);
        button.set_type("radio");
        button.set_value(row.value);
        button.set_checked(false);
        button
            .set_attribute("aria-label", row.aria_label)
            .map_err(dom_error("setAttribute"))?;
        label
            .append_child(&button)
            .map_err(dom_error("appendChild"))?;

        let text = self.document.create_text_node(row.text);
        label.append_child(&text).map_err(dom_error("appendChild"))?;
        container
            .append_child(&label)
            .map_err(dom_error("appendChild"))?;
        Ok(())
    }

    fn localize(&mut self, localizer: &dyn Localizer) -> Result<usize> {
        let nodes = self
            .document
            .query_selector_all(&format!("[{I18N_ATTRIBUTE}]"))
            .map_err(dom_error("querySelectorAll"))?;
        let mut localized = 0;
        for index in 0..nodes.length() {
            let Some(element) = nodes
                .item(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            if let Some(key) = element.get_attribute(I18N_ATTRIBUTE) {
                element.set_text_content(Some(&localizer.message(&key)));
                localized += 1;
            }
        }
        Ok(localized)
    }

    fn force_restyle(&self) {
        if let Some(root) = self.document.document_element() {
            let _ = self.window.get_computed_style(&root);
        }
    }
}

fn dom_error(operation: &'static str) -> impl Fn(JsValue) -> PopupError {
    move |err| PopupError::Bridge {
        operation,
        detail: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}
