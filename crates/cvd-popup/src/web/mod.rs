//! Browser wiring: builds the controller over the live popup and attaches event listeners.
//!
//! # Design
//! - The controller sits in one `Rc<RefCell<_>>` shared by every listener.
//! - No borrow is held across the async tab query.
//! - Listeners live as long as the popup page, so they are forgotten once attached.
//! - Handler failures are logged to the console and never abort the popup.

mod bridge;
mod document;

use crate::config::PopupConfig;
use crate::controller::{PopupController, resolve_site};
use crate::core::cvd::CvdType;
use crate::core::dom::{ids, parse_number, radio_id};
use crate::error::{PopupError, Result};
use crate::telemetry::{LoggingConfig, init_logging};
use bridge::{
    ChromeI18n, ChromeWindows, ExtensionBackground, PageFilter, PageSettings, dev_mode_flag,
    log_bridge_error,
};
use document::WebDocument;
use gloo::console;
use gloo::events::EventListener;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::EventTarget;

type Popup = PopupController<WebDocument, PageSettings, PageFilter, ExtensionBackground>;
type SharedPopup = Rc<RefCell<Popup>>;

/// Run popup initialization once the document has finished loading.
#[wasm_bindgen(js_name = initializeOnLoad)]
pub fn initialize_on_load() {
    console_error_panic_hook::set_once();
    let config = PopupConfig::default().with_dev_mode(dev_mode_flag());
    if config.dev_mode {
        let logging = LoggingConfig {
            level: config.log_level(),
            ..LoggingConfig::default()
        };
        if let Err(err) = init_logging(&logging) {
            console::warn!("popup logging unavailable", err.to_string());
        }
    }

    let document = match WebDocument::new(gloo::utils::window()) {
        Ok(document) => document,
        Err(err) => {
            log_error("init", &err);
            return;
        }
    };
    if document.ready() {
        spawn_local(initialize(config, document));
    } else {
        let target = document.raw().clone();
        EventListener::once(&target, "DOMContentLoaded", move |_| {
            spawn_local(initialize(config, document));
        })
        .forget();
    }
}

async fn initialize(config: PopupConfig, document: WebDocument) {
    let popup: SharedPopup = Rc::new(RefCell::new(PopupController::new(
        config.clone(),
        document.clone(),
        PageSettings,
        PageFilter,
        ExtensionBackground,
    )));

    let prepared = popup.borrow_mut().prepare(&ChromeI18n);
    if let Err(err) = prepared.and_then(|()| wire_controls(&popup, &document)) {
        log_error("init", &err);
        return;
    }

    let site = resolve_site(&ChromeWindows, &config).await;
    let started = popup.borrow_mut().start(site);
    match started {
        Ok(outcome) => tracing::debug!(?outcome, "popup initialized"),
        Err(err) => log_error("init", &err),
    }
}

fn wire_controls(popup: &SharedPopup, document: &WebDocument) -> Result<()> {
    let delta = document.input(ids::DELTA)?;
    listen(popup, &delta.clone(), "input", move |popup| {
        popup.on_delta_change(parse_number(ids::DELTA, &delta.value())?)
    });

    let severity = document.input(ids::SEVERITY)?;
    listen(popup, &severity.clone(), "input", move |popup| {
        popup.on_severity_change(parse_number(ids::SEVERITY, &severity.value())?)
    });

    let enable = document.input(ids::ENABLE)?;
    listen(popup, &enable.clone(), "change", move |popup| {
        popup.on_enable_change(enable.checked())
    });

    for cvd in CvdType::ALL {
        let radio = document.input(&radio_id(cvd))?;
        listen(popup, &radio.clone(), "change", move |popup| {
            popup.on_type_change(CvdType::from_stored(&radio.value()))
        });
    }

    listen(popup, &document.element(ids::SETUP)?, "click", Popup::on_setup_click);
    listen(popup, &document.element(ids::RESET)?, "click", Popup::on_reset_click);
    listen(popup, &document.element(ids::OK)?, "click", Popup::on_ok_click);
    listen(popup, &document.element(ids::CANCEL)?, "click", Popup::on_cancel_click);
    Ok(())
}

fn listen<H>(popup: &SharedPopup, target: &EventTarget, event: &'static str, handler: H)
where
    H: Fn(&mut Popup) -> Result<()> + 'static,
{
    let popup = Rc::clone(popup);
    EventListener::new(target, event, move |_| {
        let Ok(mut controller) = popup.try_borrow_mut() else {
            console::warn!("popup busy; dropped event", event);
            return;
        };
        if let Err(err) = handler(&mut *controller) {
            log_error(event, &err);
        }
    })
    .forget();
}

fn log_error(context: &'static str, err: &PopupError) {
    match err {
        PopupError::Bridge { .. } => log_bridge_error(err),
        other => console::error!("popup handler failed", context, other.to_string()),
    }
}
