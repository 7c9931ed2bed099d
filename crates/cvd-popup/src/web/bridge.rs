//! Bindings to the extension scripts and `chrome.*` APIs loaded alongside the popup.

use crate::core::cvd::CvdType;
use crate::core::ports::{
    BackgroundPage, Browser, BrowserWindow, ColorFilter, Localizer, SettingsStore,
};
use crate::error::{PopupError, Result};
use async_trait::async_trait;
use gloo::console;
use js_sys::{Function, JSON, Object, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

const DEV_MODE_GLOBAL: &str = "IS_DEV_MODE";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = getDefaultType)]
    fn get_default_type() -> JsValue;
    #[wasm_bindgen(js_name = setDefaultType)]
    fn set_default_type(value: &str);
    #[wasm_bindgen(js_name = getDefaultSeverity)]
    fn get_default_severity() -> JsValue;
    #[wasm_bindgen(js_name = setDefaultSeverity)]
    fn set_default_severity(value: f64);
    #[wasm_bindgen(js_name = getDefaultDelta)]
    fn get_default_delta() -> JsValue;
    #[wasm_bindgen(js_name = setDefaultDelta)]
    fn set_default_delta(value: f64);
    #[wasm_bindgen(js_name = getDefaultEnable)]
    fn get_default_enable() -> JsValue;
    #[wasm_bindgen(js_name = setDefaultEnable)]
    fn set_default_enable(value: bool);
    #[wasm_bindgen(js_name = getSiteDelta)]
    fn get_site_delta(site: &str) -> JsValue;
    #[wasm_bindgen(js_name = setSiteDelta)]
    fn set_site_delta(site: &str, value: f64);
    #[wasm_bindgen(js_name = resetSiteDeltas)]
    fn reset_site_deltas();
    #[wasm_bindgen(js_name = siteFromUrl)]
    fn page_site_from_url(url: &str) -> JsValue;

    #[wasm_bindgen(js_name = getDefaultCvdCorrectionFilter)]
    fn get_default_cvd_correction_filter(cvd_type: &JsValue, severity: f64) -> JsValue;
    #[wasm_bindgen(js_name = injectColorEnhancementFilter)]
    fn inject_color_enhancement_filter(filter: &JsValue);
    #[wasm_bindgen(js_name = clearColorEnhancementFilter)]
    fn clear_color_enhancement_filter();

    #[wasm_bindgen(catch, js_namespace = ["chrome", "extension"], js_name = getBackgroundPage)]
    fn get_background_page() -> std::result::Result<JsValue, JsValue>;
    #[wasm_bindgen(js_namespace = ["chrome", "i18n"], js_name = getMessage)]
    fn get_message(key: &str) -> JsValue;
    #[wasm_bindgen(catch, js_namespace = ["chrome", "windows"], js_name = getLastFocused)]
    fn get_last_focused(
        options: &JsValue,
        callback: &Function,
    ) -> std::result::Result<(), JsValue>;
}

/// Settings accessors exported by the extension's storage script.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct PageSettings;

impl SettingsStore for PageSettings {
    fn default_type(&self) -> String {
        get_default_type().as_string().unwrap_or_default()
    }

    fn set_default_type(&mut self, value: &str) {
        set_default_type(value);
    }

    fn default_severity(&self) -> f64 {
        number(&get_default_severity())
    }

    fn set_default_severity(&mut self, value: f64) {
        set_default_severity(value);
    }

    fn default_delta(&self) -> f64 {
        number(&get_default_delta())
    }

    fn set_default_delta(&mut self, value: f64) {
        set_default_delta(value);
    }

    fn default_enable(&self) -> bool {
        flag(&get_default_enable())
    }

    fn set_default_enable(&mut self, value: bool) {
        set_default_enable(value);
    }

    fn site_delta(&self, site: &str) -> f64 {
        number(&get_site_delta(site))
    }

    fn set_site_delta(&mut self, site: &str, value: f64) {
        set_site_delta(site, value);
    }

    fn reset_site_deltas(&mut self) {
        reset_site_deltas();
    }
}

/// Correction filter helpers exported by the filter script.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct PageFilter;

impl ColorFilter for PageFilter {
    type Filter = JsValue;

    fn correction_filter(&self, cvd: Option<CvdType>, severity: f64) -> JsValue {
        let cvd = cvd.map_or(JsValue::UNDEFINED, |cvd| JsValue::from_str(cvd.as_str()));
        get_default_cvd_correction_filter(&cvd, severity)
    }

    fn inject(&mut self, filter: &JsValue) {
        inject_color_enhancement_filter(filter);
    }

    fn clear(&mut self) {
        clear_color_enhancement_filter();
    }
}

/// The extension's background page.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ExtensionBackground;

impl BackgroundPage for ExtensionBackground {
    fn update_tabs(&mut self) {
        if let Err(err) = call_update_tabs() {
            log_bridge_error(&err);
        }
    }
}

fn call_update_tabs() -> Result<()> {
    let page = get_background_page().map_err(bridge_error("getBackgroundPage"))?;
    let update = Reflect::get(&page, &JsValue::from_str("updateTabs"))
        .map_err(bridge_error("updateTabs"))?
        .dyn_into::<Function>()
        .map_err(|_| PopupError::Bridge {
            operation: "updateTabs",
            detail: "background page does not expose updateTabs".to_string(),
        })?;
    update.call0(&page).map_err(bridge_error("updateTabs"))?;
    Ok(())
}

/// `chrome.i18n` message lookup.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ChromeI18n;

impl Localizer for ChromeI18n {
    fn message(&self, key: &str) -> String {
        get_message(key).as_string().unwrap_or_default()
    }
}

/// `chrome.windows` queries plus the page's site derivation helper.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ChromeWindows;

#[async_trait(?Send)]
impl Browser for ChromeWindows {
    async fn last_focused_window(&self) -> Result<BrowserWindow> {
        let options = Object::new();
        Reflect::set(&options, &JsValue::from_str("populate"), &JsValue::TRUE)
            .map_err(bridge_error("windows.getLastFocused"))?;
        let options = JsValue::from(options);
        let promise = Promise::new(&mut |resolve, reject| {
            if let Err(err) = get_last_focused(&options, &resolve)
                && let Err(reject_err) = reject.call1(&JsValue::NULL, &err)
            {
                log_bridge_error(&bridge_error("windows.getLastFocused")(reject_err));
            }
        });
        let window = JsFuture::from(promise)
            .await
            .map_err(bridge_error("windows.getLastFocused"))?;
        let encoded: String = JSON::stringify(&window)
            .map_err(bridge_error("JSON.stringify"))?
            .into();
        Ok(serde_json::from_str(&encoded)?)
    }

    fn site_from_url(&self, url: &str) -> String {
        page_site_from_url(url).as_string().unwrap_or_default()
    }
}

/// Whether the page enabled developer mode through its global flag.
pub(crate) fn dev_mode_flag() -> bool {
    Reflect::get(&js_sys::global(), &JsValue::from_str(DEV_MODE_GLOBAL))
        .ok()
        .is_some_and(|value| flag(&value))
}

pub(crate) fn log_bridge_error(err: &PopupError) {
    let detail = match err {
        PopupError::Bridge { operation, detail } => format!("{operation}: {detail}"),
        other => other.to_string(),
    };
    console::error!("extension bridge call failed", detail);
}

fn bridge_error(operation: &'static str) -> impl Fn(JsValue) -> PopupError {
    move |err| PopupError::Bridge {
        operation,
        detail: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}

// Storage scripts may hand back numbers or their string form.
fn number(value: &JsValue) -> f64 {
    value
        .as_f64()
        .or_else(|| value.as_string().and_then(|raw| raw.trim().parse().ok()))
        .unwrap_or_default()
}

fn flag(value: &JsValue) -> bool {
    value
        .as_bool()
        .or_else(|| value.as_string().map(|raw| raw == "true"))
        .unwrap_or(false)
}
