//! `web-sys` implementations of the page capabilities.

use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

use super::{DataLayer, PageElement, PreferenceStore};
use crate::app::analytics::EventRecord;
use crate::error::{Error, Result};

const DATA_LAYER_KEY: &str = "dataLayer";

fn js_err(e: JsValue) -> String {
    format!("{:?}", e)
}

/// A live DOM element
#[derive(Clone)]
pub struct WebElement(pub web_sys::Element);

impl PageElement for WebElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
        self.0
            .set_attribute(name, value)
            .map_err(|e| Error::Dom(js_err(e)))
    }

    fn toggle_class(&self, class: &str) -> Result<bool> {
        self.0
            .class_list()
            .toggle(class)
            .map_err(|e| Error::Dom(js_err(e)))
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn value(&self) -> Option<String> {
        self.0
            .dyn_ref::<web_sys::HtmlInputElement>()
            .map(|input| input.value())
    }

    fn is_checked(&self) -> bool {
        self.0
            .dyn_ref::<web_sys::HtmlInputElement>()
            .map(|input| input.checked())
            .unwrap_or(false)
    }
}

/// window.localStorage, if the browser grants it
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        Self { storage }
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| Error::Storage("localStorage unavailable".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| Error::Storage(js_err(e)))
    }
}

/// `window.dataLayer`, the queue Google Tag Manager drains.
pub struct WindowDataLayer;

impl WindowDataLayer {
    /// Return the existing queue, creating it when the tag manager has not
    /// loaded yet. The tag manager adopts whatever array it finds.
    fn queue(window: &web_sys::Window) -> Result<js_sys::Array> {
        let existing = js_sys::Reflect::get(window, &JsValue::from_str(DATA_LAYER_KEY))
            .map_err(|e| Error::DataLayer(js_err(e)))?;
        if js_sys::Array::is_array(&existing) {
            return existing
                .dyn_into::<js_sys::Array>()
                .map_err(|e| Error::DataLayer(js_err(e)));
        }

        let queue = js_sys::Array::new();
        js_sys::Reflect::set(window, &JsValue::from_str(DATA_LAYER_KEY), &queue)
            .map_err(|e| Error::DataLayer(js_err(e)))?;
        Ok(queue)
    }
}

impl DataLayer for WindowDataLayer {
    fn push(&self, record: &EventRecord) -> Result<()> {
        let window = web_sys::window().ok_or_else(|| Error::DataLayer("No window".to_string()))?;
        let queue = Self::queue(&window)?;

        // Plain objects, not Maps: the tag manager reads properties
        let value = record
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| Error::DataLayer(e.to_string()))?;
        queue.push(&value);

        web_sys::console::log_2(&"Event Pushed:".into(), &value);
        Ok(())
    }
}

/// `(prefers-color-scheme: dark)`, read once at startup
pub fn prefers_dark_scheme() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|mql| mql.matches())
        .unwrap_or(false)
}
