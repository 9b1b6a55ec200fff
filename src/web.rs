//! Browser entry points: resolve elements, activate, attach listeners.
//!
//! The loader calls `start()` or `start_with_config(json)` once after
//! instantiating the module. Later calls are ignored.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::app::{Binding, Enhancements, PageHandles, Services};
use crate::config::SiteConfig;
use crate::dom::web::{prefers_dark_scheme, LocalStorage, WebElement, WindowDataLayer};
use crate::dom::ElementHandle;

/// Optional `<script type="application/json" id="subscribely-config">` overriding defaults
const CONFIG_ELEMENT_ID: &str = "subscribely-config";

thread_local! {
    /// Set by the first start; listeners must not be attached twice
    static ACTIVATED: Cell<bool> = const { Cell::new(false) };
}

/// Raw elements kept next to their handles so listeners can be attached
struct WebPage {
    root: web_sys::Element,
    theme_toggle: Option<web_sys::Element>,
    menu_toggle: Option<web_sys::Element>,
    nav: Option<web_sys::Element>,
    pricing_toggle: Option<web_sys::Element>,
    monthly_spend: Option<web_sys::Element>,
    spend_value: Option<web_sys::Element>,
    savings_result: Option<web_sys::Element>,
    ctas: Vec<web_sys::Element>,
}

fn handle(el: &Option<web_sys::Element>) -> Option<ElementHandle> {
    el.clone()
        .map(|el| Rc::new(WebElement(el)) as ElementHandle)
}

impl WebPage {
    fn query(document: &web_sys::Document, config: &SiteConfig) -> Result<Self, JsValue> {
        let find = |selector: &str| document.query_selector(selector).ok().flatten();
        let selectors = &config.selectors;

        let root = document
            .document_element()
            .ok_or_else(|| JsValue::from_str("document has no root element"))?;

        let nodes = document.query_selector_all(&selectors.cta())?;
        let ctas = (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .collect();

        Ok(Self {
            root,
            theme_toggle: find(&selectors.theme_toggle),
            menu_toggle: find(&selectors.menu_toggle),
            nav: find(&selectors.nav),
            pricing_toggle: find(&selectors.pricing_toggle),
            monthly_spend: find(&selectors.monthly_spend),
            spend_value: find(&selectors.spend_value),
            savings_result: find(&selectors.savings_result),
            ctas,
        })
    }

    fn handles(&self) -> PageHandles {
        PageHandles {
            root: Rc::new(WebElement(self.root.clone())),
            theme_toggle: handle(&self.theme_toggle),
            menu_toggle: handle(&self.menu_toggle),
            nav: handle(&self.nav),
            pricing_toggle: handle(&self.pricing_toggle),
            monthly_spend: handle(&self.monthly_spend),
            spend_value: handle(&self.spend_value),
            savings_result: handle(&self.savings_result),
            ctas: self
                .ctas
                .iter()
                .map(|el| Rc::new(WebElement(el.clone())) as ElementHandle)
                .collect(),
        }
    }

    fn target(&self, binding: Binding) -> Option<&web_sys::Element> {
        match binding {
            Binding::ThemeToggle => self.theme_toggle.as_ref(),
            Binding::MenuToggle => self.menu_toggle.as_ref(),
            Binding::PricingToggle => self.pricing_toggle.as_ref(),
            Binding::SpendSlider => self.monthly_spend.as_ref(),
            Binding::Cta(index) => self.ctas.get(index),
        }
    }
}

/// Config embedded in the page, if any. A broken block falls back to defaults.
fn embedded_config(document: &web_sys::Document) -> SiteConfig {
    document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .map(|text| SiteConfig::from_json_or_default(&text))
        .unwrap_or_default()
}

fn activate(document: &web_sys::Document, config: &SiteConfig) -> Result<(), JsValue> {
    if ACTIVATED.with(|done| done.replace(true)) {
        tracing::warn!("Page enhancements already active, ignoring second start");
        return Ok(());
    }

    let page = WebPage::query(document, config)?;

    let services = Services {
        store: Rc::new(LocalStorage::new()),
        data_layer: Rc::new(WindowDataLayer),
        prefers_dark: prefers_dark_scheme(),
    };
    let enhancements = Rc::new(Enhancements::activate(config, page.handles(), services));

    for binding in enhancements.bindings() {
        let Some(target) = page.target(binding) else {
            continue;
        };
        let enhancements = enhancements.clone();
        let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            enhancements.dispatch(binding);
        });
        target.add_event_listener_with_callback(
            binding.event_name(),
            listener.as_ref().unchecked_ref(),
        )?;
        // Listeners live as long as the page
        listener.forget();
    }
    Ok(())
}

/// Activate now, or on DOMContentLoaded while the document is still parsing.
/// `config` is resolved once the document is ready.
fn when_ready(
    resolve: impl FnOnce(&web_sys::Document) -> SiteConfig + 'static,
) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document"))?;

    if document.ready_state() != "loading" {
        let config = resolve(&document);
        return activate(&document, &config);
    }

    let doc = document.clone();
    let on_ready = Closure::once(move || {
        let config = resolve(&doc);
        if let Err(e) = activate(&doc, &config) {
            web_sys::console::error_2(&"Page enhancements failed:".into(), &e);
        }
    });
    document.add_event_listener_with_callback(
        "DOMContentLoaded",
        on_ready.as_ref().unchecked_ref(),
    )?;
    on_ready.forget();
    Ok(())
}

/// Start with the config in `<script type="application/json" id="subscribely-config">`,
/// or the defaults when the page has none.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    when_ready(embedded_config)
}

/// Start with a config passed by the loader script.
///
/// A malformed config still starts the page on defaults, then rejects so the
/// loader sees the error.
#[wasm_bindgen]
pub fn start_with_config(json: &str) -> Result<(), JsValue> {
    match SiteConfig::from_json(json) {
        Ok(config) => when_ready(move |_| config),
        Err(e) => {
            tracing::warn!("Invalid site config, starting with defaults: {}", e);
            when_ready(|_| SiteConfig::default())?;
            Err(JsValue::from_str(&e.to_string()))
        }
    }
}
