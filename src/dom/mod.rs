//! Capability handles the controllers use instead of touching the page directly.
//!
//! The browser host implements these over `web-sys` in the wasm32-only `web`
//! module; tests and the CLI use the in-memory versions in [`memory`]. A handle
//! being absent from [`crate::app::PageHandles`] is how a missing element is
//! expressed.

use std::rc::Rc;

use crate::app::analytics::EventRecord;
use crate::error::Result;

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

/// The subset of element behaviour the enhancements need.
pub trait PageElement {
    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str) -> Result<()>;

    /// Toggle a class, returning whether it is now present
    fn toggle_class(&self, class: &str) -> Result<bool>;

    fn has_class(&self, class: &str) -> bool;

    fn set_text(&self, text: &str);

    /// Current value of a form control (None for non-inputs)
    fn value(&self) -> Option<String>;

    /// Checked state of a checkbox (false for non-inputs)
    fn is_checked(&self) -> bool;
}

pub type ElementHandle = Rc<dyn PageElement>;

/// Persistent key-value storage (localStorage in the browser).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Append-only analytics queue shared with an external tag manager.
pub trait DataLayer {
    fn push(&self, record: &EventRecord) -> Result<()>;
}
