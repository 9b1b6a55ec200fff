//! In-memory page used by tests and the CLI.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};

use super::{DataLayer, PageElement, PreferenceStore};
use crate::app::analytics::EventRecord;
use crate::error::{Error, Result};

/// A detached element with attributes, classes, text and form state.
#[derive(Debug, Default)]
pub struct MemoryElement {
    attributes: RefCell<HashMap<String, String>>,
    classes: RefCell<BTreeSet<String>>,
    text: RefCell<String>,
    value: RefCell<Option<String>>,
    checked: Cell<bool>,
    /// Number of writes (attribute, class, text) made through the trait
    mutations: Cell<usize>,
}

impl MemoryElement {
    pub fn new() -> Self {
        Self::default()
    }

    /// A form control with an initial value (e.g. a range slider)
    pub fn input(value: &str) -> Self {
        let el = Self::default();
        el.set_value(value);
        el
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Simulate the visitor moving a slider or typing
    pub fn set_value(&self, value: &str) {
        *self.value.borrow_mut() = Some(value.to_string());
    }

    /// Simulate the visitor flipping a checkbox
    pub fn set_checked(&self, checked: bool) {
        self.checked.set(checked);
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn mutations(&self) -> usize {
        self.mutations.get()
    }
}

impl PageElement for MemoryElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        self.mutations.set(self.mutations.get() + 1);
        Ok(())
    }

    fn toggle_class(&self, class: &str) -> Result<bool> {
        let mut classes = self.classes.borrow_mut();
        let present = if classes.remove(class) {
            false
        } else {
            classes.insert(class.to_string());
            true
        };
        self.mutations.set(self.mutations.get() + 1);
        Ok(present)
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
        self.mutations.set(self.mutations.get() + 1);
    }

    fn value(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    fn is_checked(&self) -> bool {
        self.checked.get()
    }
}

/// Key-value store standing in for localStorage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
    read_only: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes, like a browser with storage disabled
    pub fn read_only() -> Self {
        let storage = Self::default();
        storage.read_only.set(true);
        storage
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.read_only.get() {
            return Err(Error::Storage("storage is read-only".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Ordered record of everything pushed to the data layer.
#[derive(Debug, Default)]
pub struct MemoryDataLayer {
    records: RefCell<Vec<EventRecord>>,
}

impl MemoryDataLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<EventRecord> {
        self.records.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl DataLayer for MemoryDataLayer {
    fn push(&self, record: &EventRecord) -> Result<()> {
        self.records.borrow_mut().push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_class_reports_presence() {
        let el = MemoryElement::new();
        assert!(el.toggle_class("open").unwrap());
        assert!(el.has_class("open"));
        assert!(!el.toggle_class("open").unwrap());
        assert!(!el.has_class("open"));
        assert_eq!(el.mutations(), 2);
    }

    #[test]
    fn test_read_only_storage_rejects_writes() {
        let storage = MemoryStorage::read_only().with_entry("theme", "dark");
        assert!(storage.set("theme", "light").is_err());
        assert_eq!(storage.get("theme").as_deref(), Some("dark"));
    }
}
