//! Mobile navigation toggle.

use crate::dom::ElementHandle;

const ARIA_EXPANDED: &str = "aria-expanded";
const OPEN_CLASS: &str = "open";

pub struct MenuController {
    button: ElementHandle,
    nav: ElementHandle,
}

impl MenuController {
    /// Both elements are required; without either the menu stays static.
    pub fn new(button: Option<ElementHandle>, nav: Option<ElementHandle>) -> Option<Self> {
        Some(Self {
            button: button?,
            nav: nav?,
        })
    }

    pub fn is_expanded(&self) -> bool {
        self.button.attribute(ARIA_EXPANDED).as_deref() == Some("true")
    }

    pub fn toggle(&self) {
        let expanded = !self.is_expanded();
        let value = if expanded { "true" } else { "false" };
        if let Err(e) = self.button.set_attribute(ARIA_EXPANDED, value) {
            tracing::warn!("Failed to set {}: {}", ARIA_EXPANDED, e);
        }
        if let Err(e) = self.nav.toggle_class(OPEN_CLASS) {
            tracing::warn!("Failed to toggle nav class: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryElement;
    use crate::dom::PageElement;
    use std::rc::Rc;

    #[test]
    fn test_requires_both_elements() {
        let el: ElementHandle = Rc::new(MemoryElement::new());
        assert!(MenuController::new(Some(el.clone()), None).is_none());
        assert!(MenuController::new(None, Some(el)).is_none());
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let button = Rc::new(MemoryElement::new().with_attribute(ARIA_EXPANDED, "false"));
        let nav = Rc::new(MemoryElement::new());
        let menu = MenuController::new(
            Some(button.clone() as ElementHandle),
            Some(nav.clone() as ElementHandle),
        )
        .unwrap();

        menu.toggle();
        assert!(menu.is_expanded());
        assert!(nav.has_class(OPEN_CLASS));

        menu.toggle();
        assert_eq!(button.attribute(ARIA_EXPANDED).as_deref(), Some("false"));
        assert!(!nav.has_class(OPEN_CLASS));
    }

    #[test]
    fn test_missing_aria_reads_as_collapsed() {
        let button = Rc::new(MemoryElement::new());
        let nav: ElementHandle = Rc::new(MemoryElement::new());
        let menu = MenuController::new(Some(button.clone() as ElementHandle), Some(nav)).unwrap();
        assert!(!menu.is_expanded());
        menu.toggle();
        assert_eq!(button.attribute(ARIA_EXPANDED).as_deref(), Some("true"));
    }
}
