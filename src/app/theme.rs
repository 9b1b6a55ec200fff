//! Theme management with localStorage persistence.
//!
//! The root element's `data-theme` attribute is the source of truth at runtime;
//! storage only remembers the choice across reloads.

use std::rc::Rc;

use crate::dom::{ElementHandle, PreferenceStore};

pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Theme options
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything other than "dark" (including garbage) is light
    pub fn parse(s: &str) -> Self {
        match s {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

pub struct ThemeController {
    root: ElementHandle,
    store: Rc<dyn PreferenceStore>,
    storage_key: String,
}

impl ThemeController {
    pub fn new(root: ElementHandle, store: Rc<dyn PreferenceStore>, storage_key: &str) -> Self {
        Self {
            root,
            store,
            storage_key: storage_key.to_string(),
        }
    }

    /// Apply the saved theme, or the system preference when nothing is saved.
    /// Call once per page load, before anything else reads the theme.
    pub fn init(&self, prefers_dark: bool) -> Theme {
        let theme = match self.store.get(&self.storage_key) {
            Some(saved) if !saved.is_empty() => Theme::parse(&saved),
            _ => Theme::from_system(prefers_dark),
        };
        self.set_theme(theme);
        theme
    }

    /// Set and persist theme
    pub fn set_theme(&self, theme: Theme) {
        if let Err(e) = self.root.set_attribute(THEME_ATTRIBUTE, theme.as_str()) {
            tracing::warn!("Failed to apply theme {}: {}", theme.as_str(), e);
        }
        if let Err(e) = self.store.set(&self.storage_key, theme.as_str()) {
            tracing::warn!("Failed to persist theme {}: {}", theme.as_str(), e);
        }
    }

    /// Current theme as shown on the page (not as stored)
    pub fn current(&self) -> Theme {
        self.root
            .attribute(THEME_ATTRIBUTE)
            .map(|t| Theme::parse(&t))
            .unwrap_or_default()
    }

    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        tracing::debug!("Theme toggled to {}", next.as_str());
        self.set_theme(next);
        next
    }
}
