//! Configuration management
//!
//! Every field has a default matching the production markup, so an empty
//! config (or none at all) yields a working site.

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// localStorage key holding the theme preference
    pub storage_key: String,
    pub selectors: Selectors,
    pub savings: SavingsModel,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            selectors: Selectors::default(),
            savings: SavingsModel::default(),
        }
    }
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON config, e.g. one embedded in the page.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Like [`SiteConfig::from_json`], but a broken config degrades to the
    /// defaults instead of taking the whole page down with it.
    pub fn from_json_or_default(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            tracing::warn!("Ignoring site config, using defaults: {}", e);
            Self::default()
        })
    }
}

/// CSS selectors used to find the elements each controller drives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub theme_toggle: String,
    pub menu_toggle: String,
    pub nav: String,
    pub pricing_toggle: String,
    pub monthly_spend: String,
    pub spend_value: String,
    pub savings_result: String,
    /// Attribute carrying a CTA id; every element with it is tracked
    pub cta_attribute: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            theme_toggle: "#themeToggle".to_string(),
            menu_toggle: ".mobile-menu-toggle".to_string(),
            nav: "#mainNav".to_string(),
            pricing_toggle: "#pricingToggle".to_string(),
            monthly_spend: "#monthlySpend".to_string(),
            spend_value: "#spendValue".to_string(),
            savings_result: "#savingsResult".to_string(),
            cta_attribute: "data-cta".to_string(),
        }
    }
}

impl Selectors {
    pub fn cta(&self) -> String {
        format!("[{}]", self.cta_attribute)
    }
}

/// Constants behind the savings estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsModel {
    /// Monthly premium x 12 minus the annual price ($59.88 - $39)
    pub plan_savings: f64,
    pub months_per_year: f64,
    /// Share of yearly spend the optimizer is assumed to recover
    pub optimization_rate: f64,
    pub thousands_separator: String,
}

impl Default for SavingsModel {
    fn default() -> Self {
        Self {
            plan_savings: 20.88,
            months_per_year: 12.0,
            optimization_rate: 0.10,
            thousands_separator: ",".to_string(),
        }
    }
}

/// Get config directory (SUBSCRIBELY_CONFIG_DIR or the working directory)
#[cfg(feature = "cli")]
pub fn get_config_dir() -> std::path::PathBuf {
    if let Ok(dir) = std::env::var("SUBSCRIBELY_CONFIG_DIR") {
        return std::path::PathBuf::from(dir);
    }
    std::path::PathBuf::from(".")
}

/// Load config: defaults, then `subscribely.*` in the config dir, then
/// `SUBSCRIBELY_*` environment overrides (`SUBSCRIBELY_SAVINGS__PLAN_SAVINGS`).
#[cfg(feature = "cli")]
pub fn load_config() -> anyhow::Result<SiteConfig> {
    let config_dir = get_config_dir();

    let config = ::config::Config::builder()
        .add_source(
            ::config::File::with_name(&config_dir.join("subscribely").to_string_lossy())
                .required(false),
        )
        .add_source(
            ::config::Environment::with_prefix("SUBSCRIBELY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}
