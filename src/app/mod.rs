//! Page enhancement entry point.
//!
//! The host resolves elements into [`PageHandles`] once the document is ready,
//! calls [`Enhancements::activate`], attaches a listener for every
//! [`Binding`] it gets back, and routes each event through
//! [`Enhancements::dispatch`].

use std::rc::Rc;

use crate::config::SiteConfig;
use crate::dom::{DataLayer, ElementHandle, PreferenceStore};

pub mod analytics;
pub mod menu;
pub mod pricing;
pub mod savings;
pub mod theme;

use analytics::{AnalyticsEmitter, CtaTarget};
use menu::MenuController;
use pricing::PricingToggle;
use savings::SavingsCalculator;
use theme::ThemeController;

/// Elements found on the current page. Absent elements disable their feature.
#[derive(Clone)]
pub struct PageHandles {
    /// The document element; always present
    pub root: ElementHandle,
    pub theme_toggle: Option<ElementHandle>,
    pub menu_toggle: Option<ElementHandle>,
    pub nav: Option<ElementHandle>,
    pub pricing_toggle: Option<ElementHandle>,
    pub monthly_spend: Option<ElementHandle>,
    pub spend_value: Option<ElementHandle>,
    pub savings_result: Option<ElementHandle>,
    pub ctas: Vec<ElementHandle>,
}

impl PageHandles {
    /// A page with nothing on it but the root
    pub fn new(root: ElementHandle) -> Self {
        Self {
            root,
            theme_toggle: None,
            menu_toggle: None,
            nav: None,
            pricing_toggle: None,
            monthly_spend: None,
            spend_value: None,
            savings_result: None,
            ctas: Vec::new(),
        }
    }
}

/// Process-wide state, injected so tests can observe it
#[derive(Clone)]
pub struct Services {
    pub store: Rc<dyn PreferenceStore>,
    pub data_layer: Rc<dyn DataLayer>,
    /// Result of the `prefers-color-scheme: dark` query at startup
    pub prefers_dark: bool,
}

/// A listener the host must attach: which element, which DOM event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    ThemeToggle,
    MenuToggle,
    PricingToggle,
    SpendSlider,
    /// Index into [`PageHandles::ctas`]
    Cta(usize),
}

impl Binding {
    pub fn event_name(&self) -> &'static str {
        match self {
            Binding::PricingToggle => "change",
            Binding::SpendSlider => "input",
            Binding::ThemeToggle | Binding::MenuToggle | Binding::Cta(_) => "click",
        }
    }
}

pub struct Enhancements {
    theme: ThemeController,
    theme_toggle: bool,
    menu: Option<MenuController>,
    pricing: Option<PricingToggle>,
    savings: SavingsCalculator,
    analytics: AnalyticsEmitter,
    ctas: Vec<CtaTarget>,
}

impl Enhancements {
    /// Wire every feature against the page. Runs theme init first and renders
    /// the initial savings figure when the slider is present.
    pub fn activate(config: &SiteConfig, page: PageHandles, services: Services) -> Self {
        let theme = ThemeController::new(page.root, services.store, &config.storage_key);
        let initial = theme.init(services.prefers_dark);

        let enhancements = Self {
            theme,
            theme_toggle: page.theme_toggle.is_some(),
            menu: MenuController::new(page.menu_toggle, page.nav),
            pricing: PricingToggle::new(page.pricing_toggle),
            savings: SavingsCalculator::new(
                page.monthly_spend,
                page.spend_value,
                page.savings_result,
                config.savings.clone(),
            ),
            analytics: AnalyticsEmitter::new(services.data_layer),
            ctas: page
                .ctas
                .into_iter()
                .map(|el| CtaTarget::new(el, &config.selectors.cta_attribute))
                .collect(),
        };

        if enhancements.savings.has_slider() {
            enhancements.savings.calculate_savings();
        }

        tracing::info!(
            theme = initial.as_str(),
            bindings = enhancements.bindings().len(),
            "Page enhancements active"
        );
        enhancements
    }

    /// Listeners to attach, in registration order
    pub fn bindings(&self) -> Vec<Binding> {
        let mut bindings = Vec::new();
        if self.theme_toggle {
            bindings.push(Binding::ThemeToggle);
        }
        if self.menu.is_some() {
            bindings.push(Binding::MenuToggle);
        }
        if self.pricing.is_some() {
            bindings.push(Binding::PricingToggle);
        }
        if self.savings.has_slider() {
            bindings.push(Binding::SpendSlider);
        }
        bindings.extend((0..self.ctas.len()).map(Binding::Cta));
        bindings
    }

    /// Run the handler for an event on a bound element
    pub fn dispatch(&self, binding: Binding) {
        match binding {
            Binding::ThemeToggle => {
                self.theme.toggle();
            }
            Binding::MenuToggle => {
                if let Some(menu) = &self.menu {
                    menu.toggle();
                }
            }
            Binding::PricingToggle => {
                if let Some(pricing) = &self.pricing {
                    pricing.on_change(&self.analytics, &self.savings);
                }
            }
            Binding::SpendSlider => {
                self.savings.calculate_savings();
            }
            Binding::Cta(index) => match self.ctas.get(index) {
                Some(cta) => self.analytics.track_cta_click(cta),
                None => tracing::warn!("No CTA bound at index {}", index),
            },
        }
    }

    pub fn theme(&self) -> &ThemeController {
        &self.theme
    }

    pub fn savings(&self) -> &SavingsCalculator {
        &self.savings
    }

    pub fn analytics(&self) -> &AnalyticsEmitter {
        &self.analytics
    }
}
