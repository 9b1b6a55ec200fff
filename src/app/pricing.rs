//! Monthly/annual billing switch on the pricing page.

use serde_json::json;

use super::analytics::AnalyticsEmitter;
use super::savings::SavingsCalculator;
use crate::dom::ElementHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BillingInterval {
    Monthly,
    Annual,
}

impl BillingInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingInterval::Monthly => "monthly",
            BillingInterval::Annual => "annual",
        }
    }

    pub fn from_checked(checked: bool) -> Self {
        if checked {
            BillingInterval::Annual
        } else {
            BillingInterval::Monthly
        }
    }
}

pub struct PricingToggle {
    switch: ElementHandle,
}

impl PricingToggle {
    pub fn new(switch: Option<ElementHandle>) -> Option<Self> {
        switch.map(|switch| Self { switch })
    }

    pub fn interval(&self) -> BillingInterval {
        BillingInterval::from_checked(self.switch.is_checked())
    }

    /// Track the change, then refresh the calculator whether or not it is on the page
    pub fn on_change(&self, analytics: &AnalyticsEmitter, savings: &SavingsCalculator) {
        let interval = self.interval();
        analytics.track_event("pricing_toggle", json!({ "plan": interval.as_str() }));
        savings.calculate_savings();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SavingsModel;
    use crate::dom::memory::{MemoryDataLayer, MemoryElement};
    use std::rc::Rc;

    #[test]
    fn test_change_tracks_interval_then_recalculates() {
        let switch = Rc::new(MemoryElement::new());
        let toggle = PricingToggle::new(Some(switch.clone() as ElementHandle)).unwrap();
        let sink = Rc::new(MemoryDataLayer::new());
        let analytics = AnalyticsEmitter::new(sink.clone());
        let result = Rc::new(MemoryElement::new());
        let savings = SavingsCalculator::new(
            Some(Rc::new(MemoryElement::input("500")) as ElementHandle),
            None,
            Some(result.clone() as ElementHandle),
            SavingsModel::default(),
        );

        switch.set_checked(true);
        toggle.on_change(&analytics, &savings);
        switch.set_checked(false);
        toggle.on_change(&analytics, &savings);

        let plans: Vec<_> = sink
            .records()
            .iter()
            .map(|r| r.get("plan").cloned())
            .collect();
        assert_eq!(plans, vec![Some(json!("annual")), Some(json!("monthly"))]);
        assert_eq!(result.text(), "620");
    }

    #[test]
    fn test_calculator_absent_still_tracks() {
        let switch = Rc::new(MemoryElement::new());
        let toggle = PricingToggle::new(Some(switch as ElementHandle)).unwrap();
        let sink = Rc::new(MemoryDataLayer::new());
        let analytics = AnalyticsEmitter::new(sink.clone());
        let savings = SavingsCalculator::new(None, None, None, SavingsModel::default());

        toggle.on_change(&analytics, &savings);

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.records()[0].event(), Some("pricing_toggle"));
    }
}
