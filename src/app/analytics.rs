//! Analytics events pushed to the tag manager's data layer.

use std::rc::Rc;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::dom::{DataLayer, ElementHandle};

/// One data-layer entry: `{event: name, ...params}`.
///
/// Params are spread after `event`, so a param named `event` replaces it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EventRecord(Map<String, Value>);

impl EventRecord {
    pub fn new(event_name: &str, params: Value) -> Self {
        let mut fields = Map::new();
        fields.insert("event".to_string(), Value::String(event_name.to_string()));
        match params {
            Value::Object(params) => fields.extend(params),
            Value::Null => {}
            other => {
                tracing::warn!("Ignoring non-object params for {}: {}", event_name, other);
            }
        }
        Self(fields)
    }

    pub fn event(&self) -> Option<&str> {
        self.0.get("event").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Plan a pricing CTA points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanType {
    Free,
    Annual,
    Monthly,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Free => "free",
            PlanType::Annual => "annual",
            PlanType::Monthly => "monthly",
        }
    }

    /// Classify a CTA id; None unless it is a pricing CTA.
    /// "monthly" is checked last, so it wins over "annual".
    pub fn from_cta_id(cta_id: &str) -> Option<Self> {
        if !cta_id.contains("pricing") {
            return None;
        }
        let mut plan = PlanType::Free;
        if cta_id.contains("annual") {
            plan = PlanType::Annual;
        }
        if cta_id.contains("monthly") {
            plan = PlanType::Monthly;
        }
        Some(plan)
    }
}

/// Appends events to the shared data layer.
#[derive(Clone)]
pub struct AnalyticsEmitter {
    sink: Rc<dyn DataLayer>,
}

impl AnalyticsEmitter {
    pub fn new(sink: Rc<dyn DataLayer>) -> Self {
        Self { sink }
    }

    /// Push `{event, ...params}`. Never fails from the caller's side.
    pub fn track_event(&self, event_name: &str, params: Value) {
        let record = EventRecord::new(event_name, params);
        tracing::debug!(event = event_name, params = ?record.fields(), "Event pushed");
        if let Err(e) = self.sink.push(&record) {
            tracing::warn!("Failed to push {} to data layer: {}", event_name, e);
        }
    }

    /// Handle a click on a `data-cta` element
    pub fn track_cta_click(&self, cta: &CtaTarget) {
        let cta_id = cta.cta_id();
        self.track_event("cta_click", json!({ "cta": cta_id }));

        if let Some(plan) = PlanType::from_cta_id(&cta_id) {
            self.track_event("pricing_click", json!({ "plan": plan.as_str() }));
        }
    }
}

/// An element tagged with a CTA id attribute.
#[derive(Clone)]
pub struct CtaTarget {
    element: ElementHandle,
    attribute: String,
}

impl CtaTarget {
    pub fn new(element: ElementHandle, attribute: &str) -> Self {
        Self {
            element,
            attribute: attribute.to_string(),
        }
    }

    /// Read at click time so markup changes after load are picked up
    pub fn cta_id(&self) -> String {
        self.element.attribute(&self.attribute).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::{MemoryDataLayer, MemoryElement};

    fn emitter() -> (AnalyticsEmitter, Rc<MemoryDataLayer>) {
        let sink = Rc::new(MemoryDataLayer::new());
        (AnalyticsEmitter::new(sink.clone()), sink)
    }

    fn cta(id: &str) -> CtaTarget {
        CtaTarget::new(
            Rc::new(MemoryElement::new().with_attribute("data-cta", id)),
            "data-cta",
        )
    }

    #[test]
    fn test_record_spreads_params_after_event() {
        let record = EventRecord::new("x", json!({ "a": 1 }));
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({ "event": "x", "a": 1 })
        );

        let overridden = EventRecord::new("x", json!({ "event": "y" }));
        assert_eq!(overridden.event(), Some("y"));
    }

    #[test]
    fn test_track_event_appends_in_order() {
        let (analytics, sink) = emitter();
        analytics.track_event("first", json!({}));
        analytics.track_event("x", json!({ "a": 1 }));

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].event(), Some("first"));
        assert_eq!(records[1], EventRecord::new("x", json!({ "a": 1 })));
    }

    #[test]
    fn test_plan_classification() {
        assert_eq!(PlanType::from_cta_id("hero-signup"), None);
        assert_eq!(PlanType::from_cta_id("pricing-free"), Some(PlanType::Free));
        assert_eq!(
            PlanType::from_cta_id("pricing-annual-cta"),
            Some(PlanType::Annual)
        );
        assert_eq!(
            PlanType::from_cta_id("pricing-monthly"),
            Some(PlanType::Monthly)
        );
        assert_eq!(
            PlanType::from_cta_id("pricing-annual-vs-monthly"),
            Some(PlanType::Monthly)
        );
    }

    #[test]
    fn test_pricing_cta_emits_two_events() {
        let (analytics, sink) = emitter();
        analytics.track_cta_click(&cta("pricing-annual-cta"));

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            EventRecord::new("cta_click", json!({ "cta": "pricing-annual-cta" }))
        );
        assert_eq!(
            records[1],
            EventRecord::new("pricing_click", json!({ "plan": "annual" }))
        );
    }

    #[test]
    fn test_plain_cta_emits_one_event() {
        let (analytics, sink) = emitter();
        analytics.track_cta_click(&cta("footer-contact"));

        assert_eq!(sink.len(), 1);
        assert_eq!(
            sink.records()[0].get("cta"),
            Some(&json!("footer-contact"))
        );
    }
}
