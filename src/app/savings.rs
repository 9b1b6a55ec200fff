//! Interactive savings calculator.
//!
//! Estimate = plan savings + (monthly spend x 12 x optimization rate), floored.
//! The billing interval does not enter the formula.

use crate::config::SavingsModel;
use crate::dom::ElementHandle;

/// Yearly savings for a given monthly spend
pub fn estimate(model: &SavingsModel, monthly_spend: i64) -> i64 {
    let ai_savings = monthly_spend as f64 * model.months_per_year * model.optimization_rate;
    (model.plan_savings + ai_savings).floor() as i64
}

/// Leading-integer parse of a slider value ("250", " 42px" -> 42).
pub fn parse_spend(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Render with a thousands separator, e.g. 12345 -> "12,345"
pub fn format_grouped(n: i64, separator: &str) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len() + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

pub struct SavingsCalculator {
    slider: Option<ElementHandle>,
    spend_value: Option<ElementHandle>,
    result: Option<ElementHandle>,
    model: SavingsModel,
}

impl SavingsCalculator {
    pub fn new(
        slider: Option<ElementHandle>,
        spend_value: Option<ElementHandle>,
        result: Option<ElementHandle>,
        model: SavingsModel,
    ) -> Self {
        Self {
            slider,
            spend_value,
            result,
            model,
        }
    }

    pub fn has_slider(&self) -> bool {
        self.slider.is_some()
    }

    /// Recompute from the slider and render. No-op without slider and result.
    pub fn calculate_savings(&self) -> Option<i64> {
        let (Some(slider), Some(result)) = (&self.slider, &self.result) else {
            return None;
        };

        let raw = slider.value().unwrap_or_default();
        let Some(monthly_spend) = parse_spend(&raw) else {
            tracing::warn!("Ignoring non-numeric monthly spend {:?}", raw);
            return None;
        };

        if let Some(echo) = &self.spend_value {
            echo.set_text(&monthly_spend.to_string());
        }

        let total = estimate(&self.model, monthly_spend);
        result.set_text(&format_grouped(total, &self.model.thousands_separator));
        tracing::debug!(monthly_spend, total, "Savings recalculated");
        Some(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryElement;
    use std::rc::Rc;

    #[test]
    fn test_estimate_sample_points() {
        let model = SavingsModel::default();
        assert_eq!(estimate(&model, 0), 20);
        assert_eq!(estimate(&model, 100), 140);
        assert_eq!(estimate(&model, 500), 620);
        assert_eq!(estimate(&model, 10_000), 12_020);
    }

    #[test]
    fn test_parse_spend_takes_leading_integer() {
        assert_eq!(parse_spend("250"), Some(250));
        assert_eq!(parse_spend("  42px"), Some(42));
        assert_eq!(parse_spend("12.9"), Some(12));
        assert_eq!(parse_spend("-5"), Some(-5));
        assert_eq!(parse_spend("abc"), None);
        assert_eq!(parse_spend(""), None);
        assert_eq!(parse_spend("-"), None);
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(20, ","), "20");
        assert_eq!(format_grouped(620, ","), "620");
        assert_eq!(format_grouped(1_200, ","), "1,200");
        assert_eq!(format_grouped(12_020, ","), "12,020");
        assert_eq!(format_grouped(1_234_567, "."), "1.234.567");
        assert_eq!(format_grouped(-1_000, ","), "-1,000");
    }

    #[test]
    fn test_renders_result_and_echo() {
        let slider = Rc::new(MemoryElement::input("1000"));
        let echo = Rc::new(MemoryElement::new());
        let result = Rc::new(MemoryElement::new());
        let calc = SavingsCalculator::new(
            Some(slider.clone() as ElementHandle),
            Some(echo.clone() as ElementHandle),
            Some(result.clone() as ElementHandle),
            SavingsModel::default(),
        );

        assert_eq!(calc.calculate_savings(), Some(1220));
        assert_eq!(echo.text(), "1000");
        assert_eq!(result.text(), "1,220");

        slider.set_value("100");
        calc.calculate_savings();
        assert_eq!(result.text(), "140");
    }

    #[test]
    fn test_missing_result_is_noop() {
        let slider = Rc::new(MemoryElement::input("100"));
        let echo = Rc::new(MemoryElement::new());
        let calc = SavingsCalculator::new(
            Some(slider.clone() as ElementHandle),
            Some(echo.clone() as ElementHandle),
            None,
            SavingsModel::default(),
        );

        assert_eq!(calc.calculate_savings(), None);
        assert_eq!(echo.mutations(), 0);
        assert_eq!(slider.mutations(), 0);
    }

    #[test]
    fn test_garbage_value_leaves_display_alone() {
        let result = Rc::new(MemoryElement::new());
        let calc = SavingsCalculator::new(
            Some(Rc::new(MemoryElement::input("lots")) as ElementHandle),
            None,
            Some(result.clone() as ElementHandle),
            SavingsModel::default(),
        );

        assert_eq!(calc.calculate_savings(), None);
        assert_eq!(result.mutations(), 0);
    }
}
