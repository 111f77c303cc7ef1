//! One rendering routine per archetype.

pub mod bar_generic;
pub mod categorical;
pub mod histogram;
pub mod pie;
pub mod stats;
pub mod xy;

use crate::error::{ChartError, Result};
use quadro_core::Archetype;
use serde_json::{Map, Value};
use tracing::debug;

/// Render an already-classified payload as PNG bytes.
///
/// The payload must satisfy the archetype's field contract; a field missing
/// mid-render is a descriptive error, never a truncated image.
pub fn render(payload: &Value, archetype: Archetype) -> Result<Vec<u8>> {
    debug!(archetype = archetype.name(), "rendering chart");
    match archetype {
        Archetype::Xy => xy::render(payload),
        Archetype::Categorical => categorical::render(payload),
        Archetype::Pie => pie::render(payload),
        Archetype::Histogram => histogram::render(payload),
        Archetype::StatsList | Archetype::StatsMap => stats::render(payload),
        Archetype::BarGeneric => bar_generic::render(payload),
    }
}

/// Fill colors cycled across multi-series charts.
pub(crate) const PALETTE: &[plotters::style::RGBColor] = &[
    plotters::style::RGBColor(66, 133, 244),
    plotters::style::RGBColor(219, 68, 55),
    plotters::style::RGBColor(244, 180, 0),
    plotters::style::RGBColor(15, 157, 88),
    plotters::style::RGBColor(171, 71, 188),
    plotters::style::RGBColor(0, 172, 193),
    plotters::style::RGBColor(255, 112, 67),
    plotters::style::RGBColor(158, 157, 36),
];

/// Numeric field of a record; absence is a hard error, not a skipped bar.
pub(crate) fn require_number(record: &Map<String, Value>, key: &str) -> Result<f64> {
    record
        .get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| ChartError::malformed(format!("record is missing numeric field '{key}'")))
}

/// Human-readable label for any scalar value.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Axis range for bar charts: anchored at zero, padded above the tallest
/// bar, extended below zero only when a value is negative.
pub(crate) fn bar_range(values: &[f64]) -> (f64, f64) {
    let lo = values.iter().copied().fold(0.0f64, f64::min);
    let hi = values.iter().copied().fold(0.0f64, f64::max);
    let span = (hi - lo).max(1.0);
    let lo = if lo < 0.0 { lo - span * 0.05 } else { 0.0 };
    (lo, hi + span * 0.05)
}

/// Padded range for line charts; keeps a flat series visible.
pub(crate) fn padded_range(values: &[f64]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for value in values {
        lo = lo.min(*value);
        hi = hi.max(*value);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        let pad = if hi.abs() < 1.0 { 1.0 } else { hi.abs() * 0.1 };
        return (lo - pad, hi + pad);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

/// Tick formatter that labels integer positions from a label list and blanks
/// everything else.
pub(crate) fn index_label(labels: &[String]) -> impl Fn(&f64) -> String + '_ {
    move |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn require_number_reports_the_missing_key() {
        let record = json!({"y": "texto"});
        let record = record.as_object().unwrap();
        let err = require_number(record, "y").unwrap_err();
        assert!(err.to_string().contains("'y'"));
    }

    #[test]
    fn bar_range_is_anchored_at_zero_for_positive_data() {
        let (lo, hi) = bar_range(&[3.0, 7.0]);
        assert_eq!(lo, 0.0);
        assert!(hi > 7.0);
    }

    #[test]
    fn bar_range_extends_below_zero_for_negative_data() {
        let (lo, _) = bar_range(&[-2.0, 5.0]);
        assert!(lo < -2.0);
    }

    #[test]
    fn padded_range_keeps_flat_series_visible() {
        let (lo, hi) = padded_range(&[5.0, 5.0]);
        assert!(lo < 5.0 && hi > 5.0);
    }

    #[test]
    fn index_label_blanks_non_integer_ticks() {
        let labels = vec!["a".to_string(), "b".to_string()];
        let fmt = index_label(&labels);
        assert_eq!(fmt(&0.0), "a");
        assert_eq!(fmt(&1.0), "b");
        assert_eq!(fmt(&0.5), "");
        assert_eq!(fmt(&2.0), "");
    }
}
