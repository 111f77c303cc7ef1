//! Ordered archetype matching over decoded payloads.
//!
//! Each archetype has one predicate; the table is walked top to bottom and
//! the first match wins. Later rules are never consulted, and nothing is
//! scored, so an ambiguous payload always classifies the same way.

use crate::error::{QuadroError, Result};
use crate::payload::{as_records, infer_columns, is_integer};
use serde_json::{Map, Value};
use tracing::debug;

/// Chart shapes the synthesizer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    /// `{variable, distribution: [{bin_range|category, count}]}` records
    Histogram,
    /// `{value, percentage}` records
    Pie,
    /// `{x, y}` records
    Xy,
    /// `{variable, min, max}` records
    StatsList,
    /// mapping of name → category→count distribution
    Categorical,
    /// mapping of name → `{min, max[, mean]}` summary
    StatsMap,
    /// record list with at least one categorical and one numeric column
    BarGeneric,
}

impl Archetype {
    /// Stable name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Histogram => "histogram",
            Archetype::Pie => "pie",
            Archetype::Xy => "xy",
            Archetype::StatsList => "stats-list",
            Archetype::Categorical => "categorical",
            Archetype::StatsMap => "stats-map",
            Archetype::BarGeneric => "bar-generic",
        }
    }
}

/// One entry in the ordered rule table.
struct Rule {
    archetype: Archetype,
    matches: fn(&Value) -> Result<bool>,
}

/// The rule order is part of the contract: specific field-name contracts
/// outrank the column-inference fallback, which can fire on any tabular
/// data.
const RULES: &[Rule] = &[
    Rule { archetype: Archetype::Histogram, matches: match_histogram },
    Rule { archetype: Archetype::Pie, matches: match_pie },
    Rule { archetype: Archetype::Xy, matches: match_xy },
    Rule { archetype: Archetype::StatsList, matches: match_stats_list },
    Rule { archetype: Archetype::Categorical, matches: match_categorical },
    Rule { archetype: Archetype::StatsMap, matches: match_stats_map },
    Rule { archetype: Archetype::BarGeneric, matches: match_bar_generic },
];

/// Match a payload against the archetype table.
///
/// Returns `Ok(None)` when nothing matches (the caller falls back to the
/// text path), and an error only when a payload structurally committed to an
/// archetype carries a malformed element.
pub fn classify(payload: &Value) -> Result<Option<Archetype>> {
    for rule in RULES {
        if (rule.matches)(payload)? {
            debug!(archetype = rule.archetype.name(), "payload classified");
            return Ok(Some(rule.archetype));
        }
    }
    debug!("payload matched no archetype");
    Ok(None)
}

fn non_empty_records_with(payload: &Value, keys: &[&str]) -> bool {
    as_records(payload).is_some_and(|records| {
        !records.is_empty()
            && records
                .iter()
                .all(|record| keys.iter().all(|key| record.contains_key(*key)))
    })
}

fn match_histogram(payload: &Value) -> Result<bool> {
    let Some(records) = as_records(payload) else {
        return Ok(false);
    };
    if records.is_empty() {
        return Ok(false);
    }

    let mut bins: Vec<&Map<String, Value>> = Vec::new();
    for record in &records {
        if !record.contains_key("variable") {
            return Ok(false);
        }
        let Some(distribution) = record.get("distribution").and_then(as_records) else {
            return Ok(false);
        };
        if distribution.is_empty() || distribution.iter().any(|bin| !bin.contains_key("count")) {
            return Ok(false);
        }
        bins.extend(distribution);
    }

    // The archetype is structurally confirmed at this point, so a bin
    // without a label is a formatting defect in the payload, not an
    // unchartable shape.
    for bin in bins {
        if !bin.contains_key("bin_range") && !bin.contains_key("category") {
            return Err(QuadroError::malformed(
                "histogram distribution record is missing both 'bin_range' and 'category'",
            ));
        }
    }
    Ok(true)
}

fn match_pie(payload: &Value) -> Result<bool> {
    Ok(non_empty_records_with(payload, &["value", "percentage"]))
}

fn match_xy(payload: &Value) -> Result<bool> {
    Ok(non_empty_records_with(payload, &["x", "y"]))
}

fn match_stats_list(payload: &Value) -> Result<bool> {
    Ok(non_empty_records_with(payload, &["variable", "min", "max"]))
}

fn match_categorical(payload: &Value) -> Result<bool> {
    let Some(map) = payload.as_object() else {
        return Ok(false);
    };
    if map.is_empty() {
        return Ok(false);
    }
    let all_counts = map.values().all(|value| {
        value
            .as_object()
            .is_some_and(|inner| inner.values().all(is_integer))
    });
    if !all_counts {
        return Ok(false);
    }
    // A mapping whose every value is a min/max summary reads as summary
    // statistics, not category counts; the stats rule owns that shape.
    let all_stats = map.values().all(|value| {
        value
            .as_object()
            .is_some_and(|inner| inner.contains_key("min") && inner.contains_key("max"))
    });
    Ok(!all_stats)
}

fn match_stats_map(payload: &Value) -> Result<bool> {
    let Some(map) = payload.as_object() else {
        return Ok(false);
    };
    Ok(!map.is_empty()
        && map.values().all(|value| {
            value
                .as_object()
                .is_some_and(|stats| stats.contains_key("min") && stats.contains_key("max"))
        }))
}

fn match_bar_generic(payload: &Value) -> Result<bool> {
    let Some(records) = as_records(payload) else {
        return Ok(false);
    };
    if records.is_empty() {
        return Ok(false);
    }
    Ok(infer_columns(&records).is_chartable())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn xy_records_classify_as_xy() {
        let payload = json!([{"x": "Seg", "y": 100}, {"x": "Ter", "y": 150}]);
        assert_eq!(classify(&payload).unwrap(), Some(Archetype::Xy));
    }

    #[test]
    fn empty_list_matches_no_rule() {
        assert_eq!(classify(&json!([])).unwrap(), None);
    }

    #[test]
    fn empty_mapping_matches_no_rule() {
        assert_eq!(classify(&json!({})).unwrap(), None);
    }

    #[test]
    fn classification_is_idempotent() {
        let payload = json!([{"value": "A", "percentage": 40.0}]);
        let first = classify(&payload).unwrap();
        let second = classify(&payload).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, Some(Archetype::Pie));
    }

    #[test]
    fn histogram_outranks_bar_generic() {
        // `variable` is a string column and the nested distribution would be
        // excluded by inference, but rule order settles it first.
        let payload = json!([{
            "variable": "Tempo",
            "distribution": [{"bin_range": "0-10", "count": 5}]
        }]);
        assert_eq!(classify(&payload).unwrap(), Some(Archetype::Histogram));
    }

    #[test]
    fn pie_outranks_xy_when_both_contracts_hold() {
        let payload = json!([
            {"value": "A", "percentage": 60.0, "x": 1, "y": 2},
            {"value": "B", "percentage": 40.0, "x": 3, "y": 4}
        ]);
        assert_eq!(classify(&payload).unwrap(), Some(Archetype::Pie));
    }

    #[test]
    fn stats_list_requires_every_record_complete() {
        let payload = json!([
            {"variable": "a", "min": 0, "max": 10},
            {"variable": "b", "min": 2}
        ]);
        // Falls through to column inference: variable is categorical, the
        // stat columns are numeric.
        assert_eq!(classify(&payload).unwrap(), Some(Archetype::BarGeneric));
    }

    #[test]
    fn categorical_mapping_classifies_by_integer_counts() {
        let payload = json!({"turno": {"manhã": 12, "tarde": 30}});
        assert_eq!(classify(&payload).unwrap(), Some(Archetype::Categorical));
    }

    #[test]
    fn min_max_mapping_classifies_as_stats_not_categorical() {
        let payload = json!({"Time": {"min": 0, "max": 100}});
        assert_eq!(classify(&payload).unwrap(), Some(Archetype::StatsMap));
    }

    #[test]
    fn stats_map_allows_optional_mean() {
        let payload = json!({
            "idade": {"min": 18, "max": 65, "mean": 37.2},
            "renda": {"min": 1000.0, "max": 20000.0, "mean": 4500.0}
        });
        assert_eq!(classify(&payload).unwrap(), Some(Archetype::StatsMap));
    }

    #[test]
    fn non_integer_counts_disqualify_categorical() {
        let payload = json!({"turno": {"manhã": 12.5}});
        assert_eq!(classify(&payload).unwrap(), None);
    }

    #[test]
    fn bar_generic_needs_both_column_roles() {
        let all_numeric = json!([{"a": 1, "b": 2}]);
        assert_eq!(classify(&all_numeric).unwrap(), None);

        let mixed = json!([
            {"produto": "A", "total": 10},
            {"produto": "B", "total": 7}
        ]);
        assert_eq!(classify(&mixed).unwrap(), Some(Archetype::BarGeneric));
    }

    #[test]
    fn confirmed_histogram_with_unlabeled_bin_is_a_hard_error() {
        let payload = json!([{"variable": "V1", "distribution": [{"count": 3}]}]);
        let err = classify(&payload).unwrap_err();
        assert!(err.to_string().contains("bin_range"));
    }

    #[test]
    fn histogram_without_count_is_not_confirmed() {
        // No `count` anywhere: the histogram contract never commits, so this
        // falls through without an error.
        let payload = json!([{"variable": "V1", "distribution": [{"bin_range": "0-10"}]}]);
        assert_eq!(classify(&payload).unwrap(), None);
    }
}
