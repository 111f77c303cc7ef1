//! End-to-end normalization and classification scenarios.

use quadro_core::{Archetype, NormalizedResponse, classify, normalize};
use serde_json::json;

#[test]
fn weekday_series_becomes_an_xy_chart() {
    let raw = r#"[{"x": "Seg", "y": 100}, {"x": "Ter", "y": 150}]"#;
    let NormalizedResponse::Structured(payload) = normalize(raw) else {
        panic!("expected structured payload");
    };
    assert_eq!(classify(&payload).unwrap(), Some(Archetype::Xy));
}

#[test]
fn single_bin_distribution_becomes_a_histogram() {
    let raw = r#"[{"variable": "Time", "distribution": [{"bin_range": "0-10", "count": 5}]}]"#;
    let NormalizedResponse::Structured(payload) = normalize(raw) else {
        panic!("expected structured payload");
    };
    assert_eq!(classify(&payload).unwrap(), Some(Archetype::Histogram));
}

#[test]
fn prose_answer_never_reaches_the_classifier() {
    let raw = "O total de vendas foi 350.";
    match normalize(raw) {
        NormalizedResponse::Text(text) => assert_eq!(text, raw),
        NormalizedResponse::Structured(payload) => {
            panic!("prose should not decode: {payload}")
        }
    }
}

#[test]
fn fenced_min_max_mapping_becomes_a_stats_chart() {
    let raw = "```json\n{\"Time\": {\"min\": 0, \"max\": 100}}\n```";
    let NormalizedResponse::Structured(payload) = normalize(raw) else {
        panic!("expected structured payload");
    };
    assert_eq!(payload, json!({"Time": {"min": 0, "max": 100}}));
    assert_eq!(classify(&payload).unwrap(), Some(Archetype::StatsMap));
}

#[test]
fn portuguese_aliases_classify_like_english_keys() {
    let raw = "```json\n{\"Tempo\": {\"mínimo\": 0, \"máximo\": 100, \"média\": 42.0}}\n```";
    let NormalizedResponse::Structured(payload) = normalize(raw) else {
        panic!("expected structured payload");
    };
    assert_eq!(classify(&payload).unwrap(), Some(Archetype::StatsMap));
}

#[test]
fn unlabeled_histogram_bin_is_rejected_not_silently_skipped() {
    let raw = r#"[{"variable": "V1", "distribution": [{"count": 3}]}]"#;
    let NormalizedResponse::Structured(payload) = normalize(raw) else {
        panic!("expected structured payload");
    };
    let err = classify(&payload).unwrap_err();
    assert!(err.to_string().contains("Malformed chart payload"));
}

#[test]
fn empty_list_is_not_chartable_under_any_rule() {
    let NormalizedResponse::Structured(payload) = normalize("[]") else {
        panic!("expected structured payload");
    };
    assert_eq!(classify(&payload).unwrap(), None);
}
