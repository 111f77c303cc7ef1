//! Rendering every archetype from its minimal valid shape.

use quadro_chart::render;
use quadro_core::{Archetype, classify};
use serde_json::{Value, json};

const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

fn classify_and_render(payload: &Value) -> Vec<u8> {
    let archetype = classify(payload)
        .expect("classification should not error")
        .expect("payload should be chartable");
    render(payload, archetype).expect("rendering should succeed")
}

fn assert_png(bytes: &[u8]) {
    assert!(bytes.len() > PNG_MAGIC.len(), "image is empty");
    assert_eq!(&bytes[..PNG_MAGIC.len()], &PNG_MAGIC, "not a PNG stream");
}

#[test]
fn xy_two_point_series_renders_a_line_chart() {
    let payload = json!([{"x": "Seg", "y": 100}, {"x": "Ter", "y": 150}]);
    assert_eq!(classify(&payload).unwrap(), Some(Archetype::Xy));
    assert_png(&classify_and_render(&payload));
}

#[test]
fn xy_single_record_is_enough() {
    let payload = json!([{"x": 1, "y": 2.5}]);
    assert_png(&classify_and_render(&payload));
}

#[test]
fn single_bin_histogram_renders() {
    let payload = json!([{
        "variable": "Time",
        "distribution": [{"bin_range": "0-10", "count": 5}]
    }]);
    assert_eq!(classify(&payload).unwrap(), Some(Archetype::Histogram));
    assert_png(&classify_and_render(&payload));
}

#[test]
fn multi_variable_histogram_renders_every_variable() {
    let payload = json!([
        {"variable": "a", "distribution": [{"bin_range": "0-10", "count": 5}]},
        {"variable": "b", "distribution": [{"category": "x", "count": 2}, {"category": "y", "count": 7}]}
    ]);
    assert_png(&classify_and_render(&payload));
}

#[test]
fn pie_renders_from_value_percentage_records() {
    let payload = json!([
        {"value": "A", "percentage": 62.5},
        {"value": "B", "percentage": 37.5}
    ]);
    assert_eq!(classify(&payload).unwrap(), Some(Archetype::Pie));
    assert_png(&classify_and_render(&payload));
}

#[test]
fn min_max_mapping_renders_the_pair_chart() {
    let payload = json!({"Time": {"min": 0, "max": 100}});
    assert_eq!(classify(&payload).unwrap(), Some(Archetype::StatsMap));
    assert_png(&classify_and_render(&payload));
}

#[test]
fn stats_mapping_with_means_renders() {
    let payload = json!({
        "idade": {"min": 18, "max": 65, "mean": 37.2},
        "renda": {"min": 1000, "max": 20000, "mean": 4500.0}
    });
    assert_png(&classify_and_render(&payload));
}

#[test]
fn stats_list_renders_amplitudes() {
    let payload = json!([
        {"variable": "idade", "min": 18, "max": 65},
        {"variable": "renda", "min": 1000, "max": 20000}
    ]);
    assert_eq!(classify(&payload).unwrap(), Some(Archetype::StatsList));
    assert_png(&classify_and_render(&payload));
}

#[test]
fn categorical_mapping_renders_count_bars() {
    let payload = json!({"turno": {"manhã": 12, "tarde": 30, "noite": 8}});
    assert_eq!(classify(&payload).unwrap(), Some(Archetype::Categorical));
    assert_png(&classify_and_render(&payload));
}

#[test]
fn generic_records_render_horizontal_top_bars() {
    let payload = json!([
        {"produto": "Feijão", "total": 410.0},
        {"produto": "Arroz", "total": 1290.5},
        {"produto": "Café", "total": 801.0}
    ]);
    assert_eq!(classify(&payload).unwrap(), Some(Archetype::BarGeneric));
    assert_png(&classify_and_render(&payload));
}

#[test]
fn unlabeled_histogram_bin_never_becomes_an_image() {
    let payload = json!([{"variable": "V1", "distribution": [{"count": 3}]}]);
    let err = render(&payload, Archetype::Histogram).unwrap_err();
    assert!(err.to_string().contains("Malformed chart payload"));
}

#[test]
fn rendering_is_deterministic_for_the_same_payload() {
    let payload = json!([{"x": "Seg", "y": 100}, {"x": "Ter", "y": 150}]);
    let first = classify_and_render(&payload);
    let second = classify_and_render(&payload);
    assert_eq!(first, second);
}
