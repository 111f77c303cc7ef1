//! Category→count bars for mapping payloads.

use super::{bar_range, index_label};
use crate::error::{ChartError, Result};
use crate::frame::{HEIGHT, WIDTH, encode_png, rgb_frame};
use plotters::prelude::*;
use plotters::style::FontTransform;
use quadro_core::payload::is_integer;
use serde_json::Value;

pub fn render(payload: &Value) -> Result<Vec<u8>> {
    let map = payload
        .as_object()
        .ok_or_else(|| ChartError::malformed("categorical payload must be a mapping"))?;

    // The first value that looks like a category→count distribution carries
    // the chart; its field name goes into the title.
    let (field, counts) = map
        .iter()
        .find_map(|(name, value)| {
            value
                .as_object()
                .filter(|inner| inner.values().all(is_integer))
                .map(|inner| (name.clone(), inner))
        })
        .ok_or_else(|| ChartError::malformed("no category distribution found in payload"))?;

    let labels: Vec<String> = counts.keys().cloned().collect();
    let values: Vec<f64> = counts.values().map(|v| v.as_f64().unwrap_or(0.0)).collect();
    let (y_lo, y_hi) = bar_range(&values);

    let mut frame = rgb_frame(WIDTH, HEIGHT);
    {
        let root = BitMapBackend::with_buffer(&mut frame, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::drawing)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(format!("Distribuição de {field}"), ("sans-serif", 28))
            .margin(16)
            .x_label_area_size(110)
            .y_label_area_size(64)
            .build_cartesian_2d(-0.5f64..(labels.len() as f64 - 0.5), y_lo..y_hi)
            .map_err(ChartError::drawing)?;

        let formatter = index_label(&labels);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc("contagem")
            .x_labels(labels.len().min(24) + 1)
            .x_label_formatter(&formatter)
            .x_label_style(
                ("sans-serif", 13)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .draw()
            .map_err(ChartError::drawing)?;

        chart
            .draw_series(values.iter().enumerate().map(|(idx, value)| {
                let x = idx as f64;
                Rectangle::new([(x - 0.35, 0.0), (x + 0.35, *value)], BLUE.mix(0.6).filled())
            }))
            .map_err(ChartError::drawing)?;

        root.present().map_err(ChartError::drawing)?;
    }
    encode_png(frame, WIDTH, HEIGHT)
}
