//! Horizontal top-N bars for generic tabular record lists.

use super::{bar_range, index_label, require_number};
use crate::error::{ChartError, Result};
use crate::frame::{HEIGHT, WIDTH, encode_png, rgb_frame};
use plotters::prelude::*;
use quadro_core::payload::{as_records, infer_columns};
use serde_json::Value;
use std::cmp::Ordering;

/// Rows beyond this rank are dropped to keep the chart legible.
const MAX_ROWS: usize = 20;

pub fn render(payload: &Value) -> Result<Vec<u8>> {
    let records = as_records(payload)
        .ok_or_else(|| ChartError::malformed("bar payload must be a list of records"))?;
    if records.is_empty() {
        return Err(ChartError::malformed("bar payload has no records"));
    }

    let profile = infer_columns(&records);
    let category = profile
        .categorical
        .first()
        .ok_or_else(|| ChartError::malformed("no categorical column to label bars"))?;
    let measure = profile
        .numeric
        .first()
        .ok_or_else(|| ChartError::malformed("no numeric column to size bars"))?;

    let mut rows = Vec::with_capacity(records.len());
    for record in &records {
        let label = record
            .get(category.as_str())
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ChartError::malformed(format!("record is missing categorical field '{category}'"))
            })?;
        let value = require_number(record, measure)?;
        rows.push((label.to_string(), value));
    }

    // Largest first; the y axis is laid out so rank 0 lands on top.
    rows.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    rows.truncate(MAX_ROWS);

    let count = rows.len();
    let values: Vec<f64> = rows.iter().map(|(_, value)| *value).collect();
    let labels: Vec<String> = rows
        .iter()
        .rev()
        .map(|(label, _)| label.clone())
        .collect();
    let (x_lo, x_hi) = bar_range(&values);

    let mut frame = rgb_frame(WIDTH, HEIGHT);
    {
        let root = BitMapBackend::with_buffer(&mut frame, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::drawing)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(format!("{measure} por {category}"), ("sans-serif", 28))
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(160)
            .build_cartesian_2d(x_lo..x_hi, -0.5f64..(count as f64 - 0.5))
            .map_err(ChartError::drawing)?;

        let formatter = index_label(&labels);
        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc(measure.as_str())
            .y_labels(count.min(24) + 1)
            .y_label_formatter(&formatter)
            .draw()
            .map_err(ChartError::drawing)?;

        chart
            .draw_series(values.iter().enumerate().map(|(rank, value)| {
                let y = (count - 1 - rank) as f64;
                Rectangle::new([(0.0, y - 0.35), (*value, y + 0.35)], BLUE.mix(0.6).filled())
            }))
            .map_err(ChartError::drawing)?;

        root.present().map_err(ChartError::drawing)?;
    }
    encode_png(frame, WIDTH, HEIGHT)
}
