//! Connected line with point markers for x/y record lists.

use super::{display_value, index_label, padded_range, require_number};
use crate::error::{ChartError, Result};
use crate::frame::{HEIGHT, WIDTH, encode_png, rgb_frame};
use plotters::prelude::*;
use quadro_core::payload::as_records;
use serde_json::Value;

pub fn render(payload: &Value) -> Result<Vec<u8>> {
    let records = as_records(payload)
        .ok_or_else(|| ChartError::malformed("xy payload must be a list of records"))?;
    if records.is_empty() {
        return Err(ChartError::malformed("xy payload has no records"));
    }

    let mut labels = Vec::with_capacity(records.len());
    let mut points = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        let x = record
            .get("x")
            .ok_or_else(|| ChartError::malformed("record is missing field 'x'"))?;
        let y = require_number(record, "y")?;
        labels.push(display_value(x));
        points.push((idx as f64, y));
    }

    let (y_lo, y_hi) = padded_range(&points.iter().map(|(_, y)| *y).collect::<Vec<_>>());
    let x_hi = records.len() as f64 - 0.5;

    let mut frame = rgb_frame(WIDTH, HEIGHT);
    {
        let root = BitMapBackend::with_buffer(&mut frame, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::drawing)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(64)
            .build_cartesian_2d(-0.5f64..x_hi, y_lo..y_hi)
            .map_err(ChartError::drawing)?;

        let formatter = index_label(&labels);
        chart
            .configure_mesh()
            .x_desc("x")
            .y_desc("y")
            .x_labels(labels.len().min(24) + 1)
            .x_label_formatter(&formatter)
            .draw()
            .map_err(ChartError::drawing)?;

        chart
            .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
            .map_err(ChartError::drawing)?;
        chart
            .draw_series(points.iter().map(|point| Circle::new(*point, 4, BLUE.filled())))
            .map_err(ChartError::drawing)?;

        root.present().map_err(ChartError::drawing)?;
    }
    encode_png(frame, WIDTH, HEIGHT)
}
