//! Pie chart for value/percentage record lists.

use super::{PALETTE, display_value, require_number};
use crate::error::{ChartError, Result};
use crate::frame::{HEIGHT, WIDTH, encode_png, rgb_frame};
use plotters::element::Pie;
use plotters::prelude::*;
use quadro_core::payload::as_records;
use serde_json::Value;
use std::cmp::Ordering;

/// Slices beyond this rank are dropped to keep the chart legible.
const MAX_SLICES: usize = 20;

pub fn render(payload: &Value) -> Result<Vec<u8>> {
    let records = as_records(payload)
        .ok_or_else(|| ChartError::malformed("pie payload must be a list of records"))?;
    if records.is_empty() {
        return Err(ChartError::malformed("pie payload has no records"));
    }

    let mut slices = Vec::with_capacity(records.len());
    for record in &records {
        let value = record
            .get("value")
            .ok_or_else(|| ChartError::malformed("record is missing field 'value'"))?;
        let percentage = require_number(record, "percentage")?;
        slices.push((display_value(value), percentage));
    }

    slices.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    slices.truncate(MAX_SLICES);
    slices.retain(|(_, pct)| pct.is_finite() && *pct > 0.0);
    if slices.is_empty() {
        return Err(ChartError::malformed("pie payload has no positive percentages"));
    }

    let labels: Vec<String> = slices
        .iter()
        .map(|(value, pct)| format!("{value} ({pct:.1}%)"))
        .collect();
    let sizes: Vec<f64> = slices.iter().map(|(_, pct)| *pct).collect();
    let colors: Vec<RGBColor> = (0..sizes.len())
        .map(|idx| PALETTE[idx % PALETTE.len()])
        .collect();

    let mut frame = rgb_frame(WIDTH, HEIGHT);
    {
        let root = BitMapBackend::with_buffer(&mut frame, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::drawing)?;

        let (width, height) = root.dim_in_pixel();
        let center = (width as i32 / 2, height as i32 / 2);
        let radius = f64::from(width.min(height)) * 0.32;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(("sans-serif", 16).into_font().color(&BLACK));
        root.draw(&pie).map_err(ChartError::drawing)?;

        root.present().map_err(ChartError::drawing)?;
    }
    encode_png(frame, WIDTH, HEIGHT)
}
