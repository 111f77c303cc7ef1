//! Per-variable distribution bars for histogram payloads.
//!
//! Multi-variable payloads render as one composite figure, one chart per
//! variable stacked vertically. No variable is ever dropped.

use super::{bar_range, display_value, index_label, require_number};
use crate::error::{ChartError, Result};
use crate::frame::{WIDTH, encode_png, rgb_frame};
use plotters::prelude::*;
use plotters::style::FontTransform;
use quadro_core::payload::as_records;
use serde_json::Value;

/// Vertical space given to each variable's chart, in pixels.
const ROW_HEIGHT: u32 = 360;

struct Distribution {
    name: String,
    labels: Vec<String>,
    counts: Vec<f64>,
}

fn extract(payload: &Value) -> Result<Vec<Distribution>> {
    let records = as_records(payload)
        .ok_or_else(|| ChartError::malformed("histogram payload must be a list of records"))?;
    if records.is_empty() {
        return Err(ChartError::malformed("histogram payload has no records"));
    }

    let mut distributions = Vec::with_capacity(records.len());
    for record in &records {
        let name = record
            .get("variable")
            .ok_or_else(|| ChartError::malformed("record is missing field 'variable'"))?;
        let bins = record
            .get("distribution")
            .and_then(as_records)
            .ok_or_else(|| {
                ChartError::malformed("record is missing a 'distribution' record list")
            })?;
        if bins.is_empty() {
            return Err(ChartError::malformed("distribution has no records"));
        }

        let mut labels = Vec::with_capacity(bins.len());
        let mut counts = Vec::with_capacity(bins.len());
        for bin in bins {
            let label = bin
                .get("bin_range")
                .or_else(|| bin.get("category"))
                .ok_or_else(|| {
                    ChartError::malformed(
                        "histogram distribution record is missing both 'bin_range' and 'category'",
                    )
                })?;
            labels.push(display_value(label));
            counts.push(require_number(bin, "count")?);
        }
        distributions.push(Distribution {
            name: display_value(name),
            labels,
            counts,
        });
    }
    Ok(distributions)
}

pub fn render(payload: &Value) -> Result<Vec<u8>> {
    let distributions = extract(payload)?;

    let rows = distributions.len();
    let height = ROW_HEIGHT * rows as u32;

    let mut frame = rgb_frame(WIDTH, height);
    {
        let root = BitMapBackend::with_buffer(&mut frame, (WIDTH, height)).into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::drawing)?;

        let areas = root.split_evenly((rows, 1));
        for (area, dist) in areas.iter().zip(&distributions) {
            let (y_lo, y_hi) = bar_range(&dist.counts);

            let mut chart = ChartBuilder::on(area)
                .caption(format!("Distribuição de {}", dist.name), ("sans-serif", 22))
                .margin(12)
                .x_label_area_size(80)
                .y_label_area_size(56)
                .build_cartesian_2d(-0.5f64..(dist.labels.len() as f64 - 0.5), y_lo..y_hi)
                .map_err(ChartError::drawing)?;

            let formatter = index_label(&dist.labels);
            chart
                .configure_mesh()
                .disable_x_mesh()
                .y_desc("contagem")
                .x_labels(dist.labels.len().min(24) + 1)
                .x_label_formatter(&formatter)
                .x_label_style(
                    ("sans-serif", 12)
                        .into_font()
                        .transform(FontTransform::Rotate90),
                )
                .draw()
                .map_err(ChartError::drawing)?;

            chart
                .draw_series(dist.counts.iter().enumerate().map(|(idx, count)| {
                    let x = idx as f64;
                    Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *count)], GREEN.mix(0.6).filled())
                }))
                .map_err(ChartError::drawing)?;
        }

        root.present().map_err(ChartError::drawing)?;
    }
    encode_png(frame, WIDTH, height)
}
