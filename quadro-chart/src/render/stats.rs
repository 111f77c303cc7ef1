//! Summary-statistic charts.
//!
//! Both stats source forms land here: a record list of
//! `{variable, min, max}` or a mapping of name → `{min, max[, mean]}`.
//! Exactly one measure is ever plotted; [`measure_for`] makes that choice
//! observable on its own.

use super::{bar_range, display_value, index_label, require_number};
use crate::error::{ChartError, Result};
use crate::frame::{HEIGHT, WIDTH, encode_png, rgb_frame};
use plotters::prelude::*;
use plotters::style::FontTransform;
use quadro_core::payload::as_records;
use serde_json::Value;

/// Which single measure a stats payload yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsMeasure {
    /// Every entry exposes `mean`: plot the means.
    Mean,
    /// List form without a full set of means: plot `max - min`.
    Amplitude,
    /// Mapping form without a full set of means: paired min/max series.
    MinMaxPair,
}

struct StatsSeries {
    names: Vec<String>,
    mins: Vec<f64>,
    maxes: Vec<f64>,
    means: Option<Vec<f64>>,
    from_list: bool,
}

fn extract(payload: &Value) -> Result<StatsSeries> {
    if let Some(records) = as_records(payload) {
        if records.is_empty() {
            return Err(ChartError::malformed("stats payload has no records"));
        }
        let mut series = StatsSeries {
            names: Vec::with_capacity(records.len()),
            mins: Vec::with_capacity(records.len()),
            maxes: Vec::with_capacity(records.len()),
            means: None,
            from_list: true,
        };
        let mut means = Vec::with_capacity(records.len());
        for record in &records {
            let name = record
                .get("variable")
                .ok_or_else(|| ChartError::malformed("record is missing field 'variable'"))?;
            series.names.push(display_value(name));
            series.mins.push(require_number(record, "min")?);
            series.maxes.push(require_number(record, "max")?);
            if let Some(mean) = record.get("mean").and_then(Value::as_f64) {
                means.push(mean);
            }
        }
        if means.len() == records.len() {
            series.means = Some(means);
        }
        return Ok(series);
    }

    let map = payload
        .as_object()
        .ok_or_else(|| ChartError::malformed("stats payload must be a list or mapping"))?;
    if map.is_empty() {
        return Err(ChartError::malformed("stats payload has no entries"));
    }
    let mut series = StatsSeries {
        names: Vec::with_capacity(map.len()),
        mins: Vec::with_capacity(map.len()),
        maxes: Vec::with_capacity(map.len()),
        means: None,
        from_list: false,
    };
    let mut means = Vec::with_capacity(map.len());
    for (name, stats) in map {
        let stats = stats.as_object().ok_or_else(|| {
            ChartError::malformed(format!("stats entry '{name}' is not a mapping"))
        })?;
        series.names.push(name.clone());
        series.mins.push(require_number(stats, "min")?);
        series.maxes.push(require_number(stats, "max")?);
        if let Some(mean) = stats.get("mean").and_then(Value::as_f64) {
            means.push(mean);
        }
    }
    if means.len() == map.len() {
        series.means = Some(means);
    }
    Ok(series)
}

/// Decide which measure a stats payload yields, without rendering it.
pub fn measure_for(payload: &Value) -> Result<StatsMeasure> {
    let series = extract(payload)?;
    Ok(if series.means.is_some() {
        StatsMeasure::Mean
    } else if series.from_list {
        StatsMeasure::Amplitude
    } else {
        StatsMeasure::MinMaxPair
    })
}

pub fn render(payload: &Value) -> Result<Vec<u8>> {
    let series = extract(payload)?;
    match (&series.means, series.from_list) {
        (Some(means), _) => render_bars(&series.names, means, "Média por variável", "média"),
        (None, true) => {
            let amplitudes: Vec<f64> = series
                .maxes
                .iter()
                .zip(&series.mins)
                .map(|(max, min)| max - min)
                .collect();
            render_bars(
                &series.names,
                &amplitudes,
                "Amplitude por variável",
                "amplitude (max - min)",
            )
        }
        (None, false) => render_min_max(&series),
    }
}

fn render_bars(names: &[String], values: &[f64], caption: &str, y_desc: &str) -> Result<Vec<u8>> {
    let (y_lo, y_hi) = bar_range(values);

    let mut frame = rgb_frame(WIDTH, HEIGHT);
    {
        let root = BitMapBackend::with_buffer(&mut frame, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::drawing)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(caption, ("sans-serif", 28))
            .margin(16)
            .x_label_area_size(110)
            .y_label_area_size(64)
            .build_cartesian_2d(-0.5f64..(names.len() as f64 - 0.5), y_lo..y_hi)
            .map_err(ChartError::drawing)?;

        let formatter = index_label(names);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc(y_desc)
            .x_labels(names.len().min(24) + 1)
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

fn render_min_max(series: &StatsSeries) -> Result<Vec<u8>> {
    let mut extent: Vec<f64> = series.maxes.clone();
    extent.extend_from_slice(&series.mins);
    let (y_lo, y_hi) = bar_range(&extent);

    let mut frame = rgb_frame(WIDTH, HEIGHT);
    {
        let root = BitMapBackend::with_buffer(&mut frame, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::drawing)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Mínimo e máximo por variável", ("sans-serif", 28))
            .margin(16)
            .x_label_area_size(110)
            .y_label_area_size(64)
            .build_cartesian_2d(-0.5f64..(series.names.len() as f64 - 0.5), y_lo..y_hi)
            .map_err(ChartError::drawing)?;

        let formatter = index_label(&series.names);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(series.names.len().min(24) + 1)
            .x_label_formatter(&formatter)
            .x_label_style(
                ("sans-serif", 13)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .draw()
            .map_err(ChartError::drawing)?;

        let max_style = BLUE.mix(0.45).filled();
        let min_style = RED.mix(0.75).filled();

        chart
            .draw_series(series.maxes.iter().enumerate().map(|(idx, value)| {
                let x = idx as f64;
                Rectangle::new([(x - 0.35, 0.0), (x + 0.35, *value)], max_style)
            }))
            .map_err(ChartError::drawing)?
            .label("max")
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], max_style));
        chart
            .draw_series(series.mins.iter().enumerate().map(|(idx, value)| {
                let x = idx as f64;
                Rectangle::new([(x - 0.18, 0.0), (x + 0.18, *value)], min_style)
            }))
            .map_err(ChartError::drawing)?
            .label("min")
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], min_style));

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(ChartError::drawing)?;

        root.present().map_err(ChartError::drawing)?;
    }
    encode_png(frame, WIDTH, HEIGHT)
}
