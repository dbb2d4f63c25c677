//! Line chart rendering of the USD price history
//!
//! The chart is regenerated in full from the entire history on every run;
//! at this scale incremental rendering is not worth it.

use std::path::Path;

use chrono::{DateTime, Utc};
use plotters::prelude::*;
use tracing::info;

use crate::domain::observation::Observation;
use crate::shared::errors::MonitorError;

const WIDTH: u32 = 1024;
const HEIGHT: u32 = 576;

/// Render the USD series to a PNG. Returns false (and renders nothing)
/// when there are fewer than two points to draw a line through.
pub fn render_usd_chart(observations: &[Observation], path: &Path) -> Result<bool, MonitorError> {
    if observations.len() < 2 {
        info!(
            "Skipping chart: only {} observation(s) in history",
            observations.len()
        );
        return Ok(false);
    }

    let (t_min, t_max) = time_bounds(observations);
    let (y_min, y_max) = price_bounds(observations);

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Bitcoin (BTC) - USD", ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(t_min..t_max, y_min..y_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_labels(6)
        .x_label_formatter(&|t: &DateTime<Utc>| t.format("%m-%d %H:%M").to_string())
        .y_label_formatter(&|v: &f64| format!("{:.0}", v))
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            observations.iter().map(|o| (o.timestamp, o.price_usd)),
            &BLUE,
        ))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    info!("Rendered chart with {} points to {}", observations.len(), path.display());
    Ok(true)
}

fn chart_err<E: std::fmt::Display>(e: E) -> MonitorError {
    MonitorError::Chart(e.to_string())
}

fn time_bounds(observations: &[Observation]) -> (DateTime<Utc>, DateTime<Utc>) {
    // Rows are append-ordered, but tolerate a clock step backwards
    let mut min = observations[0].timestamp;
    let mut max = observations[0].timestamp;
    for obs in observations {
        min = min.min(obs.timestamp);
        max = max.max(obs.timestamp);
    }
    (min, max)
}

/// Y range with a little headroom so the line never hugs the frame
fn price_bounds(observations: &[Observation]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for obs in observations {
        lo = lo.min(obs.price_usd);
        hi = hi.max(obs.price_usd);
    }

    let padding = ((hi - lo) * 0.05).max(hi.abs() * 0.001).max(1.0);
    (lo - padding, hi + padding)
}
