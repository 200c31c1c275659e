// src/state/analytics.rs
use std::io::Write;

use anyhow::Result;

use crate::api::AnalyticsData;

/// Category labels of the platform distribution chart, in bar order.
pub const PLATFORM_LABELS: [&str; 3] = ["LinkedIn", "Instagram", "Facebook"];

/// Smoothing factor for the engagement trend line.
pub const CURVE_TENSION: f64 = 0.4;

/// Interpolated points per trend segment.
pub const CURVE_SAMPLES: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed {
        message: String,
    },
}

/// Payload and fetch progress of the analytics screen.
///
/// Fetched once at startup and again on explicit refresh. A failed refresh
/// keeps the last payload so the charts stay up behind the error banner.
#[derive(Debug, Default)]
pub struct AnalyticsState {
    pub status: FetchStatus,
    pub data: Option<AnalyticsData>,
}

impl AnalyticsState {
    pub fn begin_fetch(&mut self) {
        self.status = FetchStatus::Loading;
    }

    pub fn apply(&mut self, data: AnalyticsData) {
        self.data = Some(data);
        self.status = FetchStatus::Loaded;
    }

    pub fn fail(&mut self, message: String) {
        self.status = FetchStatus::Failed { message };
    }

    pub fn loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }
}

/// `(day index, value)` pairs for the engagement trend, payload order
/// preserved.
pub fn trend_points(values: &[f64]) -> Vec<[f64; 2]> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| [i as f64, value])
        .collect()
}

/// Smooths the trend with a cardinal spline so the line curves between
/// points. Every original point stays on the curve; `tension` scales the
/// tangents, with 0 giving straight segments.
pub fn curve_points(values: &[f64], samples_per_segment: usize, tension: f64) -> Vec<[f64; 2]> {
    let points = trend_points(values);
    if points.len() < 3 || samples_per_segment < 2 {
        return points;
    }

    let tangent = |i: usize| -> [f64; 2] {
        let prev = points[i.saturating_sub(1)];
        let next = points[(i + 1).min(points.len() - 1)];
        [tension * (next[0] - prev[0]), tension * (next[1] - prev[1])]
    };

    let mut curve = Vec::with_capacity((points.len() - 1) * samples_per_segment + 1);
    for i in 0..points.len() - 1 {
        let p0 = points[i];
        let p1 = points[i + 1];
        let m0 = tangent(i);
        let m1 = tangent(i + 1);
        for step in 0..samples_per_segment {
            let t = step as f64 / samples_per_segment as f64;
            let t2 = t * t;
            let t3 = t2 * t;
            let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
            let h10 = t3 - 2.0 * t2 + t;
            let h01 = -2.0 * t3 + 3.0 * t2;
            let h11 = t3 - t2;
            curve.push([
                h00 * p0[0] + h10 * m0[0] + h01 * p1[0] + h11 * m1[0],
                h00 * p0[1] + h10 * m0[1] + h01 * p1[1] + h11 * m1[1],
            ]);
        }
    }
    curve.push(points[points.len() - 1]);
    curve
}

/// "Day 1" to "Day n" labels for the trend's category axis.
pub fn day_labels(count: usize) -> Vec<String> {
    (1..=count).map(|day| format!("Day {day}")).collect()
}

/// Bar values zipped with the fixed platform labels. A short payload leaves
/// trailing platforms out; extra values are dropped.
pub fn platform_series(values: &[f64]) -> Vec<(&'static str, f64)> {
    PLATFORM_LABELS
        .iter()
        .zip(values.iter())
        .map(|(&label, &value)| (label, value))
        .collect()
}

/// Writes both chart series as CSV rows of `series,label,value`.
pub fn write_csv<W: Write>(data: &AnalyticsData, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["series", "label", "value"])?;

    let days = day_labels(data.engagement_trend.len());
    for (label, value) in days.iter().zip(&data.engagement_trend) {
        csv.write_record(&[
            "engagement_trend".to_string(),
            label.clone(),
            value.to_string(),
        ])?;
    }
    for (label, value) in platform_series(&data.platforms) {
        csv.write_record(&["platforms".to_string(), label.to_string(), value.to_string()])?;
    }

    csv.flush()?;
    Ok(())
}
