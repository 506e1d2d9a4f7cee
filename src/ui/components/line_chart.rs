use dioxus::prelude::*;
use time::{macros::format_description, Date};

use crate::domain::{price_series::PriceSeries, TrendChart};

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 360.0;
const PAD_LEFT: f64 = 90.0;
const PAD_RIGHT: f64 = 20.0;
const PAD_TOP: f64 = 40.0;
const PAD_BOTTOM: f64 = 50.0;

/// Screen-space layout of a price series inside the chart frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartGeometry {
    /// One `points` attribute per unbroken run of priced rows.
    pub segments: Vec<String>,
    pub min_price: f64,
    pub max_price: f64,
    pub first_date: Date,
    pub last_date: Date,
}

/// Lays the series out by row index so missing prices leave a gap instead of
/// shifting later points. `None` when no row has a price.
pub fn chart_geometry(series: &PriceSeries) -> Option<ChartGeometry> {
    let (min_price, max_price) = series.priced().fold(None, |acc, (_, price)| match acc {
        None => Some((price, price)),
        Some((lo, hi)) => Some((f64::min(lo, price), f64::max(hi, price))),
    })?;

    let plot_width = WIDTH - PAD_LEFT - PAD_RIGHT;
    let plot_height = HEIGHT - PAD_TOP - PAD_BOTTOM;
    let last_index = series.len().saturating_sub(1).max(1) as f64;
    let range = max_price - min_price;

    let mut segments = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for (idx, point) in series.points.iter().enumerate() {
        match point.price.filter(|price| price.is_finite()) {
            Some(price) => {
                let x = PAD_LEFT + idx as f64 / last_index * plot_width;
                let ratio = if range > 0.0 {
                    (price - min_price) / range
                } else {
                    0.5
                };
                let y = PAD_TOP + (1.0 - ratio) * plot_height;
                current.push(format!("{x:.1},{y:.1}"));
            }
            None => {
                if !current.is_empty() {
                    segments.push(current.join(" "));
                    current.clear();
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current.join(" "));
    }

    Some(ChartGeometry {
        segments,
        min_price,
        max_price,
        first_date: series.points.first()?.date,
        last_date: series.points.last()?.date,
    })
}

pub fn month_label(date: Date) -> String {
    date.format(format_description!("[year]-[month]"))
        .unwrap_or_default()
}

pub fn price_label(price: f64) -> String {
    format!("${price:.0}")
}

#[component]
pub fn LineChart(chart: TrendChart) -> Element {
    let Some(geometry) = chart_geometry(&chart.series) else {
        return rsx! {
            p { class: "muted", "No prices recorded for {chart.series.region}." }
        };
    };

    let axis_bottom = HEIGHT - PAD_BOTTOM;
    let axis_right = WIDTH - PAD_RIGHT;
    let mid_x = PAD_LEFT + (axis_right - PAD_LEFT) / 2.0;
    let mid_y = HEIGHT / 2.0;
    let tick_x = PAD_LEFT - 8.0;
    let high_y = PAD_TOP + 4.0;
    let date_y = axis_bottom + 18.0;
    let x_label_y = HEIGHT - 8.0;
    let y_label_transform = format!("rotate(-90 16 {mid_y})");
    let first = month_label(geometry.first_date);
    let last = month_label(geometry.last_date);
    let high = price_label(geometry.max_price);
    let low = price_label(geometry.min_price);
    let legend = chart.series.columns()[1];
    let legend_x = axis_right - 60.0;
    let legend_end = legend_x + 20.0;
    let legend_text_x = legend_end + 6.0;

    rsx! {
        svg {
            class: "chart",
            view_box: "0 0 {WIDTH} {HEIGHT}",
            text { class: "chart-title", x: "{PAD_LEFT}", y: "24", "{chart.title}" }
            line { class: "chart-line", x1: "{legend_x}", y1: "20", x2: "{legend_end}", y2: "20" }
            text { class: "chart-label", x: "{legend_text_x}", y: "24", "{legend}" }
            line { class: "chart-axis", x1: "{PAD_LEFT}", y1: "{PAD_TOP}", x2: "{PAD_LEFT}", y2: "{axis_bottom}" }
            line { class: "chart-axis", x1: "{PAD_LEFT}", y1: "{axis_bottom}", x2: "{axis_right}", y2: "{axis_bottom}" }
            for points in geometry.segments {
                polyline { class: "chart-line", points: "{points}" }
            }
            text { class: "chart-label", x: "{tick_x}", y: "{high_y}", text_anchor: "end", "{high}" }
            text { class: "chart-label", x: "{tick_x}", y: "{axis_bottom}", text_anchor: "end", "{low}" }
            text { class: "chart-label", x: "{PAD_LEFT}", y: "{date_y}", "{first}" }
            text { class: "chart-label", x: "{axis_right}", y: "{date_y}", text_anchor: "end", "{last}" }
            text { class: "chart-label", x: "{mid_x}", y: "{x_label_y}", text_anchor: "middle", "{chart.x_label}" }
            text {
                class: "chart-label",
                x: "16",
                y: "{mid_y}",
                transform: "{y_label_transform}",
                text_anchor: "middle",
                "{chart.y_label}"
            }
        }
    }
}
