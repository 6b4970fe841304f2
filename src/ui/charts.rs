use std::f32::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

use eframe::egui::{self, Align, Color32, Layout, Pos2, Rect, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints};

use crate::color::{self, SliceColors};
use crate::data::model::Record;
use crate::data::stats::DistributionBucket;
use crate::data::view::{axis_labels, numeric_series};

const CHART_HEIGHT: f32 = 300.0;

// ---------------------------------------------------------------------------
// Card frame shared by all charts
// ---------------------------------------------------------------------------

/// Titled card with a download button. Returns the card's rectangle when the
/// button was clicked.
pub fn chart_card(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) -> Option<Rect> {
    let mut download = false;
    let response = egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new(title).heading());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                if ui.button("Download").on_hover_text("Download Chart").clicked() {
                    download = true;
                }
            });
        });
        ui.add_space(8.0);
        add_contents(ui);
    });
    download.then_some(response.response.rect)
}

/// X-axis tick text: the label of the row at an integral position.
fn row_label_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let x = mark.value;
        if x < 0.0 || x.fract() != 0.0 {
            return String::new();
        }
        labels.get(x as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Trend (area line over the chart window)
// ---------------------------------------------------------------------------

/// Area chart of `column` across the window rows.
pub fn trend_chart(
    ui: &mut Ui,
    window: &[Record],
    column: (usize, &str),
    category: Option<usize>,
) {
    let (idx, name) = column;
    let points = PlotPoints::from(numeric_series(window, idx));

    Plot::new("trend_chart")
        .height(CHART_HEIGHT)
        .x_axis_formatter(row_label_formatter(axis_labels(window, category)))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name(name)
                    .color(color::TREND)
                    .fill(0.0_f32)
                    .width(2.0),
            );
        });
}

// ---------------------------------------------------------------------------
// Comparison (grouped bars of two numeric columns)
// ---------------------------------------------------------------------------

/// Side-by-side bars of two numeric columns for each window row.
pub fn comparison_chart(
    ui: &mut Ui,
    window: &[Record],
    first: (usize, &str),
    second: (usize, &str),
    category: Option<usize>,
) {
    let bars = |col: usize, offset: f64| -> Vec<Bar> {
        numeric_series(window, col)
            .into_iter()
            .map(|[x, y]| Bar::new(x + offset, y).width(0.35))
            .collect()
    };
    let a = BarChart::new(bars(first.0, -0.2)).name(first.1).color(color::COMPARE_A);
    let b = BarChart::new(bars(second.0, 0.2)).name(second.1).color(color::COMPARE_B);

    Plot::new("comparison_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_formatter(row_label_formatter(axis_labels(window, category)))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(a);
            plot_ui.bar_chart(b);
        });
}

// ---------------------------------------------------------------------------
// Distribution (donut with legend)
// ---------------------------------------------------------------------------

/// Donut chart of the top categories, followed by a legend.
pub fn distribution_chart(ui: &mut Ui, buckets: &[DistributionBucket]) {
    let colors = SliceColors::new(buckets);
    let total: usize = buckets.iter().map(|b| b.count).sum();

    let size = egui::vec2(ui.available_width(), CHART_HEIGHT - 40.0);
    let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);

    let outer = rect.height().min(rect.width()) / 2.0 - 8.0;
    let inner = outer * 0.75;
    let center = rect.center();

    let mut start = -FRAC_PI_2;
    let mut hovered: Option<usize> = None;
    let hover_pos = response.hover_pos();
    for (i, bucket) in buckets.iter().enumerate() {
        let sweep = bucket.count as f32 / total.max(1) as f32 * TAU;
        for shape in ring_segment(center, inner, outer, start, sweep, colors.color_at(i)) {
            painter.add(shape);
        }
        if let Some(pos) = hover_pos {
            if in_segment(center, inner, outer, start, sweep, pos) {
                hovered = Some(i);
            }
        }
        start += sweep;
    }

    if let Some(i) = hovered {
        response.on_hover_text(format!("{}: {}", buckets[i].label, buckets[i].count));
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (label, color) in colors.legend_entries() {
            ui.label(RichText::new("■").color(*color));
            ui.label(label);
            ui.add_space(8.0);
        }
    });
}

/// Annular sector split into convex quads.
fn ring_segment(center: Pos2, inner: f32, outer: f32, start: f32, sweep: f32, fill: Color32) -> Vec<Shape> {
    let steps = ((sweep / 0.05).ceil() as usize).max(1);
    let at = |radius: f32, angle: f32| center + radius * egui::vec2(angle.cos(), angle.sin());

    (0..steps)
        .map(|s| {
            let a0 = start + sweep * s as f32 / steps as f32;
            let a1 = start + sweep * (s + 1) as f32 / steps as f32;
            Shape::convex_polygon(
                vec![at(inner, a0), at(outer, a0), at(outer, a1), at(inner, a1)],
                fill,
                Stroke::NONE,
            )
        })
        .collect()
}

fn in_segment(center: Pos2, inner: f32, outer: f32, start: f32, sweep: f32, pos: Pos2) -> bool {
    let d = pos - center;
    let r = d.length();
    if r < inner || r > outer {
        return false;
    }
    let angle = (d.y.atan2(d.x) - start).rem_euclid(TAU);
    angle <= sweep
}
