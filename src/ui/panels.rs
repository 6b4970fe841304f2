use std::io;

use eframe::egui::{self, Align, Layout, Rect, RichText, ScrollArea, Stroke, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color;
use crate::data::loader::{self, LoadError};
use crate::data::stats::SummaryStats;
use crate::state::{AppState, LoadedDataset};
use crate::ui::{charts, export};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.loaded().is_some(), egui::Button::new("Upload New File"))
                .clicked()
            {
                state.reset();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(loaded) = state.loaded() {
            ui.label(format!("{}: {} rows", loaded.name, loaded.dataset.len()));
        }

        if state.loaded().is_some() {
            if let Some(msg) = &state.status_message {
                ui.separator();
                ui.label(RichText::new(msg).color(color::ERROR));
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Upload panel (empty session)
// ---------------------------------------------------------------------------

/// Drop target and "Select File" button shown while no dataset is loaded.
pub fn upload_panel(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(40.0);
        ui.heading(RichText::new("Guru Metrics").size(32.0));
        ui.label("Professional Data Analytics & Visualization");
        ui.add_space(40.0);

        let stroke = if state.dragging {
            Stroke::new(2.0, color::TREND)
        } else {
            ui.visuals().widgets.noninteractive.bg_stroke
        };

        egui::Frame::group(ui.style()).stroke(stroke).show(ui, |ui: &mut Ui| {
            ui.set_max_width(600.0);
            ui.vertical_centered(|ui: &mut Ui| {
                ui.add_space(30.0);
                ui.heading("Upload your CSV");
                ui.label("Drag and drop your file here, or click to browse");
                ui.add_space(20.0);

                if ui.button("Select File").clicked() {
                    open_file_dialog(state);
                }

                if let Some(msg) = &state.status_message {
                    ui.add_space(20.0);
                    ui.label(RichText::new(msg).color(color::ERROR));
                }
                ui.add_space(30.0);
            });
        });
    });
}

// ---------------------------------------------------------------------------
// Dashboard (loaded session)
// ---------------------------------------------------------------------------

/// Stats cards, charts and data preview for the loaded dataset.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let mut reset = false;
    let mut export_request: Option<(String, Rect)> = None;

    if let Some(loaded) = state.loaded() {
        ui.horizontal(|ui: &mut Ui| {
            ui.heading(RichText::new("Dashboard").size(28.0));
            ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                if ui.button("Upload New File").clicked() {
                    reset = true;
                }
            });
        });
        ui.add_space(16.0);

        if loaded.dataset.is_empty() {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("No data available");
            });
        } else {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    stats_row(ui, &loaded.analysis.stats);
                    ui.add_space(24.0);
                    export_request = chart_grid(ui, loaded);
                    ui.add_space(24.0);
                    data_preview(ui, loaded);
                });
        }
    }

    if reset {
        state.reset();
    } else if let Some((title, rect)) = export_request {
        export::request_export(ui.ctx(), state, &title, rect);
    }
}

fn stats_row(ui: &mut Ui, stats: &SummaryStats) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        stat_card(ui, "Total Records", &stats.row_count.to_string());
        if let Some(numeric) = &stats.numeric {
            stat_card(ui, &format!("Total {}", numeric.column), &format_thousands(numeric.sum));
            stat_card(ui, &format!("Avg {}", numeric.column), &format!("{:.2}", numeric.average));
        }
    });
}

fn stat_card(ui: &mut Ui, title: &str, value: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(220.0);
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(title).weak());
            ui.label(RichText::new(value).size(28.0).strong());
        });
    });
}

/// Trend, comparison and distribution cards, each shown only when the
/// columns it needs exist. Returns the card to export, if one was requested.
fn chart_grid(ui: &mut Ui, loaded: &LoadedDataset) -> Option<(String, Rect)> {
    let dataset = &loaded.dataset;
    let columns = &loaded.analysis.columns;
    let window = loaded.window();
    let category = columns
        .first_categorical()
        .and_then(|c| dataset.column_index(c));
    let numeric: Vec<(usize, &str)> = columns
        .numeric
        .iter()
        .take(2)
        .filter_map(|name| Some((dataset.column_index(name)?, name.as_str())))
        .collect();

    let mut request = None;

    if let Some(&first) = numeric.first() {
        let title = format!("{} Trend", first.1);
        if let Some(rect) = charts::chart_card(ui, &title, |ui: &mut Ui| {
            charts::trend_chart(ui, window, first, category);
        }) {
            request = Some((title, rect));
        }
        ui.add_space(16.0);
    }

    if let [first, second] = numeric[..] {
        let title = format!("{} vs {}", first.1, second.1);
        if let Some(rect) = charts::chart_card(ui, &title, |ui: &mut Ui| {
            charts::comparison_chart(ui, window, first, second, category);
        }) {
            request = Some((title, rect));
        }
        ui.add_space(16.0);
    }

    let buckets = &loaded.analysis.distribution;
    if let Some(cat) = columns.first_categorical().filter(|_| !buckets.is_empty()) {
        let title = format!("Distribution by {cat}");
        if let Some(rect) = charts::chart_card(ui, &title, |ui: &mut Ui| {
            charts::distribution_chart(ui, buckets);
        }) {
            request = Some((title, rect));
        }
    }

    request
}

/// Table of the chart window rows.
fn data_preview(ui: &mut Ui, loaded: &LoadedDataset) {
    let columns = loaded.dataset.columns();
    let window = loaded.window();

    ui.strong(format!("Preview (first {} rows)", window.len()));
    ui.add_space(8.0);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(320.0)
        .columns(Column::auto().at_least(60.0), columns.len())
        .header(20.0, |mut header| {
            for name in columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, window.len(), |mut row| {
                for value in window[row.index()].values() {
                    row.col(|ui: &mut Ui| {
                        ui.label(value.to_string());
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// File ingestion
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open CSV data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        state.finish_load(&name, loader::load_file(&path));
    }
}

/// Load the first file dropped onto the window.
pub fn load_dropped(state: &mut AppState, file: &egui::DroppedFile) {
    let media_type = (!file.mime.is_empty()).then_some(file.mime.as_str());
    let name = match (&file.path, file.name.is_empty()) {
        (Some(path), true) => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        _ => file.name.clone(),
    };

    let result = match (&file.bytes, &file.path) {
        (Some(bytes), _) => loader::load_bytes(&name, media_type, bytes),
        (None, Some(path)) => loader::load_path(path, media_type),
        (None, None) => Err(LoadError::Read {
            name: name.clone(),
            source: io::Error::new(io::ErrorKind::NotFound, "dropped file carried no data"),
        }),
    };
    state.finish_load(&name, result);
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Thousands separators and at most three fraction digits:
/// `1234567.5` → `1,234,567.5`.
pub fn format_thousands(v: f64) -> String {
    let text = format!("{:.3}", v.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let frac = frac_part.trim_end_matches('0');
    let sign = if v < 0.0 && (grouped != "0" || !frac.is_empty()) { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(35.0), "35");
        assert_eq!(format_thousands(1234.0), "1,234");
        assert_eq!(format_thousands(1234567.5), "1,234,567.5");
        assert_eq!(format_thousands(-9876.125), "-9,876.125");
        assert_eq!(format_thousands(0.1 + 0.2), "0.3");
        assert_eq!(format_thousands(-0.0001), "0");
        assert_eq!(format_thousands(100000.0), "100,000");
    }

    #[test]
    fn dropped_file_uses_declared_type() {
        let mut state = AppState::default();
        let file = egui::DroppedFile {
            name: "export".to_string(),
            mime: "text/csv".to_string(),
            bytes: Some(b"city,sales\nNY,10\n".to_vec().into()),
            ..Default::default()
        };
        load_dropped(&mut state, &file);

        let loaded = state.loaded().unwrap();
        assert_eq!(loaded.name, "export");
        assert_eq!(loaded.analysis.stats.row_count, 1);
    }

    #[test]
    fn dropped_non_csv_is_rejected() {
        let mut state = AppState::default();
        let file = egui::DroppedFile {
            name: "photo.png".to_string(),
            mime: "image/png".to_string(),
            bytes: Some(vec![0u8; 4].into()),
            ..Default::default()
        };
        load_dropped(&mut state, &file);

        assert!(state.loaded().is_none());
        assert_eq!(state.status_message.as_deref(), Some("Please upload a valid CSV file."));
    }

    #[test]
    fn dropped_file_without_data_is_read_error() {
        let mut state = AppState::default();
        let file = egui::DroppedFile {
            name: "sales.csv".to_string(),
            mime: "text/csv".to_string(),
            ..Default::default()
        };
        load_dropped(&mut state, &file);

        assert!(state.loaded().is_none());
        assert_eq!(state.status_message.as_deref(), Some("Failed to read file."));
    }
}
