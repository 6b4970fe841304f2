use eframe::egui;

use crate::config::AppConfig;
use crate::state::{AppState, Session};
use crate::ui::{export, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GuruMetricsApp {
    pub state: AppState,
}

impl GuruMetricsApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for GuruMetricsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Screenshot for a pending chart export ----
        export::handle_screenshot(ctx, &mut self.state);

        // ---- Drag and drop ----
        self.state.dragging = ctx.input(|i| !i.raw.hovered_files.is_empty());
        if let Some(file) = ctx.input(|i| i.raw.dropped_files.first().cloned()) {
            panels::load_dropped(&mut self.state, &file);
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: upload screen or dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if matches!(self.state.session, Session::Loaded(_)) {
                panels::dashboard(ui, &mut self.state);
            } else {
                panels::upload_panel(ui, &mut self.state);
            }
        });
    }
}
