use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use eframe::egui::{self, ColorImage, Pos2, Rect};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart snapshot export
// ---------------------------------------------------------------------------

/// A chart card waiting to be cut out of the next viewport screenshot.
#[derive(Debug, Clone)]
pub struct PendingExport {
    pub title: String,
    /// Card rectangle in points.
    pub rect: Rect,
    pub path: PathBuf,
}

/// Default file name for a chart snapshot: whitespace runs become `_`,
/// everything is lower-cased, and `_chart.png` is appended.
pub fn chart_file_name(title: &str) -> String {
    let mut name = String::with_capacity(title.len() + 10);
    let mut in_space = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_space {
                name.push('_');
            }
            in_space = true;
        } else {
            name.push(c);
            in_space = false;
        }
    }
    format!("{}_chart.png", name.to_lowercase())
}

/// Ask for a target file and schedule a screenshot of the card at `rect`.
pub fn request_export(ctx: &egui::Context, state: &mut AppState, title: &str, rect: Rect) {
    let file = rfd::FileDialog::new()
        .set_title("Save chart")
        .set_file_name(chart_file_name(title))
        .add_filter("PNG image", &["png"])
        .save_file();

    if let Some(path) = file {
        state.pending_export = Some(PendingExport {
            title: title.to_string(),
            rect,
            path,
        });
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
    }
}

/// Complete a pending export once the screenshot arrives.
pub fn handle_screenshot(ctx: &egui::Context, state: &mut AppState) {
    if state.pending_export.is_none() {
        return;
    }
    let screenshot: Option<Arc<ColorImage>> = ctx.input(|i| {
        i.raw.events.iter().find_map(|e| match e {
            egui::Event::Screenshot { image, .. } => Some(image.clone()),
            _ => None,
        })
    });
    let Some(image) = screenshot else {
        return;
    };
    let Some(pending) = state.pending_export.take() else {
        return;
    };

    let ppp = ctx.pixels_per_point();
    let Some(rect) = clip_to_image(pending.rect.intersect(ctx.screen_rect()), image.size, ppp)
    else {
        log::warn!("Chart '{}' is outside the visible window", pending.title);
        state.status_message =
            Some("Chart is not visible; scroll it into view and download again.".to_string());
        return;
    };

    let card = image.region(&rect, Some(ppp));
    match save_png(&card, &pending.path) {
        Ok(()) => log::info!("Saved '{}' to {}", pending.title, pending.path.display()),
        Err(e) => {
            log::error!("Failed to export chart: {e:#}");
            state.status_message = Some(format!("Failed to download chart: {e:#}"));
        }
    }
}

/// Part of `rect` (points) covered by an image of `size` pixels, or `None`
/// when less than one pixel of it is inside.
fn clip_to_image(rect: Rect, size: [usize; 2], pixels_per_point: f32) -> Option<Rect> {
    let bounds = Rect::from_min_size(
        Pos2::ZERO,
        egui::vec2(size[0] as f32, size[1] as f32) / pixels_per_point,
    );
    let clipped = rect.intersect(bounds);
    let visible = clipped.width() * pixels_per_point >= 1.0
        && clipped.height() * pixels_per_point >= 1.0;
    visible.then_some(clipped)
}

/// Encode an egui image as PNG.
pub fn save_png(image: &ColorImage, path: &Path) -> Result<()> {
    let [w, h] = image.size;
    let bytes: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|c| c.to_srgba_unmultiplied())
        .collect();
    let buffer = image::RgbaImage::from_raw(w as u32, h as u32, bytes)
        .context("snapshot size does not match its pixel data")?;
    buffer
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))
}
