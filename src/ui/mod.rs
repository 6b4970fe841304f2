/// Presentation layer: egui panels, charts and chart snapshot export.
pub mod charts;
pub mod export;
pub mod panels;
