// src/display/gui/mod.rs v1
//! GUI display module - main orchestration

mod app;
mod map_panel;
mod panels;

pub use app::ViewerApp;

use crate::config::ViewerConfig;
use crate::error::{Result, ViewerError};

/// Launch the GUI application. Blocks until the window closes.
pub fn run(config: ViewerConfig) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([900.0, 900.0])
            .with_title("WSPR Band Spot Viewer")
            .with_min_inner_size([700.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "WSPR Band Spot Viewer",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(eframe::egui::Visuals::dark());

            match ViewerApp::new(config) {
                Ok(app) => Ok(Box::new(app)),
                Err(e) => Err(format!("Failed to start viewer: {}", e).into()),
            }
        }),
    )
    .map_err(|e| ViewerError::Other(format!("GUI error: {}", e)))
}
