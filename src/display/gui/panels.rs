// src/display/gui/panels.rs v1
//! Spot list panel rendering

use crate::spot::{ClassifiedSpot, PathClass};
use eframe::egui;

/// Map and list color for a propagation class. The blue/red/green
/// assignment matches the terminal report.
pub fn class_color(class: PathClass) -> egui::Color32 {
    match class {
        PathClass::Default => egui::Color32::from_rgb(0, 122, 255),
        PathClass::SporadicE => egui::Color32::from_rgb(230, 60, 60),
        PathClass::TropoDx => egui::Color32::from_rgb(60, 190, 90),
        PathClass::Suppressed => egui::Color32::GRAY,
    }
}

pub fn render_spot_list(ui: &mut egui::Ui, spots: &[ClassifiedSpot], skipped: usize) {
    ui.horizontal(|ui| {
        ui.strong("Spot reports");
        if !spots.is_empty() {
            ui.separator();
            render_class_counts(ui, spots);
            if skipped > 0 {
                ui.separator();
                ui.weak(format!("{} malformed record(s) skipped", skipped));
            }
        }
    });
    ui.separator();

    if spots.is_empty() {
        ui.weak("No spots fetched yet");
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for spot in spots {
                ui.colored_label(
                    class_color(spot.class),
                    egui::RichText::new(spot.report_line()).monospace(),
                );
            }
        });
}

fn render_class_counts(ui: &mut egui::Ui, spots: &[ClassifiedSpot]) {
    for class in [
        PathClass::Default,
        PathClass::SporadicE,
        PathClass::TropoDx,
        PathClass::Suppressed,
    ] {
        let count = spots.iter().filter(|s| s.class == class).count();
        if count > 0 {
            ui.colored_label(class_color(class), format!("{}: {}", class.label(), count));
        }
    }
}
