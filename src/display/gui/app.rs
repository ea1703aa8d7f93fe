// src/display/gui/app.rs v1
//! Main application window and eframe::App implementation

use crate::{
    config::ViewerConfig,
    error::Result,
    map::TileCache,
    spot::ClassifiedSpot,
    wspr::{bands, query, Band, FetchOutcome, BANDS},
};
use chrono::{DateTime, Utc};
use eframe::egui;
use log::warn;
use std::{sync::mpsc, time::Duration};

use super::{map_panel::MapPanel, panels};

pub struct ViewerApp {
    config: ViewerConfig,
    selected_band: &'static Band,
    spots: Vec<ClassifiedSpot>,
    skipped: usize,
    status: String,
    last_fetch: Option<DateTime<Utc>>,
    fetch_rx: Option<mpsc::Receiver<std::result::Result<FetchOutcome, String>>>,
    map: MapPanel,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig) -> Result<Self> {
        let tile_cache = TileCache::new(config.tile_cache_dir()?)?;
        let map = MapPanel::new(
            tile_cache,
            config.map_center_lat,
            config.map_center_lon,
            config.map_zoom,
        );
        let selected_band =
            bands::band_by_label(&config.band).unwrap_or_else(bands::default_band);

        Ok(Self {
            config,
            selected_band,
            spots: Vec::new(),
            skipped: 0,
            status: "Select a band and fetch spots".to_string(),
            last_fetch: None,
            fetch_rx: None,
            map,
        })
    }

    fn fetching(&self) -> bool {
        self.fetch_rx.is_some()
    }

    /// Kick off one fetch on a worker thread. The button is disabled
    /// while `fetch_rx` is set, so at most one request is in flight.
    fn start_fetch(&mut self) {
        let (tx, rx) = mpsc::channel();
        let config = self.config.clone();
        let band_code = self.selected_band.code;

        self.status = format!("Fetching spots for {}...", self.selected_band.label);
        self.fetch_rx = Some(rx);

        std::thread::spawn(move || {
            let _ = tx.send(query::fetch_spots(&config, band_code).map_err(|e| e.to_string()));
        });
    }

    fn poll_fetch(&mut self) {
        let Some(rx) = &self.fetch_rx else {
            return;
        };

        match rx.try_recv() {
            Ok(Ok(outcome)) => {
                let spots: Vec<ClassifiedSpot> =
                    outcome.spots.into_iter().map(ClassifiedSpot::new).collect();
                let drawn = spots.iter().filter(|s| s.class.should_draw()).count();

                self.map.set_spots(&spots);
                self.skipped = outcome.skipped;
                self.status = format!(
                    "Found {} spots ({} drawn on map)",
                    spots.len(),
                    drawn
                );
                self.spots = spots;
                self.last_fetch = Some(Utc::now());
                self.fetch_rx = None;
            }
            Ok(Err(e)) => {
                self.status = format!("Failed to fetch data: {}", e);
                self.fetch_rx = None;
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.status = "Fetch worker exited unexpectedly".to_string();
                self.fetch_rx = None;
            }
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Repaint to pick up worker results and freshly downloaded tiles
        ctx.request_repaint_after(Duration::from_millis(500));

        self.poll_fetch();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.heading("📡 WSPR Band Viewer");
                ui.separator();

                ui.label("Band:");
                egui::ComboBox::from_id_source("band_select")
                    .selected_text(self.selected_band.label)
                    .width(140.0)
                    .show_ui(ui, |ui| {
                        for band in BANDS {
                            ui.selectable_value(&mut self.selected_band, band, band.label);
                        }
                    });

                let fetch_label = format!("Fetch spots (last {} h)", self.config.window_hours);
                if ui
                    .add_enabled(!self.fetching(), egui::Button::new(fetch_label))
                    .clicked()
                {
                    self.start_fetch();
                }

                if self.fetching() {
                    ui.spinner();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(ts) = self.last_fetch {
                        ui.label(format!("Last fetch: {}", ts.format("%H:%M:%S UTC")));
                        ui.separator();
                    }
                    ui.label(&self.status);
                });
            });
        });

        egui::TopBottomPanel::bottom("map_panel")
            .resizable(true)
            .default_height(480.0)
            .show(ctx, |ui| {
                self.map.show(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            panels::render_spot_list(ui, &self.spots, self.skipped);
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Remember the last selected band for the next run
        self.config.band = self.selected_band.label.to_string();
        if let Err(e) = self.config.save() {
            warn!("failed to save config: {}", e);
        }
    }
}
