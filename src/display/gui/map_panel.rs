// src/display/gui/map_panel.rs v1
//! Slippy map with spot markers and propagation paths

use crate::{
    map::{lat_lon_to_tile, TileCache, TileKey},
    spot::ClassifiedSpot,
};
use eframe::egui;
use std::collections::HashMap;

use super::panels::class_color;

const TILE_SIZE: f32 = 256.0;
const MIN_ZOOM: u8 = 1;
const MAX_ZOOM: u8 = 18;

/// One drawable path between transmitter and receiver.
struct SpotPath {
    tx: (f64, f64),
    rx: (f64, f64),
    tx_sign: String,
    rx_sign: String,
    color: egui::Color32,
}

pub struct MapPanel {
    tile_cache: TileCache,
    zoom: u8,
    center_lat: f64,
    center_lon: f64,
    home: (f64, f64, u8),
    textures: HashMap<TileKey, egui::TextureHandle>,
    paths: Vec<SpotPath>,
}

impl MapPanel {
    pub fn new(tile_cache: TileCache, center_lat: f64, center_lon: f64, zoom: u8) -> Self {
        Self {
            tile_cache,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            center_lat,
            center_lon,
            home: (center_lat, center_lon, zoom.clamp(MIN_ZOOM, MAX_ZOOM)),
            textures: HashMap::new(),
            paths: Vec::new(),
        }
    }

    /// Replace the overlay with the drawable spots of a new fetch.
    /// Suppressed contacts never reach the map.
    pub fn set_spots(&mut self, spots: &[ClassifiedSpot]) {
        self.paths = spots
            .iter()
            .filter(|s| s.class.should_draw())
            .map(|s| SpotPath {
                tx: (s.spot.tx_lat, s.spot.tx_lon),
                rx: (s.spot.rx_lat, s.spot.rx_lon),
                tx_sign: s.spot.tx_sign.clone(),
                rx_sign: s.spot.rx_sign.clone(),
                color: class_color(s.class),
            })
            .collect();
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Zoom:");
            if ui.button("➖").clicked() && self.zoom > MIN_ZOOM {
                self.zoom -= 1;
            }
            ui.label(format!("{}", self.zoom));
            if ui.button("➕").clicked() && self.zoom < MAX_ZOOM {
                self.zoom += 1;
            }

            ui.separator();

            if ui.button("🌍 Reset view").clicked() {
                let (lat, lon, zoom) = self.home;
                self.center_lat = lat;
                self.center_lon = lon;
                self.zoom = zoom;
            }

            ui.separator();
            ui.label(format!("Paths: {}", self.paths.len()));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let stats = self.tile_cache.stats();
                ui.label(format!(
                    "Cache: {} tiles ({:.1} MB)",
                    stats.disk_tiles, stats.disk_size_mb
                ));
                if ui.button("🗑 Clear cache").clicked() {
                    let _ = self.tile_cache.clear_disk();
                    self.textures.clear();
                }
            });
        });

        ui.separator();

        let available = ui.available_size();
        let (response, painter) = ui.allocate_painter(available, egui::Sense::drag());

        if response.dragged() {
            self.pan(response.drag_delta());
        }

        let ctx = ui.ctx().clone();
        self.render_tiles(&ctx, &painter, response.rect);
        self.render_paths(&painter, response.rect);

        ui.label(format!(
            "Center: {:.4}, {:.4}",
            self.center_lat, self.center_lon
        ));
    }

    fn render_tiles(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: egui::Rect) {
        let (center_tile_x, center_tile_y) =
            lat_lon_to_tile(self.center_lat, self.center_lon, self.zoom);
        let (center_px, center_py) = world_pixel(self.center_lat, self.center_lon, self.zoom);
        let offset_x = (center_px % TILE_SIZE as f64) as f32;
        let offset_y = (center_py % TILE_SIZE as f64) as f32;

        let tiles_x = (rect.width() / TILE_SIZE).ceil() as i32 + 1;
        let tiles_y = (rect.height() / TILE_SIZE).ceil() as i32 + 1;
        let world_tiles = 1_i64 << self.zoom;

        for dy in -tiles_y..=tiles_y {
            let tile_y = center_tile_y as i64 + dy as i64;
            if tile_y < 0 || tile_y >= world_tiles {
                continue;
            }
            for dx in -tiles_x..=tiles_x {
                // Wrap horizontally so low zooms tile the whole width
                let tile_x = (center_tile_x as i64 + dx as i64).rem_euclid(world_tiles);

                let screen_x =
                    rect.left() + rect.width() / 2.0 + dx as f32 * TILE_SIZE - offset_x;
                let screen_y =
                    rect.top() + rect.height() / 2.0 + dy as f32 * TILE_SIZE - offset_y;

                let tile_rect = egui::Rect::from_min_size(
                    egui::pos2(screen_x, screen_y),
                    egui::vec2(TILE_SIZE, TILE_SIZE),
                );
                if !rect.intersects(tile_rect) {
                    continue;
                }

                self.render_tile(
                    ctx,
                    painter,
                    (self.zoom, tile_x as u32, tile_y as u32),
                    tile_rect,
                );
            }
        }
    }

    fn render_tile(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        key: TileKey,
        tile_rect: egui::Rect,
    ) {
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

        if let Some(texture) = self.textures.get(&key) {
            painter.image(texture.id(), tile_rect, uv, egui::Color32::WHITE);
            return;
        }

        match self.tile_cache.cached_tile(key) {
            Some(bytes) => {
                if let Ok(decoded) = image::load_from_memory(&bytes) {
                    let size = [decoded.width() as usize, decoded.height() as usize];
                    let rgba = decoded.to_rgba8();
                    let color_image =
                        egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice());

                    let (zoom, x, y) = key;
                    let texture = ctx.load_texture(
                        format!("tile_{}_{}_{}", zoom, x, y),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    );

                    painter.image(texture.id(), tile_rect, uv, egui::Color32::WHITE);
                    self.textures.insert(key, texture);
                }
            }
            None => {
                self.tile_cache.request_download(key);

                painter.rect_filled(tile_rect, 0.0, egui::Color32::from_gray(40));
                painter.text(
                    tile_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "...",
                    egui::FontId::proportional(12.0),
                    egui::Color32::GRAY,
                );
            }
        }
    }

    fn render_paths(&self, painter: &egui::Painter, rect: egui::Rect) {
        for path in &self.paths {
            let tx_pos = self.to_screen(path.tx.0, path.tx.1, rect);
            let rx_pos = self.to_screen(path.rx.0, path.rx.1, rect);

            // Draw when any part of the segment can be visible
            if rect.contains(tx_pos) || rect.contains(rx_pos) {
                painter.line_segment([tx_pos, rx_pos], egui::Stroke::new(2.0, path.color));
            }

            if rect.contains(tx_pos) {
                self.render_marker(painter, tx_pos, path.color, &format!("Tx: {}", path.tx_sign));
            }
            if rect.contains(rx_pos) {
                self.render_marker(painter, rx_pos, path.color, &format!("Rx: {}", path.rx_sign));
            }
        }
    }

    fn render_marker(
        &self,
        painter: &egui::Painter,
        pos: egui::Pos2,
        color: egui::Color32,
        label: &str,
    ) {
        painter.circle_filled(pos, 5.0, color);
        painter.circle_stroke(pos, 5.0, egui::Stroke::new(1.5, egui::Color32::WHITE));
        painter.text(
            pos + egui::vec2(8.0, -8.0),
            egui::Align2::LEFT_BOTTOM,
            label,
            egui::FontId::proportional(11.0),
            egui::Color32::WHITE,
        );
    }

    fn to_screen(&self, lat: f64, lon: f64, rect: egui::Rect) -> egui::Pos2 {
        let (wx, wy) = world_pixel(lat, lon, self.zoom);
        let (cx, cy) = world_pixel(self.center_lat, self.center_lon, self.zoom);

        egui::pos2(
            rect.left() + rect.width() / 2.0 + (wx - cx) as f32,
            rect.top() + rect.height() / 2.0 + (wy - cy) as f32,
        )
    }

    fn pan(&mut self, delta: egui::Vec2) {
        let (cx, cy) = world_pixel(self.center_lat, self.center_lon, self.zoom);
        let (lat, lon) = pixel_to_lat_lon(cx - delta.x as f64, cy - delta.y as f64, self.zoom);

        self.center_lat = lat.clamp(-85.0, 85.0);
        self.center_lon = ((lon + 180.0).rem_euclid(360.0)) - 180.0;
    }
}

/// Web-mercator pixel coordinates of a lat/lon at a zoom level.
fn world_pixel(lat: f64, lon: f64, zoom: u8) -> (f64, f64) {
    let n = 2_f64.powi(zoom as i32) * TILE_SIZE as f64;
    let x = (lon + 180.0) / 360.0 * n;
    let lat_rad = lat.to_radians();
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0 * n;
    (x, y)
}

fn pixel_to_lat_lon(x: f64, y: f64, zoom: u8) -> (f64, f64) {
    let n = 2_f64.powi(zoom as i32) * TILE_SIZE as f64;
    let lon = x / n * 360.0 - 180.0;
    let lat = ((1.0 - 2.0 * y / n) * std::f64::consts::PI).sinh().atan().to_degrees();
    (lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_pixel_round_trip() {
        let (x, y) = world_pixel(38.021, 23.708, 6);
        let (lat, lon) = pixel_to_lat_lon(x, y, 6);

        assert!((lat - 38.021).abs() < 1e-6);
        assert!((lon - 23.708).abs() < 1e-6);
    }

    #[test]
    fn test_world_pixel_origin() {
        // Lat/lon (0, 0) sits at the center of the world map
        let (x, y) = world_pixel(0.0, 0.0, 0);
        assert!((x - TILE_SIZE as f64 / 2.0).abs() < 1e-9);
        assert!((y - TILE_SIZE as f64 / 2.0).abs() < 1e-9);
    }
}
