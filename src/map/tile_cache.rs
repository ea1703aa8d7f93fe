// src/map/tile_cache.rs v2
//! OpenStreetMap tile downloading and caching

use crate::error::{Result, ViewerError};
use log::warn;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// (zoom, x, y) slippy-map tile address.
pub type TileKey = (u8, u32, u32);

const TILE_URL: &str = "https://tile.openstreetmap.org";
const TILE_USER_AGENT: &str = "wspr-viewer/0.1 (WSPR spot map client)";
const MAX_MEMORY_TILES: usize = 100;
const MAX_CONCURRENT_DOWNLOADS: usize = 4;

/// Tile coordinates for a lat/lon at a zoom level.
pub fn lat_lon_to_tile(lat: f64, lon: f64, zoom: u8) -> (u32, u32) {
    let n = 2_f64.powi(zoom as i32);
    let x = ((lon + 180.0) / 360.0 * n).floor() as u32;
    let lat_rad = lat.to_radians();
    let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0 * n)
        .floor() as u32;
    (x, y)
}

/// Lat/lon of a tile's north-west corner.
pub fn tile_to_lat_lon(x: u32, y: u32, zoom: u8) -> (f64, f64) {
    let n = 2_f64.powi(zoom as i32);
    let lon = x as f64 / n * 360.0 - 180.0;
    let lat_rad = ((1.0 - 2.0 * y as f64 / n) * std::f64::consts::PI).sinh().atan();
    (lat_rad.to_degrees(), lon)
}

/// Two-level tile store: a bounded in-memory map in front of a disk
/// directory, with capped background downloads for misses.
#[derive(Clone)]
pub struct TileCache {
    cache_dir: PathBuf,
    memory: Arc<Mutex<HashMap<TileKey, Arc<Vec<u8>>>>>,
    in_flight: Arc<Mutex<HashSet<TileKey>>>,
}

impl TileCache {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .map_err(|e| ViewerError::Other(format!("Failed to create tile cache directory: {}", e)))?;

        Ok(Self {
            cache_dir,
            memory: Arc::new(Mutex::new(HashMap::new())),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        })
    }

    /// Look a tile up in memory, then on disk. `None` means the caller
    /// should request a download and draw a placeholder meanwhile.
    pub fn cached_tile(&self, key: TileKey) -> Option<Arc<Vec<u8>>> {
        if let Some(tile) = self.memory.lock().unwrap().get(&key) {
            return Some(Arc::clone(tile));
        }

        let path = Self::tile_path(&self.cache_dir, key);
        if path.exists() {
            match std::fs::read(&path) {
                Ok(bytes) => {
                    let tile = Arc::new(bytes);
                    self.remember(key, Arc::clone(&tile));
                    return Some(tile);
                }
                Err(e) => warn!("failed to read cached tile {:?}: {}", key, e),
            }
        }
        None
    }

    /// Start a background download for a missing tile. Does nothing when
    /// the tile is already being fetched or the download slots are full.
    pub fn request_download(&self, key: TileKey) {
        {
            let mut in_flight = self.in_flight.lock().unwrap();
            if in_flight.len() >= MAX_CONCURRENT_DOWNLOADS || in_flight.contains(&key) {
                return;
            }
            in_flight.insert(key);
        }

        let cache = self.clone();
        std::thread::spawn(move || {
            match Self::download(key) {
                Ok(bytes) => {
                    let path = Self::tile_path(&cache.cache_dir, key);
                    if let Some(parent) = path.parent() {
                        let _ = std::fs::create_dir_all(parent);
                    }
                    if let Err(e) = std::fs::write(&path, &bytes) {
                        warn!("failed to store tile {:?}: {}", key, e);
                    }
                    cache.remember(key, Arc::new(bytes));
                }
                Err(e) => warn!("tile download {:?} failed: {}", key, e),
            }
            cache.in_flight.lock().unwrap().remove(&key);
        });
    }

    fn download(key: TileKey) -> Result<Vec<u8>> {
        let (zoom, x, y) = key;
        let url = format!("{}/{}/{}/{}.png", TILE_URL, zoom, x, y);

        let client = reqwest::blocking::Client::builder()
            .user_agent(TILE_USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()?;

        let response = client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(ViewerError::Other(format!("HTTP error: {}", response.status())));
        }

        let bytes = response.bytes()?.to_vec();

        // Tile usage policy asks clients not to hammer the server
        std::thread::sleep(Duration::from_millis(100));

        Ok(bytes)
    }

    fn remember(&self, key: TileKey, tile: Arc<Vec<u8>>) {
        let mut memory = self.memory.lock().unwrap();
        if memory.len() >= MAX_MEMORY_TILES {
            if let Some(evict) = memory.keys().next().cloned() {
                memory.remove(&evict);
            }
        }
        memory.insert(key, tile);
    }

    fn tile_path(cache_dir: &Path, (zoom, x, y): TileKey) -> PathBuf {
        cache_dir.join(format!("{}/{}/{}.png", zoom, x, y))
    }

    pub fn clear_memory(&self) {
        self.memory.lock().unwrap().clear();
    }

    /// Remove every cached tile from disk and memory.
    pub fn clear_disk(&self) -> Result<()> {
        self.clear_memory();
        std::fs::remove_dir_all(&self.cache_dir)
            .map_err(|e| ViewerError::Other(format!("Failed to clear tile cache: {}", e)))?;
        std::fs::create_dir_all(&self.cache_dir)
            .map_err(|e| ViewerError::Other(format!("Failed to recreate tile cache: {}", e)))?;
        Ok(())
    }

    pub fn stats(&self) -> CacheStats {
        let memory_tiles = self.memory.lock().unwrap().len();

        let mut disk_tiles = 0;
        let mut disk_bytes = 0u64;
        count_files(&self.cache_dir, &mut disk_tiles, &mut disk_bytes);

        CacheStats {
            memory_tiles,
            disk_tiles,
            disk_size_mb: disk_bytes as f64 / 1_048_576.0,
        }
    }
}

fn count_files(dir: &Path, count: &mut usize, bytes: &mut u64) {
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            if let Ok(metadata) = entry.metadata() {
                if metadata.is_file() {
                    *count += 1;
                    *bytes += metadata.len();
                } else if metadata.is_dir() {
                    count_files(&entry.path(), count, bytes);
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheStats {
    pub memory_tiles: usize,
    pub disk_tiles: usize,
    pub disk_size_mb: f64,
}
