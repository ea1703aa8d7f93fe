// src/map/mod.rs v1
//! Map tile caching for the spot map overlay

mod tile_cache;

pub use tile_cache::{lat_lon_to_tile, tile_to_lat_lon, CacheStats, TileCache, TileKey};
