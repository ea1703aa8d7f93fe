// src/lib.rs
//! WSPR Band Spot Viewer Library
//!
//! Queries the public WSPR spot database for one band, computes
//! great-circle distances between transmitter and receiver, classifies
//! each contact by probable propagation mode, and renders the result as
//! a text report and as map overlays.

pub mod spot;
pub mod wspr;
pub mod display;
#[cfg(feature = "gui")]
pub mod map;
pub mod config;
pub mod error;

// Re-export main types for convenience
pub use config::ViewerConfig;
pub use error::{Result, ViewerError};
pub use spot::{classify, haversine, ClassifiedSpot, PathClass, Spot};
pub use wspr::{Band, FetchOutcome, BANDS};

#[cfg(feature = "gui")]
pub use display::gui::ViewerApp;
