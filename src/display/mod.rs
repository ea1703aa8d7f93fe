// src/display/mod.rs
//! Text and GUI presentation of classified spots

pub mod terminal;

#[cfg(feature = "gui")]
pub mod gui;

/// Check if the GUI should be used based on environment
#[cfg(feature = "gui")]
pub fn should_use_gui() -> bool {
    std::env::var("DISPLAY").is_ok() || std::env::var("WAYLAND_DISPLAY").is_ok()
}

#[cfg(not(feature = "gui"))]
pub fn should_use_gui() -> bool {
    false
}
