// src/error.rs
//! Error types for the spot viewer

use std::fmt;

pub type Result<T> = std::result::Result<T, ViewerError>;

#[derive(Debug)]
pub enum ViewerError {
    Io(std::io::Error),
    Http(reqwest::Error),
    Json(serde_json::Error),
    Query(String),
    Parse(String),
    #[cfg(feature = "gui")]
    Gui(eframe::Error),
    Other(String),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::Io(e) => write!(f, "IO error: {}", e),
            ViewerError::Http(e) => write!(f, "HTTP error: {}", e),
            ViewerError::Json(e) => write!(f, "JSON error: {}", e),
            ViewerError::Query(msg) => write!(f, "Query error: {}", msg),
            ViewerError::Parse(msg) => write!(f, "Parse error: {}", msg),
            #[cfg(feature = "gui")]
            ViewerError::Gui(e) => write!(f, "GUI error: {}", e),
            ViewerError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for ViewerError {}

impl From<std::io::Error> for ViewerError {
    fn from(error: std::io::Error) -> Self {
        ViewerError::Io(error)
    }
}

impl From<reqwest::Error> for ViewerError {
    fn from(error: reqwest::Error) -> Self {
        ViewerError::Http(error)
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(error: serde_json::Error) -> Self {
        ViewerError::Json(error)
    }
}

#[cfg(feature = "gui")]
impl From<eframe::Error> for ViewerError {
    fn from(error: eframe::Error) -> Self {
        ViewerError::Gui(error)
    }
}

impl From<anyhow::Error> for ViewerError {
    fn from(error: anyhow::Error) -> Self {
        ViewerError::Other(error.to_string())
    }
}
