// src/main.rs v2
//! WSPR Band Spot Viewer - band spot query, classification, and display

use clap::Parser;
use wspr_viewer::{
    config::ViewerConfig,
    display::{self, terminal},
    error::{Result, ViewerError},
    spot::ClassifiedSpot,
    wspr::{bands, query},
};

#[derive(Parser, Debug)]
#[command(
    name = "wspr-viewer",
    version,
    about = "WSPR band spot viewer with propagation-mode map overlay"
)]
struct Cli {
    /// Band to query, e.g. "10m" or "10m (28)"
    #[arg(short, long)]
    band: Option<String>,

    /// Query window in hours
    #[arg(long)]
    hours: Option<u32>,

    /// Maximum number of spots to request
    #[arg(long)]
    limit: Option<u32>,

    /// Spot database endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Print a one-shot text report instead of opening the GUI
    #[arg(long)]
    text: bool,

    /// List the known bands and exit
    #[arg(long)]
    list_bands: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list_bands {
        terminal::print_band_table();
        return Ok(());
    }

    // Load configuration, then apply command-line overrides
    let mut config = ViewerConfig::load().unwrap_or_else(|e| {
        log::warn!("could not load config, using defaults: {}", e);
        ViewerConfig::default()
    });
    if let Some(band) = cli.band {
        config.band = band;
    }
    if let Some(hours) = cli.hours {
        config.window_hours = hours;
    }
    if let Some(limit) = cli.limit {
        config.row_limit = limit;
    }
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }

    let band = bands::band_by_label(&config.band).ok_or_else(|| {
        ViewerError::Parse(format!(
            "unknown band '{}' (see --list-bands)",
            config.band
        ))
    })?;
    config.band = band.label.to_string();

    if !cli.text && display::should_use_gui() {
        #[cfg(feature = "gui")]
        return display::gui::run(config);
    }

    run_text(&config, band)
}

/// Fetch once, classify, and print the report.
fn run_text(config: &ViewerConfig, band: &'static bands::Band) -> Result<()> {
    println!("Fetching spots for {}...", band.label);

    let outcome = query::fetch_spots(config, band.code)?;
    let spots: Vec<ClassifiedSpot> = outcome
        .spots
        .into_iter()
        .map(ClassifiedSpot::new)
        .collect();

    terminal::print_report(band, config.window_hours, &spots, outcome.skipped)
}
