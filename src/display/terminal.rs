// src/display/terminal.rs
//! One-shot terminal report of classified spots

use crate::{
    error::Result,
    spot::{ClassifiedSpot, PathClass},
    wspr::bands::{Band, BANDS},
};
use chrono::Utc;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};

/// Terminal color for a propagation class. Mirrors the map path colors.
fn class_color(class: PathClass) -> Color {
    match class {
        PathClass::Default => Color::Blue,
        PathClass::SporadicE => Color::Red,
        PathClass::TropoDx => Color::Green,
        PathClass::Suppressed => Color::DarkGrey,
    }
}

/// Print the full report for one fetch: header, one line per spot
/// colored by class, and a per-class summary.
///
/// Suppressed spots still get a line here; suppression only governs the
/// map overlay.
pub fn print_report(
    band: &Band,
    window_hours: u32,
    spots: &[ClassifiedSpot],
    skipped: usize,
) -> Result<()> {
    let mut stdout = io::stdout();

    execute!(
        stdout,
        SetForegroundColor(Color::Green),
        Print("=".repeat(60)),
        Print("\n"),
        Print(format!("WSPR spots for {} (last {} h)", band.label, window_hours)),
        Print("\n"),
        Print("=".repeat(60)),
        Print("\n"),
        ResetColor
    )?;

    execute!(
        stdout,
        Print(format!(
            "Fetched: {}   Spots: {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
            spots.len()
        ))
    )?;
    if skipped > 0 {
        execute!(stdout, Print(format!("   Skipped: {}", skipped)))?;
    }
    execute!(stdout, Print("\n\n"))?;

    for classified in spots {
        execute!(
            stdout,
            SetForegroundColor(class_color(classified.class)),
            Print(classified.report_line()),
            Print("\n"),
            ResetColor
        )?;
    }

    execute!(stdout, Print("\n"))?;
    print_summary(&mut stdout, spots)?;

    stdout.flush()?;
    Ok(())
}

fn print_summary(stdout: &mut impl Write, spots: &[ClassifiedSpot]) -> Result<()> {
    for class in [
        PathClass::Default,
        PathClass::SporadicE,
        PathClass::TropoDx,
        PathClass::Suppressed,
    ] {
        let count = spots.iter().filter(|s| s.class == class).count();
        if count == 0 {
            continue;
        }
        execute!(
            stdout,
            SetForegroundColor(class_color(class)),
            Print(format!("{:>5}  {}\n", count, class.label())),
            ResetColor
        )?;
    }
    Ok(())
}

/// Print the band table, one line per entry.
pub fn print_band_table() {
    println!("{:<12} {:>6} {:>12}", "Band", "Code", "MHz");
    for band in BANDS {
        println!("{:<12} {:>6} {:>12.4}", band.label, band.code, band.freq_mhz);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spot::Spot;

    fn classified(freq_hz: f64, rx_lat: f64, rx_lon: f64) -> ClassifiedSpot {
        ClassifiedSpot::new(Spot {
            time: "2024-06-01 12:00:00".to_string(),
            tx_sign: "SV1EEX".to_string(),
            tx_loc: "KM17".to_string(),
            tx_lat: 38.0,
            tx_lon: 23.7,
            snr: -15.0,
            frequency: freq_hz,
            rx_sign: "G4ABC".to_string(),
            rx_loc: "IO91".to_string(),
            rx_lat,
            rx_lon,
        })
    }

    #[test]
    fn test_class_colors_distinct() {
        let classes = [
            PathClass::Default,
            PathClass::SporadicE,
            PathClass::TropoDx,
            PathClass::Suppressed,
        ];
        for (i, a) in classes.iter().enumerate() {
            for b in &classes[i + 1..] {
                assert_ne!(class_color(*a), class_color(*b));
            }
        }
    }

    #[test]
    fn test_report_line_shape() {
        let spot = classified(28_126_100.0, 51.5, -0.6);
        let line = spot.report_line();
        assert!(line.contains("Tx: SV1EEX (KM17)"));
        assert!(line.contains("-> Rx: G4ABC (IO91)"));
        assert!(line.contains("SNR: -15dB"));
    }
}
