// src/spot/classify.rs
//! Propagation-mode classification from frequency and path distance

use super::data::Spot;
use super::geo::haversine;

/// Frequencies at or below this are treated as HF and always drawn.
pub const HF_LIMIT_MHZ: f64 = 50.0;

/// Probable propagation mode for one received path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathClass {
    /// HF contact, drawn in the default style.
    Default,
    /// VHF/UHF contact in the sporadic-E distance window.
    SporadicE,
    /// VHF/UHF contact beyond line-of-sight, tropo or DX.
    TropoDx,
    /// Short VHF/UHF contact, treated as local noise and not drawn.
    Suppressed,
}

impl PathClass {
    /// Whether a path of this class is plotted on the map.
    pub fn should_draw(&self) -> bool {
        !matches!(self, PathClass::Suppressed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PathClass::Default => "default/HF",
            PathClass::SporadicE => "sporadic-E",
            PathClass::TropoDx => "tropo/DX",
            PathClass::Suppressed => "suppressed",
        }
    }
}

/// Classify a contact from its frequency in MHz and path distance in km.
///
/// Above 50 MHz the 300-1500 km sporadic-E window is checked before the
/// > 350 km tropo/DX rule, so 350 < d <= 1500 counts as sporadic-E. The
/// rule order is load-bearing and must not be rearranged.
pub fn classify(freq_mhz: f64, distance_km: f64) -> PathClass {
    if freq_mhz <= HF_LIMIT_MHZ {
        return PathClass::Default;
    }

    if (300.0..=1500.0).contains(&distance_km) {
        PathClass::SporadicE
    } else if distance_km > 350.0 {
        PathClass::TropoDx
    } else {
        PathClass::Suppressed
    }
}

/// A spot with its derived distance and propagation class, computed once
/// when the raw records arrive and shared by the text and map views.
#[derive(Debug, Clone)]
pub struct ClassifiedSpot {
    pub spot: Spot,
    pub distance_km: f64,
    pub class: PathClass,
}

impl ClassifiedSpot {
    pub fn new(spot: Spot) -> Self {
        let distance_km = haversine(spot.tx_lat, spot.tx_lon, spot.rx_lat, spot.rx_lon);
        let class = classify(spot.frequency_mhz(), distance_km);
        Self {
            spot,
            distance_km,
            class,
        }
    }

    /// One human-readable report line for this contact.
    pub fn report_line(&self) -> String {
        format!(
            "[{}] Tx: {} ({}) -> Rx: {} ({}) Dist: {:.1} km SNR: {}dB",
            self.spot.time,
            self.spot.tx_sign,
            self.spot.tx_loc,
            self.spot.rx_sign,
            self.spot.rx_loc,
            self.distance_km,
            self.spot.snr,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hf_always_default() {
        let class = classify(28.0, 5000.0);
        assert_eq!(class, PathClass::Default);
        assert!(class.should_draw());

        // Distance does not matter at HF
        assert_eq!(classify(7.0, 50.0), PathClass::Default);
        assert_eq!(classify(50.0, 200.0), PathClass::Default);
    }

    #[test]
    fn test_sporadic_e_window() {
        let class = classify(144.0, 800.0);
        assert_eq!(class, PathClass::SporadicE);
        assert!(class.should_draw());

        assert_eq!(classify(144.0, 300.0), PathClass::SporadicE);
        assert_eq!(classify(144.0, 1500.0), PathClass::SporadicE);
    }

    #[test]
    fn test_overlap_resolves_to_sporadic_e() {
        // 400 km is both inside 300-1500 and above 350; the sporadic-E
        // rule is checked first and wins.
        assert_eq!(classify(144.0, 400.0), PathClass::SporadicE);
        assert_eq!(classify(432.0, 351.0), PathClass::SporadicE);
    }

    #[test]
    fn test_tropo_dx_beyond_window() {
        let class = classify(144.0, 2000.0);
        assert_eq!(class, PathClass::TropoDx);
        assert!(class.should_draw());
    }

    #[test]
    fn test_local_vhf_suppressed() {
        let class = classify(432.0, 100.0);
        assert_eq!(class, PathClass::Suppressed);
        assert!(!class.should_draw());

        // Between the suppression limit and the sporadic-E window floor
        assert_eq!(classify(144.0, 299.0), PathClass::Suppressed);
    }

    #[test]
    fn test_classified_spot_line() {
        let spot = Spot {
            time: "2024-06-01 12:00:00".to_string(),
            tx_sign: "SV1EEX".to_string(),
            tx_loc: "KM17".to_string(),
            tx_lat: 38.0,
            tx_lon: 23.7,
            snr: -21.0,
            frequency: 28_126_100.0,
            rx_sign: "G4ABC".to_string(),
            rx_loc: "IO91".to_string(),
            rx_lat: 51.5,
            rx_lon: -0.6,
        };
        let classified = ClassifiedSpot::new(spot);

        assert_eq!(classified.class, PathClass::Default);
        let line = classified.report_line();
        assert!(line.starts_with("[2024-06-01 12:00:00] Tx: SV1EEX (KM17) -> Rx: G4ABC (IO91)"));
        assert!(line.contains("km SNR: -21dB"));
    }
}
