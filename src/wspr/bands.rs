// src/wspr/bands.rs
//! Static WSPR band table

/// One entry of the band table: display label, WSPR band code, and the
/// nominal dial frequency in MHz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub label: &'static str,
    pub code: i32,
    pub freq_mhz: f64,
}

/// All bands the spot database knows, LF through 23cm. Read-only,
/// constructed once for the whole process.
pub const BANDS: &[Band] = &[
    Band { label: "LF (-1)", code: -1, freq_mhz: 0.136 },
    Band { label: "MF (0)", code: 0, freq_mhz: 0.4742 },
    Band { label: "160m (1)", code: 1, freq_mhz: 1.8366 },
    Band { label: "80m (3)", code: 3, freq_mhz: 3.5686 },
    Band { label: "60m (5)", code: 5, freq_mhz: 5.2872 },
    Band { label: "40m (7)", code: 7, freq_mhz: 7.0386 },
    Band { label: "30m (10)", code: 10, freq_mhz: 10.1387 },
    Band { label: "20m (14)", code: 14, freq_mhz: 14.0956 },
    Band { label: "17m (18)", code: 18, freq_mhz: 18.1046 },
    Band { label: "15m (21)", code: 21, freq_mhz: 21.0946 },
    Band { label: "12m (24)", code: 24, freq_mhz: 24.9246 },
    Band { label: "10m (28)", code: 28, freq_mhz: 28.1246 },
    Band { label: "8m (40)", code: 40, freq_mhz: 40.680 },
    Band { label: "6m (50)", code: 50, freq_mhz: 50.293 },
    Band { label: "4m (70)", code: 70, freq_mhz: 70.091 },
    Band { label: "2m (144)", code: 144, freq_mhz: 144.489 },
    Band { label: "70cm (432)", code: 432, freq_mhz: 432.3 },
    Band { label: "23cm (1296)", code: 1296, freq_mhz: 1296.5 },
];

/// Band selected when the user has not picked one.
pub const DEFAULT_BAND_LABEL: &str = "10m (28)";

/// Look a band up by its label. Accepts the full label ("10m (28)") or
/// the short form before the code ("10m").
pub fn band_by_label(label: &str) -> Option<&'static Band> {
    let wanted = label.trim();
    BANDS.iter().find(|b| {
        b.label == wanted || b.label.split(' ').next() == Some(wanted)
    })
}

/// Look a band up by its WSPR band code.
pub fn band_by_code(code: i32) -> Option<&'static Band> {
    BANDS.iter().find(|b| b.code == code)
}

/// The default band entry. The table is a constant, so this cannot fail.
pub fn default_band() -> &'static Band {
    band_by_label(DEFAULT_BAND_LABEL).unwrap_or(&BANDS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size() {
        assert_eq!(BANDS.len(), 18);
    }

    #[test]
    fn test_lookup_by_full_label() {
        let band = band_by_label("10m (28)").unwrap();
        assert_eq!(band.code, 28);
        assert_eq!(band.freq_mhz, 28.1246);
    }

    #[test]
    fn test_lookup_by_short_label() {
        assert_eq!(band_by_label("2m").unwrap().code, 144);
        assert_eq!(band_by_label("  70cm ").unwrap().code, 432);
        assert_eq!(band_by_label("LF").unwrap().code, -1);
    }

    #[test]
    fn test_lookup_unknown_label() {
        assert!(band_by_label("11m").is_none());
        assert!(band_by_label("").is_none());
    }

    #[test]
    fn test_lookup_by_code() {
        assert_eq!(band_by_code(1296).unwrap().label, "23cm (1296)");
        assert!(band_by_code(9999).is_none());
    }

    #[test]
    fn test_default_band() {
        assert_eq!(default_band().label, DEFAULT_BAND_LABEL);
    }

    #[test]
    fn test_codes_unique() {
        for (i, a) in BANDS.iter().enumerate() {
            for b in &BANDS[i + 1..] {
                assert_ne!(a.code, b.code, "duplicate band code {}", a.code);
            }
        }
    }
}
