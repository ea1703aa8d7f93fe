// src/wspr/query.rs
//! Spot database query client
//!
//! One blocking request per user action against the public wspr.live
//! ClickHouse endpoint. No retries, no caching.

use crate::config::ViewerConfig;
use crate::error::{Result, ViewerError};
use crate::spot::Spot;
use log::{debug, info, warn};
use std::time::Duration;

const USER_AGENT: &str = "wspr-viewer/0.1 (WSPR spot map client)";

/// Result of one fetch: the spots that parsed cleanly plus a count of
/// rows the boundary rejected.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub spots: Vec<Spot>,
    pub skipped: usize,
}

/// Build the fixed query for one band over a recent time window.
pub fn spot_query(band_code: i32, window_hours: u32, limit: u32) -> String {
    format!(
        "SELECT time, tx_sign, tx_loc, tx_lat, tx_lon, snr, frequency, \
         rx_sign, rx_loc, rx_lat, rx_lon \
         FROM wspr.rx \
         WHERE band = {band_code} AND time > now() - INTERVAL {window_hours} HOUR \
         ORDER BY time DESC \
         LIMIT {limit} \
         FORMAT JSON"
    )
}

/// Parse a FORMAT JSON response body into spots.
///
/// The envelope is `{"data": [ {row}, ... ]}`; rows with missing or
/// non-numeric fields are counted and dropped, never fatal.
pub fn parse_spot_response(body: &str) -> Result<FetchOutcome> {
    let envelope: serde_json::Value = serde_json::from_str(body)?;
    let rows = envelope
        .get("data")
        .and_then(|v| v.as_array())
        .ok_or_else(|| ViewerError::Query("response has no data array".to_string()))?;

    let mut outcome = FetchOutcome {
        spots: Vec::with_capacity(rows.len()),
        skipped: 0,
    };
    for row in rows {
        match Spot::from_record(row) {
            Some(spot) => outcome.spots.push(spot),
            None => outcome.skipped += 1,
        }
    }
    Ok(outcome)
}

/// Fetch the most recent spots for one band. Blocks the caller until the
/// server answers or the configured timeout expires.
pub fn fetch_spots(config: &ViewerConfig, band_code: i32) -> Result<FetchOutcome> {
    let query = spot_query(band_code, config.window_hours, config.row_limit);
    info!(
        "querying {} for band code {} (last {} h)",
        config.endpoint, band_code, config.window_hours
    );
    debug!("spot query: {}", query);

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;

    let response = client
        .get(&config.endpoint)
        .query(&[("query", query.as_str())])
        .send()?;

    if !response.status().is_success() {
        return Err(ViewerError::Query(format!(
            "server returned {}",
            response.status()
        )));
    }

    let body = response.text()?;
    let outcome = parse_spot_response(&body)?;

    if outcome.skipped > 0 {
        warn!("skipped {} malformed spot record(s)", outcome.skipped);
    }
    info!(
        "fetched {} spots for band code {}",
        outcome.spots.len(),
        band_code
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_template() {
        let query = spot_query(28, 1, 500);

        assert!(query.contains("FROM wspr.rx"));
        assert!(query.contains("band = 28"));
        assert!(query.contains("INTERVAL 1 HOUR"));
        assert!(query.contains("ORDER BY time DESC"));
        assert!(query.contains("LIMIT 500"));
        assert!(query.ends_with("FORMAT JSON"));
    }

    #[test]
    fn test_query_negative_band_code() {
        let query = spot_query(-1, 6, 100);
        assert!(query.contains("band = -1"));
        assert!(query.contains("INTERVAL 6 HOUR"));
        assert!(query.contains("LIMIT 100"));
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "meta": [{"name": "time", "type": "DateTime"}],
            "data": [
                {
                    "time": "2024-06-01 12:02:00",
                    "tx_sign": "SV1EEX", "tx_loc": "KM17", "tx_lat": 38.0, "tx_lon": 23.7,
                    "snr": -12, "frequency": 28126100,
                    "rx_sign": "G4ABC", "rx_loc": "IO91", "rx_lat": 51.5, "rx_lon": -0.6
                },
                {
                    "time": "2024-06-01 12:00:00",
                    "tx_sign": "W1AW", "tx_loc": "FN31", "tx_lat": "bogus", "tx_lon": -72.7,
                    "snr": -25, "frequency": 28126050,
                    "rx_sign": "VE3XYZ", "rx_loc": "FN03", "rx_lat": 43.7, "rx_lon": -79.4
                }
            ],
            "rows": 2
        }"#;

        let outcome = parse_spot_response(body).unwrap();
        assert_eq!(outcome.spots.len(), 1);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.spots[0].tx_sign, "SV1EEX");
    }

    #[test]
    fn test_parse_response_empty_data() {
        let outcome = parse_spot_response(r#"{"data": [], "rows": 0}"#).unwrap();
        assert!(outcome.spots.is_empty());
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn test_parse_response_missing_data() {
        let result = parse_spot_response(r#"{"error": "bad query"}"#);
        assert!(matches!(result, Err(ViewerError::Query(_))));
    }

    #[test]
    fn test_parse_response_invalid_json() {
        let result = parse_spot_response("<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(ViewerError::Json(_))));
    }
}
