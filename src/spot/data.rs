// src/spot/data.rs
//! Spot record structure and JSON field extraction

use serde_json::Value;

/// One WSPR reception report as returned by the spot database.
///
/// Immutable once built; carries no identity beyond its fields and is
/// discarded after rendering.
#[derive(Debug, Clone)]
pub struct Spot {
    pub time: String,
    pub tx_sign: String,
    pub tx_loc: String,
    pub tx_lat: f64,
    pub tx_lon: f64,
    pub snr: f64,
    pub frequency: f64, // Hz
    pub rx_sign: String,
    pub rx_loc: String,
    pub rx_lat: f64,
    pub rx_lon: f64,
}

impl Spot {
    /// Reported frequency in MHz.
    pub fn frequency_mhz(&self) -> f64 {
        self.frequency / 1e6
    }

    /// Build a spot from one row of the query result.
    ///
    /// Returns `None` when any required field is missing or non-numeric;
    /// such rows are skipped at the boundary so the classification core
    /// only ever sees validated values.
    pub fn from_record(record: &Value) -> Option<Self> {
        let obj = record.as_object()?;

        Some(Self {
            time: field_string(obj.get("time"))?,
            tx_sign: field_string(obj.get("tx_sign"))?,
            tx_loc: field_string(obj.get("tx_loc"))?,
            tx_lat: field_f64(obj.get("tx_lat"))?,
            tx_lon: field_f64(obj.get("tx_lon"))?,
            snr: field_f64(obj.get("snr"))?,
            frequency: field_f64(obj.get("frequency"))?,
            rx_sign: field_string(obj.get("rx_sign"))?,
            rx_loc: field_string(obj.get("rx_loc"))?,
            rx_lat: field_f64(obj.get("rx_lat"))?,
            rx_lon: field_f64(obj.get("rx_lon"))?,
        })
    }
}

/// Numeric field, accepting either a JSON number or a numeric string
/// (ClickHouse emits 64-bit columns as strings in FORMAT JSON).
fn field_f64(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn field_string(value: Option<&Value>) -> Option<String> {
    value?.as_str().map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> Value {
        json!({
            "time": "2024-06-01 12:00:00",
            "tx_sign": "SV1EEX",
            "tx_loc": "KM17UX",
            "tx_lat": 38.021,
            "tx_lon": 23.708,
            "snr": -18,
            "frequency": 28126123,
            "rx_sign": "OH2XX",
            "rx_loc": "KP20",
            "rx_lat": 60.2,
            "rx_lon": 24.9
        })
    }

    #[test]
    fn test_parse_valid_record() {
        let spot = Spot::from_record(&sample_record()).unwrap();

        assert_eq!(spot.tx_sign, "SV1EEX");
        assert_eq!(spot.rx_loc, "KP20");
        assert_eq!(spot.snr, -18.0);
        assert!((spot.frequency_mhz() - 28.126123).abs() < 1e-9);
    }

    #[test]
    fn test_numeric_fields_as_strings() {
        let mut record = sample_record();
        record["tx_lat"] = json!("38.021");
        record["frequency"] = json!("28126123");

        let spot = Spot::from_record(&record).unwrap();
        assert_eq!(spot.tx_lat, 38.021);
        assert_eq!(spot.frequency, 28126123.0);
    }

    #[test]
    fn test_missing_coordinate_rejected() {
        let mut record = sample_record();
        record.as_object_mut().unwrap().remove("rx_lat");

        assert!(Spot::from_record(&record).is_none());
    }

    #[test]
    fn test_non_numeric_coordinate_rejected() {
        let mut record = sample_record();
        record["tx_lon"] = json!("not a number");

        assert!(Spot::from_record(&record).is_none());
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(Spot::from_record(&json!(null)).is_none());
        assert!(Spot::from_record(&json!([1, 2, 3])).is_none());
    }
}
