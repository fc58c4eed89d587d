//! Typed representation of the Open-Meteo forecast payload.
//!
//! The wire format is a set of parallel arrays: one timestamp axis per
//! granularity plus index-aligned value arrays. Every array field defaults
//! to empty when the API omits it, so sparse payloads deserialize into
//! well-formed (possibly empty) structures instead of failing. Hourly
//! timestamps are served at minute resolution (`2024-01-01T05:00`), which
//! chrono's derived serde impl does not accept, hence the custom
//! deserializer below.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// A deserialized Open-Meteo point-forecast response.
///
/// Obtained from [`crate::Meteoview::forecast`]. Feed it to
/// [`crate::resample_daily`] or [`crate::hourly_window`] to produce
/// chart-ready series; the payload itself is never mutated by those
/// transforms.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Forecast {
    /// Latitude of the grid cell the forecast was computed for.
    pub latitude: f64,
    /// Longitude of the grid cell the forecast was computed for.
    pub longitude: f64,
    /// IANA timezone name the timestamps are expressed in (`timezone=auto`).
    #[serde(default)]
    pub timezone: Option<String>,
    /// Hour-granularity series.
    #[serde(default)]
    pub hourly: HourlyData,
    /// Day-granularity series.
    #[serde(default)]
    pub daily: DailyData,
}

/// The hourly block of a forecast payload: a timestamp axis plus
/// index-aligned value arrays.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct HourlyData {
    /// Hourly timestamps, ascending, in the payload's own timezone.
    #[serde(default, deserialize_with = "minute_datetimes")]
    pub time: Vec<NaiveDateTime>,
    /// Air temperature at 2 m.
    #[serde(default)]
    pub temperature_2m: Vec<f64>,
    /// Relative humidity at 2 m, in percent.
    #[serde(default, alias = "relativehumidity_2m")]
    pub relative_humidity_2m: Vec<f64>,
    /// Direct solar radiation.
    #[serde(default)]
    pub direct_radiation: Vec<f64>,
}

/// The daily block of a forecast payload.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DailyData {
    /// Calendar days, ascending, no duplicates.
    #[serde(default)]
    pub time: Vec<NaiveDate>,
    /// Daily maximum temperature at 2 m.
    #[serde(default)]
    pub temperature_2m_max: Vec<f64>,
    /// Daily minimum temperature at 2 m.
    #[serde(default)]
    pub temperature_2m_min: Vec<f64>,
}

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parses an ISO-8601 timestamp at either second or minute resolution.
pub(crate) fn parse_iso_datetime(raw: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

fn minute_datetimes<'de, D>(deserializer: D) -> Result<Vec<NaiveDateTime>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    raw.iter()
        .map(|entry| {
            parse_iso_datetime(entry).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid hourly timestamp '{entry}'"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "latitude": 1.375,
        "longitude": 103.875,
        "generationtime_ms": 0.23,
        "utc_offset_seconds": 28800,
        "timezone": "Asia/Singapore",
        "timezone_abbreviation": "+08",
        "elevation": 21.0,
        "hourly_units": {
            "time": "iso8601",
            "temperature_2m": "°C",
            "relativehumidity_2m": "%",
            "direct_radiation": "W/m²"
        },
        "hourly": {
            "time": ["2024-01-01T00:00", "2024-01-01T01:00", "2024-01-01T02:00"],
            "temperature_2m": [26.4, 26.1, 25.9],
            "relativehumidity_2m": [84.0, 86.0, 88.0],
            "direct_radiation": [0.0, 0.0, 12.5]
        },
        "daily_units": { "time": "iso8601" },
        "daily": {
            "time": ["2024-01-01", "2024-01-02"],
            "temperature_2m_max": [31.2, 30.8],
            "temperature_2m_min": [25.1, 24.9]
        }
    }"#;

    #[test]
    fn deserializes_full_payload() {
        let forecast: Forecast = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(forecast.timezone.as_deref(), Some("Asia/Singapore"));
        assert_eq!(forecast.hourly.time.len(), 3);
        assert_eq!(
            forecast.hourly.time[2],
            "2024-01-01T02:00:00".parse().unwrap()
        );
        assert_eq!(forecast.hourly.relative_humidity_2m, vec![84.0, 86.0, 88.0]);
        assert_eq!(
            forecast.daily.time,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            ]
        );
    }

    #[test]
    fn absent_arrays_default_to_empty() {
        let forecast: Forecast = serde_json::from_str(
            r#"{
                "latitude": 1.3,
                "longitude": 103.8,
                "hourly": { "time": ["2024-01-01T00:00"], "temperature_2m": [26.0] }
            }"#,
        )
        .unwrap();
        assert_eq!(forecast.hourly.time.len(), 1);
        assert!(forecast.hourly.relative_humidity_2m.is_empty());
        assert!(forecast.hourly.direct_radiation.is_empty());
        assert!(forecast.daily.time.is_empty());
    }

    #[test]
    fn absent_blocks_default_to_empty() {
        let forecast: Forecast =
            serde_json::from_str(r#"{ "latitude": 1.3, "longitude": 103.8 }"#).unwrap();
        assert_eq!(forecast.hourly, HourlyData::default());
        assert_eq!(forecast.daily, DailyData::default());
    }

    #[test]
    fn accepts_second_resolution_timestamps() {
        assert_eq!(
            parse_iso_datetime("2024-01-01T05:00:30"),
            "2024-01-01T05:00:30".parse().ok()
        );
        assert_eq!(
            parse_iso_datetime("2024-01-01T05:00"),
            "2024-01-01T05:00:00".parse().ok()
        );
        assert_eq!(parse_iso_datetime("not a timestamp"), None);
    }

    #[test]
    fn rejects_malformed_hourly_timestamps() {
        let result: Result<Forecast, _> = serde_json::from_str(
            r#"{
                "latitude": 1.3,
                "longitude": 103.8,
                "hourly": { "time": ["yesterday"] }
            }"#,
        );
        assert!(result.is_err());
    }
}
