//! Resamples hourly series into daily buckets, aligned with the payload's
//! daily timestamp axis.
//!
//! Radiation is summed per day (an energy-like total), humidity is averaged
//! and rounded to the nearest integer percent. A day with no matching hourly
//! samples yields `0.0` so every output series always has one value per
//! daily timestamp.

use crate::types::forecast::Forecast;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;

/// Daily chart series produced by [`resample_daily`].
///
/// Every vector has the same length as `dates`. The temperature extremes are
/// passed through from the payload's daily block; `radiation_sum` and
/// `humidity_mean` are resampled from the hourly block.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyChart {
    /// The daily timestamp axis, copied from the payload.
    pub dates: Vec<NaiveDate>,
    /// Daily maximum temperature, one value per date.
    pub temperature_max: Vec<f64>,
    /// Daily minimum temperature, one value per date.
    pub temperature_min: Vec<f64>,
    /// Sum of hourly direct radiation per calendar day.
    pub radiation_sum: Vec<f64>,
    /// Mean hourly relative humidity per calendar day, rounded to the
    /// nearest integer.
    pub humidity_mean: Vec<f64>,
}

/// Sums `values` into one bucket per entry of `days`.
///
/// An hourly sample belongs to a day iff its timestamp's calendar date
/// equals that day. Days without samples get `0.0`. When `times` and
/// `values` differ in length only the aligned prefix is read.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveDateTime};
/// use meteoview::sum_by_day;
///
/// let days = vec![NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()];
/// let times: Vec<NaiveDateTime> = vec![
///     "2024-01-01T00:00:00".parse().unwrap(),
///     "2024-01-01T01:00:00".parse().unwrap(),
/// ];
/// assert_eq!(sum_by_day(&days, &times, &[10.0, 20.0]), vec![30.0]);
/// ```
pub fn sum_by_day(days: &[NaiveDate], times: &[NaiveDateTime], values: &[f64]) -> Vec<f64> {
    let mut buckets: HashMap<NaiveDate, f64> = HashMap::with_capacity(days.len());
    for (time, value) in times.iter().zip(values) {
        *buckets.entry(time.date()).or_insert(0.0) += value;
    }
    days.iter()
        .map(|day| buckets.get(day).copied().unwrap_or(0.0))
        .collect()
}

/// Averages `values` into one bucket per entry of `days`, rounding each mean
/// to the nearest integer.
///
/// Same day-matching and degrade rules as [`sum_by_day`]: empty buckets give
/// `0.0`, mismatched array lengths are read up to the aligned prefix.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveDateTime};
/// use meteoview::mean_by_day;
///
/// let days = vec![NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()];
/// let times: Vec<NaiveDateTime> = vec![
///     "2024-01-01T00:00:00".parse().unwrap(),
///     "2024-01-01T01:00:00".parse().unwrap(),
/// ];
/// assert_eq!(mean_by_day(&days, &times, &[80.0, 90.0]), vec![85.0]);
/// ```
pub fn mean_by_day(days: &[NaiveDate], times: &[NaiveDateTime], values: &[f64]) -> Vec<f64> {
    let mut buckets: HashMap<NaiveDate, (f64, u32)> = HashMap::with_capacity(days.len());
    for (time, value) in times.iter().zip(values) {
        let bucket = buckets.entry(time.date()).or_insert((0.0, 0));
        bucket.0 += value;
        bucket.1 += 1;
    }
    days.iter()
        .map(|day| match buckets.get(day) {
            Some((sum, count)) if *count > 0 => (sum / f64::from(*count)).round(),
            _ => 0.0,
        })
        .collect()
}

/// Builds the daily chart series for a forecast payload.
///
/// The daily temperature extremes are carried over as-is (clipped or
/// zero-filled to the length of the daily axis), radiation and humidity are
/// resampled from the hourly block. Absent arrays in the payload have
/// already degraded to empty vectors during deserialization, so this never
/// fails; with no hourly data every resampled value is `0.0`.
///
/// # Examples
///
/// ```no_run
/// # use meteoview::{LatLon, Meteoview, MeteoviewError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), MeteoviewError> {
/// let client = Meteoview::new().await?;
/// let forecast = client
///     .forecast()
///     .location(LatLon(1.3521, 103.8198))
///     .call()
///     .await?;
///
/// let chart = meteoview::resample_daily(&forecast);
/// assert_eq!(chart.radiation_sum.len(), chart.dates.len());
/// # Ok(())
/// # }
/// ```
pub fn resample_daily(forecast: &Forecast) -> DailyChart {
    let daily = &forecast.daily;
    let hourly = &forecast.hourly;
    DailyChart {
        dates: daily.time.clone(),
        temperature_max: fit_len(&daily.temperature_2m_max, daily.time.len()),
        temperature_min: fit_len(&daily.temperature_2m_min, daily.time.len()),
        radiation_sum: sum_by_day(&daily.time, &hourly.time, &hourly.direct_radiation),
        humidity_mean: mean_by_day(&daily.time, &hourly.time, &hourly.relative_humidity_2m),
    }
}

/// Clips or zero-fills `values` to exactly `len` entries.
fn fit_len(values: &[f64], len: usize) -> Vec<f64> {
    let mut out: Vec<f64> = values.iter().copied().take(len).collect();
    out.resize(len, 0.0);
    out
}
