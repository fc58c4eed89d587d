//! Cuts a fixed-length forward-looking window out of the hourly series,
//! anchored to a reference instant.
//!
//! Charts that show "the next N hours" use this regardless of how much
//! future data the payload carries. The reference instant is always an
//! explicit argument so the transform stays deterministic; callers decide
//! what "now" means.

use crate::types::forecast::Forecast;
use chrono::{NaiveDateTime, Timelike};

/// Window length used by the dashboard's hourly charts.
pub const DEFAULT_WINDOW_HOURS: usize = 72;

/// A contiguous slice of the hourly series, anchored at or after a reference
/// instant.
///
/// All vectors are index-aligned with `time` unless the payload itself was
/// misaligned, in which case each value series is clipped to its own
/// available length. The window may be shorter than requested near the end
/// of the payload; there is no padding.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyWindow {
    /// Hourly timestamps inside the window.
    pub time: Vec<NaiveDateTime>,
    /// Air temperature at 2 m, one value per timestamp.
    pub temperature: Vec<f64>,
    /// Relative humidity at 2 m, one value per timestamp.
    pub relative_humidity: Vec<f64>,
    /// Direct solar radiation, one value per timestamp.
    pub direct_radiation: Vec<f64>,
}

fn truncate_to_hour(t: NaiveDateTime) -> NaiveDateTime {
    t.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .expect("truncating to start of hour cannot fail")
}

/// Finds the window start: the smallest index whose timestamp falls within
/// the same hour as `now` (minutes and seconds of `now` are discarded).
///
/// When no timestamp matches (the reference instant lies entirely outside
/// the supplied range, or the series has a gap at that hour) the start
/// degrades to `0` so a chart still renders from the beginning of the data
/// instead of coming up empty.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDateTime;
/// use meteoview::window_start;
///
/// let times: Vec<NaiveDateTime> = (0..24)
///     .map(|h| format!("2024-01-01T{h:02}:00:00").parse().unwrap())
///     .collect();
/// let now = "2024-01-01T05:30:00".parse().unwrap();
/// assert_eq!(window_start(&times, now), 5);
/// ```
pub fn window_start(times: &[NaiveDateTime], now: NaiveDateTime) -> usize {
    let hour = truncate_to_hour(now);
    times
        .iter()
        .position(|t| truncate_to_hour(*t) == hour)
        .unwrap_or(0)
}

/// Returns `values[start .. start + len)` clipped to the available length.
///
/// Never panics: an out-of-range start yields an empty slice and the end is
/// saturated, so the result is simply shorter than `len` near the end of the
/// data. No padding, no wraparound.
pub fn clip<T>(values: &[T], start: usize, len: usize) -> &[T] {
    let lo = start.min(values.len());
    let hi = start.saturating_add(len).min(values.len());
    &values[lo..hi]
}

/// Extracts the hourly window for a forecast payload.
///
/// The start index is selected once from the timestamp axis and the same
/// `[start, start + len)` bounds are applied to every value series, each
/// clipped to its own length. With an empty hourly block the result is an
/// empty window, never an error.
///
/// # Examples
///
/// ```no_run
/// # use meteoview::{LatLon, Meteoview, MeteoviewError, DEFAULT_WINDOW_HOURS};
/// # #[tokio::main]
/// # async fn main() -> Result<(), MeteoviewError> {
/// let client = Meteoview::new().await?;
/// let forecast = client
///     .forecast()
///     .location(LatLon(1.3521, 103.8198))
///     .call()
///     .await?;
///
/// let now = chrono::Local::now().naive_local();
/// let window = meteoview::hourly_window(&forecast, now, DEFAULT_WINDOW_HOURS);
/// assert!(window.time.len() <= DEFAULT_WINDOW_HOURS);
/// # Ok(())
/// # }
/// ```
pub fn hourly_window(forecast: &Forecast, now: NaiveDateTime, len: usize) -> HourlyWindow {
    let hourly = &forecast.hourly;
    let start = window_start(&hourly.time, now);
    HourlyWindow {
        time: clip(&hourly.time, start, len).to_vec(),
        temperature: clip(&hourly.temperature_2m, start, len).to_vec(),
        relative_humidity: clip(&hourly.relative_humidity_2m, start, len).to_vec(),
        direct_radiation: clip(&hourly.direct_radiation, start, len).to_vec(),
    }
}
