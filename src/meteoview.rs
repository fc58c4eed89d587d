//! This module provides the main entry point for the dashboard's data layer.
//! It fetches live forecasts from Open-Meteo, maintains the station registry
//! used to place map markers, and answers nearest-station queries.

use crate::error::MeteoviewError;
use crate::forecast::area::AreaForecastFetcher;
use crate::forecast::open_meteo::ForecastFetcher;
use crate::stations::locate_station::StationLocator;
use crate::types::area_forecast::AreaForecast;
use crate::types::forecast::Forecast;
use crate::types::station::Station;
use crate::utils::{ensure_cache_dir_exists, get_cache_dir};
use bon::bon;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second
/// (index 1). Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use meteoview::LatLon;
///
/// let singapore_center = LatLon(1.3521, 103.8198);
/// assert_eq!(singapore_center.0, 1.3521); // Latitude
/// assert_eq!(singapore_center.1, 103.8198); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// The main client struct for the weather dashboard's data layer.
///
/// Handles fetching Open-Meteo point forecasts and data.gov.sg area
/// forecasts, and maintains a spatially indexed station registry (cached on
/// disk so the marker list survives restarts and offline starts).
///
/// Create an instance using [`Meteoview::new()`] for default behavior (a
/// standard cache directory) or [`Meteoview::with_cache_folder()`] for
/// custom cache locations.
///
/// # Examples
///
/// ```no_run
/// # use meteoview::Meteoview;
/// # use meteoview::MeteoviewError;
/// # async fn run() -> Result<(), MeteoviewError> {
/// let client = Meteoview::new().await?;
/// // Now you can fetch forecasts or query stations
/// # Ok(())
/// # }
/// ```
pub struct Meteoview {
    fetcher: ForecastFetcher,
    area_fetcher: AreaForecastFetcher,
    station_locator: StationLocator,
}

#[bon]
impl Meteoview {
    /// Creates a new `Meteoview` client with a specified cache directory.
    ///
    /// Use this if you need to control where the station registry cache is
    /// stored. The directory is created if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`MeteoviewError::CacheDirCreation`] if the directory cannot
    /// be created, or [`MeteoviewError::LocateStation`] variants if loading
    /// the station registry fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use meteoview::{Meteoview, MeteoviewError};
    /// # use std::path::Path;
    /// # async fn run() -> Result<(), MeteoviewError> {
    /// let cache_path = Path::new("/tmp/meteoview").to_path_buf();
    /// let client = Meteoview::with_cache_folder(cache_path).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn with_cache_folder(cache_folder: PathBuf) -> Result<Self, MeteoviewError> {
        ensure_cache_dir_exists(&cache_folder)
            .await
            .map_err(|e| MeteoviewError::CacheDirCreation(cache_folder.clone(), e))?;
        Ok(Self {
            station_locator: StationLocator::new(&cache_folder)
                .await
                .map_err(MeteoviewError::from)?,
            fetcher: ForecastFetcher::new(),
            area_fetcher: AreaForecastFetcher::new(),
        })
    }

    /// Creates a new `Meteoview` client using the default cache directory,
    /// determined with the `dirs` crate (e.g., `~/.cache/meteoview_cache`
    /// on Linux).
    ///
    /// # Errors
    ///
    /// Returns [`MeteoviewError::CacheDirResolution`] if the default cache
    /// directory cannot be found, [`MeteoviewError::CacheDirCreation`] if it
    /// cannot be created, or [`MeteoviewError::LocateStation`] variants if
    /// loading the station registry fails.
    pub async fn new() -> Result<Self, MeteoviewError> {
        let cache_folder = get_cache_dir().map_err(MeteoviewError::CacheDirResolution)?;
        Self::with_cache_folder(cache_folder).await
    }

    /// Fetches an Open-Meteo point forecast for a location.
    ///
    /// Requests the dashboard's field set (hourly temperature, humidity and
    /// direct radiation; daily temperature extremes) with timestamps in the
    /// location's own timezone. The returned [`Forecast`] feeds directly
    /// into [`crate::resample_daily`] and [`crate::hourly_window`].
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(LatLon)`: **Required.** Coordinates to fetch for.
    /// * `.start_date(NaiveDate)` / `.end_date(NaiveDate)`: Optional
    ///   explicit date range (the dashboard uses "two days back through
    ///   today" for its history view).
    /// * `.past_days(u32)` / `.forecast_days(u32)`: Optional relative
    ///   range, mutually independent of the explicit dates.
    ///
    /// # Errors
    ///
    /// Returns [`MeteoviewError::ForecastData`] variants for network
    /// failures, non-success HTTP statuses, or malformed response bodies.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use meteoview::{LatLon, Meteoview, MeteoviewError};
    /// # use chrono::NaiveDate;
    /// #
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), MeteoviewError> {
    /// let client = Meteoview::new().await?;
    ///
    /// let forecast = client
    ///     .forecast()
    ///     .location(LatLon(1.3521, 103.8198))
    ///     .start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    ///     .end_date(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap())
    ///     .call()
    ///     .await?;
    ///
    /// println!("{} hourly samples", forecast.hourly.time.len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn forecast(
        &self,
        location: LatLon,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        past_days: Option<u32>,
        forecast_days: Option<u32>,
    ) -> Result<Forecast, MeteoviewError> {
        self.fetcher
            .get_forecast(location, start_date, end_date, past_days, forecast_days)
            .await
            .map_err(MeteoviewError::from)
    }

    /// Finds stations near a geographical location, closest first.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(LatLon)`: **Required.** Search center.
    /// * `.max_distance_km(f64)`: Optional. Search radius. Defaults to `50.0`.
    /// * `.station_limit(usize)`: Optional. Maximum number of stations to
    ///   return. Defaults to `5`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use meteoview::{LatLon, Meteoview, MeteoviewError};
    /// #
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), MeteoviewError> {
    /// let client = Meteoview::new().await?;
    ///
    /// let nearby = client
    ///     .find_stations()
    ///     .location(LatLon(1.29, 103.85))
    ///     .station_limit(3)
    ///     .call()?;
    /// assert!(nearby.len() <= 3);
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn find_stations(
        &self,
        location: LatLon,
        max_distance_km: Option<f64>,
        station_limit: Option<usize>,
    ) -> Result<Vec<Station>, MeteoviewError> {
        let max_distance_km = max_distance_km.unwrap_or(50.0);
        let station_limit = station_limit.unwrap_or(5);

        let stations_with_distance =
            self.station_locator
                .query(location.0, location.1, station_limit, max_distance_km);

        Ok(stations_with_distance
            .into_iter()
            .map(|(station, _distance)| station)
            .collect())
    }

    /// Finds the single closest station to a location.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(LatLon)`: **Required.** Search center.
    /// * `.max_distance_km(f64)`: Optional. Search radius. Defaults to `50.0`.
    ///
    /// # Errors
    ///
    /// Returns [`MeteoviewError::NoStationWithinRadius`] when the registry
    /// has no station inside the radius.
    #[builder]
    pub fn nearest_station(
        &self,
        location: LatLon,
        max_distance_km: Option<f64>,
    ) -> Result<Station, MeteoviewError> {
        let max_distance_km = max_distance_km.unwrap_or(50.0);
        self.station_locator
            .query(location.0, location.1, 1, max_distance_km)
            .into_iter()
            .next()
            .map(|(station, _distance)| station)
            .ok_or(MeteoviewError::NoStationWithinRadius {
                radius: max_distance_km,
                lat: location.0,
                lon: location.1,
            })
    }

    /// Every station in the registry, for plotting the full marker layer.
    pub fn stations(&self) -> &[Station] {
        self.station_locator.all()
    }

    /// Fetches the latest 2-hour textual forecast for every station area.
    ///
    /// # Errors
    ///
    /// Returns [`MeteoviewError::ForecastData`] variants on network or
    /// parse failures.
    pub async fn area_forecasts(&self) -> Result<Vec<AreaForecast>, MeteoviewError> {
        self.area_fetcher.latest().await.map_err(MeteoviewError::from)
    }

    /// Fetches the latest 2-hour forecast text for one station area,
    /// matched by name. `Ok(None)` means the feed is up but carries no
    /// entry for that area; the caller decides how to present that.
    pub async fn forecast_for_area(
        &self,
        area: &str,
    ) -> Result<Option<String>, MeteoviewError> {
        let forecasts = self.area_forecasts().await?;
        Ok(forecasts
            .into_iter()
            .find(|entry| entry.area == area)
            .map(|entry| entry.forecast))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::MeteoviewError;
    use crate::meteoview::{LatLon, Meteoview};

    async fn test_client() -> Result<Meteoview, MeteoviewError> {
        let cache = tempfile::tempdir().expect("tempdir");
        Meteoview::with_cache_folder(cache.path().to_path_buf()).await
    }

    #[tokio::test]
    #[ignore = "hits the live data.gov.sg and Open-Meteo APIs"]
    async fn fetch_forecast_for_singapore() -> Result<(), MeteoviewError> {
        let client = test_client().await?;

        let forecast = client
            .forecast()
            .location(LatLon(1.3521, 103.8198))
            .call()
            .await?;

        assert!(!forecast.hourly.time.is_empty());
        assert_eq!(
            forecast.hourly.time.len(),
            forecast.hourly.temperature_2m.len()
        );
        assert!(!forecast.daily.time.is_empty());

        Ok(())
    }

    #[tokio::test]
    #[ignore = "hits the live data.gov.sg API"]
    async fn station_registry_is_populated() -> Result<(), MeteoviewError> {
        let client = test_client().await?;

        assert!(!client.stations().is_empty());

        let nearby = client
            .find_stations()
            .location(LatLon(1.3521, 103.8198))
            .call()?;
        assert!(!nearby.is_empty());
        assert!(nearby.len() <= 5);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "hits the live data.gov.sg API"]
    async fn area_forecasts_cover_the_registry() -> Result<(), MeteoviewError> {
        let client = test_client().await?;

        let forecasts = client.area_forecasts().await?;
        assert!(!forecasts.is_empty());

        let first_area = forecasts[0].area.clone();
        let text = client.forecast_for_area(&first_area).await?;
        assert!(text.is_some());

        let missing = client.forecast_for_area("Nowhere In Particular").await?;
        assert!(missing.is_none());

        Ok(())
    }
}
