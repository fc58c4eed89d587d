use crate::forecast::error::ForecastDataError;
use crate::meteoview::LatLon;
use crate::types::forecast::Forecast;
use chrono::NaiveDate;
use log::{info, warn};
use reqwest::Client;

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const HOURLY_FIELDS: &str = "temperature_2m,relativehumidity_2m,direct_radiation";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min";

/// Fetches point forecasts from the Open-Meteo API.
///
/// Always requests the dashboard's fixed field set: hourly temperature,
/// relative humidity and direct radiation plus daily temperature extremes,
/// with `timezone=auto` so timestamps arrive in the station's local time.
pub struct ForecastFetcher {
    client: Client,
}

impl ForecastFetcher {
    pub fn new() -> ForecastFetcher {
        ForecastFetcher {
            client: Client::new(),
        }
    }

    pub async fn get_forecast(
        &self,
        location: LatLon,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        past_days: Option<u32>,
        forecast_days: Option<u32>,
    ) -> Result<Forecast, ForecastDataError> {
        let mut query: Vec<(&str, String)> = vec![
            ("latitude", location.0.to_string()),
            ("longitude", location.1.to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
        ];
        if let Some(date) = start_date {
            query.push(("start_date", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = end_date {
            query.push(("end_date", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(days) = past_days {
            query.push(("past_days", days.to_string()));
        }
        if let Some(days) = forecast_days {
            query.push(("forecast_days", days.to_string()));
        }

        info!(
            "Fetching forecast for ({}, {}) from {}",
            location.0, location.1, FORECAST_URL
        );

        let response = self
            .client
            .get(FORECAST_URL)
            .query(&query)
            .send()
            .await
            .map_err(|e| ForecastDataError::NetworkRequest(FORECAST_URL.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", FORECAST_URL, e);
                return Err(if let Some(status) = e.status() {
                    ForecastDataError::HttpStatus {
                        url: FORECAST_URL.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    ForecastDataError::NetworkRequest(FORECAST_URL.to_string(), e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| ForecastDataError::ResponseBody(FORECAST_URL.to_string(), e))?;
        let forecast = serde_json::from_slice::<Forecast>(&body)?;
        info!(
            "Received forecast: {} hourly samples, {} daily entries",
            forecast.hourly.time.len(),
            forecast.daily.time.len()
        );
        Ok(forecast)
    }
}

impl Default for ForecastFetcher {
    fn default() -> Self {
        Self::new()
    }
}
