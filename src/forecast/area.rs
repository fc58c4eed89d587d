use crate::forecast::error::ForecastDataError;
use crate::types::area_forecast::AreaForecast;
use log::warn;
use reqwest::Client;
use serde::Deserialize;

const AREA_FORECAST_URL: &str = "https://api.data.gov.sg/v1/environment/2-hour-weather-forecast";

/// Wire format of the forecast items in the 2-hour forecast response. The
/// first item carries the most recent forecast set.
#[derive(Debug, Deserialize)]
struct AreaForecastResponse {
    #[serde(default)]
    items: Vec<ForecastItem>,
}

#[derive(Debug, Deserialize)]
struct ForecastItem {
    #[serde(default)]
    forecasts: Vec<AreaForecast>,
}

/// Fetches the latest textual 2-hour forecast per station area from
/// data.gov.sg.
pub struct AreaForecastFetcher {
    client: Client,
}

impl AreaForecastFetcher {
    pub fn new() -> AreaForecastFetcher {
        AreaForecastFetcher {
            client: Client::new(),
        }
    }

    /// Returns the most recent forecast entry for every area. An empty
    /// response (no published items yet) yields an empty vector.
    pub async fn latest(&self) -> Result<Vec<AreaForecast>, ForecastDataError> {
        let response = self
            .client
            .get(AREA_FORECAST_URL)
            .send()
            .await
            .map_err(|e| ForecastDataError::NetworkRequest(AREA_FORECAST_URL.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", AREA_FORECAST_URL, e);
                return Err(if let Some(status) = e.status() {
                    ForecastDataError::HttpStatus {
                        url: AREA_FORECAST_URL.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    ForecastDataError::NetworkRequest(AREA_FORECAST_URL.to_string(), e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| ForecastDataError::ResponseBody(AREA_FORECAST_URL.to_string(), e))?;
        let parsed = serde_json::from_slice::<AreaForecastResponse>(&body)?;
        Ok(parsed
            .items
            .into_iter()
            .next()
            .map(|item| item.forecasts)
            .unwrap_or_default())
    }
}

impl Default for AreaForecastFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_forecast_items_wire_format() {
        let body = r#"{
            "area_metadata": [],
            "items": [
                {
                    "update_timestamp": "2024-01-01T11:35:00+08:00",
                    "forecasts": [
                        { "area": "Bedok", "forecast": "Partly Cloudy (Day)" },
                        { "area": "Jurong West", "forecast": "Showers" }
                    ]
                }
            ]
        }"#;
        let parsed: AreaForecastResponse = serde_json::from_str(body).unwrap();
        let latest = parsed.items.into_iter().next().unwrap().forecasts;
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].area, "Bedok");
        assert_eq!(latest[1].forecast, "Showers");
    }

    #[test]
    fn empty_items_degrade_to_no_forecasts() {
        let parsed: AreaForecastResponse =
            serde_json::from_str(r#"{ "items": [] }"#).unwrap();
        assert!(parsed.items.is_empty());
    }
}
