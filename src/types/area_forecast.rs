//! The textual 2-hour forecast entry attached to each station area.

use serde::{Deserialize, Serialize};

/// The latest 2-hour forecast for one station area, as published by
/// data.gov.sg.
///
/// The `area` field matches [`crate::Station::name`], which is how the
/// dashboard pairs a map marker with its forecast text.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AreaForecast {
    /// The area name (e.g., "Bedok").
    pub area: String,
    /// Human-readable forecast text (e.g., "Partly Cloudy (Day)").
    pub forecast: String,
}
