mod chart;
mod error;
mod forecast;
mod meteoview;
mod stations;
mod types;
mod utils;

pub use error::MeteoviewError;
pub use meteoview::*;

pub use chart::resample::{mean_by_day, resample_daily, sum_by_day, DailyChart};
pub use chart::window::{clip, hourly_window, window_start, HourlyWindow, DEFAULT_WINDOW_HOURS};

pub use types::area_forecast::AreaForecast;
pub use types::forecast::{DailyData, Forecast, HourlyData};
pub use types::station::{Location, Station};

pub use forecast::error::ForecastDataError;
pub use stations::error::LocateStationError;
