pub mod area_forecast;
pub mod forecast;
pub mod station;
