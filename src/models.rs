use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current-weather report for one city, as captured from the provider.
///
/// Temperatures are in kelvin and wind speed in m/s, matching the
/// OpenWeatherMap defaults. Immutable once captured; a refresh produces a
/// new report rather than mutating this one.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherData {
    pub city: String,
    /// Weather group, e.g. "Clouds" or "Rain".
    pub condition: String,
    pub description: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub wind_speed: f64,
    /// Visibility in metres; the provider omits it for some stations.
    pub visibility: Option<u32>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub observed_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub sunrise: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub sunset: DateTime<Utc>,
    /// Shift in seconds from UTC at the reporting location.
    pub timezone_offset: i32,
}
