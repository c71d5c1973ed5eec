use crate::errors::SdkError;
use crate::models::WeatherData;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument};

#[derive(Debug, Deserialize)]
struct OwmResponse {
    weather: Vec<OwmCondition>,
    main: OwmMain,
    wind: OwmWind,
    sys: OwmSys,
    visibility: Option<u32>,
    #[serde(with = "chrono::serde::ts_seconds")]
    dt: DateTime<Utc>,
    timezone: i32,
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    #[serde(with = "chrono::serde::ts_seconds")]
    sunrise: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    sunset: DateTime<Utc>,
}

impl OwmResponse {
    fn into_weather_data(self) -> Result<WeatherData, SdkError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| SdkError::Malformed("response contained no weather conditions".into()))?;

        Ok(WeatherData {
            city: self.name,
            condition: condition.main,
            description: condition.description,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            wind_speed: self.wind.speed,
            visibility: self.visibility,
            observed_at: self.dt,
            sunrise: self.sys.sunrise,
            sunset: self.sys.sunset,
            timezone_offset: self.timezone,
        })
    }
}

/// HTTP client for the OpenWeatherMap current-weather endpoint.
pub struct OpenWeatherClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(15))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_key,
            base_url,
        }
    }

    /// Fetch a fresh report for one city.
    ///
    /// The city string is passed to the provider as given, aside from URL
    /// encoding, since the provider does its own name matching.
    #[instrument(skip(self), fields(city = %city))]
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherData, SdkError> {
        let url = format!(
            "{}/data/2.5/weather?q={}&appid={}",
            self.base_url,
            urlencoding::encode(city),
            self.api_key
        );

        info!(city = %city, "Fetching weather from provider");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(match status.as_u16() {
                401 => SdkError::Unauthorized,
                404 => SdkError::CityNotFound,
                429 => SdkError::RateLimited,
                code => SdkError::ServerError(code),
            });
        }

        let body = response.text().await?;
        let parsed: OwmResponse =
            serde_json::from_str(&body).map_err(|e| SdkError::Malformed(e.to_string()))?;

        parsed.into_weather_data()
    }
}
