//! Client SDK for the OpenWeatherMap current-weather API.
//!
//! Wraps the HTTP API with a bounded in-memory cache (10 cities, LRU
//! eviction, 10 minute TTL) and two operating modes: [`Mode::OnDemand`]
//! fetches only on a cache miss, [`Mode::Polling`] additionally refreshes
//! every cached city in the background.
//!
//! ```no_run
//! use weather_sdk::{Config, Mode, WeatherSdk};
//!
//! # async fn run() -> Result<(), weather_sdk::SdkError> {
//! let sdk = WeatherSdk::new(Config::new("api-key", Mode::OnDemand));
//! let entry = sdk.get_weather("London").await?;
//! println!("{} K in {}", entry.data.temperature, entry.data.city);
//! sdk.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod api_client;
pub mod cache;
pub mod config;
pub mod errors;
pub mod models;
pub mod poller;
mod sdk;

pub use cache::{CachedWeather, WeatherCache};
pub use config::{Config, Mode};
pub use errors::SdkError;
pub use models::WeatherData;
pub use sdk::WeatherSdk;
