use crate::api_client::OpenWeatherClient;
use crate::cache::{CachedWeather, WeatherCache};
use crate::config::{Config, Mode};
use crate::errors::SdkError;
use crate::poller::Poller;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Number of cities kept resident at once.
const CACHE_CAPACITY: usize = 10;

/// Entry point for the SDK.
///
/// Owns the bounded cache and the provider client; in [`Mode::Polling`] it
/// also runs a background task that refreshes every cached city on a fixed
/// period. `get_weather` serves from cache when the entry is fresh and
/// falls back to the provider otherwise.
pub struct WeatherSdk {
    cache: Arc<WeatherCache>,
    client: Arc<OpenWeatherClient>,
    cancel: CancellationToken,
    poller: Mutex<Option<JoinHandle<()>>>,
}

impl WeatherSdk {
    /// Build the SDK. In `Polling` mode this spawns the background
    /// refresher, so it must be called within a tokio runtime.
    pub fn new(config: Config) -> Self {
        let cache = Arc::new(WeatherCache::with_capacity(CACHE_CAPACITY));
        let client = Arc::new(OpenWeatherClient::new(config.api_key, config.base_url));
        let cancel = CancellationToken::new();

        let poller = match config.mode {
            Mode::Polling => {
                info!(interval_secs = config.poll_interval.as_secs(), "Starting background polling");
                let handle = Poller::new(cache.clone(), client.clone(), config.poll_interval)
                    .spawn(cancel.clone());
                Some(handle)
            }
            Mode::OnDemand => None,
        };

        Self {
            cache,
            client,
            cancel,
            poller: Mutex::new(poller),
        }
    }

    /// Get current weather for a city, serving from cache when a fresh
    /// entry is resident.
    ///
    /// The city name is matched case- and whitespace-insensitively against
    /// the cache; on a miss the provider is queried with the name as given.
    /// Provider errors propagate unchanged, with no retry at this layer.
    pub async fn get_weather(&self, city: &str) -> Result<CachedWeather, SdkError> {
        if city.trim().is_empty() {
            return Err(SdkError::InvalidCityName);
        }

        if let Some(entry) = self.cache.get(city).await {
            debug!(city = %city, "Cache hit");
            return Ok(entry);
        }

        let data = self.client.fetch_weather(city).await?;
        Ok(self.cache.put(city, data).await)
    }

    /// Snapshot of the cities currently resident in the cache.
    pub async fn cached_cities(&self) -> Vec<String> {
        self.cache.cities().await
    }

    /// Stop the background refresher, if one is running.
    ///
    /// Idempotent and safe in `OnDemand` mode. No further refresh pass
    /// begins after this returns; a pass already in progress is allowed to
    /// finish, and in-flight fetches are not cancelled.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        // The guard stays held across the drain so that every caller, not
        // just the one that took the handle, returns only once the poller
        // task has finished.
        let mut poller = self.poller.lock().await;
        if let Some(handle) = poller.take() {
            if let Err(e) = handle.await {
                error!(error = %e, "Poller task failed during shutdown");
            }
        }
    }
}
