use crate::api_client::OpenWeatherClient;
use crate::cache::WeatherCache;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Background refresher that periodically re-fetches every city currently
/// resident in the cache.
pub struct Poller {
    cache: Arc<WeatherCache>,
    client: Arc<OpenWeatherClient>,
    interval: Duration,
}

impl Poller {
    pub fn new(
        cache: Arc<WeatherCache>,
        client: Arc<OpenWeatherClient>,
        interval: Duration,
    ) -> Self {
        Self {
            cache,
            client,
            interval,
        }
    }

    /// Spawn the refresh loop.
    ///
    /// The first pass runs immediately, then one per interval. Cancelling
    /// the token stops the loop between passes; a pass already in progress
    /// drains before the task exits.
    pub fn spawn(self, token: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => self.run_pass().await,
                }
            }

            info!("Poller stopped");
        })
    }

    /// One refresh pass: snapshot the resident cities and re-fetch each in
    /// turn. A failure for one city is logged and leaves its previous
    /// entry untouched; the pass continues with the remaining cities.
    pub async fn run_pass(&self) {
        let cities = self.cache.cities().await;
        if cities.is_empty() {
            return;
        }

        info!(count = cities.len(), "Starting refresh pass");

        for city in cities {
            match self.client.fetch_weather(&city).await {
                Ok(data) => {
                    self.cache.put(&city, data).await;
                }
                Err(e) => {
                    warn!(city = %city, error = %e, "Refresh failed, will retry next pass");
                }
            }
        }
    }
}
