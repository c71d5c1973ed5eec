use crate::models::WeatherData;
use std::collections::{HashMap, VecDeque};
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};
use tracing::debug;

/// Maximum age of a cached report before it stops being served.
pub const TTL: Duration = Duration::from_secs(600);

/// One cached report together with the instant it was captured.
#[derive(Debug, Clone)]
pub struct CachedWeather {
    pub data: WeatherData,
    pub fetched_at: Instant,
}

struct Inner {
    map: HashMap<String, CachedWeather>,
    /// Recency order over the resident keys; front is least recently used.
    order: VecDeque<String>,
}

/// Capacity-bounded city -> report store with LRU eviction and lazy TTL
/// expiry. Recency updates on reads as well as writes. All state sits
/// behind one mutex, held only for the duration of each operation and
/// never across a network fetch.
pub struct WeatherCache {
    inner: Mutex<Inner>,
    capacity: usize,
}

/// Cache keys are trimmed and lower-cased so "London" and " london "
/// share one slot.
fn normalize_city(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl WeatherCache {
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "cache capacity must be positive");
        Self {
            inner: Mutex::new(Inner {
                map: HashMap::with_capacity(capacity),
                order: VecDeque::with_capacity(capacity),
            }),
            capacity,
        }
    }

    /// Get the cached report for a city if one is resident and fresh.
    ///
    /// A fresh hit marks the city most recently used. An expired entry is
    /// removed on the spot and reported as absent.
    pub async fn get(&self, city: &str) -> Option<CachedWeather> {
        let key = normalize_city(city);
        let mut inner = self.inner.lock().await;

        let entry = inner.map.get(&key).cloned()?;
        if entry.fetched_at.elapsed() >= TTL {
            inner.map.remove(&key);
            inner.order.retain(|k| k != &key);
            debug!(city = %key, "dropped expired entry on read");
            return None;
        }

        inner.order.retain(|k| k != &key);
        inner.order.push_back(key);
        Some(entry)
    }

    /// Store a freshly fetched report, stamping its capture instant.
    ///
    /// The city becomes most recently used; if the insert pushes the cache
    /// over capacity, the least recently used city is evicted. Returns the
    /// entry as stored so the caller can hand it out.
    pub async fn put(&self, city: &str, data: WeatherData) -> CachedWeather {
        let key = normalize_city(city);
        let entry = CachedWeather {
            data,
            fetched_at: Instant::now(),
        };

        let mut inner = self.inner.lock().await;
        inner.order.retain(|k| k != &key);
        inner.order.push_back(key.clone());
        inner.map.insert(key, entry.clone());

        if inner.map.len() > self.capacity
            && let Some(evicted) = inner.order.pop_front()
        {
            inner.map.remove(&evicted);
            debug!(city = %evicted, "evicted least recently used entry");
        }

        entry
    }

    /// Snapshot of the resident cities in recency order, safe to iterate
    /// without holding any lock on the cache.
    pub async fn cities(&self) -> Vec<String> {
        self.inner.lock().await.order.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn report(city: &str, temperature: f64) -> WeatherData {
        WeatherData {
            city: city.to_string(),
            condition: "Clear".to_string(),
            description: "clear sky".to_string(),
            temperature,
            feels_like: temperature - 1.5,
            wind_speed: 3.2,
            visibility: Some(10_000),
            observed_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            sunrise: Utc.timestamp_opt(1_699_980_000, 0).unwrap(),
            sunset: Utc.timestamp_opt(1_700_015_000, 0).unwrap(),
            timezone_offset: 0,
        }
    }

    #[tokio::test]
    async fn size_never_exceeds_capacity() {
        let cache = WeatherCache::with_capacity(3);
        for i in 0..10 {
            cache.put(&format!("city{i}"), report("x", 280.0)).await;
            assert!(cache.cities().await.len() <= 3);
        }
    }

    #[tokio::test]
    async fn evicts_least_recently_used() {
        let cache = WeatherCache::with_capacity(2);
        cache.put("london", report("London", 280.0)).await;
        cache.put("paris", report("Paris", 282.0)).await;
        cache.put("tokyo", report("Tokyo", 290.0)).await;

        assert!(cache.get("london").await.is_none());
        assert!(cache.get("paris").await.is_some());
        assert!(cache.get("tokyo").await.is_some());
    }

    #[tokio::test]
    async fn read_marks_entry_recently_used() {
        let cache = WeatherCache::with_capacity(2);
        cache.put("london", report("London", 280.0)).await;
        cache.put("paris", report("Paris", 282.0)).await;

        // Touching london makes paris the eviction candidate.
        assert!(cache.get("london").await.is_some());
        cache.put("tokyo", report("Tokyo", 290.0)).await;

        assert!(cache.get("paris").await.is_none());
        assert!(cache.get("london").await.is_some());
        assert!(cache.get("tokyo").await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_is_absent_and_removed() {
        let cache = WeatherCache::with_capacity(2);
        cache.put("london", report("London", 280.0)).await;

        tokio::time::advance(Duration::from_secs(11 * 60)).await;

        assert!(cache.get("london").await.is_none());
        assert!(cache.cities().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_entry_is_served_unchanged() {
        let cache = WeatherCache::with_capacity(2);
        let stored = cache.put("london", report("London", 280.0)).await;

        tokio::time::advance(Duration::from_secs(60)).await;

        let hit = cache.get("london").await.expect("entry should be fresh");
        assert_eq!(hit.data, stored.data);
        assert_eq!(hit.fetched_at, stored.fetched_at);
    }

    #[tokio::test]
    async fn keys_are_normalized() {
        let cache = WeatherCache::with_capacity(2);
        cache.put("London", report("London", 280.0)).await;

        let hit = cache.get(" london ").await.expect("normalized key hit");
        assert_eq!(hit.data.city, "London");
        assert_eq!(cache.cities().await, vec!["london".to_string()]);
    }

    #[tokio::test]
    async fn replacing_a_city_keeps_one_slot() {
        let cache = WeatherCache::with_capacity(2);
        cache.put("london", report("London", 280.0)).await;
        cache.put(" LONDON ", report("London", 285.0)).await;

        assert_eq!(cache.cities().await.len(), 1);
        let hit = cache.get("london").await.unwrap();
        assert_eq!(hit.data.temperature, 285.0);
    }

    #[tokio::test]
    async fn cities_returns_independent_snapshot() {
        let cache = WeatherCache::with_capacity(3);
        cache.put("london", report("London", 280.0)).await;
        cache.put("paris", report("Paris", 282.0)).await;

        let snapshot = cache.cities().await;
        cache.put("tokyo", report("Tokyo", 290.0)).await;

        assert_eq!(snapshot, vec!["london".to_string(), "paris".to_string()]);
        assert_eq!(cache.cities().await.len(), 3);
    }
}
