use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(600);

/// Operating mode of the SDK.
///
/// `OnDemand` fetches fresh data only when a caller asks for a city that is
/// missing or stale; `Polling` additionally refreshes every cached city in
/// the background on a fixed period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    OnDemand,
    Polling,
}

pub struct Config {
    pub api_key: String,
    pub mode: Mode,
    /// Provider endpoint; overridable so tests can point at a mock server.
    pub base_url: String,
    /// Period between background refresh passes in `Polling` mode.
    pub poll_interval: Duration,
}

impl Config {
    pub fn new(api_key: impl Into<String>, mode: Mode) -> Self {
        Self {
            api_key: api_key.into(),
            mode,
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn from_env(mode: Mode) -> Self {
        Self {
            api_key: env::var("OPENWEATHER_API_KEY").unwrap_or_default(),
            mode,
            base_url: env::var("OPENWEATHER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}
