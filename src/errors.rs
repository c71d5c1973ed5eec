use thiserror::Error;

/// Structured error types for the SDK.
///
/// Upstream variants map one-to-one onto provider responses and are
/// surfaced to the caller unchanged; the SDK itself performs no retries.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("city name cannot be empty")]
    InvalidCityName,

    #[error("invalid API key")]
    Unauthorized,

    #[error("city not found")]
    CityNotFound,

    #[error("too many requests")]
    RateLimited,

    #[error("provider error: HTTP {0}")]
    ServerError(u16),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed weather payload: {0}")]
    Malformed(String),
}
