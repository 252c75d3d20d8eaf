use std::time::Duration;

/// Failures of an external data source (REST API, contract reader). These are surfaced to
/// the caller; the calculation packages never produce them.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SourceError {
    #[error("data source unavailable: {0}")]
    Unavailable(String),
    #[error("data source timed out after {0:?}")]
    Timeout(Duration),
    #[error("invalid response from data source: {0}")]
    InvalidResponse(String),
    #[error("no data source configured")]
    NoSources,
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::InvalidResponse(err.to_string())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, thiserror::Error)]
#[repr(u32)]
pub enum ConfigError {
    #[error("maxLevels must be between 1 and 64")]
    InvalidMaxLevels = 100,
    #[error("pageSize must be at least 1")]
    InvalidPageSize = 101,
    #[error("lookupTimeoutSecs must be between 1 and 300")]
    InvalidLookupTimeout = 102,
    #[error("tokenDecimals must not exceed 36")]
    InvalidTokenDecimals = 103,
    #[error("cache ttl must be at least 1 second")]
    InvalidCacheTtl = 104,
    #[error("config is not valid json")]
    Malformed = 105,
}
