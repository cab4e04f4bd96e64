//! Error types for exchange rate fetching.

use thiserror::Error;

/// Errors raised while building a fetcher or fetching a single day.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Cannot fetch data for more than {max} days (requested {days})")]
    InvalidArgument { days: i64, max: i64 },
    #[error("Request failed for {date}")]
    Request {
        date: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Unexpected HTTP status {status} for {date}")]
    Status {
        date: String,
        status: reqwest::StatusCode,
    },
    #[error("Response for {date} is not valid JSON")]
    Decode {
        date: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Malformed response for {date}: {reason}")]
    Malformed { date: String, reason: String },
}

impl FetchError {
    /// True when the upstream answered with JSON of the wrong shape, as
    /// opposed to a transport or status failure.
    pub fn is_malformed(&self) -> bool {
        matches!(self, FetchError::Malformed { .. })
    }
}
