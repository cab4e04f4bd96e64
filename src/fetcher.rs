//! Concurrent per-date fetching of exchange rates.

use crate::core::{DateKey, FetchError, RateRecord, RateSource};
use chrono::{Local, NaiveDate};
use futures::future::join_all;
use tracing::{debug, warn};

pub const MAX_DAYS: i64 = 10;
pub const DEFAULT_DAYS: i64 = 2;

pub struct RateFetcher<S: RateSource> {
    days: i64,
    source: S,
}

impl<S: RateSource> RateFetcher<S> {
    /// Fails with [`FetchError::InvalidArgument`] when `days` exceeds
    /// [`MAX_DAYS`]. Non-positive values are accepted and fetch nothing.
    pub fn new(days: i64, source: S) -> Result<Self, FetchError> {
        if days > MAX_DAYS {
            return Err(FetchError::InvalidArgument {
                days,
                max: MAX_DAYS,
            });
        }
        Ok(RateFetcher { days, source })
    }

    pub fn days(&self) -> i64 {
        self.days
    }

    pub async fn fetch_all(&self) -> Vec<RateRecord> {
        self.fetch_all_from(Local::now().date_naive()).await
    }

    /// Fetches every date of the window ending at `today` concurrently.
    ///
    /// Failed dates are logged and dropped. Successful records keep request
    /// order, newest date first.
    pub async fn fetch_all_from(&self, today: NaiveDate) -> Vec<RateRecord> {
        let dates = DateKey::window(today, self.days);
        debug!("Fetching exchange rates for {} dates", dates.len());

        let fetches = dates.iter().map(|date| async move {
            let result = self.source.fetch_day(date).await;
            (date, result)
        });

        join_all(fetches)
            .await
            .into_iter()
            .filter_map(|(date, result)| match result {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(
                        %date,
                        malformed = e.is_malformed(),
                        error = ?e,
                        "Error fetching data for {date}: {e}"
                    );
                    None
                }
            })
            .collect()
    }
}
