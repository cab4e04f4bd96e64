use crate::core::{CurrencyBlock, DateKey, FetchError, RateQuote, RateRecord, RateSource};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct ExchangeRatesResponse {
    date: String,
    #[serde(rename = "exchangeRate")]
    exchange_rate: Vec<ExchangeRateEntry>,
}

// Upstream also lists entries with only NBU rates and no `currency`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeRateEntry {
    currency: Option<String>,
    sale_rate: Option<f64>,
    purchase_rate: Option<f64>,
}

pub struct PrivatBankProvider {
    api_url: String,
    client: reqwest::Client,
}

impl PrivatBankProvider {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pbrates/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(PrivatBankProvider {
            api_url: api_url.to_string(),
            client,
        })
    }
}

fn find_quote(
    date: &DateKey,
    entries: &[ExchangeRateEntry],
    currency: &str,
) -> Result<Option<RateQuote>, FetchError> {
    let Some(entry) = entries
        .iter()
        .find(|e| e.currency.as_deref() == Some(currency))
    else {
        return Ok(None);
    };

    match (entry.sale_rate, entry.purchase_rate) {
        (Some(sale), Some(purchase)) => Ok(Some(RateQuote { sale, purchase })),
        _ => Err(FetchError::Malformed {
            date: date.to_string(),
            reason: format!("{currency} entry lacks saleRate/purchaseRate"),
        }),
    }
}

/// Turns a decoded upstream payload into a [`RateRecord`].
///
/// The record is keyed by the `date` the payload reports; `date` is only used
/// to label errors. Missing EUR or USD entries produce empty quotes, while a
/// payload without `date` or `exchangeRate` is rejected.
pub fn parse_response(date: &DateKey, payload: &Value) -> Result<RateRecord, FetchError> {
    let response =
        ExchangeRatesResponse::deserialize(payload).map_err(|e| FetchError::Malformed {
            date: date.to_string(),
            reason: e.to_string(),
        })?;

    let currencies = CurrencyBlock {
        eur: find_quote(date, &response.exchange_rate, "EUR")?,
        usd: find_quote(date, &response.exchange_rate, "USD")?,
    };

    Ok(RateRecord {
        date: response.date,
        currencies,
    })
}

#[async_trait]
impl RateSource for PrivatBankProvider {
    #[instrument(skip_all, fields(date = %date))]
    async fn fetch_day(&self, date: &DateKey) -> Result<RateRecord, FetchError> {
        let url = format!("{}{}", self.api_url, date);
        debug!("Requesting exchange rates from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                date: date.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                date: date.to_string(),
                status,
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|source| FetchError::Request {
                date: date.to_string(),
                source,
            })?;

        let payload: Value =
            serde_json::from_str(&response_text).map_err(|source| FetchError::Decode {
                date: date.to_string(),
                source,
            })?;

        parse_response(date, &payload)
    }
}
