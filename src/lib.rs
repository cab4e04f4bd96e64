pub mod core;
pub mod fetcher;
pub mod providers;

use crate::core::RateRecord;
use crate::core::config::AppConfig;
use crate::fetcher::RateFetcher;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Fetches the rates for the last `days` days using the given config and
/// returns the records that could be retrieved.
pub async fn collect_rates(days: i64, config: &AppConfig) -> Result<Vec<RateRecord>> {
    let provider =
        providers::PrivatBankProvider::new(&config.api_url, config.request_timeout())?;
    let fetcher = RateFetcher::new(days, provider)?;

    debug!("Fetching rates for {} days", fetcher.days());
    let records = fetcher.fetch_all().await;
    info!("Fetched {} of {} days", records.len(), days.max(0));
    Ok(records)
}

pub fn render_json(records: &[RateRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).context("Failed to serialize exchange rates")
}

pub async fn run(days: i64, config_path: Option<&str>) -> Result<()> {
    info!("Exchange rates fetcher starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let records = collect_rates(days, &config).await?;
    println!("{}", render_json(&records)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CurrencyBlock, RateQuote};

    #[test]
    fn test_render_json_matches_expected_layout() {
        let records = vec![RateRecord {
            date: "01.01.2024".to_string(),
            currencies: CurrencyBlock {
                eur: Some(RateQuote {
                    sale: 40.1,
                    purchase: 39.5,
                }),
                usd: None,
            },
        }];

        let expected = r#"[
  {
    "01.01.2024": {
      "EUR": {
        "sale": 40.1,
        "purchase": 39.5
      },
      "USD": {}
    }
  }
]"#;
        assert_eq!(render_json(&records).unwrap(), expected);
    }

    #[test]
    fn test_render_json_empty() {
        assert_eq!(render_json(&[]).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_collect_rates_rejects_too_many_days() {
        let err = collect_rates(11, &AppConfig::default()).await.unwrap_err();
        assert!(err.to_string().contains("more than 10 days"));
    }
}
