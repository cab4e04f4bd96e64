//! Exchange rate abstractions and core types

use crate::core::error::FetchError;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Format used both as the upstream query value and the output key.
pub const DATE_KEY_FORMAT: &str = "%d.%m.%Y";

/// A calendar date rendered as `DD.MM.YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        DateKey(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Dates `today - i` for `i` in `0..days`, newest first. Non-positive
    /// `days` gives an empty window.
    pub fn window(today: NaiveDate, days: i64) -> Vec<DateKey> {
        (0..days.max(0) as u64)
            .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
            .map(DateKey)
            .collect()
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

/// Sale and purchase price of one currency on one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub sale: f64,
    pub purchase: f64,
}

fn quote_or_empty<S>(quote: &Option<RateQuote>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match quote {
        Some(q) => q.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

/// EUR and USD quotes for a date. A missing currency serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CurrencyBlock {
    #[serde(rename = "EUR", serialize_with = "quote_or_empty")]
    pub eur: Option<RateQuote>,
    #[serde(rename = "USD", serialize_with = "quote_or_empty")]
    pub usd: Option<RateQuote>,
}

/// Rates for one date, serialized as `{"<date>": {"EUR": .., "USD": ..}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRecord {
    pub date: String,
    pub currencies: CurrencyBlock,
}

impl Serialize for RateRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.currencies)?;
        map.end()
    }
}

#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_day(&self, date: &DateKey) -> Result<RateRecord, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_key_is_zero_padded() {
        assert_eq!(DateKey::new(ymd(2024, 1, 5)).to_string(), "05.01.2024");
        assert_eq!(DateKey::new(ymd(2023, 12, 31)).to_string(), "31.12.2023");
    }

    #[test]
    fn test_window_walks_backward_across_month_and_year() {
        let keys: Vec<String> = DateKey::window(ymd(2024, 1, 2), 4)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            keys,
            vec!["02.01.2024", "01.01.2024", "31.12.2023", "30.12.2023"]
        );
    }

    #[test]
    fn test_window_non_positive_is_empty() {
        assert!(DateKey::window(ymd(2024, 1, 2), 0).is_empty());
        assert!(DateKey::window(ymd(2024, 1, 2), -3).is_empty());
    }

    #[test]
    fn test_record_serialization_shape() {
        let record = RateRecord {
            date: "01.01.2024".to_string(),
            currencies: CurrencyBlock {
                eur: None,
                usd: Some(RateQuote {
                    sale: 37.0,
                    purchase: 36.5,
                }),
            },
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "01.01.2024": {
                    "EUR": {},
                    "USD": {"sale": 37.0, "purchase": 36.5}
                }
            })
        );
    }
}
