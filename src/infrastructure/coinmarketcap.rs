//! CoinMarketCap quote client

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::shared::errors::QuoteError;

const QUOTES_URL: &str = "https://pro-api.coinmarketcap.com/v1/cryptocurrency/quotes/latest";
const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Response envelope: data.<SYMBOL>.quote.<CCY>.price
#[derive(Debug, Deserialize)]
struct QuotesResponse {
    data: HashMap<String, SymbolData>,
}

#[derive(Debug, Deserialize)]
struct SymbolData {
    quote: HashMap<String, CurrencyQuote>,
}

#[derive(Debug, Deserialize)]
struct CurrencyQuote {
    price: f64,
}

/// Anything that can quote one symbol in one currency
#[async_trait]
pub trait QuoteSource {
    async fn latest_price(&self, symbol: &str, convert: &str) -> Result<f64, QuoteError>;
}

/// CoinMarketCap Pro API client
pub struct CmcClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl CmcClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key,
            base_url: QUOTES_URL.to_string(),
        }
    }
}

#[async_trait]
impl QuoteSource for CmcClient {
    async fn latest_price(&self, symbol: &str, convert: &str) -> Result<f64, QuoteError> {
        debug!("Fetching {} quote in {}", symbol, convert);

        let response = self
            .http
            .get(&self.base_url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("symbol", symbol), ("convert", convert)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(QuoteError::BadStatus(response.status()));
        }

        let body: QuotesResponse = response.json().await?;
        extract_price(&body, symbol, convert)
    }
}

fn extract_price(body: &QuotesResponse, symbol: &str, convert: &str) -> Result<f64, QuoteError> {
    body.data
        .get(symbol)
        .ok_or_else(|| QuoteError::MissingField(format!("data.{}", symbol)))?
        .quote
        .get(convert)
        .map(|q| q.price)
        .ok_or_else(|| QuoteError::MissingField(format!("data.{}.quote.{}", symbol, convert)))
}

/// Fetch the USD price plus, when enabled, the BRL price. Two sequential
/// calls, matching the upstream API's one-convert-per-request plan limit.
pub async fn fetch_btc_quotes(
    source: &dyn QuoteSource,
    quote_brl: bool,
) -> Result<(f64, Option<f64>), QuoteError> {
    let usd = source.latest_price("BTC", "USD").await?;
    let brl = if quote_brl {
        Some(source.latest_price("BTC", "BRL").await?)
    } else {
        None
    };
    Ok((usd, brl))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "status": {"error_code": 0, "error_message": null},
        "data": {
            "BTC": {
                "quote": {
                    "USD": {"price": 65432.1, "volume_24h": 1.0}
                }
            }
        }
    }"#;

    #[test]
    fn test_deserialize_quote_response() {
        let body: QuotesResponse = serde_json::from_str(SAMPLE).unwrap();
        let price = extract_price(&body, "BTC", "USD").unwrap();
        assert_eq!(price, 65432.1);
    }

    #[test]
    fn test_missing_currency_is_reported() {
        let body: QuotesResponse = serde_json::from_str(SAMPLE).unwrap();
        let err = extract_price(&body, "BTC", "BRL").unwrap_err();
        assert!(err.to_string().contains("data.BTC.quote.BRL"));
    }

    struct FixedSource;

    #[async_trait]
    impl QuoteSource for FixedSource {
        async fn latest_price(&self, _symbol: &str, convert: &str) -> Result<f64, QuoteError> {
            match convert {
                "USD" => Ok(65000.0),
                "BRL" => Ok(330000.0),
                other => Err(QuoteError::MissingField(other.to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_both_currencies() {
        let (usd, brl) = fetch_btc_quotes(&FixedSource, true).await.unwrap();
        assert_eq!(usd, 65000.0);
        assert_eq!(brl, Some(330000.0));
    }

    #[tokio::test]
    async fn test_fetch_usd_only() {
        let (usd, brl) = fetch_btc_quotes(&FixedSource, false).await.unwrap();
        assert_eq!(usd, 65000.0);
        assert_eq!(brl, None);
    }
}
