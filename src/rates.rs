//! BTC/USD exchange-rate lookup with multi-source fallback.
//!
//! Queries three independent public price feeds concurrently, each under its
//! own timeout, and keeps the **minimum** of the quotes that succeed. The
//! minimum is a business policy — when feeds disagree, the operator's USD
//! earnings must never be overstated — and is preserved as such.
//!
//! This module only fetches; polling cadence and staleness live in the
//! calling layer.

use std::time::Duration;

use futures_util::future::join_all;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, warn};

use crate::currency::SAT_PER_BTC;

/// Per-source request timeout. A slow feed is dropped, never awaited past
/// this.
pub const SOURCE_TIMEOUT: Duration = Duration::from_secs(10);

/// A public spot-price feed and the accessor path into its response shape.
struct PriceSource {
    name: &'static str,
    url: &'static str,
    extract: fn(&Value) -> Option<Decimal>,
}

const SOURCES: [PriceSource; 3] = [
    PriceSource {
        name: "kraken",
        url: "https://api.kraken.com/0/public/Ticker?pair=XBTUSD",
        extract: extract_kraken,
    },
    PriceSource {
        name: "coinbase",
        url: "https://api.coinbase.com/v2/prices/BTC-USD/spot",
        extract: extract_coinbase,
    },
    PriceSource {
        name: "binance",
        url: "https://api.binance.com/api/v3/ticker/price?symbol=BTCUSDT",
        extract: extract_binance,
    },
];

/// Fetches the current USD-per-BTC price.
///
/// All sources are queried concurrently; a source's network error, bad
/// response shape, or timeout excludes it from the candidate set without
/// affecting the others. Returns the minimum of the successful quotes, or
/// `None` when every source failed.
pub async fn fetch_usd_price(client: &reqwest::Client) -> Option<Decimal> {
    let quotes = join_all(SOURCES.iter().map(|source| fetch_source(client, source))).await;
    let price = min_quote(quotes);
    match price {
        Some(price) => debug!(%price, "btc/usd quote selected"),
        None => warn!("all price sources failed, rate unavailable"),
    }
    price
}

/// Reduces per-source results to the most conservative successful quote.
fn min_quote(quotes: impl IntoIterator<Item = Option<Decimal>>) -> Option<Decimal> {
    quotes.into_iter().flatten().min()
}

/// Converts a USD-per-BTC price to USD-per-satoshi.
pub fn usd_per_sat(usd_per_btc: Decimal) -> Decimal {
    usd_per_btc / Decimal::from(SAT_PER_BTC)
}

/// Queries one source, absorbing every failure mode into `None`.
async fn fetch_source(client: &reqwest::Client, source: &PriceSource) -> Option<Decimal> {
    match tokio::time::timeout(SOURCE_TIMEOUT, query(client, source.url)).await {
        Ok(Ok(body)) => {
            let quote = (source.extract)(&body);
            if quote.is_none() {
                warn!(source = source.name, "unexpected price feed response shape");
            }
            quote
        }
        Ok(Err(e)) => {
            warn!(source = source.name, error = %e, "price feed request failed");
            None
        }
        Err(_) => {
            warn!(source = source.name, "price feed timed out");
            None
        }
    }
}

async fn query(client: &reqwest::Client, url: &str) -> crate::Result<Value> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.json().await?)
}

fn extract_kraken(body: &Value) -> Option<Decimal> {
    // last-trade price is the first element of result.<pair>.c
    body["result"]["XXBTZUSD"]["c"][0].as_str()?.parse().ok()
}

fn extract_coinbase(body: &Value) -> Option<Decimal> {
    body["data"]["amount"].as_str()?.parse().ok()
}

fn extract_binance(body: &Value) -> Option<Decimal> {
    body["price"].as_str()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn min_quote_picks_most_conservative() {
        let result = min_quote([Some(dec!(61000)), Some(dec!(61500)), None]);
        assert_eq!(result, Some(dec!(61000)));
    }

    #[test]
    fn min_quote_none_when_all_failed() {
        assert_eq!(min_quote([None, None, None]), None);
    }

    #[test]
    fn min_quote_single_survivor() {
        assert_eq!(min_quote([None, Some(dec!(59900)), None]), Some(dec!(59900)));
    }

    #[test]
    fn usd_per_sat_scales_by_sat_per_btc() {
        assert_eq!(usd_per_sat(dec!(60000)), dec!(0.0006));
    }

    #[test]
    fn kraken_extraction() {
        let body: Value = serde_json::from_str(
            r#"{
                "error": [],
                "result": {
                    "XXBTZUSD": {
                        "a": ["61250.10000", "1", "1.000"],
                        "b": ["61250.00000", "2", "2.000"],
                        "c": ["61234.50000", "0.01000000"]
                    }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(extract_kraken(&body), Some(dec!(61234.5)));
    }

    #[test]
    fn coinbase_extraction() {
        let body: Value = serde_json::from_str(
            r#"{"data": {"amount": "61240.12", "base": "BTC", "currency": "USD"}}"#,
        )
        .unwrap();
        assert_eq!(extract_coinbase(&body), Some(dec!(61240.12)));
    }

    #[test]
    fn binance_extraction() {
        let body: Value =
            serde_json::from_str(r#"{"symbol": "BTCUSDT", "price": "61198.01000000"}"#).unwrap();
        assert_eq!(extract_binance(&body), Some(dec!(61198.01)));
    }

    #[test]
    fn extraction_tolerates_wrong_shape() {
        let body: Value = serde_json::from_str(r#"{"error": "rate limited"}"#).unwrap();
        assert_eq!(extract_kraken(&body), None);
        assert_eq!(extract_coinbase(&body), None);
        assert_eq!(extract_binance(&body), None);
    }
}
