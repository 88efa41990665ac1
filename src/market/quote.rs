use serde::{Deserialize, Serialize};

use crate::utils::{format_usd, format_usd_str};

/// Placeholder name/symbol used by sources that cannot supply metadata.
pub const UNKNOWN_NAME: &str = "Unknown";
pub const UNKNOWN_SYMBOL: &str = "???";

/// Sentinels for the two distinct failure outcomes. "Unavailable" means
/// the token exists but has no tradable price yet; "Not Found" means no
/// source recognized the identifier at all.
pub const PRICE_UNAVAILABLE: &str = "Price Unavailable";
pub const DATA_UNAVAILABLE: &str = "Data Unavailable";
pub const NOT_FOUND: &str = "Not Found";

/// Raw market data as one source reported it, before any formatting.
/// Produced fresh per fetch; owned by the resolve call that asked for it.
#[derive(Debug, Clone, Serialize)]
pub struct RawQuote {
    /// Decimal price string as the source sent it; `None` for sources
    /// that only carry metadata.
    pub price: Option<String>,
    pub liquidity_usd: f64,
    pub market_cap_usd: f64,
    pub token_name: String,
    pub token_symbol: String,
    pub source: &'static str,
}

impl RawQuote {
    /// A price of `None`, empty, or literal zero counts as no price.
    pub fn usable_price(&self) -> Option<&str> {
        let price = self.price.as_deref()?;
        if price.is_empty() || price == "0" {
            return None;
        }
        match price.parse::<f64>() {
            Ok(v) if v != 0.0 => Some(price),
            _ => None,
        }
    }
}

/// Display-ready lookup result handed back to the conversation layer.
/// Rebuilt on every lookup, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedQuote {
    pub price_display: String,
    pub price_raw: f64,
    pub liquidity_display: String,
    pub market_cap_display: String,
    pub token_name: String,
    pub token_symbol: String,
    pub source: String,
    pub failed: bool,
    pub failure_message: Option<String>,
}

impl ResolvedQuote {
    /// A successful resolution: the raw quote has a usable price.
    pub fn priced(raw: RawQuote) -> Self {
        let price = raw.price.unwrap_or_default();
        ResolvedQuote {
            price_display: format_usd_str(&price),
            price_raw: price.parse().unwrap_or(0.0),
            liquidity_display: format_usd(raw.liquidity_usd),
            market_cap_display: format_usd(raw.market_cap_usd),
            token_name: raw.token_name,
            token_symbol: raw.token_symbol,
            source: raw.source.to_string(),
            failed: false,
            failure_message: None,
        }
    }

    /// The registry knows the token but no source has a price for it.
    pub fn unpriced(meta: RawQuote) -> Self {
        ResolvedQuote {
            price_display: PRICE_UNAVAILABLE.to_string(),
            price_raw: 0.0,
            liquidity_display: DATA_UNAVAILABLE.to_string(),
            market_cap_display: DATA_UNAVAILABLE.to_string(),
            token_name: meta.token_name,
            token_symbol: meta.token_symbol,
            source: meta.source.to_string(),
            failed: true,
            failure_message: Some(
                "Token found but no price data available. It may not be listed on any DEX yet."
                    .to_string(),
            ),
        }
    }

    /// Every source came up empty.
    pub fn not_found() -> Self {
        ResolvedQuote {
            price_display: NOT_FOUND.to_string(),
            price_raw: 0.0,
            liquidity_display: NOT_FOUND.to_string(),
            market_cap_display: NOT_FOUND.to_string(),
            token_name: UNKNOWN_NAME.to_string(),
            token_symbol: UNKNOWN_SYMBOL.to_string(),
            source: "None".to_string(),
            failed: true,
            failure_message: Some(
                "Token not found. Please verify the contract address is correct and the token is listed on a Solana DEX."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(price: Option<&str>) -> RawQuote {
        RawQuote {
            price: price.map(String::from),
            liquidity_usd: 50_000.0,
            market_cap_usd: 2_500_000.0,
            token_name: "Bonk".to_string(),
            token_symbol: "BONK".to_string(),
            source: "DexScreener",
        }
    }

    #[test]
    fn test_usable_price_rejects_absent_empty_and_zero() {
        assert_eq!(raw(None).usable_price(), None);
        assert_eq!(raw(Some("")).usable_price(), None);
        assert_eq!(raw(Some("0")).usable_price(), None);
        assert_eq!(raw(Some("0.0")).usable_price(), None);
        assert_eq!(raw(Some("garbage")).usable_price(), None);
        assert_eq!(raw(Some("0.002")).usable_price(), Some("0.002"));
    }

    #[test]
    fn test_priced_quote_formats_all_fields() {
        let resolved = ResolvedQuote::priced(raw(Some("0.002")));
        assert!(!resolved.failed);
        assert_eq!(resolved.price_display, "$0.002");
        assert_eq!(resolved.liquidity_display, "$50.00K");
        assert_eq!(resolved.market_cap_display, "$2.50M");
        assert_eq!(resolved.failure_message, None);
    }

    #[test]
    fn test_failure_sentinels_are_distinct() {
        let unpriced = ResolvedQuote::unpriced(RawQuote {
            price: None,
            liquidity_usd: 0.0,
            market_cap_usd: 0.0,
            token_name: "Bonk".to_string(),
            token_symbol: "BONK".to_string(),
            source: "Helius",
        });
        let missing = ResolvedQuote::not_found();
        assert!(unpriced.failed);
        assert!(missing.failed);
        assert_eq!(unpriced.price_display, PRICE_UNAVAILABLE);
        assert_eq!(missing.price_display, NOT_FOUND);
        assert_ne!(unpriced.price_display, missing.price_display);
    }
}
