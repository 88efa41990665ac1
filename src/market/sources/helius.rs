//! Helius DAS adapter: the metadata registry. Knows token names and
//! symbols but never prices, so it is both the last fallback and the
//! enrichment source for price-only quotes.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::market::quote::{RawQuote, UNKNOWN_NAME, UNKNOWN_SYMBOL};
use crate::market::source::TokenDataSource;

#[derive(Debug, Deserialize)]
struct AssetResponse {
    result: Option<Asset>,
}

#[derive(Debug, Deserialize)]
struct Asset {
    content: Option<AssetContent>,
}

#[derive(Debug, Deserialize)]
struct AssetContent {
    metadata: Option<AssetMetadata>,
}

#[derive(Debug, Deserialize)]
struct AssetMetadata {
    name: Option<String>,
    symbol: Option<String>,
}

fn asset_to_quote(asset: Asset) -> RawQuote {
    let metadata = asset.content.and_then(|c| c.metadata);
    let (name, symbol) = match metadata {
        Some(m) => (
            m.name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            m.symbol.unwrap_or_else(|| UNKNOWN_SYMBOL.to_string()),
        ),
        None => (UNKNOWN_NAME.to_string(), UNKNOWN_SYMBOL.to_string()),
    };
    RawQuote {
        price: None,
        liquidity_usd: 0.0,
        market_cap_usd: 0.0,
        token_name: name,
        token_symbol: symbol,
        source: "Helius",
    }
}

pub struct HeliusSource {
    http: Client,
    rpc_url: String,
}

impl HeliusSource {
    pub fn new(http: Client, rpc_url: String) -> Self {
        Self { http, rpc_url }
    }

    async fn fetch_inner(&self, mint: &str) -> Result<RawQuote> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": "text",
            "method": "getAsset",
            "params": { "id": mint }
        });
        let resp = self.http.post(&self.rpc_url).json(&payload).send().await?;
        if !resp.status().is_success() {
            return Err(anyhow!("status {}", resp.status()));
        }
        let body: AssetResponse = resp.json().await?;
        let asset = body.result.ok_or_else(|| anyhow!("no result"))?;
        Ok(asset_to_quote(asset))
    }
}

#[async_trait]
impl TokenDataSource for HeliusSource {
    fn name(&self) -> &'static str {
        "Helius"
    }

    async fn fetch(&self, mint: &str) -> Option<RawQuote> {
        info!("[Helius] fetching metadata for {mint}");
        match self.fetch_inner(mint).await {
            Ok(quote) => {
                info!("[Helius] got metadata - {}", quote.token_symbol);
                Some(quote)
            }
            Err(e) => {
                warn!("[Helius] {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_metadata_extraction() {
        let body: AssetResponse = serde_json::from_str(
            r#"{"result": {"content": {"metadata": {"name": "Bonk", "symbol": "BONK"}}}}"#,
        )
        .unwrap();
        let quote = asset_to_quote(body.result.unwrap());
        assert_eq!(quote.token_name, "Bonk");
        assert_eq!(quote.token_symbol, "BONK");
        assert_eq!(quote.price, None);
    }

    #[test]
    fn test_missing_metadata_falls_back_to_placeholders() {
        let body: AssetResponse = serde_json::from_str(r#"{"result": {}}"#).unwrap();
        let quote = asset_to_quote(body.result.unwrap());
        assert_eq!(quote.token_name, UNKNOWN_NAME);
        assert_eq!(quote.token_symbol, UNKNOWN_SYMBOL);
    }

    #[test]
    fn test_absent_result_means_not_found() {
        let body: AssetResponse = serde_json::from_str("{}").unwrap();
        assert!(body.result.is_none());
    }
}
