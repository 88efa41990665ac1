//! Jupiter price oracle adapter. Price only: the v4 price API has no
//! liquidity, market cap or token metadata, so quotes carry placeholder
//! name/symbol for the resolver to enrich.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;

use crate::market::quote::{RawQuote, UNKNOWN_NAME, UNKNOWN_SYMBOL};
use crate::market::source::TokenDataSource;

const JUPITER_PRICE_API: &str = "https://price.jup.ag/v4/price";

#[derive(Debug, Deserialize)]
struct PriceResponse {
    data: Option<HashMap<String, TokenPrice>>,
}

#[derive(Debug, Deserialize)]
struct TokenPrice {
    price: Option<f64>,
}

fn price_to_quote(mint: &str, mut data: HashMap<String, TokenPrice>) -> Result<RawQuote> {
    // Exact-match lookup; the API echoes the requested id as the key.
    let entry = data
        .remove(mint)
        .ok_or_else(|| anyhow!("mint not in response"))?;
    let price = match entry.price {
        Some(p) if p != 0.0 => p,
        _ => return Err(anyhow!("missing or zero price")),
    };
    Ok(RawQuote {
        price: Some(price.to_string()),
        liquidity_usd: 0.0,
        market_cap_usd: 0.0,
        token_name: UNKNOWN_NAME.to_string(),
        token_symbol: UNKNOWN_SYMBOL.to_string(),
        source: "Jupiter",
    })
}

pub struct JupiterSource {
    http: Client,
}

impl JupiterSource {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    async fn fetch_inner(&self, mint: &str) -> Result<RawQuote> {
        let url = format!("{JUPITER_PRICE_API}?ids={mint}");
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(anyhow!("status {}", resp.status()));
        }
        let body: PriceResponse = resp.json().await?;
        let data = body.data.ok_or_else(|| anyhow!("no data"))?;
        price_to_quote(mint, data)
    }
}

#[async_trait]
impl TokenDataSource for JupiterSource {
    fn name(&self) -> &'static str {
        "Jupiter"
    }

    fn supplies_metadata(&self) -> bool {
        false
    }

    async fn fetch(&self, mint: &str) -> Option<RawQuote> {
        info!("[Jupiter] fetching {mint}");
        match self.fetch_inner(mint).await {
            Ok(quote) => {
                info!("[Jupiter] success");
                Some(quote)
            }
            Err(e) => {
                warn!("[Jupiter] {e}");
                None
            }
        }
    }
}
