//! Birdeye adapter: secondary aggregator. The public token-overview
//! endpoint carries price, liquidity and market cap but no distinct
//! token name, so the symbol stands in for both.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;

use crate::market::quote::{RawQuote, UNKNOWN_SYMBOL};
use crate::market::source::TokenDataSource;

const BIRDEYE_API_BASE: &str = "https://public-api.birdeye.so/defi/token_overview";

#[derive(Debug, Deserialize)]
struct OverviewResponse {
    data: Option<TokenOverview>,
}

#[derive(Debug, Deserialize)]
struct TokenOverview {
    price: Option<f64>,
    liquidity: Option<f64>,
    mc: Option<f64>,
    symbol: Option<String>,
}

fn overview_to_quote(overview: TokenOverview) -> Result<RawQuote> {
    let price = match overview.price {
        Some(p) if p != 0.0 => p,
        _ => return Err(anyhow!("missing or zero price")),
    };
    let symbol = overview
        .symbol
        .unwrap_or_else(|| UNKNOWN_SYMBOL.to_string());
    Ok(RawQuote {
        price: Some(price.to_string()),
        liquidity_usd: overview.liquidity.unwrap_or(0.0),
        market_cap_usd: overview.mc.unwrap_or(0.0),
        token_name: symbol.clone(),
        token_symbol: symbol,
        source: "Birdeye",
    })
}

pub struct BirdeyeSource {
    http: Client,
}

impl BirdeyeSource {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    async fn fetch_inner(&self, mint: &str) -> Result<RawQuote> {
        let url = format!("{BIRDEYE_API_BASE}?address={mint}");
        let resp = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, "Mozilla/5.0")
            .header("X-API-KEY", "public")
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(anyhow!("status {}", resp.status()));
        }
        let body: OverviewResponse = resp.json().await?;
        let overview = body.data.ok_or_else(|| anyhow!("no data"))?;
        overview_to_quote(overview)
    }
}

#[async_trait]
impl TokenDataSource for BirdeyeSource {
    fn name(&self) -> &'static str {
        "Birdeye"
    }

    async fn fetch(&self, mint: &str) -> Option<RawQuote> {
        info!("[Birdeye] fetching {mint}");
        match self.fetch_inner(mint).await {
            Ok(quote) => {
                info!("[Birdeye] success - {}", quote.token_symbol);
                Some(quote)
            }
            Err(e) => {
                warn!("[Birdeye] {e}");
                None
            }
        }
    }
}
