//! DexScreener adapter: the primary aggregator, and the only source that
//! can fill every quote field in one call.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;

use crate::market::quote::{RawQuote, UNKNOWN_NAME, UNKNOWN_SYMBOL};
use crate::market::source::TokenDataSource;

const DEXSCREENER_API_BASE: &str = "https://api.dexscreener.com/latest/dex/tokens";

// DexScreener rejects requests without a browser-looking User-Agent.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Deserialize)]
struct TokenPairsResponse {
    pairs: Option<Vec<PairData>>,
}

#[derive(Debug, Deserialize)]
struct PairData {
    #[serde(rename = "priceUsd")]
    price_usd: Option<String>,
    liquidity: Option<PairLiquidity>,
    fdv: Option<f64>,
    #[serde(rename = "marketCap")]
    market_cap: Option<f64>,
    #[serde(rename = "baseToken")]
    base_token: Option<BaseToken>,
}

#[derive(Debug, Deserialize)]
struct PairLiquidity {
    usd: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct BaseToken {
    name: Option<String>,
    symbol: Option<String>,
}

impl PairData {
    fn liquidity_usd(&self) -> f64 {
        self.liquidity.as_ref().and_then(|l| l.usd).unwrap_or(0.0)
    }
}

/// The pair with the highest reported liquidity wins; absent liquidity
/// counts as zero.
fn best_pair(pairs: Vec<PairData>) -> Option<PairData> {
    pairs
        .into_iter()
        .max_by(|a, b| a.liquidity_usd().total_cmp(&b.liquidity_usd()))
}

fn pair_to_quote(pair: PairData) -> RawQuote {
    let liquidity_usd = pair.liquidity_usd();
    let market_cap_usd = pair.market_cap.or(pair.fdv).unwrap_or(0.0);
    let base = pair.base_token.unwrap_or_default();
    RawQuote {
        price: pair.price_usd,
        liquidity_usd,
        market_cap_usd,
        token_name: base.name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        token_symbol: base.symbol.unwrap_or_else(|| UNKNOWN_SYMBOL.to_string()),
        source: "DexScreener",
    }
}

pub struct DexScreenerSource {
    http: Client,
}

impl DexScreenerSource {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    async fn fetch_inner(&self, mint: &str) -> Result<RawQuote> {
        let url = format!("{DEXSCREENER_API_BASE}/{mint}");
        let resp = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(anyhow!("status {}", resp.status()));
        }
        let body: TokenPairsResponse = resp.json().await?;
        let pair = best_pair(body.pairs.unwrap_or_default())
            .ok_or_else(|| anyhow!("no pairs found"))?;
        let quote = pair_to_quote(pair);
        quote
            .usable_price()
            .ok_or_else(|| anyhow!("missing or zero price"))?;
        Ok(quote)
    }
}

#[async_trait]
impl TokenDataSource for DexScreenerSource {
    fn name(&self) -> &'static str {
        "DexScreener"
    }

    async fn fetch(&self, mint: &str) -> Option<RawQuote> {
        info!("[DexScreener] fetching {mint}");
        match self.fetch_inner(mint).await {
            Ok(quote) => {
                info!("[DexScreener] success - {}", quote.token_symbol);
                Some(quote)
            }
            Err(e) => {
                warn!("[DexScreener] {e}");
                None
            }
        }
    }
}
