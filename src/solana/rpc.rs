//! Wallet balance lookup over Solana JSON-RPC.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{error, info};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

/// Seam for anything that can report a wallet's SOL balance; the
/// dispatcher only sees this trait.
#[async_trait]
pub trait BalanceProvider: Send + Sync {
    async fn sol_balance(&self, wallet: &str) -> f64;
}

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    result: Option<BalanceResult>,
}

#[derive(Debug, Deserialize)]
struct BalanceResult {
    value: u64,
}

pub struct SolanaRpc {
    http: Client,
    rpc_url: String,
}

impl SolanaRpc {
    pub fn new(http: Client, rpc_url: String) -> Self {
        Self { http, rpc_url }
    }

    async fn get_balance(&self, wallet: &str) -> Result<f64> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getBalance",
            "params": [wallet],
        });
        let resp = self.http.post(&self.rpc_url).json(&payload).send().await?;
        if !resp.status().is_success() {
            return Err(anyhow!("status {}", resp.status()));
        }
        let body: BalanceResponse = resp.json().await?;
        let lamports = body.result.ok_or_else(|| anyhow!("no result"))?.value;
        Ok(lamports as f64 / LAMPORTS_PER_SOL)
    }
}

#[async_trait]
impl BalanceProvider for SolanaRpc {
    /// Errors degrade to a zero balance; the bot keeps working without
    /// chain access.
    async fn sol_balance(&self, wallet: &str) -> f64 {
        match self.get_balance(wallet).await {
            Ok(balance) => {
                info!("balance for {wallet}: {balance} SOL");
                balance
            }
            Err(e) => {
                error!("error fetching SOL balance: {e}");
                0.0
            }
        }
    }
}
