use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_token: String,
    pub helius_api_key: String,
    pub rpc_url: String,
    pub health_port: u16,
    pub http_timeout_secs: u64,
    pub poll_timeout_secs: u64,
    pub default_wallet_address: String,
    pub default_private_key: String,
}

impl Config {
    pub fn from_env() -> Self {
        let helius_api_key = env::var("HELIUS_API_KEY").unwrap_or_default();
        Config {
            telegram_token: env::var("TOKEN").unwrap_or_default(),
            rpc_url: env::var("RPC_URL").unwrap_or_else(|_| {
                format!("https://mainnet.helius-rpc.com/?api-key={}", helius_api_key)
            }),
            helius_api_key,
            health_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "12".to_string())
                .parse()
                .unwrap_or(12),
            poll_timeout_secs: env::var("POLL_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            default_wallet_address: env::var("DEFAULT_WALLET_ADDRESS")
                .unwrap_or_else(|_| "c54iQVThndYzaKXK8NqCRWDiRdUoni8LBkpmRoU3aPT".to_string()),
            default_private_key: env::var("PRIVATE_KEY")
                .unwrap_or_else(|_| "YOUR_PRIVATE_KEY_HERE".to_string()),
        }
    }

    pub fn validate_and_log(&self) {
        log::info!(
            "Configuration loaded: health_port={}, http_timeout_secs={}, poll_timeout_secs={}",
            self.health_port,
            self.http_timeout_secs,
            self.poll_timeout_secs
        );
        if self.telegram_token.is_empty() {
            log::error!("TOKEN is not set; the bot cannot reach the Telegram API.");
        }
        if url::Url::parse(&self.rpc_url).is_err() {
            log::error!("RPC_URL is not a valid URL: {}", self.rpc_url);
        }
    }
}
