use std::sync::Arc;
use std::time::Duration;

use log::{error, info};

use solana_token_bot::bot::dispatch::Dispatcher;
use solana_token_bot::bot::session::SessionStore;
use solana_token_bot::bot::telegram::TelegramClient;
use solana_token_bot::config;
use solana_token_bot::market::source::TokenDataSource;
use solana_token_bot::market::sources::{
    BirdeyeSource, DexScreenerSource, HeliusSource, JupiterSource,
};
use solana_token_bot::market::TokenResolver;
use solana_token_bot::monitoring;
use solana_token_bot::solana::{BalanceProvider, SolanaRpc};
use solana_token_bot::utils::setup_logging;
use solana_token_bot::BotError;

#[tokio::main]
async fn main() -> Result<(), BotError> {
    dotenv::dotenv().ok();
    setup_logging().expect("Failed to initialize logging");
    info!("🚀 Solana token bot starting...");

    let app_config = config::env::load_config();

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(app_config.http_timeout_secs))
        .build()
        .map_err(BotError::from)?;

    // Fallback chain in its fixed priority order; adding a source is a
    // list insertion here.
    let sources: Vec<Arc<dyn TokenDataSource>> = vec![
        Arc::new(DexScreenerSource::new(http.clone())),
        Arc::new(BirdeyeSource::new(http.clone())),
        Arc::new(JupiterSource::new(http.clone())),
    ];
    let registry = Arc::new(HeliusSource::new(http.clone(), app_config.rpc_url.clone()));
    let resolver = TokenResolver::new(sources, registry);

    let sessions = SessionStore::new(
        app_config.default_wallet_address.clone(),
        app_config.default_private_key.clone(),
    );
    let balances: Arc<dyn BalanceProvider> =
        Arc::new(SolanaRpc::new(http.clone(), app_config.rpc_url.clone()));
    let dispatcher = Arc::new(Dispatcher::new(resolver, sessions, balances));
    let transport = Arc::new(TelegramClient::new(http, &app_config.telegram_token));

    let health_port = app_config.health_port;
    tokio::spawn(async move {
        if let Err(e) = monitoring::health::serve(health_port).await {
            error!("health server exited: {e}");
        }
    });

    info!("✅ Bot is running!");
    info!("✅ Multi-API fallback enabled (DexScreener → Birdeye → Jupiter → Helius)");
    info!("✅ Health check server running on port {health_port}");

    solana_token_bot::bot::run(transport, dispatcher, app_config.poll_timeout_secs).await
}
