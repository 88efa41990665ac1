//! Health-check server. Keeps the hosting platform's liveness probe
//! happy while the bot long-polls in the background.

use axum::{routing::get, Router};
use log::info;

use crate::error::BotError;

pub async fn serve(port: u16) -> Result<(), BotError> {
    let app = Router::new()
        .route("/", get(home))
        .route("/health", get(health));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("health-check server listening on port {port}");
    axum::serve(listener, app)
        .await
        .map_err(|e| BotError::ServerError(e.to_string()))
}

async fn home() -> &'static str {
    "Bot is running!"
}

async fn health() -> &'static str {
    "OK"
}
