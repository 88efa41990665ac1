use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    /// Configuration errors (missing/invalid env vars)
    #[error("Config Error: {0}")]
    ConfigError(String),

    /// Network/connectivity issues
    #[error("Network Error: {0}")]
    NetworkError(String),

    /// Telegram Bot API returned ok=false or an unusable payload
    #[error("Telegram API Error: {0}")]
    TelegramApiError(String),

    /// Parsing errors for provider or transport payloads
    #[error("Parse Error: {0}")]
    ParseError(String),

    /// Health server / listener errors
    #[error("Server Error: {0}")]
    ServerError(String),
}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        BotError::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(err: serde_json::Error) -> Self {
        BotError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for BotError {
    fn from(err: std::io::Error) -> Self {
        BotError::ServerError(err.to_string())
    }
}
