pub mod bot;
pub mod config;
pub mod error;
pub mod market;
pub mod monitoring;
pub mod solana;
pub mod utils;

// Re-export the types most callers touch
pub use error::BotError;
pub use market::quote::{RawQuote, ResolvedQuote};
pub use market::resolver::TokenResolver;
