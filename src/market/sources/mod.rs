pub mod birdeye;
pub mod dexscreener;
pub mod helius;
pub mod jupiter;

pub use birdeye::BirdeyeSource;
pub use dexscreener::DexScreenerSource;
pub use helius::HeliusSource;
pub use jupiter::JupiterSource;
