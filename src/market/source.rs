use async_trait::async_trait;

use crate::market::quote::RawQuote;

/// One external market-data source.
///
/// Implementations translate the provider's response shape into a
/// [`RawQuote`] and must never let a transport failure or malformed
/// payload escape: timeouts, non-success statuses, missing fields and
/// absent/zero prices all map to `None`.
#[async_trait]
pub trait TokenDataSource: Send + Sync {
    /// Source name as shown to the user (e.g. "DexScreener").
    fn name(&self) -> &'static str;

    /// Whether this source can supply real token name/symbol metadata.
    /// Price-only oracles return false; after one of those succeeds the
    /// resolver asks the metadata registry to fill in name/symbol.
    fn supplies_metadata(&self) -> bool {
        true
    }

    async fn fetch(&self, mint: &str) -> Option<RawQuote>;
}
