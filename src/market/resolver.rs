//! Multi-source price resolution. Sources are tried strictly in the
//! order they were registered, one at a time, first usable price wins.
//! The ordering is a product decision carried over intact: DexScreener,
//! then Birdeye, then Jupiter, with Helius as the metadata registry.

use std::sync::Arc;

use log::{info, warn};

use crate::market::quote::{RawQuote, ResolvedQuote};
use crate::market::source::TokenDataSource;

pub struct TokenResolver {
    priced_sources: Vec<Arc<dyn TokenDataSource>>,
    registry: Arc<dyn TokenDataSource>,
}

impl TokenResolver {
    /// `priced_sources` is the fallback chain in priority order; adding a
    /// source is a list insertion, not a new branch. `registry` is the
    /// metadata-only source consulted for enrichment and as last resort.
    pub fn new(
        priced_sources: Vec<Arc<dyn TokenDataSource>>,
        registry: Arc<dyn TokenDataSource>,
    ) -> Self {
        Self {
            priced_sources,
            registry,
        }
    }

    /// Names of every source a lookup can touch, in consultation order,
    /// registry last. The failure view shows these so the audit line
    /// always matches the configured chain.
    pub fn source_names(&self) -> Vec<&'static str> {
        self.priced_sources
            .iter()
            .map(|s| s.name())
            .chain(std::iter::once(self.registry.name()))
            .collect()
    }

    /// Resolves a token identifier to a display-ready quote. Always
    /// terminates in one of five outcomes: a priced quote from one of
    /// the chain sources (enriched from the registry when the source
    /// carries no metadata), a degraded registry-only result, or a full
    /// not-found result. Sources are never consulted concurrently and
    /// never retried within one call.
    pub async fn resolve(&self, identifier: &str) -> ResolvedQuote {
        let mint = identifier.trim();
        info!("starting multi-source lookup for {mint}");

        for source in &self.priced_sources {
            let Some(mut raw) = source.fetch(mint).await else {
                continue;
            };
            if raw.usable_price().is_none() {
                warn!("[{}] quote had no usable price, skipping", source.name());
                continue;
            }
            if !source.supplies_metadata() {
                // Best-effort: a registry miss keeps the quote priced.
                if let Some(meta) = self.registry.fetch(mint).await {
                    raw.token_name = meta.token_name;
                    raw.token_symbol = meta.token_symbol;
                }
            }
            return ResolvedQuote::priced(raw);
        }

        match self.registry.fetch(mint).await {
            Some(meta) => {
                warn!("no source had price data for {mint}, returning metadata only");
                ResolvedQuote::unpriced(meta)
            }
            None => {
                warn!("all sources failed for {mint}");
                ResolvedQuote::not_found()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::quote::{
        NOT_FOUND, PRICE_UNAVAILABLE, UNKNOWN_NAME, UNKNOWN_SYMBOL,
    };
    use assert_approx_eq::assert_approx_eq;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockSource {
        name: &'static str,
        quote: Option<RawQuote>,
        supplies_metadata: bool,
        calls: AtomicUsize,
        call_log: Arc<Mutex<Vec<&'static str>>>,
        seen_mint: Mutex<Option<String>>,
    }

    impl MockSource {
        fn new(
            name: &'static str,
            quote: Option<RawQuote>,
            supplies_metadata: bool,
            call_log: Arc<Mutex<Vec<&'static str>>>,
        ) -> Arc<Self> {
            Arc::new(Self {
                name,
                quote,
                supplies_metadata,
                calls: AtomicUsize::new(0),
                call_log,
                seen_mint: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TokenDataSource for MockSource {
        fn name(&self) -> &'static str {
            self.name
        }

        fn supplies_metadata(&self) -> bool {
            self.supplies_metadata
        }

        async fn fetch(&self, mint: &str) -> Option<RawQuote> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.call_log.lock().unwrap().push(self.name);
            *self.seen_mint.lock().unwrap() = Some(mint.to_string());
            self.quote.clone()
        }
    }

    fn priced_quote(source: &'static str, price: &str) -> RawQuote {
        RawQuote {
            price: Some(price.to_string()),
            liquidity_usd: 50_000.0,
            market_cap_usd: 250_000.0,
            token_name: "Token A".to_string(),
            token_symbol: "TKNA".to_string(),
            source,
        }
    }

    fn oracle_quote(price: &str) -> RawQuote {
        RawQuote {
            price: Some(price.to_string()),
            liquidity_usd: 0.0,
            market_cap_usd: 0.0,
            token_name: UNKNOWN_NAME.to_string(),
            token_symbol: UNKNOWN_SYMBOL.to_string(),
            source: "Jupiter",
        }
    }

    fn metadata_quote() -> RawQuote {
        RawQuote {
            price: None,
            liquidity_usd: 0.0,
            market_cap_usd: 0.0,
            token_name: "Bonk".to_string(),
            token_symbol: "BONK".to_string(),
            source: "Helius",
        }
    }

    struct Chain {
        primary: Arc<MockSource>,
        secondary: Arc<MockSource>,
        oracle: Arc<MockSource>,
        registry: Arc<MockSource>,
        call_log: Arc<Mutex<Vec<&'static str>>>,
        resolver: TokenResolver,
    }

    fn chain(
        primary: Option<RawQuote>,
        secondary: Option<RawQuote>,
        oracle: Option<RawQuote>,
        registry: Option<RawQuote>,
    ) -> Chain {
        let call_log = Arc::new(Mutex::new(Vec::new()));
        let primary = MockSource::new("DexScreener", primary, true, call_log.clone());
        let secondary = MockSource::new("Birdeye", secondary, true, call_log.clone());
        let oracle = MockSource::new("Jupiter", oracle, false, call_log.clone());
        let registry = MockSource::new("Helius", registry, true, call_log.clone());
        let resolver = TokenResolver::new(
            vec![primary.clone(), secondary.clone(), oracle.clone()],
            registry.clone(),
        );
        Chain {
            primary,
            secondary,
            oracle,
            registry,
            call_log,
            resolver,
        }
    }

    #[tokio::test]
    async fn test_primary_success_short_circuits() {
        let c = chain(
            Some(priced_quote("DexScreener", "0.0002")),
            Some(priced_quote("Birdeye", "9.9")),
            Some(oracle_quote("9.9")),
            Some(metadata_quote()),
        );
        let resolved = c.resolver.resolve("TOKENAAA").await;
        assert!(!resolved.failed);
        assert_eq!(resolved.source, "DexScreener");
        assert_eq!(resolved.price_display, "$0.0002");
        assert_approx_eq!(resolved.price_raw, 0.0002);
        assert_eq!(c.primary.calls(), 1);
        assert_eq!(c.secondary.calls(), 0);
        assert_eq!(c.oracle.calls(), 0);
        assert_eq!(c.registry.calls(), 0);
    }

    #[tokio::test]
    async fn test_primary_success_with_placeholder_metadata_stays_local() {
        // An aggregator pair can come back without a baseToken, which
        // maps to placeholder name/symbol. That is still a step-1
        // success: only price-only sources earn a registry call.
        let mut anonymous = priced_quote("DexScreener", "0.5");
        anonymous.token_name = UNKNOWN_NAME.to_string();
        anonymous.token_symbol = UNKNOWN_SYMBOL.to_string();
        let c = chain(Some(anonymous), None, None, Some(metadata_quote()));
        let resolved = c.resolver.resolve("TOKENAAA").await;
        assert!(!resolved.failed);
        assert_eq!(resolved.source, "DexScreener");
        assert_eq!(resolved.token_name, UNKNOWN_NAME);
        assert_eq!(c.registry.calls(), 0);
    }

    #[tokio::test]
    async fn test_source_names_follow_the_configured_chain() {
        let c = chain(None, None, None, None);
        assert_eq!(
            c.resolver.source_names(),
            vec!["DexScreener", "Birdeye", "Jupiter", "Helius"]
        );
    }

    #[tokio::test]
    async fn test_fallback_respects_priority_order() {
        let c = chain(
            None,
            Some(priced_quote("Birdeye", "1.5")),
            Some(oracle_quote("1.5")),
            Some(metadata_quote()),
        );
        let resolved = c.resolver.resolve("TOKENAAA").await;
        assert!(!resolved.failed);
        assert_eq!(resolved.source, "Birdeye");
        assert_eq!(
            *c.call_log.lock().unwrap(),
            vec!["DexScreener", "Birdeye"]
        );
    }

    #[tokio::test]
    async fn test_oracle_price_is_enriched_from_registry() {
        let c = chain(None, None, Some(oracle_quote("0.25")), Some(metadata_quote()));
        let resolved = c.resolver.resolve("TOKENAAA").await;
        assert!(!resolved.failed);
        assert_eq!(resolved.source, "Jupiter");
        assert_eq!(resolved.token_name, "Bonk");
        assert_eq!(resolved.token_symbol, "BONK");
        assert_eq!(c.registry.calls(), 1);
    }

    #[tokio::test]
    async fn test_registry_miss_does_not_fail_an_oracle_price() {
        let c = chain(None, None, Some(oracle_quote("0.25")), None);
        let resolved = c.resolver.resolve("TOKENAAA").await;
        assert!(!resolved.failed);
        assert_eq!(resolved.token_name, UNKNOWN_NAME);
        assert_eq!(resolved.token_symbol, UNKNOWN_SYMBOL);
        assert_eq!(c.registry.calls(), 1);
    }

    #[tokio::test]
    async fn test_registry_only_yields_degraded_result() {
        let c = chain(None, None, None, Some(metadata_quote()));
        let resolved = c.resolver.resolve("TOKENAAA").await;
        assert!(resolved.failed);
        assert_eq!(resolved.price_display, PRICE_UNAVAILABLE);
        assert_eq!(resolved.token_name, "Bonk");
        assert!(resolved
            .failure_message
            .as_deref()
            .unwrap()
            .contains("no price data"));
    }

    #[tokio::test]
    async fn test_total_failure_uses_not_found_sentinel() {
        let c = chain(None, None, None, None);
        let resolved = c.resolver.resolve("TOKENAAA").await;
        assert!(resolved.failed);
        assert_eq!(resolved.price_display, NOT_FOUND);
        assert_ne!(resolved.price_display, PRICE_UNAVAILABLE);
        assert_eq!(
            *c.call_log.lock().unwrap(),
            vec!["DexScreener", "Birdeye", "Jupiter", "Helius"]
        );
    }

    #[tokio::test]
    async fn test_identifier_is_trimmed_before_any_fetch() {
        let c = chain(Some(priced_quote("DexScreener", "1.0")), None, None, None);
        c.resolver.resolve("  TOKENAAA  ").await;
        assert_eq!(
            c.primary.seen_mint.lock().unwrap().as_deref(),
            Some("TOKENAAA")
        );
    }

    #[tokio::test]
    async fn test_unusable_price_from_a_source_falls_through() {
        // A source that misbehaves and hands back a zero price must be
        // treated like a failed source, not surfaced.
        let bad = priced_quote("DexScreener", "0");
        let c = chain(Some(bad), Some(priced_quote("Birdeye", "2.0")), None, None);
        let resolved = c.resolver.resolve("TOKENAAA").await;
        assert!(!resolved.failed);
        assert_eq!(resolved.source, "Birdeye");
    }
}
