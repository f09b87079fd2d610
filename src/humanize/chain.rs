//! Resolution chain - ordered providers ending in a total fallback
//!
//! ```text
//! PartialPath (US.CA, terminal CA)
//!     │
//!     ├─► DirectProvider      Declined
//!     ├─► GeoProvider         Resolved("California")  ── stop
//!     ├─► InternetIdProvider  (not consulted)
//!     └─► DefaultProvider     (not consulted)
//! ```
//!
//! A chain can only be built through [`ChainBuilder::terminate`], so every
//! chain ends in a [`FallbackProvider`] and resolution of a non-empty node
//! always yields a name.

use super::provider::{FallbackProvider, HumanizeProvider, PartialPath, Resolution};
use super::providers::{DefaultProvider, DirectProvider, GeoProvider, InternetIdProvider};
use crate::config::HumanizeConfig;
use crate::error::{ConfigError, HumanizeResult};
use crate::metadata::MetadataEntitiesService;

/// Ordered providers, consulted first to last
#[derive(Debug)]
pub struct ResolutionChain {
    providers: Vec<Box<dyn HumanizeProvider>>,
    fallback: Box<dyn FallbackProvider>,
}

impl ResolutionChain {
    pub fn builder() -> ChainBuilder {
        ChainBuilder::new()
    }

    /// Direct → Geo → InternetId → Default, configured from `config`
    pub fn standard(
        config: &HumanizeConfig,
        metadata: MetadataEntitiesService,
    ) -> Result<Self, ConfigError> {
        let metadata = metadata.with_policy(config.integrity);

        let direct = DirectProvider::new().with_entries(
            config
                .direct
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        let geo = GeoProvider::new(metadata.clone())
            .with_levels(config.geo.levels.clone())
            .with_marker(config.geo.marker.clone());
        let internet_id = InternetIdProvider::from_config(&config.internet_id)?
            .with_metadata(metadata);

        Ok(Self::builder()
            .provider(direct)
            .provider(geo)
            .provider(internet_id)
            .terminate(DefaultProvider::new(config.fallback)))
    }

    /// Resolve the terminal node of `partial`.
    ///
    /// Returns `Ok(None)` only for an empty terminal node. The first provider
    /// that resolves the node wins; later providers are not consulted.
    pub fn resolve(&self, partial: &PartialPath<'_>) -> HumanizeResult<Option<String>> {
        if partial.terminal().is_empty() {
            return Ok(None);
        }

        for provider in &self.providers {
            if let Resolution::Resolved(name) = provider.attempt(partial)? {
                tracing::debug!(
                    provider = provider.name(),
                    node = partial.terminal(),
                    name = %name,
                    "node resolved"
                );
                return Ok(Some(name));
            }
        }

        let name = self.fallback.resolve(partial);
        tracing::debug!(
            provider = self.fallback.name(),
            node = partial.terminal(),
            "node resolved by fallback"
        );
        Ok(Some(name))
    }

    /// Provider names in consultation order, fallback last
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers
            .iter()
            .map(|p| p.name())
            .chain(std::iter::once(self.fallback.name()))
            .collect()
    }
}

/// Collects providers in priority order. Only [`terminate`](Self::terminate)
/// produces a [`ResolutionChain`].
#[derive(Debug, Default)]
pub struct ChainBuilder {
    providers: Vec<Box<dyn HumanizeProvider>>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider after those already added
    pub fn provider(mut self, provider: impl HumanizeProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn boxed(mut self, provider: Box<dyn HumanizeProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Finish the chain with its total fallback
    pub fn terminate(self, fallback: impl FallbackProvider + 'static) -> ResolutionChain {
        ResolutionChain {
            providers: self.providers,
            fallback: Box::new(fallback),
        }
    }
}
