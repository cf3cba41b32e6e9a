//! Sponsor registry
//!
//! `SponsorRegistry` accumulates sponsors for one maintainer, either added by
//! hand or loaded from GitHub, and renders them. A registry is an ordinary
//! value owned by whatever request context builds it.
//!
//! Reading and rendering see the list differently. `get_all` deduplicates by
//! name (first occurrence wins), while `render_html` walks the raw list and
//! renders duplicates. Both behaviours are intentional and kept separate.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, info, warn};

use crate::cache::{cache_key, CacheManager, MemoryCache, SponsorCache};
use crate::config::RegistryConfig;
use crate::data::{GitHubSponsorsClient, Sponsor, SponsorEdge};
use crate::http::{HttpTransport, ReqwestTransport};
use crate::render::render_sponsors;
use crate::token;

/// Sponsors for a single GitHub maintainer
pub struct SponsorRegistry {
    sponsors: Vec<Sponsor>,
    login: String,
    token: String,
    add_styles: bool,
    config: RegistryConfig,
    cache: Box<dyn SponsorCache>,
    transport: Box<dyn HttpTransport>,
}

impl fmt::Debug for SponsorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SponsorRegistry")
            .field("login", &self.login)
            .field("token", &if self.token.is_empty() { "" } else { "<redacted>" })
            .field("sponsors", &self.sponsors.len())
            .field("add_styles", &self.add_styles)
            .field("config", &self.config)
            .finish()
    }
}

impl Default for SponsorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SponsorRegistry {
    /// Create an empty registry with the default collaborators
    ///
    /// Uses the on-disk cache when a cache directory is available, otherwise an
    /// in-memory cache, and a `reqwest` transport.
    pub fn new() -> Self {
        let cache: Box<dyn SponsorCache> = match CacheManager::new() {
            Some(manager) => Box::new(manager),
            None => {
                debug!("No cache directory available, using in-memory cache");
                Box::new(MemoryCache::new())
            }
        };
        Self::from_parts(cache, Box::new(ReqwestTransport::new()))
    }

    /// Create an empty registry around an injected cache and transport
    pub fn with_collaborators(
        cache: impl SponsorCache + 'static,
        transport: impl HttpTransport + 'static,
    ) -> Self {
        Self::from_parts(Box::new(cache), Box::new(transport))
    }

    fn from_parts(cache: Box<dyn SponsorCache>, transport: Box<dyn HttpTransport>) -> Self {
        Self {
            sponsors: Vec::new(),
            login: String::new(),
            token: String::new(),
            add_styles: true,
            config: RegistryConfig::default(),
            cache,
            transport,
        }
    }

    /// Replace the endpoint/timeout/TTL configuration
    pub fn with_config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Set the GitHub login used for the query and the cache key (not validated)
    pub fn set_login(&mut self, login: impl Into<String>) {
        self.login = login.into();
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    /// Set the API token
    ///
    /// With `encoded` set, `token` is decoded with [`token::decode`] first.
    /// That encoding only hides the token from text searches and offers no
    /// secrecy. Use a token without any scopes.
    pub fn set_token(&mut self, token: &str, encoded: bool) {
        self.token = if encoded {
            token::decode(token)
        } else {
            token.to_string()
        };
    }

    /// The effective (decoded) token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether `render_html` appends the style block (default `true`)
    pub fn add_styles(&self) -> bool {
        self.add_styles
    }

    pub fn set_add_styles(&mut self, add_styles: bool) {
        self.add_styles = add_styles;
    }

    /// Append a sponsor as-is
    pub fn add_sponsor(&mut self, sponsor: Sponsor) {
        self.sponsors.push(sponsor);
    }

    /// Number of sponsors added, duplicates included
    pub fn len(&self) -> usize {
        self.sponsors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sponsors.is_empty()
    }

    /// Sponsors in insertion order, keeping only the first of each name
    pub fn get_all(&self) -> Vec<Sponsor> {
        let mut seen = HashSet::new();
        self.sponsors
            .iter()
            .filter(|sponsor| seen.insert(sponsor.name.as_str()))
            .cloned()
            .collect()
    }

    /// Load sponsors from GitHub and append them
    ///
    /// The raw response is cached for `config.cache_ttl`. On a miss exactly one
    /// request is made and its result is cached, even when it failed (as an
    /// empty list), so an outage does not cause a request per page view.
    ///
    /// Never fails; returns the number of sponsors appended.
    pub async fn load_from_remote(&mut self) -> usize {
        let edges = self.fetch_edges().await;
        self.sponsors.extend(edges.iter().map(SponsorEdge::to_sponsor));

        info!(login = %self.login, count = edges.len(), "Loaded GitHub sponsors");
        edges.len()
    }

    /// Cached edges for the current login, fetching on a miss
    async fn fetch_edges(&self) -> Vec<SponsorEdge> {
        let key = cache_key(&self.login);

        if let Some(edges) = self.cache.get(&key) {
            debug!(login = %self.login, key = %key, count = edges.len(), "Sponsors cache hit");
            return edges;
        }

        debug!(login = %self.login, key = %key, "Sponsors cache miss");
        let client = GitHubSponsorsClient::new(self.transport.as_ref(), &self.config);
        let edges = match client.fetch_edges(&self.login, &self.token).await {
            Ok(edges) => edges,
            Err(e) => {
                warn!(login = %self.login, error = %e, "Failed to fetch GitHub sponsors");
                Vec::new()
            }
        };

        self.cache.set(&key, &edges, self.config.cache_ttl);
        edges
    }

    /// Render every added sponsor (duplicates included) as HTML
    pub fn render_html(&self) -> String {
        render_sponsors(&self.login, &self.sponsors, self.add_styles)
    }
}
