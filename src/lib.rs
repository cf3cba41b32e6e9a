//! GitHub Sponsors showcase
//!
//! Fetches a maintainer's sponsors from the GitHub GraphQL API, caches the raw
//! response for a day, and renders the result as an embeddable HTML block.
//!
//! The entry point is [`SponsorRegistry`]. The cache and HTTP client are
//! injected through the [`SponsorCache`] and [`HttpTransport`] traits, so a host
//! can plug in its own stores or test fakes.

pub mod cache;
pub mod config;
pub mod data;
pub mod escape;
pub mod http;
pub mod registry;
pub mod render;
pub mod token;

pub use cache::{CacheManager, MemoryCache, SponsorCache};
pub use config::RegistryConfig;
pub use data::{Sponsor, SponsorAccount, SponsorEdge};
pub use http::{HttpResponse, HttpTransport, PostRequest, ReqwestTransport, TransportError};
pub use registry::SponsorRegistry;
