//! Core data models for the sponsors showcase
//!
//! `Sponsor` is the record the registry accumulates and renders. The
//! `SponsorEdge` family mirrors the raw GraphQL payload and is what gets cached.

pub mod github;

pub use github::{build_query, parse_edges, FetchError, GitHubSponsorsClient};

use serde::{Deserialize, Serialize};

/// CSS class attached to sponsors loaded from GitHub (rounded avatars)
pub const ROUND_CLASS: &str = "round";

/// A sponsor shown in the showcase
///
/// Records are never mutated after being added to a registry. Deduplication
/// compares `name` only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sponsor {
    /// Display name, also used as the image alt text
    pub name: String,
    /// Link target for the sponsor's logo
    pub url: String,
    /// Logo or avatar URL
    pub image_url: String,
    /// Space-separated classes for the anchor element
    pub css_classes: String,
}

impl Sponsor {
    /// Create a sponsor with no extra CSS classes
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            image_url: image_url.into(),
            css_classes: String::new(),
        }
    }

    /// Set the anchor's CSS classes
    pub fn with_classes(mut self, css_classes: impl Into<String>) -> Self {
        self.css_classes = css_classes.into();
        self
    }
}

/// One entry of `sponsorshipsAsMaintainer.edges`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SponsorEdge {
    #[serde(default)]
    pub node: Option<SponsorNode>,
}

/// Sponsorship node wrapping the sponsoring account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SponsorNode {
    #[serde(default)]
    pub sponsor: Option<SponsorAccount>,
}

/// The sponsoring user or organization
///
/// GitHub returns `null` for fields such as `name` and `websiteUrl` when the
/// account has not set them, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorAccount {
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
}

impl SponsorEdge {
    /// Build an edge around an account (used by tests and cache fixtures)
    pub fn from_account(account: SponsorAccount) -> Self {
        Self {
            node: Some(SponsorNode {
                sponsor: Some(account),
            }),
        }
    }

    /// The sponsoring account, if the edge carries one
    pub fn account(&self) -> Option<&SponsorAccount> {
        self.node.as_ref()?.sponsor.as_ref()
    }

    /// Map the edge to a showcase record
    ///
    /// The link prefers a non-empty `websiteUrl` and falls back to the
    /// profile `url`. Missing values become empty strings.
    pub fn to_sponsor(&self) -> Sponsor {
        let Some(account) = self.account() else {
            return Sponsor::default().with_classes(ROUND_CLASS);
        };

        let url = match account.website_url.as_deref() {
            Some(website) if !website.is_empty() => website.to_string(),
            _ => account.url.clone().unwrap_or_default(),
        };

        Sponsor {
            name: account.name.clone().unwrap_or_default(),
            url,
            image_url: account.avatar_url.clone().unwrap_or_default(),
            css_classes: ROUND_CLASS.to_string(),
        }
    }
}
