//! GitHub Sponsors GraphQL client
//!
//! Builds the fixed sponsorships query, sends it through an `HttpTransport`
//! and pulls the edge list out of the response.

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::SponsorEdge;
use crate::config::RegistryConfig;
use crate::http::{HttpTransport, PostRequest, TransportError};

/// Number of sponsorship edges requested. Later pages are not followed.
pub const PAGE_SIZE: u32 = 100;

/// Errors that can occur when fetching sponsors
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transport failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Transport(#[from] TransportError),

    /// The API answered with a non-2xx status
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// GraphQL response wrapper
#[derive(Debug, Deserialize)]
struct GraphQLResponse {
    #[serde(default)]
    data: Option<SponsorsData>,
    #[serde(default)]
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct SponsorsData {
    #[serde(default)]
    user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
struct UserNode {
    #[serde(default, rename = "sponsorshipsAsMaintainer")]
    sponsorships: Option<SponsorshipConnection>,
}

#[derive(Debug, Deserialize)]
struct SponsorshipConnection {
    // GitHub nulls individual edges it cannot resolve (partial errors)
    #[serde(default)]
    edges: Option<Vec<Option<SponsorEdge>>>,
}

/// Build the sponsorships query for `login`
///
/// The login is embedded as an escaped string literal. `$cursor` is declared
/// but never sent, so only the first page is returned.
pub fn build_query(login: &str) -> String {
    let literal = serde_json::Value::String(login.to_string()).to_string();
    format!(
        "query($cursor:String){{user(login:{literal}){{sponsorshipsAsMaintainer(first:{PAGE_SIZE} after:$cursor){{pageInfo {{startCursor endCursor hasNextPage }} edges {{ node {{ sponsor {{ avatarUrl login name url websiteUrl }}}}}}}}}}}}"
    )
}

/// Extract `data.user.sponsorshipsAsMaintainer.edges` from a response body
///
/// A missing segment anywhere along that path yields an empty list, and `null`
/// entries in the list are skipped. Only a body that is not valid JSON of the
/// expected shape is an error.
pub fn parse_edges(body: &str) -> Result<Vec<SponsorEdge>, FetchError> {
    let response: GraphQLResponse = serde_json::from_str(body)?;

    if let Some(errors) = response.errors {
        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(errors = %message, "GitHub GraphQL returned errors");
    }

    Ok(response
        .data
        .and_then(|data| data.user)
        .and_then(|user| user.sponsorships)
        .and_then(|connection| connection.edges)
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .collect())
}

/// Client for the GitHub Sponsors GraphQL API
pub struct GitHubSponsorsClient<'a> {
    transport: &'a dyn HttpTransport,
    config: &'a RegistryConfig,
}

impl<'a> GitHubSponsorsClient<'a> {
    pub fn new(transport: &'a dyn HttpTransport, config: &'a RegistryConfig) -> Self {
        Self { transport, config }
    }

    /// Build the POST request for `login`, authenticated with `token`
    pub fn request(&self, login: &str, token: &str) -> PostRequest {
        let body = serde_json::json!({ "query": build_query(login) }).to_string();

        PostRequest {
            url: self.config.endpoint.clone(),
            headers: vec![
                ("Authorization".to_string(), format!("bearer {}", token)),
                ("Content-Type".to_string(), "application/json".to_string()),
                ("User-Agent".to_string(), self.config.user_agent.clone()),
            ],
            body,
            timeout: self.config.timeout,
        }
    }

    /// Fetch the sponsorship edges for `login`
    ///
    /// # Returns
    /// * `Ok(Vec<SponsorEdge>)` - Edges from the first page (possibly empty)
    /// * `Err(FetchError)` - If the request fails, the status is not 2xx, or the body is not JSON
    pub async fn fetch_edges(
        &self,
        login: &str,
        token: &str,
    ) -> Result<Vec<SponsorEdge>, FetchError> {
        let request = self.request(login, token);
        debug!(login = %login, endpoint = %request.url, "Fetching GitHub sponsors");

        let response = self.transport.post(request).await?;
        if !response.is_success() {
            return Err(FetchError::Status(response.status));
        }

        parse_edges(&response.body)
    }
}
