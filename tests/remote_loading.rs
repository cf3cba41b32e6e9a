//! Integration tests for loading sponsors through the cache and transport
//!
//! Uses an in-process fake transport that counts requests, so cache behaviour
//! can be observed without network access.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ghsponsors::cache::cache_key;
use ghsponsors::{
    CacheManager, HttpResponse, HttpTransport, MemoryCache, PostRequest, RegistryConfig, Sponsor,
    SponsorCache, SponsorRegistry, TransportError,
};
use tempfile::TempDir;

/// Fake transport answering every request with the same canned result
#[derive(Clone)]
struct FakeTransport {
    response: Result<HttpResponse, String>,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<PostRequest>>>,
}

impl FakeTransport {
    fn ok(body: &str) -> Self {
        Self::with_status(200, body)
    }

    fn with_status(status: u16, body: &str) -> Self {
        Self {
            response: Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    fn failing() -> Self {
        Self {
            response: Err("connection refused".to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn post(&self, request: PostRequest) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        self.response.clone().map_err(TransportError::Other)
    }
}

fn sponsors_body(sponsors: &[(&str, &str, &str)]) -> String {
    let edges: Vec<_> = sponsors
        .iter()
        .map(|(name, url, website)| {
            serde_json::json!({
                "node": {
                    "sponsor": {
                        "avatarUrl": format!("https://avatars.example/{}", name),
                        "login": name.to_lowercase(),
                        "name": name,
                        "url": url,
                        "websiteUrl": website,
                    }
                }
            })
        })
        .collect();

    serde_json::json!({
        "data": { "user": { "sponsorshipsAsMaintainer": {
            "pageInfo": { "startCursor": null, "endCursor": null, "hasNextPage": false },
            "edges": edges,
        }}}
    })
    .to_string()
}

fn registry(cache: impl SponsorCache + 'static, transport: &FakeTransport) -> SponsorRegistry {
    let mut registry = SponsorRegistry::with_collaborators(cache, transport.clone());
    registry.set_login("octo");
    registry.set_token("6568", true);
    registry
}

#[tokio::test]
async fn test_load_maps_edges_into_sponsors() {
    let transport = FakeTransport::ok(&sponsors_body(&[
        ("Acme", "https://github.com/acme", "https://acme.example"),
        ("X", "https://x.example", ""),
    ]));
    let mut registry = registry(MemoryCache::new(), &transport);

    assert_eq!(registry.load_from_remote().await, 2);

    let sponsors = registry.get_all();
    assert_eq!(
        sponsors[0],
        Sponsor::new("Acme", "https://acme.example", "https://avatars.example/Acme")
            .with_classes("round")
    );
    assert_eq!(sponsors[1].url, "https://x.example");
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_request_carries_token_login_and_timeout() {
    let transport = FakeTransport::ok(&sponsors_body(&[]));
    let mut registry = registry(MemoryCache::new(), &transport);

    registry.load_from_remote().await;

    let request = transport.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(request.url, "https://api.github.com/graphql");
    assert_eq!(request.header("Authorization"), Some("bearer 4144"));
    assert_eq!(request.header("Content-Type"), Some("application/json"));
    assert_eq!(request.timeout, Duration::from_secs(20));
    assert!(request.body.contains(r#"user(login:\"octo\")"#));
}

#[tokio::test]
async fn test_missing_sponsorships_key_is_cached_as_empty() {
    let transport = FakeTransport::ok(r#"{"data":{"user":{}}}"#);
    let cache = MemoryCache::new();
    let mut registry = registry(cache.clone(), &transport);

    assert_eq!(registry.load_from_remote().await, 0);
    assert_eq!(cache.get(&cache_key("octo")), Some(Vec::new()));

    // Second load within the TTL is served from the cache
    assert_eq!(registry.load_from_remote().await, 0);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_transport_failure_suppresses_retries_until_expiry() {
    let transport = FakeTransport::failing();
    let cache = MemoryCache::new();

    let mut first = registry(cache.clone(), &transport);
    assert_eq!(first.load_from_remote().await, 0);

    let mut second = registry(cache.clone(), &transport);
    assert_eq!(second.load_from_remote().await, 0);

    assert_eq!(transport.calls(), 1);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_non_success_status_yields_empty_list() {
    let transport = FakeTransport::with_status(
        401,
        &sponsors_body(&[("Acme", "https://github.com/acme", "")]),
    );
    let mut registry = registry(MemoryCache::new(), &transport);

    assert_eq!(registry.load_from_remote().await, 0);
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_malformed_json_yields_empty_list() {
    let transport = FakeTransport::ok("<html>502 Bad Gateway</html>");
    let mut registry = registry(MemoryCache::new(), &transport);

    assert_eq!(registry.load_from_remote().await, 0);
}

#[tokio::test]
async fn test_expired_entry_triggers_new_fetch() {
    let transport = FakeTransport::ok(&sponsors_body(&[("Acme", "https://github.com/acme", "")]));
    let config = RegistryConfig::default().with_cache_ttl(Duration::from_millis(1));
    let cache = MemoryCache::new();

    let mut registry = registry(cache.clone(), &transport).with_config(config);
    registry.load_from_remote().await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    registry.load_from_remote().await;

    assert_eq!(transport.calls(), 2);
    // Raw list holds both loads; dedup view collapses them
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get_all().len(), 1);
}

#[tokio::test]
async fn test_cache_is_keyed_per_login() {
    let transport = FakeTransport::ok(&sponsors_body(&[("Acme", "https://github.com/acme", "")]));
    let cache = MemoryCache::new();

    let mut octo = registry(cache.clone(), &transport);
    octo.load_from_remote().await;

    let mut other = registry(cache.clone(), &transport);
    other.set_login("someone-else");
    other.load_from_remote().await;

    assert_eq!(transport.calls(), 2);
    assert_eq!(cache.len(), 2);
}

#[tokio::test]
async fn test_file_cache_persists_between_registries() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let transport = FakeTransport::ok(&sponsors_body(&[("Acme", "https://github.com/acme", "")]));

    let mut first = registry(CacheManager::with_dir(temp_dir.path().to_path_buf()), &transport);
    assert_eq!(first.load_from_remote().await, 1);

    let cache_file = temp_dir.path().join(format!("{}.json", cache_key("octo")));
    assert!(cache_file.exists(), "Cache file should be written");

    let mut second = registry(CacheManager::with_dir(temp_dir.path().to_path_buf()), &transport);
    assert_eq!(second.load_from_remote().await, 1);
    assert_eq!(second.get_all()[0].name, "Acme");

    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_loaded_and_manual_sponsors_render_together() {
    let transport = FakeTransport::ok(&sponsors_body(&[
        ("Acme", "https://github.com/acme", ""),
        ("\"><script>", "https://evil.example", ""),
    ]));
    let mut registry = registry(MemoryCache::new(), &transport);
    registry.add_sponsor(
        Sponsor::new("Acme", "https://acme.example", "https://acme.example/logo.png")
            .with_classes("logo"),
    );
    registry.load_from_remote().await;

    let html = registry.render_html();
    assert!(html.contains("<div id=\"octo-sponsors\">"));
    assert!(html.contains("class=\"logo\""));
    assert!(html.contains("href=\"https://github.com/acme\""));
    assert!(html.contains("alt=\"&quot;&gt;&lt;script&gt;\""));
    assert!(!html.contains("<script>"));
    assert_eq!(html.matches("<a ").count(), 3);

    // Dedup view keeps the manually added Acme only
    let all = registry.get_all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].url, "https://acme.example");
}

#[tokio::test]
async fn test_partial_response_with_null_edge_keeps_valid_sponsors() {
    let transport = FakeTransport::ok(
        r#"{"data":{"user":{"sponsorshipsAsMaintainer":{"edges":[null,{"node":{"sponsor":{"name":"Acme","url":"https://github.com/acme","avatarUrl":"https://avatars.example/acme"}}}]}}},"errors":[{"message":"Resource not accessible"}]}"#,
    );
    let cache = MemoryCache::new();
    let mut registry = registry(cache.clone(), &transport);

    assert_eq!(registry.load_from_remote().await, 1);
    assert_eq!(registry.get_all()[0].name, "Acme");
    assert_eq!(cache.get(&cache_key("octo")).map(|edges| edges.len()), Some(1));
}

#[tokio::test]
async fn test_international_website_renders_with_punycode_host() {
    let transport = FakeTransport::ok(&sponsors_body(&[(
        "Café",
        "https://github.com/cafe",
        "https://café.example/menü",
    )]));
    let mut registry = registry(MemoryCache::new(), &transport);
    registry.load_from_remote().await;

    let html = registry.render_html();
    assert!(html.contains("href=\"https://xn--caf-dma.example/men%C3%BC\""));
    assert!(!html.contains("https://caf.example"));
}
