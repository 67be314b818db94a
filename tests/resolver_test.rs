//! Integration tests for the cached poster resolver.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use marquee::cache::DiskCache;
use marquee::config::RadarrConfig;
use marquee::posters::{PosterResolver, ResolveError};
use marquee::radarr::RadarrClient;

const DAY: Duration = Duration::from_secs(24 * 3600);

fn resolver(server: &MockServer, cache_dir: &std::path::Path, ttl: Duration) -> PosterResolver {
    let cache = Arc::new(DiskCache::new(cache_dir));
    let radarr = Arc::new(RadarrClient::new(&RadarrConfig {
        url: server.uri(),
        api_key: "test-key".to_string(),
    }));
    PosterResolver::new(cache, radarr, ttl)
}

fn catalog_body() -> serde_json::Value {
    json!([
        {
            "id": 1,
            "title": "Encanto",
            "hasFile": true,
            "images": [{ "coverType": "poster", "remoteUrl": "http://x/encanto.jpg" }]
        },
        {
            "id": 2,
            "title": "Posterless",
            "hasFile": true,
            "images": [{ "coverType": "fanart", "remoteUrl": "http://x/fanart.jpg" }]
        }
    ])
}

#[tokio::test]
async fn second_resolve_is_served_from_cache() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v3/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = resolver(&server, dir.path(), DAY);

    assert_eq!(resolver.resolve("Encanto").await.unwrap(), "http://x/encanto.jpg");
    // Must not hit the catalog again; the mock allows exactly one call.
    assert_eq!(resolver.resolve("Encanto").await.unwrap(), "http://x/encanto.jpg");

    // The entry is stored under the title-derived key.
    let cache = DiskCache::new(dir.path());
    let cached: Option<String> = cache.load("poster_radarr_Encanto", DAY).unwrap();
    assert_eq!(cached.as_deref(), Some("http://x/encanto.jpg"));
}

#[tokio::test]
async fn title_match_is_case_insensitive() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v3/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
        .mount(&server)
        .await;

    let resolver = resolver(&server, dir.path(), DAY);
    assert_eq!(resolver.resolve("eNcAnTo").await.unwrap(), "http://x/encanto.jpg");
}

#[tokio::test]
async fn unmatched_title_is_not_found() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v3/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
        .mount(&server)
        .await;

    let resolver = resolver(&server, dir.path(), DAY);
    let err = resolver.resolve("Unknown Movie").await.unwrap_err();
    assert!(matches!(err, ResolveError::NotFound(title) if title == "Unknown Movie"));
}

#[tokio::test]
async fn match_without_poster_is_not_cached() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v3/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
        .expect(2)
        .mount(&server)
        .await;

    let resolver = resolver(&server, dir.path(), DAY);

    // The title matches a catalog entry but that entry has no poster image,
    // so the failure must not be cached and the next call goes live again.
    for _ in 0..2 {
        let err = resolver.resolve("Posterless").await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound(_)));
    }

    let cache = DiskCache::new(dir.path());
    let cached: Option<String> = cache.load("poster_radarr_Posterless", DAY).unwrap();
    assert!(cached.is_none());
}

#[tokio::test]
async fn expired_entry_triggers_a_live_lookup() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v3/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
        .expect(2)
        .mount(&server)
        .await;

    // Zero TTL: every stored entry is already expired on the next read.
    let resolver = resolver(&server, dir.path(), Duration::ZERO);

    assert_eq!(resolver.resolve("Encanto").await.unwrap(), "http://x/encanto.jpg");
    assert_eq!(resolver.resolve("Encanto").await.unwrap(), "http://x/encanto.jpg");
}

#[tokio::test]
async fn radarr_failure_propagates() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v3/movie"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let resolver = resolver(&server, dir.path(), DAY);
    let err = resolver.resolve("Encanto").await.unwrap_err();
    assert!(matches!(err, ResolveError::Radarr(_)));
}
