//! HTTP client tests for search, title and thumbnail lookups.
//!
//! These tests use mock servers to verify client behavior without
//! requiring network access.

use standby_core::{MetadataLookup, SearchFallback, SearchSettings, VideoId};
use standby_discovery::{
    lookup_title_or_none, lookup_titles_in_turn, resolve_thumbnail, DiscoveryError, HttpSearchBackend,
    OEmbedLookup, SearchBackend, SearchService, ThumbnailProbe,
};
use std::cell::RefCell;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

fn id(s: &str) -> VideoId {
    VideoId::parse(s).unwrap()
}

// =============================================================================
// Search Backend Tests
// =============================================================================

mod search_backend {
    use super::*;

    #[tokio::test]
    async fn test_search_decodes_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .and(query_param("q", "bohemian rhapsody"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "fJ9rUzIMcZQ", "title": "Bohemian Rhapsody", "artists": "Queen"},
                {"id": null, "title": "Podcast episode", "artists": ""},
                {"id": "kJQP7kiw5Fk", "title": null, "artists": "Luis Fonsi, Daddy Yankee"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let backend = HttpSearchBackend::new(&server.uri(), TIMEOUT).unwrap();
        let results = backend.search("  bohemian rhapsody ").await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id.as_str(), "fJ9rUzIMcZQ");
        assert_eq!(results[0].artists, "Queen");
        assert_eq!(results[1].title, "");
        assert_eq!(results[1].artists, "Luis Fonsi, Daddy Yankee");
    }

    #[tokio::test]
    async fn test_playlist_keeps_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/playlist/PLabc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "kJQP7kiw5Fk", "title": "Despacito", "artists": "Luis Fonsi"},
                {"id": "ApXoWvfEYVU", "title": "Sunflower", "artists": "Post Malone"}
            ])))
            .mount(&server)
            .await;

        let backend = HttpSearchBackend::new(&server.uri(), TIMEOUT).unwrap();
        let tracks = backend.playlist("PLabc").await.unwrap();

        let ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["kJQP7kiw5Fk", "ApXoWvfEYVU"]);
    }

    #[tokio::test]
    async fn test_server_error_is_backend_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .respond_with(ResponseTemplate::new(503).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let backend = HttpSearchBackend::new(&server.uri(), TIMEOUT).unwrap();
        match backend.search("queen").await {
            Err(DiscoveryError::SearchBackendUnavailable(msg)) => {
                assert!(msg.contains("503"));
                assert!(msg.contains("quota exceeded"));
            }
            other => panic!("Expected SearchBackendUnavailable, got {other:?}"),
        }
    }
}

// =============================================================================
// Search Service Tests
// =============================================================================

mod search_service {
    use super::*;

    fn settings(backend_url: Option<String>, fallback: SearchFallback) -> SearchSettings {
        SearchSettings {
            backend_url,
            fallback,
            result_limit: 10,
        }
    }

    #[tokio::test]
    async fn test_without_backend_uses_catalog() {
        let service =
            SearchService::from_settings(&settings(None, SearchFallback::StaticCatalog), TIMEOUT)
                .unwrap();

        assert!(!service.has_backend());
        let results = service.search("despacito").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id.as_str(), "kJQP7kiw5Fk");
    }

    #[tokio::test]
    async fn test_without_backend_or_catalog_is_empty() {
        let service =
            SearchService::from_settings(&settings(None, SearchFallback::None), TIMEOUT).unwrap();

        assert!(service.search("despacito").await.unwrap().is_empty());
        assert!(matches!(
            service.playlist("PLabc").await,
            Err(DiscoveryError::SearchBackendUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_backend_results_are_limited() {
        let server = MockServer::start().await;
        let many: Vec<_> = (0..15)
            .map(|i| serde_json::json!({"id": format!("vid{i:02}"), "title": "t", "artists": "a"}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(many))
            .mount(&server)
            .await;

        let service = SearchService::from_settings(
            &settings(Some(server.uri()), SearchFallback::StaticCatalog),
            TIMEOUT,
        )
        .unwrap();

        assert_eq!(service.search("anything").await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_malformed_body_is_backend_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let service = SearchService::from_settings(
            &settings(Some(server.uri()), SearchFallback::StaticCatalog),
            TIMEOUT,
        )
        .unwrap();

        assert!(matches!(
            service.search("queen").await,
            Err(DiscoveryError::SearchBackendUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_blank_query_skips_backend() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let service = SearchService::from_settings(
            &settings(Some(server.uri()), SearchFallback::None),
            TIMEOUT,
        )
        .unwrap();

        assert!(service.search("   ").await.unwrap().is_empty());
    }
}

// =============================================================================
// oEmbed Tests
// =============================================================================

mod oembed {
    use super::*;

    #[tokio::test]
    async fn test_title_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oembed"))
            .and(query_param("url", "https://www.youtube.com/watch?v=kJQP7kiw5Fk"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "title": "Luis Fonsi - Despacito ft. Daddy Yankee",
                "author_name": "LuisFonsiVEVO",
                "type": "video"
            })))
            .mount(&server)
            .await;

        let lookup = OEmbedLookup::new(&format!("{}/oembed", server.uri()), TIMEOUT).unwrap();
        let title = lookup.lookup_title(&id("kJQP7kiw5Fk")).await.unwrap();
        assert_eq!(title, "Luis Fonsi - Despacito ft. Daddy Yankee");
    }

    #[tokio::test]
    async fn test_failed_lookup_is_swallowed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oembed"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let lookup = OEmbedLookup::new(&format!("{}/oembed", server.uri()), TIMEOUT).unwrap();

        assert!(matches!(
            lookup.fetch_title(&id("private1")).await,
            Err(DiscoveryError::MetadataLookupFailed(_))
        ));
        assert_eq!(lookup_title_or_none(&lookup, &id("private1")).await, None);
    }

    #[tokio::test]
    async fn test_blank_title_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oembed"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"title": "  "})),
            )
            .mount(&server)
            .await;

        let lookup = OEmbedLookup::new(&format!("{}/oembed", server.uri()), TIMEOUT).unwrap();
        assert!(lookup.fetch_title(&id("abc123")).await.is_err());
    }
}

// =============================================================================
// Thumbnail Tests
// =============================================================================

mod thumbnails {
    use super::*;
    use async_trait::async_trait;

    /// Probe accepting a fixed set of URLs and recording what it was asked
    struct FixedProbe {
        accepted: Vec<String>,
        asked: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl ThumbnailProbe for FixedProbe {
        async fn exists(&self, url: &str) -> bool {
            self.asked.borrow_mut().push(url.to_string());
            self.accepted.iter().any(|u| u == url)
        }
    }

    #[tokio::test]
    async fn test_falls_back_to_hq() {
        let probe = FixedProbe {
            accepted: vec!["https://i.ytimg.com/vi/abc123/hqdefault.jpg".to_string()],
            asked: RefCell::new(Vec::new()),
        };

        let url = resolve_thumbnail(&probe, &id("abc123")).await.unwrap();
        assert_eq!(url, "https://i.ytimg.com/vi/abc123/hqdefault.jpg");
        assert_eq!(probe.asked.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_prefers_max_resolution() {
        let probe = FixedProbe {
            accepted: vec![
                "https://i.ytimg.com/vi/abc123/maxresdefault.jpg".to_string(),
                "https://i.ytimg.com/vi/abc123/hqdefault.jpg".to_string(),
            ],
            asked: RefCell::new(Vec::new()),
        };

        let url = resolve_thumbnail(&probe, &id("abc123")).await.unwrap();
        assert!(url.ends_with("maxresdefault.jpg"));
        assert_eq!(probe.asked.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_nothing_available() {
        let probe = FixedProbe {
            accepted: Vec::new(),
            asked: RefCell::new(Vec::new()),
        };

        assert!(matches!(
            resolve_thumbnail(&probe, &id("abc123")).await,
            Err(DiscoveryError::ThumbnailUnavailable(_))
        ));
    }
}

// =============================================================================
// Batched Title Lookups
// =============================================================================

mod batched_titles {
    use super::*;
    use async_trait::async_trait;
    use standby_core::StandbyError;
    use std::cell::Cell;

    /// Lookup that tracks how many requests overlap and which ids were asked
    #[derive(Default)]
    struct CountingLookup {
        in_flight: Cell<usize>,
        peak: Cell<usize>,
        asked: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl MetadataLookup for CountingLookup {
        async fn lookup_title(&self, id: &VideoId) -> standby_core::Result<String> {
            self.in_flight.set(self.in_flight.get() + 1);
            self.peak.set(self.peak.get().max(self.in_flight.get()));
            self.asked.borrow_mut().push(id.to_string());
            tokio::task::yield_now().await;
            self.in_flight.set(self.in_flight.get() - 1);

            if id.as_str() == "missing" {
                Err(StandbyError::Metadata("not found".to_string()))
            } else {
                Ok(format!("Title {id}"))
            }
        }
    }

    #[tokio::test]
    async fn test_requests_run_one_at_a_time() {
        let lookup = CountingLookup::default();
        let pending: Vec<(usize, VideoId)> =
            (0..20).map(|n| (n, id(&format!("vid{n}")))).collect();
        let mut applied = Vec::new();

        lookup_titles_in_turn(&lookup, pending, |_| true, |key, _, title| {
            applied.push((key, title));
        })
        .await;

        assert_eq!(lookup.peak.get(), 1);
        assert_eq!(applied.len(), 20);
        assert_eq!(applied[3], (3, "Title vid3".to_string()));
    }

    #[tokio::test]
    async fn test_skips_unwanted_and_failed_entries() {
        let lookup = CountingLookup::default();
        let pending = vec![(1, id("aaa")), (2, id("bbb")), (3, id("missing"))];
        let mut applied = Vec::new();

        lookup_titles_in_turn(&lookup, pending, |key| key != 2, |key, id, title| {
            applied.push((key, id.to_string(), title));
        })
        .await;

        assert_eq!(*lookup.asked.borrow(), ["aaa", "missing"]);
        assert_eq!(applied, [(1, "aaa".to_string(), "Title aaa".to_string())]);
    }
}
