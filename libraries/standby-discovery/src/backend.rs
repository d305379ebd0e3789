//! Remote search backend.

use crate::error::{DiscoveryError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use standby_core::{CandidateTrack, VideoId};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Source of candidate tracks for a free-text query or a playlist.
#[async_trait(?Send)]
pub trait SearchBackend {
    /// Candidates matching `query`, best match first.
    async fn search(&self, query: &str) -> Result<Vec<CandidateTrack>>;

    /// Tracks of the playlist `playlist_id`, in playlist order.
    async fn playlist(&self, playlist_id: &str) -> Result<Vec<CandidateTrack>>;
}

/// Wire shape of one result; the backend may send `null` for any field.
#[derive(Debug, Deserialize)]
struct RawCandidate {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    artists: Option<String>,
}

/// Search backend speaking `GET /api/search?q=` and `GET /api/playlist/<id>`.
pub struct HttpSearchBackend {
    http: Client,
    base_url: Url,
}

impl HttpSearchBackend {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(DiscoveryError::InvalidUrl(format!(
                "search backend URL must start with http:// or https://, got {base_url:?}"
            )));
        }
        let base_url =
            Url::parse(trimmed).map_err(|e| DiscoveryError::InvalidUrl(e.to_string()))?;

        Ok(Self {
            http: build_client(timeout)?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| DiscoveryError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<Vec<CandidateTrack>> {
        debug!(url = %url, "Querying search backend");

        let response = self.http.get(url).send().await.map_err(|e| {
            if is_unreachable(&e) {
                DiscoveryError::SearchBackendUnavailable(e.to_string())
            } else {
                DiscoveryError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DiscoveryError::SearchBackendUnavailable(format!(
                "backend answered {}: {message}",
                status.as_u16()
            )));
        }

        let raw: Vec<RawCandidate> = response
            .json()
            .await
            .map_err(|e| DiscoveryError::Parse(format!("Failed to parse results: {e}")))?;

        let candidates = collect_candidates(raw);
        debug!(results = candidates.len(), "Search backend answered");
        Ok(candidates)
    }
}

#[async_trait(?Send)]
impl SearchBackend for HttpSearchBackend {
    async fn search(&self, query: &str) -> Result<Vec<CandidateTrack>> {
        let mut url = self.endpoint(&["api", "search"])?;
        url.query_pairs_mut().append_pair("q", query.trim());
        self.fetch(url).await
    }

    async fn playlist(&self, playlist_id: &str) -> Result<Vec<CandidateTrack>> {
        let url = self.endpoint(&["api", "playlist", playlist_id.trim()])?;
        self.fetch(url).await
    }
}

/// Drop results without a usable video id.
fn collect_candidates(raw: Vec<RawCandidate>) -> Vec<CandidateTrack> {
    raw.into_iter()
        .filter_map(|r| {
            let id = r.id?;
            match VideoId::parse(id.as_str()) {
                Ok(id) => Some(CandidateTrack::new(
                    id,
                    r.title.unwrap_or_default(),
                    r.artists.unwrap_or_default(),
                )),
                Err(e) => {
                    warn!(id = %id, error = %e, "Skipping search result");
                    None
                }
            }
        })
        .collect()
}

/// Connection-level failure, as opposed to a malformed request
pub(crate) fn is_unreachable(e: &reqwest::Error) -> bool {
    #[cfg(not(target_arch = "wasm32"))]
    {
        e.is_connect() || e.is_timeout()
    }
    #[cfg(target_arch = "wasm32")]
    {
        e.is_request()
    }
}

/// HTTP client shared by the discovery lookups.
pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    let builder = Client::builder();

    // The browser fetch API has no client-side timeout
    #[cfg(not(target_arch = "wasm32"))]
    let builder = builder
        .timeout(timeout)
        .user_agent(format!("Standby/{}", env!("CARGO_PKG_VERSION")));
    #[cfg(target_arch = "wasm32")]
    let _ = timeout;

    builder.build().map_err(DiscoveryError::Request)
}
