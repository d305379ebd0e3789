//! Title lookup through the public oEmbed endpoint (no API key).

use crate::backend::build_client;
use crate::error::{DiscoveryError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use standby_core::{MetadataLookup, MetadataSettings, VideoId};
use std::time::Duration;
use tracing::debug;
use url::Url;

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    #[serde(default)]
    title: Option<String>,
}

/// oEmbed title resolver.
pub struct OEmbedLookup {
    http: Client,
    endpoint: Url,
}

impl OEmbedLookup {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| DiscoveryError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            http: build_client(timeout)?,
            endpoint,
        })
    }

    pub fn from_settings(settings: &MetadataSettings) -> Result<Self> {
        Self::new(
            &settings.oembed_endpoint,
            Duration::from_secs(settings.timeout_secs),
        )
    }

    fn request_url(&self, id: &VideoId) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("url", &format!("https://www.youtube.com/watch?v={id}"))
            .append_pair("format", "json");
        url
    }

    /// Resolve the display title of `id`.
    pub async fn fetch_title(&self, id: &VideoId) -> Result<String> {
        let url = self.request_url(id);
        debug!(%id, "Looking up title");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::MetadataLookupFailed(format!(
                "oEmbed answered {} for {id}",
                status.as_u16()
            )));
        }

        let body: OEmbedResponse = response
            .json()
            .await
            .map_err(|e| DiscoveryError::Parse(format!("Failed to parse oEmbed response: {e}")))?;

        body.title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DiscoveryError::MetadataLookupFailed(format!("no title for {id}")))
    }
}

#[async_trait(?Send)]
impl MetadataLookup for OEmbedLookup {
    async fn lookup_title(&self, id: &VideoId) -> standby_core::Result<String> {
        Ok(self.fetch_title(id).await?)
    }
}

/// Look a title up, logging and swallowing any failure.
pub async fn lookup_title_or_none(lookup: &dyn MetadataLookup, id: &VideoId) -> Option<String> {
    match lookup.lookup_title(id).await {
        Ok(title) => Some(title),
        Err(e) => {
            debug!(%id, error = %e, "Title lookup failed; keeping id as title");
            None
        }
    }
}

/// Resolve a batch of titles one request at a time.
///
/// `still_wanted` is asked before each request so entries removed in the
/// meantime are skipped; `apply` receives every title that was found.
pub async fn lookup_titles_in_turn<K: Copy>(
    lookup: &dyn MetadataLookup,
    pending: Vec<(K, VideoId)>,
    mut still_wanted: impl FnMut(K) -> bool,
    mut apply: impl FnMut(K, &VideoId, String),
) {
    for (key, id) in pending {
        if !still_wanted(key) {
            continue;
        }
        if let Some(title) = lookup_title_or_none(lookup, &id).await {
            apply(key, &id, title);
        }
    }
}
