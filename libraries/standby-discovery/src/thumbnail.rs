//! Artwork for the current track.

use crate::backend::build_client;
use crate::error::{DiscoveryError, Result};
use async_trait::async_trait;
use reqwest::Client;
use standby_core::VideoId;
use std::time::Duration;
use tracing::debug;

const THUMBNAIL_HOST: &str = "https://i.ytimg.com/vi";

/// Candidate thumbnail URLs, best first.
pub fn thumbnail_candidates(id: &VideoId) -> [String; 2] {
    [
        format!("{THUMBNAIL_HOST}/{id}/maxresdefault.jpg"),
        format!("{THUMBNAIL_HOST}/{id}/hqdefault.jpg"),
    ]
}

/// Checks whether an image URL resolves.
#[async_trait(?Send)]
pub trait ThumbnailProbe {
    async fn exists(&self, url: &str) -> bool;
}

/// Probe issuing `HEAD` requests.
pub struct HttpThumbnailProbe {
    http: Client,
}

impl HttpThumbnailProbe {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: build_client(timeout)?,
        })
    }
}

#[async_trait(?Send)]
impl ThumbnailProbe for HttpThumbnailProbe {
    async fn exists(&self, url: &str) -> bool {
        match self.http.head(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(url, error = %e, "Thumbnail probe failed");
                false
            }
        }
    }
}

/// First candidate the probe accepts.
pub async fn resolve_thumbnail(probe: &dyn ThumbnailProbe, id: &VideoId) -> Result<String> {
    for url in thumbnail_candidates(id) {
        if probe.exists(&url).await {
            return Ok(url);
        }
    }
    Err(DiscoveryError::ThumbnailUnavailable(id.to_string()))
}
