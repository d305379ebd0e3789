//! Search with graceful degradation.

use crate::backend::{HttpSearchBackend, SearchBackend};
use crate::catalog::StaticCatalog;
use crate::error::{DiscoveryError, Result};
use standby_core::{CandidateTrack, SearchFallback, SearchSettings};
use std::time::Duration;
use tracing::{debug, warn};

/// Search front door used by the widget.
///
/// With a backend configured, backend failures surface as
/// `SearchBackendUnavailable`. Without one, queries fall back to the bundled
/// catalog or to no results, per `SearchFallback`.
pub struct SearchService {
    backend: Option<Box<dyn SearchBackend>>,
    fallback: SearchFallback,
    catalog: StaticCatalog,
    result_limit: usize,
}

impl SearchService {
    pub fn new(
        backend: Option<Box<dyn SearchBackend>>,
        fallback: SearchFallback,
        result_limit: usize,
    ) -> Self {
        Self {
            backend,
            fallback,
            catalog: StaticCatalog::bundled(),
            result_limit,
        }
    }

    /// Build from configuration, creating an HTTP backend when a URL is set.
    pub fn from_settings(settings: &SearchSettings, timeout: Duration) -> Result<Self> {
        let backend = match &settings.backend_url {
            Some(url) => {
                Some(Box::new(HttpSearchBackend::new(url, timeout)?) as Box<dyn SearchBackend>)
            }
            None => None,
        };
        Ok(Self::new(backend, settings.fallback, settings.result_limit))
    }

    /// Replace the fallback catalog.
    pub fn with_catalog(mut self, catalog: StaticCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Candidates for `query`; a blank query yields nothing.
    pub async fn search(&self, query: &str) -> Result<Vec<CandidateTrack>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        match &self.backend {
            Some(backend) => {
                let mut results = backend.search(query).await.map_err(unavailable)?;
                results.truncate(self.result_limit);
                Ok(results)
            }
            None => Ok(self.fallback_search(query)),
        }
    }

    /// Tracks of a playlist; needs a backend.
    pub async fn playlist(&self, playlist_id: &str) -> Result<Vec<CandidateTrack>> {
        let Some(backend) = &self.backend else {
            return Err(DiscoveryError::SearchBackendUnavailable(
                "no search backend configured".to_string(),
            ));
        };
        backend.playlist(playlist_id).await.map_err(unavailable)
    }

    fn fallback_search(&self, query: &str) -> Vec<CandidateTrack> {
        match self.fallback {
            SearchFallback::None => {
                debug!("No search backend; returning no results");
                Vec::new()
            }
            SearchFallback::StaticCatalog => self.catalog.search(query, self.result_limit),
        }
    }
}

/// Every backend failure reads as "search unavailable" to the user.
fn unavailable(err: DiscoveryError) -> DiscoveryError {
    match err {
        DiscoveryError::SearchBackendUnavailable(_) => err,
        other => {
            warn!(error = %other, "Search backend failed");
            DiscoveryError::SearchBackendUnavailable(other.to_string())
        }
    }
}
