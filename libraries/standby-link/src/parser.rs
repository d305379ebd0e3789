//! Link to queue-seed parsing

use crate::error::{ParseFailure, Result};
use crate::offset::parse_offset;
use standby_core::{QueueItem, VideoId};
use url::Url;

/// Result of a successful parse: what to queue and where to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSeed {
    pub id: VideoId,
    /// Seed offset in whole seconds
    pub start_offset: u32,
}

impl LinkSeed {
    /// Turn the seed into an untitled queue entry
    pub fn into_item(self) -> QueueItem {
        QueueItem::new(self.id, self.start_offset)
    }
}

impl From<LinkSeed> for QueueItem {
    fn from(seed: LinkSeed) -> Self {
        seed.into_item()
    }
}

/// Hosts a link can come from
enum LinkHost {
    /// `youtu.be`
    Short,
    /// `youtube.com` and its subdomains
    Canonical,
}

impl LinkHost {
    fn classify(host: &str) -> Option<Self> {
        let host = host.to_ascii_lowercase();
        if matches_domain(&host, "youtu.be") {
            Some(Self::Short)
        } else if matches_domain(&host, "youtube.com") {
            Some(Self::Canonical)
        } else {
            None
        }
    }
}

/// `host` is `domain` itself or one of its subdomains
fn matches_domain(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Path prefixes on the canonical host that carry the id as the next segment
const ID_PATH_PREFIXES: [&str; 3] = ["shorts", "embed", "live"];

/// Parse pasted text into a queue seed
///
/// See the crate docs for the accepted forms.
pub fn parse(raw: &str) -> Result<LinkSeed> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParseFailure::Empty);
    }

    let url = Url::parse(raw).map_err(|_| ParseFailure::NotAUrl)?;

    let host = url
        .host_str()
        .and_then(LinkHost::classify)
        .ok_or(ParseFailure::UnsupportedHost)?;

    let raw_id = match host {
        LinkHost::Short => first_segment(&url),
        LinkHost::Canonical => query_value(&url, "v").or_else(|| path_id(&url)),
    };

    let id = raw_id
        .and_then(|id| VideoId::parse(id).ok())
        .ok_or(ParseFailure::MissingId)?;

    let start_offset = query_value(&url, "t")
        .or_else(|| query_value(&url, "start"))
        .map_or(0, |value| parse_offset(&value));

    Ok(LinkSeed { id, start_offset })
}

/// First non-empty value of a query parameter
fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

fn first_segment(url: &Url) -> Option<String> {
    url.path_segments()?
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Id following `/shorts/`, `/embed/` or `/live/`
fn path_id(url: &Url) -> Option<String> {
    let mut segments = url.path_segments()?;
    let prefix = segments.next()?;
    if !ID_PATH_PREFIXES.contains(&prefix) {
        return None;
    }
    segments
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
