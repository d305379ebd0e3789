//! Standby - Link Parsing
//!
//! Turns text pasted by the user into a queue seed: a video identifier and a
//! start offset in seconds.
//!
//! Accepted inputs:
//! - short links: `https://youtu.be/<id>?t=90`
//! - watch pages: `https://www.youtube.com/watch?v=<id>&t=1h2m3s`
//! - path forms: `https://www.youtube.com/shorts/<id>` (also `/embed/`, `/live/`)
//!
//! Parsing is pure and deterministic; nothing here touches the network.
//!
//! # Example
//!
//! ```rust
//! use standby_link::{parse, ParseFailure};
//!
//! let seed = parse("https://youtu.be/abc123?t=90").unwrap();
//! assert_eq!(seed.id.as_str(), "abc123");
//! assert_eq!(seed.start_offset, 90);
//!
//! assert_eq!(parse("not a url"), Err(ParseFailure::NotAUrl));
//! ```

mod error;
mod offset;
mod parser;

pub use error::{ParseFailure, Result};
pub use offset::parse_offset;
pub use parser::{parse, LinkSeed};
