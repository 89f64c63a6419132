//! Last-location memoization
//!
//! Reactive consumers compare snapshots by identity, so a raw location that
//! has not changed must yield the same `Rc` again rather than an equal copy.

use crate::location::ParsedUrl;
use crate::Result;
use std::rc::Rc;
use tracing::trace;

/// Single-entry cache keyed by the raw location string
#[derive(Debug, Default)]
pub struct UrlCache {
    last: Option<(String, Rc<ParsedUrl>)>,
}

impl UrlCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot for `raw`, parsed at most once per distinct string.
    ///
    /// A parse failure leaves the previous entry in place.
    pub fn snapshot(&mut self, raw: &str) -> Result<Rc<ParsedUrl>> {
        if let Some((location, url)) = &self.last {
            if location == raw {
                trace!(location = raw, "url cache hit");
                return Ok(Rc::clone(url));
            }
        }

        trace!(location = raw, "url cache miss");
        let url = Rc::new(ParsedUrl::parse(raw)?);
        self.last = Some((raw.to_string(), Rc::clone(&url)));
        Ok(url)
    }

    /// Raw string of the cached entry
    pub fn location(&self) -> Option<&str> {
        self.last.as_ref().map(|(location, _)| location.as_str())
    }

    /// Drop the cached entry
    pub fn clear(&mut self) {
        self.last = None;
    }
}
