//! Parsed location snapshots

use crate::{Error, Result};
use smallvec::SmallVec;
use url::Url;
use wayline_pattern::path_segments;

/// Ordered multi-map of query parameters
///
/// Keys may repeat; order follows the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pairs: SmallVec<[(String, String); 4]>,
}

impl SearchParams {
    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in order
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<(String, String)> for SearchParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

/// Split an encoded pathname and percent-decode each segment.
///
/// # Errors
/// [`Error::InvalidLocation`] if a segment does not decode to UTF-8
pub fn decode_path(pathname: &str) -> Result<SmallVec<[String; 8]>> {
    path_segments(pathname)
        .into_iter()
        .map(|segment| {
            urlencoding::decode(segment)
                .map(|decoded| decoded.into_owned())
                .map_err(|e| Error::invalid_location(pathname, e))
        })
        .collect()
}

/// Immutable parsed form of one raw location string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    href: String,
    origin: String,
    path: SmallVec<[String; 8]>,
    pathname: String,
    search: SearchParams,
    hash: String,
}

impl ParsedUrl {
    /// Parse an absolute URL
    ///
    /// # Errors
    /// [`Error::InvalidLocation`] if `raw` is not an absolute URL or a path
    /// segment does not percent-decode to UTF-8.
    ///
    /// # Example
    /// ```
    /// use wayline_core::ParsedUrl;
    ///
    /// let url = ParsedUrl::parse("https://example.com/users/1234?search=John+Doe#top").unwrap();
    /// assert_eq!(url.path(), &["users", "1234"]);
    /// assert_eq!(url.pathname(), "/users/1234");
    /// assert_eq!(url.search().get("search"), Some("John Doe"));
    /// assert_eq!(url.hash(), "top");
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw).map_err(|e| Error::invalid_location(raw, e))?;

        let pathname = url.path().to_string();
        let path = decode_path(&pathname).map_err(|e| match e {
            Error::InvalidLocation { reason, .. } => Error::InvalidLocation {
                location: raw.to_string(),
                reason,
            },
            other => other,
        })?;

        let search = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Ok(Self {
            href: url.as_str().to_string(),
            origin: url.origin().ascii_serialization(),
            path,
            pathname,
            search,
            hash: url.fragment().unwrap_or_default().to_string(),
        })
    }

    /// Normalized serialization
    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Percent-decoded path segments, empty for `/`
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Raw pathname, still percent-encoded
    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn search(&self) -> &SearchParams {
        &self.search
    }

    /// Fragment without `#`, empty when absent
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_has_no_segments() {
        let url = ParsedUrl::parse("http://localhost/").unwrap();
        assert!(url.path().is_empty());
        assert_eq!(url.pathname(), "/");
        assert_eq!(url.origin(), "http://localhost");
        assert_eq!(url.hash(), "");
    }

    #[test]
    fn test_segments_are_decoded() {
        let url = ParsedUrl::parse("http://localhost/files/hello%20world/caf%C3%A9").unwrap();
        assert_eq!(url.path(), &["files", "hello world", "café"]);
        assert_eq!(url.pathname(), "/files/hello%20world/caf%C3%A9");
    }

    #[test]
    fn test_decode_path() {
        assert_eq!(
            decode_path("/files/hello%20world").unwrap().as_slice(),
            &["files", "hello world"]
        );
        assert!(decode_path("/").unwrap().is_empty());
        assert!(matches!(
            decode_path("/%FF"),
            Err(Error::InvalidLocation { ref location, .. }) if location == "/%FF"
        ));
    }

    #[test]
    fn test_trailing_slash_keeps_empty_segment() {
        let url = ParsedUrl::parse("http://localhost/users/").unwrap();
        assert_eq!(url.path(), &["users", ""]);
    }

    #[test]
    fn test_search_is_ordered_multimap() {
        let url = ParsedUrl::parse("http://localhost/?tag=a&q=x+y&tag=b").unwrap();
        let search = url.search();
        assert_eq!(search.get("tag"), Some("a"));
        assert_eq!(search.get_all("tag").collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(search.get("q"), Some("x y"));
        assert!(!search.contains_key("missing"));
        assert_eq!(
            search.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            vec!["tag", "q", "tag"]
        );
    }

    #[test]
    fn test_empty_hash() {
        let url = ParsedUrl::parse("http://localhost/a#").unwrap();
        assert_eq!(url.hash(), "");
        let url = ParsedUrl::parse("http://localhost/a#section").unwrap();
        assert_eq!(url.hash(), "section");
    }

    #[test]
    fn test_invalid_location() {
        let err = ParsedUrl::parse("not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidLocation { ref location, .. } if location == "not a url"));
    }

    #[test]
    fn test_undecodable_segment_is_invalid() {
        assert!(matches!(
            ParsedUrl::parse("http://localhost/%FF"),
            Err(Error::InvalidLocation { ref location, .. }) if location == "http://localhost/%FF"
        ));
    }
}
