//! Compiled path patterns
//!
//! A template such as `/users/:id/*` compiles once into a [`Pattern`], an
//! ordered list of [`Segment`]s that is walked pairwise against the segments
//! of a path.

use crate::error::PatternError;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

/// Name bound by a bare `*` segment
pub const DEFAULT_REST_NAME: &str = "rest";

/// One compiled template segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches exactly this text
    Literal(String),
    /// `:name` - binds exactly one path segment
    Capture(String),
    /// `*` or `*name` - binds the remainder of the path
    Rest(String),
}

impl Segment {
    /// Parameter name bound by this segment, if any
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Literal(_) => None,
            Segment::Capture(name) | Segment::Rest(name) => Some(name),
        }
    }
}

/// Split a pathname into segments.
///
/// `"/"` and `""` have no segments. Only the leading `/` is dropped, so a
/// trailing slash leaves an empty final segment (`"/users/"` is
/// `["users", ""]`).
pub fn path_segments(pathname: &str) -> Vec<&str> {
    let trimmed = pathname.strip_prefix('/').unwrap_or(pathname);
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('/').collect()
}

/// Templates drop one leading and one trailing `/` before splitting.
fn template_segments(template: &str) -> Vec<&str> {
    let trimmed = template.strip_prefix('/').unwrap_or(template);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('/').collect()
}

/// Parameters bound by a successful match, in template order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: SmallVec<[(String, String); 4]>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value bound to `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate `(name, value)` pairs in template order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Get params as HashMap for convenient access
    pub fn to_map(&self) -> HashMap<String, String> {
        self.pairs.iter().cloned().collect()
    }

    pub(crate) fn push(&mut self, name: &str, value: String) {
        self.pairs.push((name.to_string(), value));
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = smallvec::IntoIter<[(String, String); 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

/// A compiled template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    template: String,
    segments: SmallVec<[Segment; 8]>,
}

impl Pattern {
    /// Compile a template
    ///
    /// # Errors
    /// - [`PatternError::WildcardNotLast`] if `*` is not the final segment
    /// - [`PatternError::EmptyParameterName`] for a bare `:`
    /// - [`PatternError::DuplicateParameter`] if a name is bound twice
    ///
    /// # Example
    /// ```
    /// use wayline_pattern::{Pattern, Segment};
    ///
    /// let pattern = Pattern::compile("/users/:id/*").unwrap();
    /// assert_eq!(
    ///     pattern.segments(),
    ///     &[
    ///         Segment::Literal("users".to_string()),
    ///         Segment::Capture("id".to_string()),
    ///         Segment::Rest("rest".to_string()),
    ///     ]
    /// );
    /// ```
    pub fn compile(template: &str) -> Result<Self, PatternError> {
        let raw = template_segments(template);
        let last = raw.len().saturating_sub(1);
        let mut segments: SmallVec<[Segment; 8]> = SmallVec::with_capacity(raw.len());

        for (index, raw_segment) in raw.into_iter().enumerate() {
            let segment = if let Some(name) = raw_segment.strip_prefix(':') {
                if name.is_empty() {
                    return Err(PatternError::EmptyParameterName {
                        template: template.to_string(),
                    });
                }
                Segment::Capture(name.to_string())
            } else if let Some(name) = raw_segment.strip_prefix('*') {
                if index != last {
                    return Err(PatternError::WildcardNotLast {
                        template: template.to_string(),
                    });
                }
                let name = if name.is_empty() { DEFAULT_REST_NAME } else { name };
                Segment::Rest(name.to_string())
            } else {
                Segment::Literal(raw_segment.to_string())
            };

            if let Some(name) = segment.param_name() {
                if segments.iter().any(|s| s.param_name() == Some(name)) {
                    return Err(PatternError::DuplicateParameter {
                        template: template.to_string(),
                        name: name.to_string(),
                    });
                }
            }
            segments.push(segment);
        }

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    /// The template this pattern was compiled from
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Ends in a rest-capture
    pub fn has_rest(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Rest(_)))
    }

    /// Names bound by this pattern, in template order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::param_name)
    }

    /// Match path segments against this pattern
    ///
    /// # Returns
    /// `Some(Params)` with captured values, or `None` if the path does not match
    ///
    /// # Example
    /// ```
    /// use wayline_pattern::Pattern;
    ///
    /// let pattern = Pattern::compile("/users/:id/*").unwrap();
    /// let params = pattern.matches(&["users", "1234", "friends", "list"]).unwrap();
    /// assert_eq!(params.get("id"), Some("1234"));
    /// assert_eq!(params.get("rest"), Some("/friends/list"));
    /// ```
    pub fn matches<S: AsRef<str>>(&self, path: &[S]) -> Option<Params> {
        let mut params = Params::new();

        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Literal(text) => {
                    if path.get(index)?.as_ref() != text.as_str() {
                        return None;
                    }
                }
                Segment::Capture(name) => {
                    let value = path.get(index)?.as_ref();
                    params.push(name, value.to_string());
                }
                Segment::Rest(name) => {
                    // Compilation keeps Rest last, so every earlier index matched
                    params.push(name, join_rest(&path[index..]));
                    return Some(params);
                }
            }
        }

        (path.len() == self.segments.len()).then_some(params)
    }

    /// Split `pathname` and match it
    pub fn matches_path(&self, pathname: &str) -> Option<Params> {
        self.matches(&path_segments(pathname))
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(template: &str) -> Result<Self, Self::Err> {
        Self::compile(template)
    }
}

fn join_rest<S: AsRef<str>>(rest: &[S]) -> String {
    let mut joined = String::from("/");
    for (index, segment) in rest.iter().enumerate() {
        if index > 0 {
            joined.push('/');
        }
        joined.push_str(segment.as_ref());
    }
    joined
}

/// Memoizes compiled patterns by template string
///
/// Failed compilations are not cached.
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: HashMap<String, Arc<Pattern>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached pattern for `template`, compiling it on first use
    pub fn get_or_compile(&mut self, template: &str) -> Result<Arc<Pattern>, PatternError> {
        if let Some(pattern) = self.patterns.get(template) {
            return Ok(Arc::clone(pattern));
        }
        let pattern = Arc::new(Pattern::compile(template)?);
        self.patterns
            .insert(template.to_string(), Arc::clone(&pattern));
        Ok(pattern)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
