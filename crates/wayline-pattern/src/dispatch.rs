//! Ordered multi-pattern dispatch
//!
//! Patterns are tried in declaration order and the first match wins. There
//! is no specificity ranking: `/users/:id` declared before `/users/new`
//! captures `new` as an id. Callers order tables from most to least specific.

use crate::error::PatternError;
use crate::pattern::{Params, Pattern};
use std::sync::Arc;

type Handler<'a, T> = Box<dyn Fn(&Params) -> T + 'a>;
type Fallback<'a, T> = Box<dyn Fn() -> T + 'a>;

/// Find the first pattern matching `path`
///
/// # Returns
/// The index of the matching pattern and its params, or `None`
pub fn first_match<'p, S, I>(path: &[S], patterns: I) -> Option<(usize, Params)>
where
    S: AsRef<str>,
    I: IntoIterator<Item = &'p Pattern>,
{
    patterns
        .into_iter()
        .enumerate()
        .find_map(|(index, pattern)| pattern.matches(path).map(|params| (index, params)))
}

/// Builder for [`Dispatcher`]
pub struct DispatcherBuilder<'a, T> {
    arms: Vec<(Arc<Pattern>, Handler<'a, T>)>,
    fallback: Option<Fallback<'a, T>>,
}

impl<'a, T> DispatcherBuilder<'a, T> {
    pub fn new() -> Self {
        Self {
            arms: Vec::new(),
            fallback: None,
        }
    }

    /// Add a pattern and its handler
    pub fn route<P, F>(mut self, pattern: P, handler: F) -> Self
    where
        P: Into<Arc<Pattern>>,
        F: Fn(&Params) -> T + 'a,
    {
        self.arms.push((pattern.into(), Box::new(handler)));
        self
    }

    /// Set the handler used when no pattern matches
    pub fn fallback<F>(mut self, handler: F) -> Self
    where
        F: Fn() -> T + 'a,
    {
        self.fallback = Some(Box::new(handler));
        self
    }

    /// # Errors
    /// [`PatternError::MissingFallback`] if no fallback handler was set
    pub fn build(self) -> Result<Dispatcher<'a, T>, PatternError> {
        let fallback = self.fallback.ok_or(PatternError::MissingFallback)?;
        Ok(Dispatcher {
            arms: self.arms,
            fallback,
        })
    }
}

impl<T> Default for DispatcherBuilder<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A validated dispatch table: ordered `(pattern, handler)` arms plus a
/// mandatory fallback.
///
/// # Example
/// ```
/// use wayline_pattern::{Dispatcher, Pattern};
///
/// let dispatcher = Dispatcher::builder()
///     .route(Pattern::compile("/").unwrap(), |_| "home".to_string())
///     .route(Pattern::compile("/users/:id").unwrap(), |params| {
///         format!("user {}", params.get("id").unwrap_or_default())
///     })
///     .fallback(|| "not found".to_string())
///     .build()
///     .unwrap();
///
/// assert_eq!(dispatcher.dispatch(&["users", "42"]), "user 42");
/// assert_eq!(dispatcher.dispatch(&["nowhere"]), "not found");
/// ```
pub struct Dispatcher<'a, T> {
    arms: Vec<(Arc<Pattern>, Handler<'a, T>)>,
    fallback: Fallback<'a, T>,
}

impl<'a, T> Dispatcher<'a, T> {
    pub fn builder() -> DispatcherBuilder<'a, T> {
        DispatcherBuilder::new()
    }

    /// Run the first matching handler, or the fallback
    pub fn dispatch<S: AsRef<str>>(&self, path: &[S]) -> T {
        for (pattern, handler) in &self.arms {
            if let Some(params) = pattern.matches(path) {
                return handler(&params);
            }
        }
        (self.fallback)()
    }

    /// Index of the first matching arm and its params
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<(usize, Params)> {
        first_match(path, self.arms.iter().map(|(pattern, _)| &**pattern))
    }

    /// Number of arms, not counting the fallback
    pub fn len(&self) -> usize {
        self.arms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }
}

impl<T> std::fmt::Debug for Dispatcher<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field(
                "patterns",
                &self
                    .arms
                    .iter()
                    .map(|(pattern, _)| pattern.template())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(template: &str) -> Pattern {
        Pattern::compile(template).unwrap()
    }

    #[test]
    fn test_declaration_order_wins() {
        let dispatcher = Dispatcher::builder()
            .route(compile("/users/:id"), |params| {
                format!("user {}", params.get("id").unwrap_or_default())
            })
            .route(compile("/users/new"), |_| "new user form".to_string())
            .fallback(|| "not found".to_string())
            .build()
            .unwrap();

        // The earlier param route shadows the literal one
        assert_eq!(dispatcher.dispatch(&["users", "new"]), "user new");
    }

    #[test]
    fn test_specific_first_when_declared_first() {
        let dispatcher = Dispatcher::builder()
            .route(compile("/users/new"), |_| 1)
            .route(compile("/users/:id"), |_| 2)
            .fallback(|| 0)
            .build()
            .unwrap();

        assert_eq!(dispatcher.dispatch(&["users", "new"]), 1);
        assert_eq!(dispatcher.dispatch(&["users", "7"]), 2);
    }

    #[test]
    fn test_fallback() {
        let dispatcher = Dispatcher::builder()
            .route(compile("/"), |_| "home")
            .fallback(|| "not found")
            .build()
            .unwrap();

        assert_eq!(dispatcher.dispatch::<&str>(&[]), "home");
        assert_eq!(dispatcher.dispatch(&["missing"]), "not found");
    }

    #[test]
    fn test_missing_fallback_is_config_error() {
        let result = Dispatcher::<()>::builder().route(compile("/"), |_| ()).build();
        assert_eq!(result.err(), Some(PatternError::MissingFallback));
    }

    #[test]
    fn test_handlers_borrow_local_state() {
        let search = String::from("John Doe");
        let dispatcher = Dispatcher::builder()
            .route(compile("/users"), |_| format!("Users (search: {})", search))
            .fallback(|| "Not found".to_string())
            .build()
            .unwrap();

        assert_eq!(dispatcher.dispatch(&["users"]), "Users (search: John Doe)");
    }

    #[test]
    fn test_first_match_index() {
        let patterns = [compile("/"), compile("/users"), compile("/users/:id/*")];

        let (index, params) = first_match(&["users", "1234", "friends"], &patterns).unwrap();
        assert_eq!(index, 2);
        assert_eq!(params.get("rest"), Some("/friends"));

        assert!(first_match(&["posts"], &patterns).is_none());
    }

    #[test]
    fn test_find_reports_arm() {
        let dispatcher = Dispatcher::builder()
            .route(compile("/a"), |_| ())
            .route(compile("/b/:x"), |_| ())
            .fallback(|| ())
            .build()
            .unwrap();

        let (index, params) = dispatcher.find(&["b", "1"]).unwrap();
        assert_eq!(index, 1);
        assert_eq!(params.get("x"), Some("1"));
        assert_eq!(dispatcher.len(), 2);
    }
}
