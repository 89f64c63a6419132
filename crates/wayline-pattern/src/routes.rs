//! Named route registry
//!
//! Each template is compiled eagerly into a [`Pattern`] and kept next to the
//! raw template, which doubles as the source for URL building.

use crate::error::{BuildError, PatternError};
use crate::pattern::{Params, Pattern};
use std::collections::HashMap;
use std::sync::Arc;

/// A named template with its compiled pattern
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    template: String,
    pattern: Arc<Pattern>,
}

impl Route {
    /// Compile a single named route
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Result<Self, PatternError> {
        let template = template.into();
        let pattern = Arc::new(Pattern::compile(&template)?);
        Ok(Self {
            name: name.into(),
            template,
            pattern,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn pattern(&self) -> &Arc<Pattern> {
        &self.pattern
    }

    /// Names a URL build needs, in template order
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.pattern.param_names()
    }

    /// Whether [`Route::url`] can succeed at all
    pub fn is_buildable(&self) -> bool {
        !self.pattern.has_rest()
    }

    /// Substitute `:name` tokens in the template with values from `params`.
    ///
    /// Values are inserted verbatim: a `/` inside a value adds segments.
    /// Entries in `params` that the template does not use are ignored.
    ///
    /// # Errors
    /// - [`BuildError::NotBuildable`] if the template ends in `*`
    /// - [`BuildError::MissingParameter`] naming the first absent key
    pub fn url(&self, params: &[(&str, &str)]) -> Result<String, BuildError> {
        if !self.is_buildable() {
            return Err(BuildError::NotBuildable(self.name.clone()));
        }

        let mut url = String::with_capacity(self.template.len());
        for (index, piece) in self.template.split('/').enumerate() {
            if index > 0 {
                url.push('/');
            }
            match piece.strip_prefix(':') {
                Some(key) => {
                    let value = params
                        .iter()
                        .find(|(name, _)| *name == key)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| BuildError::MissingParameter {
                            route: self.name.clone(),
                            name: key.to_string(),
                        })?;
                    url.push_str(value);
                }
                None => url.push_str(piece),
            }
        }
        Ok(url)
    }
}

/// Routes keyed by logical name, kept in declaration order
///
/// # Example
/// ```
/// use wayline_pattern::Routes;
///
/// let routes = Routes::build([
///     ("Home", "/"),
///     ("UserArea", "/users/:userId/*"),
///     ("UserRoot", "/users/:userId"),
/// ])
/// .unwrap();
///
/// assert_eq!(routes.url("UserRoot", &[("userId", "1234")]).unwrap(), "/users/1234");
///
/// let pattern = routes.pattern("UserArea").unwrap();
/// let params = pattern.matches(&["users", "1234", "friends"]).unwrap();
/// assert_eq!(params.get("rest"), Some("/friends"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Routes {
    routes: Vec<Route>,
    by_name: HashMap<String, usize>,
}

impl Routes {
    /// Compile every `(name, template)` pair
    ///
    /// # Errors
    /// The first [`PatternError`] from any template, or
    /// [`PatternError::DuplicateRoute`] if a name repeats.
    pub fn build<I, K, V>(templates: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut routes = Self::default();
        for (name, template) in templates {
            routes.insert(Route::new(name, template)?)?;
        }
        Ok(routes)
    }

    fn insert(&mut self, route: Route) -> Result<(), PatternError> {
        if self.by_name.contains_key(route.name()) {
            return Err(PatternError::DuplicateRoute(route.name));
        }
        self.by_name.insert(route.name.clone(), self.routes.len());
        self.routes.push(route);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&index| &self.routes[index])
    }

    /// Compiled pattern for `name`
    pub fn pattern(&self, name: &str) -> Option<&Arc<Pattern>> {
        self.get(name).map(Route::pattern)
    }

    /// Build a concrete URL for `name`
    pub fn url(&self, name: &str, params: &[(&str, &str)]) -> Result<String, BuildError> {
        self.get(name)
            .ok_or_else(|| BuildError::UnknownRoute(name.to_string()))?
            .url(params)
    }

    /// First route, in declaration order, whose pattern matches `path`
    pub fn recognize<S: AsRef<str>>(&self, path: &[S]) -> Option<(&Route, Params)> {
        self.routes
            .iter()
            .find_map(|route| route.pattern.matches(path).map(|params| (route, params)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::path_segments;

    fn app_routes() -> Routes {
        Routes::build([
            ("Home", "/"),
            ("Users", "/users"),
            ("UserArea", "/users/:userId/*"),
            ("UserRoot", "/users/:userId"),
            ("UserFriendsList", "/users/:userId/friends/list"),
        ])
        .unwrap()
    }

    #[test]
    fn test_static_urls() {
        let routes = app_routes();
        assert_eq!(routes.url("Home", &[]).unwrap(), "/");
        assert_eq!(routes.url("Users", &[]).unwrap(), "/users");
    }

    #[test]
    fn test_param_urls() {
        let routes = app_routes();
        assert_eq!(
            routes.url("UserFriendsList", &[("userId", "1234")]).unwrap(),
            "/users/1234/friends/list"
        );
    }

    #[test]
    fn test_missing_parameter() {
        let routes = app_routes();
        assert_eq!(
            routes.url("UserRoot", &[("id", "1")]),
            Err(BuildError::MissingParameter {
                route: "UserRoot".to_string(),
                name: "userId".to_string(),
            })
        );
        // Other routes still build
        assert_eq!(routes.url("Users", &[]).unwrap(), "/users");
    }

    #[test]
    fn test_wildcard_route_is_pattern_only() {
        let routes = app_routes();
        assert_eq!(
            routes.url("UserArea", &[("userId", "1")]),
            Err(BuildError::NotBuildable("UserArea".to_string()))
        );
        assert!(routes.pattern("UserArea").is_some());
    }

    #[test]
    fn test_unknown_route() {
        let routes = app_routes();
        assert_eq!(
            routes.url("Nope", &[]),
            Err(BuildError::UnknownRoute("Nope".to_string()))
        );
        assert!(routes.pattern("Nope").is_none());
    }

    #[test]
    fn test_value_with_slash_is_verbatim() {
        let routes = Routes::build([("File", "/files/:name")]).unwrap();
        let url = routes.url("File", &[("name", "a/b")]).unwrap();
        assert_eq!(url, "/files/a/b");
        // The extra segment no longer fits the pattern
        assert!(routes.pattern("File").unwrap().matches_path(&url).is_none());
    }

    #[test]
    fn test_similar_param_names_do_not_collide() {
        let routes = Routes::build([("Pair", "/:id/:idx")]).unwrap();
        assert_eq!(
            routes.url("Pair", &[("idx", "2"), ("id", "1")]).unwrap(),
            "/1/2"
        );
    }

    #[test]
    fn test_build_then_match_round_trip() {
        let routes = app_routes();
        let values = [("userId", "1234")];
        let url = routes.url("UserFriendsList", &values).unwrap();

        let params = routes
            .pattern("UserFriendsList")
            .unwrap()
            .matches(&path_segments(&url))
            .unwrap();
        assert_eq!(params.iter().collect::<Vec<_>>(), values.to_vec());
    }

    #[test]
    fn test_recognize_uses_declaration_order() {
        let routes = app_routes();

        let (route, params) = routes.recognize(&["users", "1234"]).unwrap();
        // UserArea is declared before UserRoot and its wildcard accepts nothing
        assert_eq!(route.name(), "UserArea");
        assert_eq!(params.get("rest"), Some("/"));

        let (route, _) = routes.recognize::<&str>(&[]).unwrap();
        assert_eq!(route.name(), "Home");

        assert!(routes.recognize(&["posts"]).is_none());
    }

    #[test]
    fn test_invalid_template_fails_build() {
        assert!(matches!(
            Routes::build([("Bad", "/*/x")]),
            Err(PatternError::WildcardNotLast { .. })
        ));
    }

    #[test]
    fn test_duplicate_route_name() {
        assert_eq!(
            Routes::build([("A", "/a"), ("A", "/b")]).err(),
            Some(PatternError::DuplicateRoute("A".to_string()))
        );
    }

    #[test]
    fn test_iteration_keeps_declaration_order() {
        let routes = app_routes();
        let names: Vec<_> = routes.iter().map(Route::name).collect();
        assert_eq!(
            names,
            vec!["Home", "Users", "UserArea", "UserRoot", "UserFriendsList"]
        );
        assert_eq!(
            routes.get("UserFriendsList").unwrap().params().collect::<Vec<_>>(),
            vec!["userId"]
        );
    }
}
