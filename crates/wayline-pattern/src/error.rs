//! Error types for wayline-pattern

use thiserror::Error;

/// Configuration errors, raised while compiling templates or assembling a
/// dispatch table. Never raised while matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// `*` appears before the final segment
    #[error("Wildcard must be the last segment: {template}")]
    WildcardNotLast { template: String },

    /// A bare `:` segment
    #[error("Empty parameter name in template: {template}")]
    EmptyParameterName { template: String },

    /// The same name is bound twice
    #[error("Duplicate parameter `{name}` in template: {template}")]
    DuplicateParameter { template: String, name: String },

    /// The same route name is declared twice in a registry
    #[error("Duplicate route name: {0}")]
    DuplicateRoute(String),

    /// Dispatch table built without a fallback handler
    #[error("Dispatch table has no fallback handler")]
    MissingFallback,
}

/// Errors from building a concrete URL out of a route template.
///
/// Scoped to a single call: other routes are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// No route registered under this name
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    /// A `:name` in the template has no value
    #[error("Missing parameter `{name}` for route {route}")]
    MissingParameter { route: String, name: String },

    /// Templates ending in `*` are patterns only
    #[error("Route {0} ends in a wildcard and cannot be built into a URL")]
    NotBuildable(String),
}
