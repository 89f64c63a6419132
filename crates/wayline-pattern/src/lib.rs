//! wayline-pattern: Segment patterns for client-side routing
//!
//! Shared by wayline-core (navigation) and wayline-wasm (JS bindings).
//! No platform access: everything here is pure data.
//!
//! ## Template Syntax
//! - `users` - Literal segment
//! - `:name` - Named parameter (captures one segment, not optional)
//! - `*` or `*name` - Rest capture (final segment only), bound as `rest` or `name`
//!
//! Templates drop one leading and one trailing `/` before splitting.
//!
//! ## Matching
//! Patterns are matched in declaration order and the first match wins.
//! There is no static-over-param priority: order tables from most to least
//! specific. A rest capture binds the remaining segments joined with `/`
//! behind a leading `/` (`"/"` when nothing remains).
//!
//! ## Example
//! ```
//! use wayline_pattern::{Pattern, Routes};
//!
//! let pattern = Pattern::compile("/users/:id/*").unwrap();
//! let params = pattern.matches(&["users", "1234"]).unwrap();
//! assert_eq!(params.get("id"), Some("1234"));
//! assert_eq!(params.get("rest"), Some("/"));
//!
//! let routes = Routes::build([("UserRoot", "/users/:id")]).unwrap();
//! assert_eq!(routes.url("UserRoot", &[("id", "42")]).unwrap(), "/users/42");
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod dispatch;
pub mod error;
pub mod pattern;
pub mod routes;

pub use dispatch::{first_match, Dispatcher, DispatcherBuilder};
pub use error::{BuildError, PatternError};
pub use pattern::{path_segments, Params, Pattern, PatternCache, Segment, DEFAULT_REST_NAME};
pub use routes::{Route, Routes};
