//! wayline-core: Client-side navigation core
//!
//! Tracks the current location as reactive state, gates programmatic
//! navigation behind a stack of confirmation blockers, and routes the current
//! path through [`wayline_pattern`] patterns.
//!
//! Everything is single-threaded (`Rc`/`RefCell`), matching the browser event
//! loop it is built for. The platform (browser history, an in-memory history
//! for tests, a fixed server location) sits behind the [`Platform`] trait.
//!
//! ## Example
//! ```
//! use wayline_core::{MemoryHistory, Navigation, Routes};
//!
//! let routes = Routes::build([("Home", "/"), ("User", "/users/:id")]).unwrap();
//! let navigation = Navigation::new(MemoryHistory::new("http://localhost/").unwrap());
//!
//! let _subscription = navigation.subscribe(|| println!("location changed"));
//! navigation.push(&routes.url("User", &[("id", "1234")]).unwrap()).unwrap();
//!
//! let url = navigation.snapshot().unwrap();
//! let (route, params) = routes.recognize(url.path()).unwrap();
//! assert_eq!(route.name(), "User");
//! assert_eq!(params.get("id"), Some("1234"));
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod blocker;
pub mod cache;
pub mod config;
pub mod error;
pub mod listeners;
pub mod location;
pub mod memory;
pub mod navigation;
pub mod platform;

// Re-exports
pub use blocker::{Blocker, BlockerId, BlockerPolicy, BlockerStack};
pub use cache::UrlCache;
pub use config::NavigationConfig;
pub use error::{Error, Result};
pub use listeners::{Listeners, Subscription};
pub use location::{decode_path, ParsedUrl, SearchParams};
pub use memory::{HistoryCall, MemoryHistory};
pub use navigation::{BlockerGuard, Navigation, NavigationKind};
pub use platform::{Platform, StaticLocation};

// Pattern re-exports
pub use wayline_pattern::{
    first_match, path_segments, BuildError, Dispatcher, DispatcherBuilder, Params, Pattern,
    PatternCache, PatternError, Route, Routes, Segment,
};
