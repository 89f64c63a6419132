//! wayline-wasm: Browser platform for wayline
//!
//! [`BrowserPlatform`] drives `wayline_core::Navigation` from `window.location`,
//! `window.history` and the `popstate` event. The `wasm` feature also exports
//! JavaScript bindings for navigation and the route registry.

#[cfg(feature = "wasm")]
pub mod platform;

#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use platform::BrowserPlatform;

#[cfg(feature = "wasm")]
pub use wasm::*;

pub use wayline_core::{Navigation, NavigationConfig, Platform, Routes};
