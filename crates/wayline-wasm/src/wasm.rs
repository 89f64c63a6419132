//! WASM bindings for JavaScript interop

use crate::platform::BrowserPlatform;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wayline_core::{decode_path, BlockerGuard, Navigation, Routes, Subscription};

// ============================================================================
// Navigation
// ============================================================================

/// Navigation context bound to the page's history
#[wasm_bindgen]
pub struct WasmNavigation {
    inner: Navigation,
}

#[wasm_bindgen]
impl WasmNavigation {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WasmNavigation, JsError> {
        Ok(Self {
            inner: Navigation::new(BrowserPlatform::new()?),
        })
    }

    /// Navigate with a new history entry. False when a blocker refused.
    pub fn push(&self, target: &str) -> Result<bool, JsError> {
        Ok(self.inner.push(target)?)
    }

    /// Navigate by overwriting the current history entry
    pub fn replace(&self, target: &str) -> Result<bool, JsError> {
        Ok(self.inner.replace(target)?)
    }

    #[wasm_bindgen(getter)]
    pub fn href(&self) -> Result<String, JsError> {
        Ok(self.inner.snapshot()?.href().to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn pathname(&self) -> Result<String, JsError> {
        Ok(self.inner.snapshot()?.pathname().to_string())
    }

    /// Decoded path segments
    #[wasm_bindgen(getter)]
    pub fn path(&self) -> Result<Vec<String>, JsError> {
        Ok(self.inner.snapshot()?.path().to_vec())
    }

    #[wasm_bindgen(getter)]
    pub fn hash(&self) -> Result<String, JsError> {
        Ok(self.inner.snapshot()?.hash().to_string())
    }

    /// First value of a query parameter
    pub fn search_param(&self, key: &str) -> Result<Option<String>, JsError> {
        Ok(self.inner.snapshot()?.search().get(key).map(str::to_string))
    }

    pub fn is_active(&self, href: &str) -> Result<bool, JsError> {
        Ok(self.inner.is_active(href)?)
    }

    /// Call `callback` after every location change
    pub fn subscribe(&self, callback: js_sys::Function) -> WasmSubscription {
        let subscription = self.inner.subscribe(move || {
            if let Err(e) = callback.call0(&JsValue::NULL) {
                warn!(error = ?e, "location listener threw");
            }
        });
        WasmSubscription {
            inner: Some(subscription),
        }
    }

    /// Ask for confirmation with `message` before navigating, until released
    pub fn block(&self, message: String) -> WasmBlocker {
        WasmBlocker {
            guard: Some(self.inner.block(message)),
        }
    }
}

/// Handle returned by `WasmNavigation.subscribe`
#[wasm_bindgen]
pub struct WasmSubscription {
    inner: Option<Subscription>,
}

#[wasm_bindgen]
impl WasmSubscription {
    pub fn unsubscribe(&mut self) {
        self.inner.take();
    }
}

/// Handle returned by `WasmNavigation.block`
#[wasm_bindgen]
pub struct WasmBlocker {
    guard: Option<BlockerGuard>,
}

#[wasm_bindgen]
impl WasmBlocker {
    pub fn release(&mut self) {
        self.guard.take();
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Named route registry
#[wasm_bindgen]
pub struct WasmRoutes {
    inner: Routes,
}

#[wasm_bindgen]
impl WasmRoutes {
    /// `names[i]` is the name of `templates[i]`
    #[wasm_bindgen(constructor)]
    pub fn new(names: Vec<String>, templates: Vec<String>) -> Result<WasmRoutes, JsError> {
        if names.len() != templates.len() {
            return Err(JsError::new("names and templates differ in length"));
        }
        Ok(Self {
            inner: Routes::build(names.into_iter().zip(templates))?,
        })
    }

    /// Build the URL of `name`, `keys[i]` taking `values[i]`
    pub fn url(&self, name: &str, keys: Vec<String>, values: Vec<String>) -> Result<String, JsError> {
        let params: Vec<(&str, &str)> = keys
            .iter()
            .map(String::as_str)
            .zip(values.iter().map(String::as_str))
            .collect();
        Ok(self.inner.url(name, &params)?)
    }

    /// First route matching `pathname`, in declaration order.
    ///
    /// `pathname` is percent-decoded per segment first, as location
    /// snapshots are.
    pub fn recognize(&self, pathname: &str) -> Result<RouteMatch, JsError> {
        let path = decode_path(pathname)?;
        Ok(match self.inner.recognize(path.as_slice()) {
            Some((route, params)) => RouteMatch {
                found: true,
                name: route.name().to_string(),
                params: params
                    .iter()
                    .flat_map(|(k, v)| [k.to_string(), v.to_string()])
                    .collect(),
            },
            None => RouteMatch {
                found: false,
                name: String::new(),
                params: Vec::new(),
            },
        })
    }

    #[wasm_bindgen(getter)]
    pub fn names(&self) -> Vec<String> {
        self.inner.iter().map(|route| route.name().to_string()).collect()
    }
}

/// Route match result for WASM
#[wasm_bindgen]
pub struct RouteMatch {
    pub found: bool,
    name: String,
    params: Vec<String>,
}

#[wasm_bindgen]
impl RouteMatch {
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.name.clone()
    }

    /// Flattened `[name, value, ...]` pairs
    #[wasm_bindgen(getter)]
    pub fn params(&self) -> Vec<String> {
        self.params.clone()
    }
}
