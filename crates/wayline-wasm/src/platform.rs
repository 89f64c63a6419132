//! Browser history platform

use std::rc::Rc;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wayline_core::{Error, Platform, Result, Subscription};
use web_sys::{Event, Window};

const POPSTATE: &str = "popstate";

/// [`Platform`] backed by the page's `window`
#[derive(Debug, Clone)]
pub struct BrowserPlatform {
    window: Window,
}

impl BrowserPlatform {
    /// # Errors
    /// [`Error::Platform`] outside a browser main thread (no `window`)
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| Error::Platform("no window".to_string()))?;
        Ok(Self { window })
    }

    pub fn from_window(window: Window) -> Self {
        Self { window }
    }

    fn history(&self) -> Result<web_sys::History> {
        self.window.history().map_err(js_error)
    }
}

fn js_error(value: JsValue) -> Error {
    Error::Platform(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

impl Platform for BrowserPlatform {
    fn current_location(&self) -> String {
        self.window.location().href().unwrap_or_else(|e| {
            warn!(error = ?e, "location.href unavailable");
            String::new()
        })
    }

    fn push_entry(&self, target: &str) -> Result<()> {
        self.history()?
            .push_state_with_url(&JsValue::NULL, "", Some(target))
            .map_err(js_error)
    }

    fn replace_entry(&self, target: &str) -> Result<()> {
        self.history()?
            .replace_state_with_url(&JsValue::NULL, "", Some(target))
            .map_err(js_error)
    }

    fn on_location_changed(&self, listener: Rc<dyn Fn()>) -> Subscription {
        let handler = Closure::wrap(Box::new(move |_event: Event| listener()) as Box<dyn FnMut(_)>);

        if let Err(e) = self
            .window
            .add_event_listener_with_callback(POPSTATE, handler.as_ref().unchecked_ref())
        {
            warn!(error = ?e, "failed to listen for popstate");
            return Subscription::noop();
        }

        let window = self.window.clone();
        Subscription::new(move || {
            // The closure must outlive the registration
            let _ = window
                .remove_event_listener_with_callback(POPSTATE, handler.as_ref().unchecked_ref());
        })
    }

    fn confirm(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }
}
