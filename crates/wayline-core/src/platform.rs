//! Platform location API
//!
//! The navigation core never touches a browser directly. A [`Platform`]
//! supplies the current location, history writes, the location-changed
//! signal and the user confirmation prompt.

use crate::listeners::Subscription;
use crate::{Error, Result};
use std::rc::Rc;

/// Location and history primitives consumed by [`crate::Navigation`]
pub trait Platform {
    /// Current raw location as an absolute URL
    fn current_location(&self) -> String;

    /// Append a history entry for `target` (may be relative)
    fn push_entry(&self, target: &str) -> Result<()>;

    /// Overwrite the current history entry with `target`
    fn replace_entry(&self, target: &str) -> Result<()>;

    /// Run `listener` whenever the location changes outside of
    /// `push_entry`/`replace_entry` (back/forward)
    fn on_location_changed(&self, listener: Rc<dyn Fn()>) -> Subscription;

    /// Ask the user; blocks until answered
    fn confirm(&self, message: &str) -> bool;
}

/// A fixed location for server rendering and other headless reads.
///
/// Never changes, never prompts, and refuses history writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLocation {
    location: String,
}

impl StaticLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl Platform for StaticLocation {
    fn current_location(&self) -> String {
        self.location.clone()
    }

    fn push_entry(&self, _target: &str) -> Result<()> {
        Err(Error::Unsupported("push on a static location"))
    }

    fn replace_entry(&self, _target: &str) -> Result<()> {
        Err(Error::Unsupported("replace on a static location"))
    }

    fn on_location_changed(&self, _listener: Rc<dyn Fn()>) -> Subscription {
        Subscription::noop()
    }

    fn confirm(&self, _message: &str) -> bool {
        true
    }
}
