//! Navigation context
//!
//! [`Navigation`] is the explicit context object an application creates at
//! its root and hands to every component that reads the location, navigates
//! or blocks navigation. Clones share one URL cache, one blocker stack and one
//! listener list.

use crate::blocker::{BlockerId, BlockerStack};
use crate::cache::UrlCache;
use crate::config::NavigationConfig;
use crate::listeners::{Listeners, Subscription};
use crate::location::ParsedUrl;
use crate::platform::Platform;
use crate::{Error, Result};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};
use url::Url;
use wayline_pattern::Dispatcher;

/// History entry semantics of a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// Append a new entry
    Push,
    /// Overwrite the current entry
    Replace,
}

struct Inner {
    // Dropped first so the platform stops calling back before teardown
    platform_subscription: RefCell<Option<Subscription>>,
    platform: Box<dyn Platform>,
    config: NavigationConfig,
    cache: RefCell<UrlCache>,
    blockers: RefCell<BlockerStack>,
    next_blocker: Cell<u64>,
    listeners: Listeners,
}

impl Inner {
    fn snapshot(&self) -> Result<Rc<ParsedUrl>> {
        let raw = self.platform.current_location();
        self.cache.borrow_mut().snapshot(&raw)
    }
}

/// Shared handle to the location store, blocker stack and navigator
#[derive(Clone)]
pub struct Navigation {
    inner: Rc<Inner>,
}

impl Navigation {
    /// Create a context with the default configuration
    pub fn new(platform: impl Platform + 'static) -> Self {
        Self::with_config(platform, NavigationConfig::default())
    }

    pub fn with_config(platform: impl Platform + 'static, config: NavigationConfig) -> Self {
        let inner = Rc::new(Inner {
            platform_subscription: RefCell::new(None),
            platform: Box::new(platform),
            config,
            cache: RefCell::new(UrlCache::new()),
            blockers: RefCell::new(BlockerStack::new()),
            next_blocker: Cell::new(0),
            listeners: Listeners::new(),
        });

        // Back/forward changes reach subscribers through the same list as
        // programmatic navigation
        let weak = Rc::downgrade(&inner);
        let subscription = inner.platform.on_location_changed(Rc::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.notify();
            }
        }));
        *inner.platform_subscription.borrow_mut() = Some(subscription);

        Self { inner }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.inner.config
    }

    // ------------------------------------------------------------------
    // Location store
    // ------------------------------------------------------------------

    /// Snapshot of the current location.
    ///
    /// Returns the same `Rc` for as long as the raw location is unchanged.
    ///
    /// # Errors
    /// [`Error::InvalidLocation`] if the platform reports an unparsable location
    pub fn snapshot(&self) -> Result<Rc<ParsedUrl>> {
        self.inner.snapshot()
    }

    /// Snapshot of an explicit raw location, through the same cache.
    ///
    /// The cache holds a single entry shared with [`Navigation::snapshot`]:
    /// alternating override and ambient reads re-parses each time, so the
    /// ambient snapshot comes back as a new `Rc` even though the platform
    /// location did not change.
    pub fn snapshot_of(&self, raw: &str) -> Result<Rc<ParsedUrl>> {
        self.inner.cache.borrow_mut().snapshot(raw)
    }

    /// Run `listener` after every location change, programmatic or not.
    ///
    /// Read [`Navigation::snapshot`] first, then subscribe: the store is
    /// single-threaded, so no change can slip in between.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        self.inner.listeners.subscribe(Rc::new(listener))
    }

    /// Like [`Navigation::subscribe`], handing `callback` the new snapshot.
    ///
    /// Changes to an unparsable location are logged and skipped.
    pub fn watch(&self, callback: impl Fn(Rc<ParsedUrl>) + 'static) -> Subscription {
        let weak = Rc::downgrade(&self.inner);
        self.subscribe(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            match inner.snapshot() {
                Ok(url) => callback(url),
                Err(e) => warn!(error = %e, "skipping location change"),
            }
        })
    }

    /// Whether `href`, resolved against the current location, points at the
    /// current pathname
    pub fn is_active(&self, href: &str) -> Result<bool> {
        let current = self.snapshot()?;
        let base =
            Url::parse(current.href()).map_err(|e| Error::invalid_location(current.href(), e))?;
        let resolved = base
            .join(href)
            .map_err(|e| Error::invalid_location(href, e))?;
        Ok(resolved.path() == current.pathname())
    }

    /// Run `dispatcher` against the current path
    pub fn dispatch<T>(&self, dispatcher: &Dispatcher<'_, T>) -> Result<T> {
        let url = self.snapshot()?;
        Ok(dispatcher.dispatch(url.path()))
    }

    // ------------------------------------------------------------------
    // Blockers
    // ------------------------------------------------------------------

    /// Fresh id for [`Navigation::register_blocker`]
    pub fn next_blocker_id(&self) -> BlockerId {
        let id = self.inner.next_blocker.get();
        self.inner.next_blocker.set(id + 1);
        BlockerId::new(id)
    }

    /// Push a blocker. Pair with [`Navigation::unregister_blocker`].
    pub fn register_blocker(&self, id: BlockerId, message: impl Into<String>) {
        self.inner.blockers.borrow_mut().register(id, message);
    }

    /// Remove the first blocker with `id`
    pub fn unregister_blocker(&self, id: BlockerId) -> bool {
        self.inner.blockers.borrow_mut().unregister(id)
    }

    /// Block navigation with `message` until the guard is dropped
    ///
    /// # Example
    /// ```
    /// use wayline_core::{MemoryHistory, Navigation};
    ///
    /// let history = MemoryHistory::new("http://localhost/form").unwrap();
    /// let navigation = Navigation::new(history.clone());
    ///
    /// let guard = navigation.block("Discard unsaved changes?");
    /// history.answer_confirm(false);
    /// assert!(!navigation.push("/elsewhere").unwrap());
    ///
    /// drop(guard);
    /// assert!(navigation.push("/elsewhere").unwrap());
    /// ```
    pub fn block(&self, message: impl Into<String>) -> BlockerGuard {
        let id = self.next_blocker_id();
        self.register_blocker(id, message);
        BlockerGuard {
            inner: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn blocker_count(&self) -> usize {
        self.inner.blockers.borrow().len()
    }

    /// Ask the blockers selected by the configured policy.
    ///
    /// `true` without prompting when no blocker is registered.
    pub fn can_navigate(&self) -> bool {
        // Collected up front: the prompt may run arbitrary code
        let messages = self
            .inner
            .blockers
            .borrow()
            .messages(self.inner.config.blocker_policy);

        messages
            .iter()
            .all(|message| self.inner.platform.confirm(message))
    }

    // ------------------------------------------------------------------
    // Navigator
    // ------------------------------------------------------------------

    /// Navigate to `target`, appending a history entry.
    ///
    /// Returns `Ok(false)` when a blocker refused; the location is then
    /// unchanged and no listener runs.
    pub fn push(&self, target: &str) -> Result<bool> {
        self.navigate(target, NavigationKind::Push)
    }

    /// Navigate to `target`, overwriting the current history entry
    pub fn replace(&self, target: &str) -> Result<bool> {
        self.navigate(target, NavigationKind::Replace)
    }

    pub fn navigate(&self, target: &str, kind: NavigationKind) -> Result<bool> {
        if !self.can_navigate() {
            debug!(to = target, ?kind, "navigation blocked");
            return Ok(false);
        }

        match kind {
            NavigationKind::Push => self.inner.platform.push_entry(target)?,
            NavigationKind::Replace => self.inner.platform.replace_entry(target)?,
        }
        debug!(to = target, ?kind, "navigated");

        self.inner.listeners.notify();
        Ok(true)
    }
}

impl fmt::Debug for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigation")
            .field("config", &self.inner.config)
            .field("blockers", &self.inner.blockers.borrow().len())
            .field("listeners", &self.inner.listeners.len())
            .finish()
    }
}

/// Keeps a blocker registered; dropping it unregisters
#[must_use = "dropping a BlockerGuard unregisters the blocker immediately"]
#[derive(Debug)]
pub struct BlockerGuard {
    inner: Weak<Inner>,
    id: BlockerId,
}

impl BlockerGuard {
    pub fn id(&self) -> BlockerId {
        self.id
    }

    /// Unregister now
    pub fn release(self) {}
}

impl Drop for BlockerGuard {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.blockers.borrow_mut().unregister(self.id);
        }
    }
}
