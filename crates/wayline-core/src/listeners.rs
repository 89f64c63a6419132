//! Change listener registry
//!
//! Single-threaded observer list behind `Rc<RefCell<..>>`. Notification walks
//! a copy of the list so listeners may subscribe, unsubscribe or read state
//! while being notified; a listener removed mid-notification does not run.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Handle returned by every `subscribe`-style call.
///
/// Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap the cleanup to run on unsubscribe
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to clean up
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    /// Unsubscribe now
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct ListenerTable {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Ordered list of change listeners
#[derive(Clone, Default)]
pub struct Listeners {
    table: Rc<RefCell<ListenerTable>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`; it runs on every [`Listeners::notify`] until the
    /// returned subscription is dropped
    pub fn subscribe(&self, listener: Rc<dyn Fn()>) -> Subscription {
        let id = {
            let mut table = self.table.borrow_mut();
            let id = table.next_id;
            table.next_id += 1;
            table.entries.push((id, listener));
            id
        };

        let table = Rc::downgrade(&self.table);
        Subscription::new(move || {
            if let Some(table) = table.upgrade() {
                table.borrow_mut().entries.retain(|(entry, _)| *entry != id);
            }
        })
    }

    /// Call every listener registered at the time of the call, in
    /// registration order. A listener unsubscribed by an earlier one is
    /// skipped.
    pub fn notify(&self) {
        let listeners: Vec<(u64, Listener)> = self
            .table
            .borrow()
            .entries
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        for (id, listener) in listeners {
            let live = self
                .table
                .borrow()
                .entries
                .iter()
                .any(|(entry, _)| *entry == id);
            if live {
                listener();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.table.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners").field("count", &self.len()).finish()
    }
}
