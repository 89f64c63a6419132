//! In-memory history
//!
//! A headless [`Platform`] with browser history semantics: `push` drops
//! forward entries then appends, `replace` overwrites, `back`/`forward`
//! move the cursor and fire the location-changed signal. Every platform
//! call is recorded for inspection.

use crate::listeners::{Listeners, Subscription};
use crate::platform::Platform;
use crate::{Error, Result};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use url::Url;

/// A recorded platform call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryCall {
    Push(String),
    Replace(String),
    Confirm(String),
}

#[derive(Debug)]
struct MemoryState {
    entries: Vec<Url>,
    index: usize,
    calls: Vec<HistoryCall>,
    queued_answers: VecDeque<bool>,
    default_answer: bool,
}

impl MemoryState {
    fn current(&self) -> &Url {
        &self.entries[self.index]
    }

    fn resolve(&self, target: &str) -> Result<Url> {
        self.current()
            .join(target)
            .map_err(|e| Error::invalid_location(target, e))
    }
}

/// Cloneable handle to a shared in-memory history
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    state: Rc<RefCell<MemoryState>>,
    listeners: Listeners,
}

impl MemoryHistory {
    /// Start with a single entry
    ///
    /// # Errors
    /// [`Error::InvalidLocation`] if `initial` is not an absolute URL
    pub fn new(initial: &str) -> Result<Self> {
        let url = Url::parse(initial).map_err(|e| Error::invalid_location(initial, e))?;
        Ok(Self {
            state: Rc::new(RefCell::new(MemoryState {
                entries: vec![url],
                index: 0,
                calls: Vec::new(),
                queued_answers: VecDeque::new(),
                default_answer: true,
            })),
            listeners: Listeners::new(),
        })
    }

    /// Answer given by `confirm` once queued answers run out (initially `true`)
    pub fn answer_confirm(&self, answer: bool) {
        self.state.borrow_mut().default_answer = answer;
    }

    /// Answer the next unanswered `confirm` with `answer`
    pub fn queue_confirm(&self, answer: bool) {
        self.state.borrow_mut().queued_answers.push_back(answer);
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cursor position
    pub fn index(&self) -> usize {
        self.state.borrow().index
    }

    /// All entries, oldest first
    pub fn entries(&self) -> Vec<String> {
        self.state
            .borrow()
            .entries
            .iter()
            .map(|url| url.to_string())
            .collect()
    }

    /// Calls recorded so far
    pub fn calls(&self) -> Vec<HistoryCall> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Step back one entry and signal the change. Returns false at the start.
    pub fn back(&self) -> bool {
        self.go(-1)
    }

    /// Step forward one entry and signal the change. Returns false at the end.
    pub fn forward(&self) -> bool {
        self.go(1)
    }

    /// Move the cursor by `delta` and signal the change. Out-of-range moves
    /// do nothing.
    pub fn go(&self, delta: isize) -> bool {
        let moved = {
            let mut state = self.state.borrow_mut();
            match state.index.checked_add_signed(delta) {
                Some(target) if delta != 0 && target < state.entries.len() => {
                    state.index = target;
                    true
                }
                _ => false,
            }
        };
        if moved {
            self.listeners.notify();
        }
        moved
    }
}

impl Platform for MemoryHistory {
    fn current_location(&self) -> String {
        self.state.borrow().current().to_string()
    }

    fn push_entry(&self, target: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let url = state.resolve(target)?;
        let next = state.index + 1;
        state.entries.truncate(next);
        state.entries.push(url);
        state.index = next;
        state.calls.push(HistoryCall::Push(target.to_string()));
        Ok(())
    }

    fn replace_entry(&self, target: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let url = state.resolve(target)?;
        let index = state.index;
        state.entries[index] = url;
        state.calls.push(HistoryCall::Replace(target.to_string()));
        Ok(())
    }

    fn on_location_changed(&self, listener: Rc<dyn Fn()>) -> Subscription {
        self.listeners.subscribe(listener)
    }

    fn confirm(&self, message: &str) -> bool {
        let mut state = self.state.borrow_mut();
        state.calls.push(HistoryCall::Confirm(message.to_string()));
        let default = state.default_answer;
        state.queued_answers.pop_front().unwrap_or(default)
    }
}
