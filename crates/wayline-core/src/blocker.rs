//! Navigation blockers
//!
//! An insertion-ordered stack of guards. By default a navigation attempt
//! consults only the most recently registered one.

use tracing::debug;

/// Opaque blocker identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockerId(u64);

impl BlockerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// A registered guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blocker {
    pub id: BlockerId,
    pub message: String,
}

/// Which blockers a navigation attempt asks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlockerPolicy {
    /// Only the most recently registered blocker
    #[default]
    Latest,
    /// Every blocker, newest first, until one refuses
    All,
}

#[derive(Debug, Default)]
pub struct BlockerStack {
    blockers: Vec<Blocker>,
}

impl BlockerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a blocker.
    ///
    /// Registering the same id twice keeps both entries; each needs its own
    /// [`BlockerStack::unregister`].
    pub fn register(&mut self, id: BlockerId, message: impl Into<String>) {
        let message = message.into();
        debug!(id = id.0, %message, depth = self.blockers.len() + 1, "blocker registered");
        self.blockers.push(Blocker { id, message });
    }

    /// Remove the first entry with `id`. Returns whether one was found.
    pub fn unregister(&mut self, id: BlockerId) -> bool {
        match self.blockers.iter().position(|blocker| blocker.id == id) {
            Some(index) => {
                self.blockers.remove(index);
                debug!(id = id.0, depth = self.blockers.len(), "blocker unregistered");
                true
            }
            None => false,
        }
    }

    /// Most recently registered blocker
    pub fn latest(&self) -> Option<&Blocker> {
        self.blockers.last()
    }

    /// Messages to confirm, in the order they should be asked
    pub fn messages(&self, policy: BlockerPolicy) -> Vec<String> {
        match policy {
            BlockerPolicy::Latest => self
                .latest()
                .map(|blocker| blocker.message.clone())
                .into_iter()
                .collect(),
            BlockerPolicy::All => self
                .blockers
                .iter()
                .rev()
                .map(|blocker| blocker.message.clone())
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Blocker> {
        self.blockers.iter()
    }

    pub fn len(&self) -> usize {
        self.blockers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blockers.is_empty()
    }
}
