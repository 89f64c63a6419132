//! Navigation configuration

use crate::blocker::BlockerPolicy;

/// Navigation configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationConfig {
    /// Which blockers a navigation attempt consults
    pub blocker_policy: BlockerPolicy,
}

impl NavigationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocker_policy(mut self, policy: BlockerPolicy) -> Self {
        self.blocker_policy = policy;
        self
    }
}
