//! Topic management
//!
//! A `Topic` holds the set of subscriber IDs for one canonical topic key.
//! Subscriptions are stored as a `HashSet` of `SubscriberId` and duplicate
//! subscriptions are a no-op.
//!
//! Concurrency note: callers must synchronize access to `Topic` (for example
//! via the broker lock) when modifying subscriptions.

use std::collections::HashSet;
use std::collections::TryReserveError;

pub type SubscriberId = u32;

/// Reserved identity of the host process. Never receives local fan-out.
pub const HOST_ID: SubscriberId = 0xFFFF_FFFD;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubscriberSet {
    ids: HashSet<SubscriberId>,
}

impl SubscriberSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` if absent. Returns `Ok(false)` when it was already present.
    pub fn insert(&mut self, id: SubscriberId) -> Result<bool, TryReserveError> {
        if self.ids.contains(&id) {
            return Ok(false);
        }
        self.ids.try_reserve(1)?;
        Ok(self.ids.insert(id))
    }

    pub fn remove(&mut self, id: SubscriberId) -> bool {
        self.ids.remove(&id)
    }

    pub fn contains(&self, id: SubscriberId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = SubscriberId> + '_ {
        self.ids.iter().copied()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Topic {
    pub name: String,
    pub subscribers: SubscriberSet,
    /// Set once any subscriber joined through the arena prefix.
    pub arena: bool,
}

impl Topic {
    /// Create a new topic with the given canonical key.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            subscribers: SubscriberSet::new(),
            arena: false,
        }
    }

    /// Add a subscriber to the topic. Duplicate adds are ignored and do not
    /// touch the arena flag.
    pub fn subscribe(&mut self, id: SubscriberId, arena: bool) -> Result<bool, TryReserveError> {
        let added = self.subscribers.insert(id)?;
        if added && arena {
            self.arena = true;
        }
        Ok(added)
    }

    /// Remove a subscriber from the topic.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.subscribers.remove(id)
    }
}
