//! Topic registry
//!
//! Maps a canonical topic key to its `Topic`. Lookups are exact string
//! matches. The registry never keeps an empty topic once an unregister pass
//! has visited it; callers run `delete_if_empty` after every removal.

use std::collections::HashMap;

use crate::broker::topic::Topic;
use crate::utils::error::RegistryError;

#[derive(Debug, Default)]
pub struct TopicRegistry {
    topics: HashMap<String, Topic>,
}

impl TopicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, key: &str) -> Option<&Topic> {
        self.topics.get(key)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut Topic> {
        self.topics.get_mut(key)
    }

    /// Returns the topic for `key`, creating an empty one if needed. The flag
    /// reports whether this call created it.
    pub fn get_or_create(&mut self, key: &str) -> Result<(&mut Topic, bool), RegistryError> {
        let created = !self.topics.contains_key(key);
        if created {
            self.topics
                .try_reserve(1)
                .map_err(|_| RegistryError::AllocationFailure)?;
        }
        let topic = self
            .topics
            .entry(key.to_string())
            .or_insert_with(|| Topic::new(key));
        Ok((topic, created))
    }

    /// Removes the topic iff it has no subscribers left.
    pub fn delete_if_empty(&mut self, key: &str) -> Option<Topic> {
        match self.topics.get(key) {
            Some(topic) if topic.subscribers.is_empty() => self.topics.remove(key),
            _ => None,
        }
    }

    /// Snapshot of every key, for full-table scans that mutate the registry.
    pub fn keys(&self) -> Vec<String> {
        self.topics.keys().cloned().collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.topics.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
