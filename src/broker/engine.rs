//! Broker engine
//!
//! This module contains the event registry responsible for:
//! - registering and unregistering subscribers on topics
//! - mirroring arena subscriptions to the host process
//! - fanning published events out to local subscribers
//! - forwarding module-originated arena events to the host without local
//!   delivery (they come back as host publishes)
//!
//! Concurrency and usage notes:
//! - `EventBroker` owns its lock and is shared as `Arc<EventBroker>`. Every
//!   operation works inside a scoped critical section and calls the host
//!   bridge or module dispatch only after releasing it, so collaborators may
//!   re-enter the broker.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::bridge::{HostBridge, ModuleDispatch};
use crate::broker::classifier::classify;
use crate::broker::message::{Action, Event, HostNotification};
use crate::broker::registry::TopicRegistry;
use crate::broker::topic::{HOST_ID, SubscriberId, Topic};
use crate::utils::error::RegistryError;

/// When a deleted topic is reported to the host with an `unsubscribe`
/// notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsubscribeNotify {
    /// Every deleted topic is reported, arena or not.
    #[default]
    Always,
    /// Only topics that gained a subscriber through the arena prefix.
    ArenaOnly,
}

impl UnsubscribeNotify {
    fn applies_to(self, topic: &Topic) -> bool {
        match self {
            UnsubscribeNotify::Always => true,
            UnsubscribeNotify::ArenaOnly => topic.arena,
        }
    }
}

impl FromStr for UnsubscribeNotify {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" => Ok(UnsubscribeNotify::Always),
            "arena_only" | "arena-only" => Ok(UnsubscribeNotify::ArenaOnly),
            other => Err(format!("unknown unsubscribe_notify policy: {other}")),
        }
    }
}

impl fmt::Display for UnsubscribeNotify {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsubscribeNotify::Always => f.write_str("always"),
            UnsubscribeNotify::ArenaOnly => f.write_str("arena_only"),
        }
    }
}

pub struct EventBroker {
    registry: Mutex<TopicRegistry>,
    host: Arc<dyn HostBridge>,
    dispatch: Arc<dyn ModuleDispatch>,
    unsubscribe_notify: UnsubscribeNotify,
}

impl fmt::Debug for EventBroker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBroker")
            .field("registry", &self.registry)
            .field("unsubscribe_notify", &self.unsubscribe_notify)
            .finish()
    }
}

impl EventBroker {
    pub fn new(host: Arc<dyn HostBridge>, dispatch: Arc<dyn ModuleDispatch>) -> Self {
        Self::with_policy(host, dispatch, UnsubscribeNotify::default())
    }

    pub fn with_policy(
        host: Arc<dyn HostBridge>,
        dispatch: Arc<dyn ModuleDispatch>,
        unsubscribe_notify: UnsubscribeNotify,
    ) -> Self {
        Self {
            registry: Mutex::new(TopicRegistry::new()),
            host,
            dispatch,
            unsubscribe_notify,
        }
    }

    pub fn unsubscribe_notify(&self) -> UnsubscribeNotify {
        self.unsubscribe_notify
    }

    /// Subscribes `subscriber` to the topic named by `url`. Registering an
    /// existing pair is a successful no-op. Arena URLs notify the host once
    /// per new subscriber.
    pub fn register(&self, url: &str, subscriber: SubscriberId) -> Result<(), RegistryError> {
        let topic = match classify(url) {
            Ok(topic) => topic,
            Err(e) => {
                warn!("Rejected registration of {subscriber} for invalid url {url:?}");
                return Err(e);
            }
        };

        {
            let mut registry = self.lock();
            let (entry, created) = registry.get_or_create(topic.key)?;
            let added = entry.subscribe(subscriber, topic.arena);
            match added {
                Ok(false) => {
                    debug!("{subscriber} already registered for {}", topic.key);
                    return Ok(());
                }
                Ok(true) => {}
                Err(_) => {
                    if created {
                        registry.delete_if_empty(topic.key);
                    }
                    warn!("Allocation failed registering {subscriber} for {}", topic.key);
                    return Err(RegistryError::AllocationFailure);
                }
            }
        }

        info!("client: {subscriber} registered event ({})", topic.key);

        if topic.arena {
            self.host
                .send_to_host(HostNotification::subscribe(topic.key, subscriber));
        }
        Ok(())
    }

    /// Removes `subscriber` from the topic named by `url`, or from every topic
    /// when `url` is `None`. Topics left without subscribers are deleted.
    pub fn unregister(&self, url: Option<&str>, subscriber: SubscriberId) {
        let deleted = {
            let mut registry = self.lock();
            let keys = match url {
                None => registry.keys(),
                Some(url) => match classify(url) {
                    Ok(topic) => vec![topic.key.to_string()],
                    Err(_) => {
                        debug!("Ignoring unregister of {subscriber} for invalid url {url:?}");
                        Vec::new()
                    }
                },
            };

            let mut deleted = Vec::new();
            for key in keys {
                if let Some(topic) = registry.find_mut(&key) {
                    if topic.unsubscribe(subscriber) {
                        info!("client: {subscriber} deregistered event ({key})");
                    }
                }
                if let Some(topic) = registry.delete_if_empty(&key) {
                    info!("unregister for event deleted url: ({key})");
                    deleted.push(topic);
                }
            }
            deleted
        };

        for topic in deleted {
            if self.unsubscribe_notify.applies_to(&topic) {
                self.host
                    .send_to_host(HostNotification::unsubscribe(&topic.name));
            }
        }
    }

    /// Routes a published event. Module-originated arena events go to the
    /// host only; everything else is delivered to local subscribers of the
    /// exact topic, skipping the host identity.
    pub fn publish(&self, event: &Event, from_host: bool) {
        if !event.action.is_publish() {
            warn!("Ignoring publish of non-publish action {:?}", event.action);
            return;
        }

        let Some(url) = event.url.as_deref() else {
            debug!("Dropping event without url from {}", event.sender);
            return;
        };

        if !from_host && event.action == Action::HostPublish {
            debug!("Forwarding arena event '{url}' to host");
            self.host.send_to_host(HostNotification::publish(url, event));
            return;
        }

        let targets: Vec<SubscriberId> = {
            let registry = self.lock();
            match registry.find(url) {
                Some(topic) => topic.subscribers.iter().filter(|id| *id != HOST_ID).collect(),
                None => {
                    debug!("Topic '{url}' not found.");
                    return;
                }
            }
        };

        debug!("publish event '{url}' to {} subscribers", targets.len());
        for subscriber in targets {
            self.dispatch.deliver(event, subscriber);
        }
    }

    /// Exact-match lookup of a canonical topic key.
    pub fn is_registered(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    pub fn topic_count(&self) -> usize {
        self.lock().len()
    }

    /// Subscribers of the topic stored under `key`, sorted.
    pub fn subscribers(&self, key: &str) -> Vec<SubscriberId> {
        let mut ids: Vec<_> = self
            .lock()
            .find(key)
            .map(|topic| topic.subscribers.iter().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    fn lock(&self) -> MutexGuard<'_, TopicRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
