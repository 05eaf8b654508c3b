//! Message definitions for the registry
//!
//! `Event` is the inbound request/event shape: registration requests and
//! published events both travel as an `Event`. `HostNotification` is the
//! outbound shape handed to the host bridge.
//!
//! Notes on fields:
//! - `url`: raw topic string; `None` on an unregister request means
//!   "every topic this subscriber joined"
//! - `sender`: identity of the originating module, or `HOST_ID`
//! - `payload`: opaque body, forwarded untouched

use serde::{Deserialize, Serialize};

use crate::broker::topic::SubscriberId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Register,
    Unregister,
    /// Ordinary event published by a module for local subscribers.
    Publish,
    /// Arena event. Comes in from the host, or goes out to it when a module
    /// publishes one.
    HostPublish,
}

impl Action {
    pub fn is_publish(self) -> bool {
        matches!(self, Action::Publish | Action::HostPublish)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub action: Action,
    pub url: Option<String>,
    pub sender: SubscriberId,
    pub payload: Option<String>,
}

impl Event {
    pub fn new(action: Action, url: Option<&str>, sender: SubscriberId) -> Self {
        Self {
            action,
            url: url.map(str::to_string),
            sender,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostAction {
    Subscribe,
    Unsubscribe,
    Publish,
}

/// Notification sent to the host process. `timestamp` is milliseconds since
/// the UNIX epoch, stamped when the notification is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostNotification {
    pub action: HostAction,
    pub topic: String,
    pub sender: Option<SubscriberId>,
    pub payload: Option<String>,
    pub timestamp: i64,
}

impl HostNotification {
    fn new(action: HostAction, topic: &str) -> Self {
        Self {
            action,
            topic: topic.to_string(),
            sender: None,
            payload: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn subscribe(topic: &str, subscriber: SubscriberId) -> Self {
        Self {
            sender: Some(subscriber),
            ..Self::new(HostAction::Subscribe, topic)
        }
    }

    pub fn unsubscribe(topic: &str) -> Self {
        Self::new(HostAction::Unsubscribe, topic)
    }

    /// Wraps a module-originated arena event published on `topic` verbatim.
    pub fn publish(topic: &str, event: &Event) -> Self {
        Self {
            sender: Some(event.sender),
            payload: event.payload.clone(),
            ..Self::new(HostAction::Publish, topic)
        }
    }
}
