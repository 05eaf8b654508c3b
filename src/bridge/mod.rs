//! The `bridge` module defines the two collaborators the broker talks to:
//!
//! - `HostBridge`: carries subscribe/unsubscribe/publish notifications to the
//!   host process.
//! - `ModuleDispatch`: delivers a published event to one local subscriber.
//!
//! Both are fire-and-forget. Implementations report their own failures (by
//! logging) and never call back into the broker while it holds its lock.

pub mod dispatch;
pub mod host;

pub use dispatch::ClientDispatch;
pub use host::HostLink;

use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::broker::message::{Event, HostNotification};
use crate::broker::topic::SubscriberId;

pub trait HostBridge: Send + Sync {
    fn send_to_host(&self, notification: HostNotification);
}

pub trait ModuleDispatch: Send + Sync {
    fn deliver(&self, event: &Event, subscriber: SubscriberId);
}

impl HostBridge for UnboundedSender<HostNotification> {
    fn send_to_host(&self, notification: HostNotification) {
        if let Err(e) = self.send(notification) {
            warn!("Host channel closed, dropping {:?} for {}", e.0.action, e.0.topic);
        }
    }
}

impl ModuleDispatch for UnboundedSender<(Event, SubscriberId)> {
    fn deliver(&self, event: &Event, subscriber: SubscriberId) {
        if self.send((event.clone(), subscriber)).is_err() {
            warn!("Dispatch channel closed, dropping event for {subscriber}");
        }
    }
}

#[cfg(test)]
mod tests;
