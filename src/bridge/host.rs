//! Host link
//!
//! `HostLink` forwards host notifications to whichever connection attached
//! itself as the host. While no host is attached, notifications are dropped.

use std::sync::{Mutex, PoisonError};

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};
use tungstenite::protocol::Message as WsMessage;

use crate::bridge::HostBridge;
use crate::broker::message::HostNotification;
use crate::transport::message::ServerMessage;

#[derive(Debug, Default)]
pub struct HostLink {
    sender: Mutex<Option<UnboundedSender<WsMessage>>>,
}

impl HostLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes future notifications to `sender`, replacing any previous host.
    pub fn attach(&self, sender: UnboundedSender<WsMessage>) {
        let previous = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(sender);
        if previous.is_some() {
            warn!("Host link replaced by a new connection");
        }
    }

    /// Drops the host link if it still points at `sender`. A connection that
    /// was already replaced by a newer host leaves the link untouched.
    pub fn detach(&self, sender: &UnboundedSender<WsMessage>) {
        let mut guard = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.as_ref().is_some_and(|current| current.same_channel(sender)) {
            guard.take();
        }
    }

    /// Whether the link currently points at `sender`.
    pub fn is_current(&self, sender: &UnboundedSender<WsMessage>) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|current| current.same_channel(sender))
    }

    pub fn is_attached(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl HostBridge for HostLink {
    fn send_to_host(&self, notification: HostNotification) {
        let guard = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(sender) = guard.as_ref() else {
            debug!(
                "No host attached, dropping {:?} for {}",
                notification.action, notification.topic
            );
            return;
        };

        let text = match serde_json::to_string(&ServerMessage::from(notification)) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize host notification: {e}");
                return;
            }
        };
        if let Err(e) = sender.send(WsMessage::text(text)) {
            warn!("Failed to send to host: {e}");
        }
    }
}
