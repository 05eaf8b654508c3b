//! Module dispatch over connected clients
//!
//! Keeps the sending side of every connected module and pushes delivered
//! events to it as `event` frames.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tracing::warn;
use tungstenite::protocol::Message as WsMessage;

use crate::bridge::ModuleDispatch;
use crate::broker::message::Event;
use crate::broker::topic::SubscriberId;
use crate::client::Client;
use crate::transport::message::ServerMessage;

#[derive(Debug, Default)]
pub struct ClientDispatch {
    clients: Mutex<HashMap<SubscriberId, Client>>,
}

impl ClientDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_client(&self, client: Client) {
        self.lock().insert(client.id, client);
    }

    pub fn remove_client(&self, client_id: SubscriberId) {
        self.lock().remove(&client_id);
    }

    pub fn contains(&self, client_id: SubscriberId) -> bool {
        self.lock().contains_key(&client_id)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<SubscriberId, Client>> {
        self.clients.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ModuleDispatch for ClientDispatch {
    fn deliver(&self, event: &Event, subscriber: SubscriberId) {
        let clients = self.lock();
        let Some(client) = clients.get(&subscriber) else {
            warn!("No client registered with id: {subscriber}");
            return;
        };

        let text = match serde_json::to_string(&ServerMessage::from(event)) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize event: {e}");
                return;
            }
        };
        if let Err(e) = client.sender.send(WsMessage::text(text)) {
            warn!("Failed to send to {subscriber}: {e}");
        }
    }
}
