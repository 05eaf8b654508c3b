use std::sync::atomic::{AtomicU32, Ordering};

use tokio::sync::mpsc::UnboundedSender;
use tungstenite::protocol::Message as WsMessage;

use crate::broker::topic::{HOST_ID, SubscriberId};

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

/// Represents a connected module in the registry.
///
/// Each client is identified by a numeric `id` used as its subscriber
/// identity and has a channel (`sender`) for pushing frames to it.
#[derive(Debug)]
pub struct Client {
    /// Subscriber identity, never `HOST_ID`.
    pub id: SubscriberId,

    /// Channel to send WebSocket messages to the client.
    pub sender: UnboundedSender<WsMessage>,
}

impl Client {
    pub fn new(sender: UnboundedSender<WsMessage>) -> Self {
        Self {
            id: next_client_id(),
            sender,
        }
    }
}

/// Allocates a fresh subscriber identity, skipping the reserved host id.
pub fn next_client_id() -> SubscriberId {
    loop {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        if id != HOST_ID && id != 0 {
            return id;
        }
    }
}
