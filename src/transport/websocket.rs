//! WebSocket transport
//!
//! This file implements a minimal WebSocket server that translates protocol
//! JSON messages into registry operations. Responsibilities:
//! - Accept TCP/WebSocket connections
//! - Create a `Client` for each connection and register it for module dispatch
//! - Turn a connection into the host link on `host_attach`
//! - Serialize/deserialize JSON messages and forward them to the broker
//! - Unregister a connection from every topic when it goes away

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::spawn;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_tungstenite::accept_async;
use tracing::{debug, info, warn};
use tungstenite::protocol::Message as WsMessage;

use std::sync::Arc;

use crate::bridge::{ClientDispatch, HostLink};
use crate::broker::message::{Action, Event};
use crate::broker::topic::{HOST_ID, SubscriberId};
use crate::broker::EventBroker;
use crate::client::Client;
use crate::config::RegistrySettings;
use crate::transport::message::{ClientMessage, ServerMessage};

/// Everything a connection handler needs, cheap to clone per connection.
#[derive(Debug, Clone)]
pub struct ServerState {
    pub broker: Arc<EventBroker>,
    pub clients: Arc<ClientDispatch>,
    pub host: Arc<HostLink>,
}

impl ServerState {
    pub fn new(settings: &RegistrySettings) -> Self {
        let clients = Arc::new(ClientDispatch::new());
        let host = Arc::new(HostLink::new());
        let broker = Arc::new(EventBroker::with_policy(
            host.clone(),
            clients.clone(),
            settings.unsubscribe_notify,
        ));
        Self {
            broker,
            clients,
            host,
        }
    }
}

/// Per-connection state.
#[derive(Debug)]
pub struct Connection {
    pub id: SubscriberId,
    pub sender: UnboundedSender<WsMessage>,
    pub is_host: bool,
}

impl Connection {
    /// Registers a new module connection for dispatch.
    pub fn open(state: &ServerState, sender: UnboundedSender<WsMessage>) -> Self {
        let client = Client::new(sender.clone());
        let id = client.id;
        state.clients.register_client(client);
        Self {
            id,
            sender,
            is_host: false,
        }
    }

    /// Subscriber identity used for requests on this connection.
    pub fn identity(&self) -> SubscriberId {
        if self.is_host { HOST_ID } else { self.id }
    }

    pub fn reply(&self, message: &ServerMessage) {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Err(e) = self.sender.send(WsMessage::text(json)) {
                    warn!("Failed to reply to {}: {e}", self.id);
                }
            }
            Err(e) => warn!("Failed to serialize reply: {e}"),
        }
    }

    /// True for a host connection that a newer `host_attach` displaced.
    pub fn is_displaced_host(&self, state: &ServerState) -> bool {
        self.is_host && !state.host.is_current(&self.sender)
    }

    /// Drops every subscription held by this connection. A displaced host
    /// owns nothing: `HOST_ID` subscriptions belong to the live host.
    pub fn close(&self, state: &ServerState) {
        if !self.is_host {
            state.clients.remove_client(self.id);
            state.broker.unregister(None, self.id);
        } else if self.is_displaced_host(state) {
            debug!("Displaced host {} closed", self.id);
        } else {
            state.host.detach(&self.sender);
            state.broker.unregister(None, HOST_ID);
        }
    }
}

/// Applies one client request. Returns the reply to send back, if any;
/// publishes are not acknowledged.
pub fn handle_client_message(
    state: &ServerState,
    conn: &mut Connection,
    message: ClientMessage,
) -> Option<ServerMessage> {
    if conn.is_displaced_host(state) && !matches!(message, ClientMessage::HostAttach {}) {
        warn!("Rejected request from displaced host {}", conn.id);
        return Some(ServerMessage::Error {
            message: "host link was replaced by another connection".to_string(),
        });
    }

    match message {
        ClientMessage::Register { url } => {
            let request = Event::new(Action::Register, Some(url.as_str()), conn.identity());
            Some(outcome(state.broker.handle_request(&request)))
        }
        ClientMessage::Unregister { url } => {
            let request = Event::new(Action::Unregister, url.as_deref(), conn.identity());
            Some(outcome(state.broker.handle_request(&request)))
        }
        ClientMessage::Publish {
            url,
            payload,
            arena,
        } => {
            let action = if conn.is_host || arena {
                Action::HostPublish
            } else {
                Action::Publish
            };
            let event = Event {
                action,
                url: Some(url),
                sender: conn.identity(),
                payload,
            };
            if conn.is_host {
                if let Err(e) = state.broker.handle_request(&event) {
                    return Some(outcome(Err(e)));
                }
            } else {
                state.broker.publish(&event, false);
            }
            None
        }
        ClientMessage::HostAttach {} => {
            if !conn.is_host {
                state.clients.remove_client(conn.id);
                state.broker.unregister(None, conn.id);
                conn.is_host = true;
            }
            if !state.host.is_current(&conn.sender) {
                state.host.attach(conn.sender.clone());
                info!("{} attached as host", conn.id);
            }
            Some(ServerMessage::Attached {})
        }
    }
}

fn outcome(result: Result<(), crate::utils::RegistryError>) -> ServerMessage {
    match result {
        Ok(()) => ServerMessage::Accepted {},
        Err(e) => {
            debug!("Request rejected ({}): {e}", e.as_label());
            ServerMessage::Error {
                message: e.to_string(),
            }
        }
    }
}

pub async fn start_websocket_server(addr: String, state: ServerState) -> std::io::Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    info!("WebSocket server listening on ws://{addr}");
    serve(listener, state).await
}

/// Accepts connections on an already bound listener until accepting fails.
pub async fn serve(listener: TcpListener, state: ServerState) -> std::io::Result<()> {
    loop {
        let (stream, _) = listener.accept().await?;
        spawn(handle_connection(stream, state.clone()));
    }
}

async fn handle_connection(stream: TcpStream, state: ServerState) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake error: {e}");
            return;
        }
    };
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
    let mut conn = Connection::open(&state, tx);
    let client_id = conn.id;
    debug!("{client_id} connected");

    spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = ws_sender.send(msg).await {
                warn!("Failed to send message to {client_id}: {e}");
                break;
            }
        }
        debug!("Send loop closed for {client_id}");
    });

    while let Some(Ok(msg)) = ws_receiver.next().await {
        if msg.is_close() {
            break;
        }
        if !msg.is_text() {
            continue;
        }
        let Ok(text) = msg.to_text() else {
            continue;
        };

        match serde_json::from_str::<ClientMessage>(text) {
            Ok(request) => {
                if let Some(reply) = handle_client_message(&state, &mut conn, request) {
                    conn.reply(&reply);
                }
            }
            Err(err) => {
                warn!(
                    "Invalid client message from {client_id}: {err} | {}",
                    text.chars().take(100).collect::<String>()
                );
                conn.reply(&ServerMessage::Error {
                    message: format!("invalid message: {err}"),
                });
            }
        }
    }

    info!("{client_id} disconnected");
    conn.close(&state);
}
