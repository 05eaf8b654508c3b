use serde::{Deserialize, Serialize};

use crate::broker::message::{Event, HostAction, HostNotification};
use crate::broker::topic::SubscriberId;

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "register")]
    Register { url: String },
    /// Without a `url` the connection leaves every topic it joined.
    #[serde(rename = "unregister")]
    Unregister {
        #[serde(default)]
        url: Option<String>,
    },
    #[serde(rename = "publish")]
    Publish {
        url: String,
        #[serde(default)]
        payload: Option<String>,
        #[serde(default)]
        arena: bool,
    },
    #[serde(rename = "host_attach")]
    HostAttach {},
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "ok")]
    Accepted {},
    #[serde(rename = "error")]
    Error { message: String },
    #[serde(rename = "attached")]
    Attached {},
    #[serde(rename = "event")]
    Event {
        url: String,
        payload: Option<String>,
        sender: SubscriberId,
    },
    #[serde(rename = "host")]
    Host {
        action: HostAction,
        topic: String,
        sender: Option<SubscriberId>,
        payload: Option<String>,
        timestamp: i64,
    },
}

impl From<&Event> for ServerMessage {
    fn from(event: &Event) -> Self {
        ServerMessage::Event {
            url: event.url.clone().unwrap_or_default(),
            payload: event.payload.clone(),
            sender: event.sender,
        }
    }
}

impl From<HostNotification> for ServerMessage {
    fn from(n: HostNotification) -> Self {
        ServerMessage::Host {
            action: n.action,
            topic: n.topic,
            sender: n.sender,
            payload: n.payload,
            timestamp: n.timestamp,
        }
    }
}
