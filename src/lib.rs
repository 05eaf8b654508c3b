//! # arenasub
//!
//! `arenasub` is an in-process event registry for a module-hosting runtime.
//! Modules subscribe to named event topics, publishers fan events out to the
//! current subscribers of a topic, and topics registered under the reserved
//! `/arena/` prefix are mirrored to an external host process.
//!
//! ## Core Modules
//!
//! - `broker`: topic classification, the topic table, subscription management and publish routing.
//! - `bridge`: the host bridge and module dispatch collaborators.
//! - `client`: Represents a connected module.
//! - `config`: Handles loading and managing server configuration.
//! - `transport`: The WebSocket front-end speaking the JSON request protocol.
//! - `utils`: Error types and logging setup.

pub mod bridge;
pub mod broker;
pub mod client;
pub mod config;
pub mod transport;
pub mod utils;

pub use broker::{EventBroker, HOST_ID, SubscriberId, UnsubscribeNotify};
pub use utils::RegistryError;
