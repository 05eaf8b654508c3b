//! The `broker` module holds the event registry: topic classification, the
//! topic table, subscription management, publish routing and request
//! dispatch.

pub mod classifier;
pub mod engine;
pub mod message;
pub mod registry;
pub mod request;
pub mod topic;

pub use engine::{EventBroker, UnsubscribeNotify};
pub use topic::{HOST_ID, SubscriberId};
