//! The `client` module defines the representation of a connected module.
//!
//! It provides the `Client` struct, which pairs the module's subscriber
//! identity with the channel used to push frames to its connection.

pub mod pubsub_client;
pub use pubsub_client::{Client, next_client_id};

#[cfg(test)]
mod tests;
