//! The `error` module defines the error types used within the `arenasub` registry.
//!
//! Only registration and request routing can fail. Unregistering and
//! publishing never report an error to the caller: a missing topic or
//! subscription is treated as a successful no-op.

use thiserror::Error;

use crate::broker::message::Action;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The topic key was empty after the arena prefix was stripped.
    #[error("invalid topic url: {0:?}")]
    InvalidTopic(String),

    /// Memory could not be reserved for a new topic or subscriber.
    #[error("allocation failed while registering subscription")]
    AllocationFailure,

    /// The request adapter received an action it does not route.
    #[error("unsupported action: {0:?}")]
    UnsupportedAction(Action),
}

impl RegistryError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RegistryError::InvalidTopic(_) => "invalid_topic",
            RegistryError::AllocationFailure => "allocation_failure",
            RegistryError::UnsupportedAction(_) => "unsupported_action",
        }
    }
}
