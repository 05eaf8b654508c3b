//! Request routing into the broker.

use crate::broker::engine::EventBroker;
use crate::broker::message::{Action, Event};
use crate::utils::error::RegistryError;

impl EventBroker {
    /// Routes an inbound event request by its action. Publishes accepted here
    /// are host-originated; local publishes go through `publish` directly.
    pub fn handle_request(&self, request: &Event) -> Result<(), RegistryError> {
        match request.action {
            Action::Register => {
                let url = request
                    .url
                    .as_deref()
                    .ok_or_else(|| RegistryError::InvalidTopic(String::new()))?;
                self.register(url, request.sender)
            }
            Action::Unregister => {
                self.unregister(request.url.as_deref(), request.sender);
                Ok(())
            }
            Action::HostPublish => {
                self.publish(request, true);
                Ok(())
            }
            other => Err(RegistryError::UnsupportedAction(other)),
        }
    }
}
