//! The `transport` module is responsible for handling network communication
//! with modules and the host, via WebSockets.
//!
//! It defines the JSON protocol spoken on a connection and implements the
//! WebSocket server that forwards requests to the broker.

pub mod message;
pub mod websocket;
