use super::pubsub_client::{Client, next_client_id};
use crate::broker::topic::HOST_ID;
use tokio::sync::mpsc;
use tungstenite::protocol::Message as WsMessage;

#[test]
fn test_client_new() {
    let (tx, _) = mpsc::unbounded_channel::<WsMessage>();
    let client = Client::new(tx);
    assert_ne!(client.id, 0);
    assert_ne!(client.id, HOST_ID);
}

#[test]
fn test_client_ids_are_unique() {
    let (tx, _) = mpsc::unbounded_channel::<WsMessage>();
    let first = Client::new(tx.clone());
    let second = Client::new(tx);
    assert_ne!(first.id, second.id);
    assert_ne!(next_client_id(), second.id);
}
