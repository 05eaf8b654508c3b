use super::{ClientDispatch, HostBridge, HostLink, ModuleDispatch};
use crate::broker::message::{Action, Event, HostAction, HostNotification};
use crate::broker::topic::SubscriberId;
use crate::client::Client;
use crate::transport::message::ServerMessage;
use tokio::sync::mpsc;
use tungstenite::protocol::Message as WsMessage;

fn parse(msg: WsMessage) -> ServerMessage {
    match msg {
        WsMessage::Text(text) => serde_json::from_str(text.as_str()).unwrap(),
        other => panic!("Expected a text message, got {other:?}"),
    }
}

#[test]
fn test_host_link_drops_without_host() {
    let link = HostLink::new();
    assert!(!link.is_attached());
    link.send_to_host(HostNotification::unsubscribe("lights"));
}

#[test]
fn test_host_link_forwards_to_attached_host() {
    let link = HostLink::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
    link.attach(tx.clone());

    link.send_to_host(HostNotification::subscribe("lights", 7));

    match parse(rx.try_recv().unwrap()) {
        ServerMessage::Host {
            action,
            topic,
            sender,
            ..
        } => {
            assert_eq!(action, HostAction::Subscribe);
            assert_eq!(topic, "lights");
            assert_eq!(sender, Some(7));
        }
        other => panic!("Expected a host frame, got {other:?}"),
    }

    link.detach(&tx);
    link.send_to_host(HostNotification::unsubscribe("lights"));
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_client_dispatch_delivers_event_frame() {
    let dispatch = ClientDispatch::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
    let client = Client::new(tx);
    let id = client.id;
    dispatch.register_client(client);

    let event = Event::new(Action::Publish, Some("temp"), 9).with_payload("21.5");
    dispatch.deliver(&event, id);

    assert_eq!(
        parse(rx.try_recv().unwrap()),
        ServerMessage::Event {
            url: "temp".to_string(),
            payload: Some("21.5".to_string()),
            sender: 9,
        }
    );
}

#[test]
fn test_client_dispatch_ignores_unknown_and_closed_clients() {
    let dispatch = ClientDispatch::new();
    let (tx, rx) = mpsc::unbounded_channel::<WsMessage>();
    let client = Client::new(tx);
    let id = client.id;
    dispatch.register_client(client);
    drop(rx);

    let event = Event::new(Action::Publish, Some("temp"), 9);
    dispatch.deliver(&event, id);
    dispatch.deliver(&event, id + 1000);

    dispatch.remove_client(id);
    assert!(!dispatch.contains(id));
}

#[test]
fn test_channel_collaborators() {
    let (host_tx, mut host_rx) = mpsc::unbounded_channel::<HostNotification>();
    host_tx.send_to_host(HostNotification::unsubscribe("temp"));
    assert_eq!(host_rx.try_recv().unwrap().topic, "temp");

    let (dispatch_tx, mut dispatch_rx) = mpsc::unbounded_channel::<(Event, SubscriberId)>();
    let event = Event::new(Action::Publish, Some("temp"), 1);
    dispatch_tx.deliver(&event, 4);
    assert_eq!(dispatch_rx.try_recv().unwrap(), (event, 4));
}

#[test]
fn test_host_link_detach_ignores_replaced_host() {
    let link = HostLink::new();
    let (old_tx, _old_rx) = mpsc::unbounded_channel::<WsMessage>();
    let (new_tx, mut new_rx) = mpsc::unbounded_channel::<WsMessage>();
    link.attach(old_tx.clone());
    link.attach(new_tx);

    link.detach(&old_tx);
    assert!(link.is_attached());
    assert!(!link.is_current(&old_tx));

    link.send_to_host(HostNotification::unsubscribe("lights"));
    assert!(new_rx.try_recv().is_ok());
}
