//! CLI for arenasub
//!
//! Subcommands:
//! - `server`: run the WebSocket server
//! - `client`: run a simple module client (useful for smoke tests)

use arenasub::config::load_config;
use arenasub::transport::websocket::{ServerState, start_websocket_server};
use clap::Parser;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "arenasub")]
enum Command {
    /// Start the WebSocket server
    Server,
    /// Run the example module client (connects, registers, publishes)
    Client {
        /// WebSocket server URL to connect to
        #[arg(long, default_value = "ws://127.0.0.1:8080")]
        url: String,
        /// Topic to register and publish on
        #[arg(long, default_value = "chat")]
        topic: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cmd = Command::parse();

    match cmd {
        Command::Server => {
            if let Err(e) = run_server().await {
                error!("Server failed: {}", e);
            }
        }
        Command::Client { url, topic } => {
            arenasub::utils::logging::init("info");
            if let Err(e) = run_client(&url, &topic).await {
                error!("Client failed: {}", e);
            }
        }
    }
}

async fn run_server() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    arenasub::utils::logging::init(&config.logging.level);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = ServerState::new(&config.registry);
    info!(
        "unsubscribe notifications: {}",
        state.broker.unsubscribe_notify()
    );

    tokio::select! {
        res = start_websocket_server(addr, state) => {
            res?;
            error!("WebSocket server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}

async fn run_client(url: &str, topic: &str) -> Result<(), Box<dyn std::error::Error>> {
    use futures_util::{SinkExt, StreamExt};
    use serde_json::json;
    use tokio_tungstenite::connect_async;
    use tokio_tungstenite::tungstenite::Message as WsMessage;

    let (mut ws_stream, _response) = connect_async(url).await?;

    // 1. Register
    let register = json!({ "type": "register", "url": topic });
    ws_stream
        .send(WsMessage::Text(register.to_string().into()))
        .await?;
    if let Some(Ok(WsMessage::Text(reply))) = ws_stream.next().await {
        println!("Register response: {reply}");
    }

    // 2. Publish
    let publish = json!({ "type": "publish", "url": topic, "payload": "Hello from example" });
    ws_stream
        .send(WsMessage::Text(publish.to_string().into()))
        .await?;

    // Read the delivered event
    if let Some(Ok(WsMessage::Text(incoming))) = ws_stream.next().await {
        println!("Incoming: {incoming}");
    }

    Ok(())
}
