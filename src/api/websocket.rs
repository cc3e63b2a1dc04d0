use crate::session::{DashboardEvent, Session};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

/// Create WebSocket router
pub fn create_ws_router(session: Arc<Session>) -> Router {
    Router::new()
        .route("/api/ws", get(ws_handler))
        .with_state(session)
}

/// GET /api/ws - WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(session): State<Arc<Session>>,
) -> Response {
    info!("WebSocket upgrade request received");
    ws.on_upgrade(move |socket| handle_socket(socket, session))
}

/// Push dashboard updates to the client until it disconnects
///
/// Dashboard clients only listen; incoming text frames are ignored.
async fn handle_socket(mut socket: WebSocket, session: Arc<Session>) {
    let mut updates = session.subscribe();

    info!("WebSocket connection established");

    loop {
        tokio::select! {
            // Handle incoming client messages
            Some(msg) = socket.recv() => {
                match msg {
                    Ok(Message::Close(_)) => {
                        info!("WebSocket client disconnected");
                        break;
                    }
                    Ok(Message::Ping(data)) => {
                        if let Err(e) = socket.send(Message::Pong(data)).await {
                            error!(error = %e, "Failed to send pong");
                            break;
                        }
                    }
                    Ok(_) => {
                        // Ignore text, binary, pong messages
                    }
                    Err(e) => {
                        warn!(error = %e, "WebSocket error");
                        break;
                    }
                }
            }

            // Forward dashboard updates from the broadcast channel
            result = updates.recv() => {
                match result {
                    Ok(event) => {
                        if let Err(e) = send_event(&mut socket, &event).await {
                            error!(error = %e, "Failed to send dashboard update");
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped = skipped, "WebSocket lagged, skipped updates");
                        // Continue processing
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        error!("Dashboard update channel closed");
                        break;
                    }
                }
            }

            else => {
                break;
            }
        }
    }

    info!("WebSocket connection closed");
}

/// Serialize and send a dashboard update to the client
async fn send_event(socket: &mut WebSocket, event: &DashboardEvent) -> anyhow::Result<()> {
    let json = serde_json::to_string(event)?;
    socket.send(Message::Text(json)).await?;
    Ok(())
}
