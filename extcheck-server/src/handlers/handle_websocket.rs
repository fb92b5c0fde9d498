use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

use crate::infra::{
    app_state::AppState,
    websocket::{Connection, Delivery, ExtensionEventFrame},
};

/// Handle WebSocket upgrade request
///
/// The subscription is taken before the upgrade response is sent, so a
/// client sees every change committed after its handshake completed.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    let events = state.websocket_manager.subscribe();
    ws.on_upgrade(move |socket| handle_socket(socket, state, events))
}

/// Handle an individual WebSocket connection
async fn handle_socket(
    socket: WebSocket,
    state: AppState,
    events: broadcast::Receiver<ExtensionEventFrame>,
) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (tx, mut rx) =
        mpsc::channel::<String>(state.websocket_manager.client_queue());

    let connection = Arc::new(Connection::new(tx));
    let conn_id = connection.id;
    state.websocket_manager.add_connection(connection.clone());
    info!(%conn_id, "websocket subscriber connected");

    // Spawn task to handle outgoing messages
    let writer = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if ws_sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let forwarder = tokio::spawn(forward_events(events, connection));

    // Inbound frames carry no commands; only watch for the peer leaving.
    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(%conn_id, error = %e, "websocket receive failed");
                break;
            }
        }
    }

    forwarder.abort();
    writer.abort();
    if let Some(connection) = state.websocket_manager.remove_connection(conn_id)
    {
        info!(
            %conn_id,
            dropped = connection.dropped_frames(),
            "websocket subscriber disconnected"
        );
    }
}

async fn forward_events(
    mut events: broadcast::Receiver<ExtensionEventFrame>,
    connection: Arc<Connection>,
) {
    use broadcast::error::RecvError;

    loop {
        let frame = match events.recv().await {
            Ok(frame) => frame,
            Err(RecvError::Lagged(skipped)) => {
                warn!(conn_id = %connection.id, skipped, "websocket subscriber lagged");
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        let text = match serde_json::to_string(&frame.event) {
            Ok(text) => text,
            Err(e) => {
                error!(sequence = frame.sequence, error = %e, "failed to encode extension event");
                continue;
            }
        };

        match connection.try_send(text) {
            Delivery::Queued => {}
            Delivery::Dropped => {
                warn!(
                    conn_id = %connection.id,
                    sequence = frame.sequence,
                    "websocket queue full; frame dropped"
                );
            }
            Delivery::Closed => break,
        }
    }
}
