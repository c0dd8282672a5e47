use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use serde_json::json;

use crate::server::cad::{
    broadcaster::CadBroadcaster,
    message::{ClientMessage, EventKind, ServerMessage},
};

/// Drives one upgraded dispatch connection until either side closes it
pub async fn serve_socket(socket: WebSocket, broadcaster: CadBroadcaster, user_id: i32) {
    let (client_id, mut receiver) = broadcaster.register().await;
    let (mut sink, mut stream) = socket.split();

    tracing::debug!(client_id, user_id, "CAD socket opened");

    let mut send_task = tokio::spawn(async move {
        while let Some(message) = receiver.recv().await {
            let text = match serde_json::to_string(&message) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("Failed to serialize CAD message: {}", e);
                    continue;
                }
            };

            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let recv_broadcaster = broadcaster.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = stream.next().await {
            match message {
                Message::Text(text) => {
                    match serde_json::from_str::<ClientMessage>(text.as_str()) {
                        Ok(request) => {
                            recv_broadcaster
                                .handle_client_message(client_id, request)
                                .await;
                        }
                        Err(e) => {
                            let reply = ServerMessage::new(
                                EventKind::Error,
                                json!({ "message": format!("Invalid message: {}", e) }),
                            );
                            recv_broadcaster.send_to(client_id, reply).await;
                        }
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    broadcaster.unregister(client_id).await;
}
