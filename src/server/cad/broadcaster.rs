use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use serde_json::json;
use tokio::sync::{mpsc, Mutex};

use crate::server::cad::message::{Channel, ClientMessage, EventKind, ServerMessage};

struct ClientEntry {
    subscriptions: HashSet<Channel>,
    sender: mpsc::UnboundedSender<ServerMessage>,
}

/// Registry of connected dispatch clients.
///
/// Cloning shares the same registry.
#[derive(Clone, Default)]
pub struct CadBroadcaster {
    clients: Arc<Mutex<HashMap<u64, ClientEntry>>>,
    next_id: Arc<AtomicU64>,
}

impl CadBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a client subscribed to `general`, returning its ID and message receiver
    pub async fn register(&self) -> (u64, mpsc::UnboundedReceiver<ServerMessage>) {
        let client_id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let (sender, receiver) = mpsc::unbounded_channel();

        let entry = ClientEntry {
            subscriptions: HashSet::from([Channel::General]),
            sender,
        };
        self.clients.lock().await.insert(client_id, entry);

        tracing::debug!(client_id, "CAD client connected");

        (client_id, receiver)
    }

    pub async fn unregister(&self, client_id: u64) {
        if self.clients.lock().await.remove(&client_id).is_some() {
            tracing::debug!(client_id, "CAD client disconnected");
        }
    }

    /// Returns false if the client is unknown
    pub async fn subscribe(&self, client_id: u64, channel: Channel) -> bool {
        match self.clients.lock().await.get_mut(&client_id) {
            Some(entry) => {
                entry.subscriptions.insert(channel);
                true
            }
            None => false,
        }
    }

    pub async fn unsubscribe(&self, client_id: u64, channel: Channel) -> bool {
        match self.clients.lock().await.get_mut(&client_id) {
            Some(entry) => {
                entry.subscriptions.remove(&channel);
                true
            }
            None => false,
        }
    }

    /// Sends a message to a single client regardless of its subscriptions
    pub async fn send_to(&self, client_id: u64, message: ServerMessage) -> bool {
        match self.clients.lock().await.get(&client_id) {
            Some(entry) => entry.sender.send(message).is_ok(),
            None => false,
        }
    }

    /// Delivers an event to every client subscribed to its channel.
    ///
    /// Clients whose receiver is gone are dropped. Returns the number of clients reached.
    pub async fn broadcast(&self, kind: EventKind, data: serde_json::Value) -> usize {
        let channel = kind.channel();
        let message = ServerMessage::new(kind, data);

        let mut clients = self.clients.lock().await;
        let mut delivered = 0;
        let mut closed = Vec::new();

        for (client_id, entry) in clients.iter() {
            if !entry.subscriptions.contains(&channel) {
                continue;
            }

            if entry.sender.send(message.clone()).is_ok() {
                delivered += 1;
            } else {
                closed.push(*client_id);
            }
        }

        for client_id in closed {
            clients.remove(&client_id);
        }

        tracing::debug!(?kind, ?channel, delivered, "Broadcast CAD event");

        delivered
    }

    pub async fn client_count(&self) -> usize {
        self.clients.lock().await.len()
    }

    /// Applies a client request and acknowledges it to that client only
    pub async fn handle_client_message(&self, client_id: u64, message: ClientMessage) {
        let reply = match message {
            ClientMessage::Subscribe { channel } => {
                self.subscribe(client_id, channel).await;
                ServerMessage::new(EventKind::Subscribed, json!({ "channel": channel }))
            }
            ClientMessage::Unsubscribe { channel } => {
                self.unsubscribe(client_id, channel).await;
                ServerMessage::new(EventKind::Unsubscribed, json!({ "channel": channel }))
            }
            ClientMessage::Ping => ServerMessage::new(EventKind::Pong, json!({})),
        };

        self.send_to(client_id, reply).await;
    }
}
