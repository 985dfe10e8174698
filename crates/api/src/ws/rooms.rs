//! Per-project chat room connection manager.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use taskup_core::types::DbId;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single chat connection.
struct RoomConnection {
    user_id: DbId,
    sender: WsSender,
}

/// Manages all active chat connections, grouped by project.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc`
/// and shared across the application.
pub struct ChatRooms {
    rooms: RwLock<HashMap<DbId, HashMap<String, RoomConnection>>>,
}

impl ChatRooms {
    /// Create a new, empty room manager.
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Register a connection in a project's room.
    ///
    /// Returns the receiver half of the message channel so the caller
    /// can forward messages to the WebSocket sink.
    pub async fn join(
        &self,
        project_id: DbId,
        conn_id: String,
        user_id: DbId,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(project_id)
            .or_default()
            .insert(conn_id, RoomConnection { user_id, sender: tx });
        rx
    }

    /// Remove a connection from a project's room; empty rooms are
    /// dropped.
    pub async fn leave(&self, project_id: DbId, conn_id: &str) {
        let mut rooms = self.rooms.write().await;
        if let Some(room) = rooms.get_mut(&project_id) {
            room.remove(conn_id);
            if room.is_empty() {
                rooms.remove(&project_id);
            }
        }
    }

    /// Broadcast a message to every connection in a project's room.
    ///
    /// Connections whose send channels are closed are silently skipped
    /// (they will be cleaned up on their next receive loop iteration).
    pub async fn broadcast(&self, project_id: DbId, message: Message) {
        let rooms = self.rooms.read().await;
        if let Some(room) = rooms.get(&project_id) {
            for conn in room.values() {
                let _ = conn.sender.send(message.clone());
            }
        }
    }

    /// The user ids currently connected to a project's room.
    pub async fn present_users(&self, project_id: DbId) -> Vec<DbId> {
        let rooms = self.rooms.read().await;
        rooms
            .get(&project_id)
            .map(|room| {
                let mut users: Vec<DbId> = room.values().map(|c| c.user_id).collect();
                users.sort();
                users.dedup();
                users
            })
            .unwrap_or_default()
    }

    /// Total number of active connections across all rooms.
    pub async fn connection_count(&self) -> usize {
        self.rooms.read().await.values().map(HashMap::len).sum()
    }

    /// Send a Ping frame to every connected client.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub async fn ping_all(&self) {
        let rooms = self.rooms.read().await;
        for room in rooms.values() {
            for conn in room.values() {
                let _ = conn.sender.send(Message::Ping(Bytes::new()));
            }
        }
    }

    /// Send a Close frame to every connection, then clear all rooms.
    ///
    /// Used during graceful shutdown to notify clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut rooms = self.rooms.write().await;
        let count: usize = rooms.values().map(HashMap::len).sum();
        for room in rooms.values() {
            for conn in room.values() {
                let _ = conn.sender.send(Message::Close(None));
            }
        }
        rooms.clear();
        tracing::info!(count, "Closed all chat connections");
    }
}

impl Default for ChatRooms {
    fn default() -> Self {
        Self::new()
    }
}
