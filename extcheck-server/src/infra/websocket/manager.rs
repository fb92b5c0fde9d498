use crate::infra::websocket::{
    connection::Connection,
    event_bus::{ExtensionEventBus, ExtensionEventFrame},
};
use dashmap::DashMap;
use std::{fmt, sync::Arc};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Registry of subscribed sockets plus the topic they listen to.
#[derive(Clone)]
pub struct ConnectionManager {
    /// Active WebSocket connections mapped by connection ID
    connections: Arc<DashMap<Uuid, Arc<Connection>>>,
    bus: Arc<ExtensionEventBus>,
    /// Per-socket outbound queue length
    client_queue: usize,
}

impl fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connection_count", &self.connections.len())
            .field("broadcast_receivers", &self.bus.receiver_count())
            .field("client_queue", &self.client_queue)
            .finish()
    }
}

impl ConnectionManager {
    pub fn new(bus: Arc<ExtensionEventBus>, client_queue: usize) -> Self {
        Self {
            connections: Arc::new(DashMap::new()),
            bus,
            client_queue: client_queue.max(1),
        }
    }

    pub fn client_queue(&self) -> usize {
        self.client_queue
    }

    /// Register a new connection
    pub fn add_connection(&self, connection: Arc<Connection>) {
        self.connections.insert(connection.id, connection);
    }

    pub fn remove_connection(&self, conn_id: Uuid) -> Option<Arc<Connection>> {
        self.connections.remove(&conn_id).map(|(_, conn)| conn)
    }

    pub fn get_connection(&self, conn_id: &Uuid) -> Option<Arc<Connection>> {
        self.connections.get(conn_id).map(|c| c.clone())
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Subscribe to extension change frames
    pub fn subscribe(&self) -> broadcast::Receiver<ExtensionEventFrame> {
        self.bus.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn tracks_connections_by_id() {
        let manager =
            ConnectionManager::new(Arc::new(ExtensionEventBus::new(4)), 0);
        assert_eq!(manager.client_queue(), 1);

        let (tx, _rx) = mpsc::channel(1);
        let connection = Arc::new(Connection::new(tx));
        let id = connection.id;

        manager.add_connection(connection);
        assert_eq!(manager.connection_count(), 1);
        assert!(manager.get_connection(&id).is_some());

        assert!(manager.remove_connection(id).is_some());
        assert_eq!(manager.connection_count(), 0);
        assert!(manager.remove_connection(id).is_none());
    }
}
