use chrono::{DateTime, Utc};
use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};
use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;

/// Outcome of queueing one frame for a socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Queued,
    /// The socket's queue was full; this frame is lost for this socket only.
    Dropped,
    /// The socket writer has gone away.
    Closed,
}

/// Server side of one subscribed WebSocket.
pub struct Connection {
    pub id: Uuid,
    pub connected_at: DateTime<Utc>,
    sender: mpsc::Sender<String>,
    dropped: AtomicU64,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("connected_at", &self.connected_at)
            .field("channel_closed", &self.sender.is_closed())
            .field("dropped", &self.dropped_frames())
            .finish()
    }
}

impl Connection {
    pub fn new(sender: mpsc::Sender<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            connected_at: Utc::now(),
            sender,
            dropped: AtomicU64::new(0),
        }
    }

    /// Queue a serialized frame without waiting.
    pub fn try_send(&self, frame: String) -> Delivery {
        match self.sender.try_send(frame) {
            Ok(()) => Delivery::Queued,
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                Delivery::Dropped
            }
            Err(TrySendError::Closed(_)) => Delivery::Closed,
        }
    }

    pub fn dropped_frames(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
