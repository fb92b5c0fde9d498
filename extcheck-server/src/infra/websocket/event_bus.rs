use std::sync::atomic::{AtomicU64, Ordering};

use extcheck_contracts::ExtensionBroadcast;
use extcheck_core::ChangeNotifier;
use tokio::sync::broadcast;
use tracing::trace;

/// One published change, numbered in publish order.
#[derive(Debug, Clone)]
pub struct ExtensionEventFrame {
    pub sequence: u64,
    pub event: ExtensionBroadcast,
}

/// In-process fan-out of extension changes.
///
/// Publishing never blocks. Subscribers that fall more than `capacity`
/// frames behind lose the oldest frames.
#[derive(Debug)]
pub struct ExtensionEventBus {
    tx: broadcast::Sender<ExtensionEventFrame>,
    sequence: AtomicU64,
}

impl ExtensionEventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            sequence: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ExtensionEventFrame> {
        self.tx.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn send(&self, event: ExtensionBroadcast) -> ExtensionEventFrame {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let frame = ExtensionEventFrame { sequence, event };

        // no subscribers is fine
        if self.tx.send(frame.clone()).is_err() {
            trace!(sequence, "extension event published without subscribers");
        }
        frame
    }
}

impl ChangeNotifier for ExtensionEventBus {
    fn publish(&self, message: ExtensionBroadcast) {
        self.send(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extcheck_contracts::ExtensionListResponse;

    #[tokio::test]
    async fn subscribers_receive_frames_in_order() {
        let bus = ExtensionEventBus::new(8);
        let mut rx = bus.subscribe();

        bus.publish(ExtensionBroadcast::Full(ExtensionListResponse::default()));
        bus.publish(ExtensionBroadcast::Delta {
            fixed_added: vec!["exe".into()],
            fixed_removed: vec![],
        });

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.sequence, 1);
        assert_eq!(first.event.kind(), "full");
        assert_eq!(second.sequence, 2);
        assert_eq!(second.event.kind(), "delta");
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = ExtensionEventBus::new(1);
        let frame = bus.send(ExtensionBroadcast::Full(
            ExtensionListResponse::default(),
        ));
        assert_eq!(frame.sequence, 1);
        assert_eq!(bus.receiver_count(), 0);
    }

    #[tokio::test]
    async fn slow_subscribers_lag_instead_of_blocking() {
        use tokio::sync::broadcast::error::RecvError;

        let bus = ExtensionEventBus::new(2);
        let mut rx = bus.subscribe();
        for _ in 0..5 {
            bus.publish(ExtensionBroadcast::Full(
                ExtensionListResponse::default(),
            ));
        }

        assert!(matches!(rx.recv().await, Err(RecvError::Lagged(3))));
        assert_eq!(rx.recv().await.unwrap().sequence, 4);
    }
}
