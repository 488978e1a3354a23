//! Control channel hub
//!
//! Broadcast pub/sub for control participants. A join activates the feed
//! and a leave deactivates it; accepted messages fan out to every
//! participant, the sender included. The hub never touches the device
//! lock; its only coupling to streaming is the session's activity flag.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::session::CameraSession;

/// Central hub for all control participants
pub struct ControlHub {
    session: Arc<CameraSession>,
    tx: broadcast::Sender<String>,
    participants: AtomicU32,
}

impl ControlHub {
    /// Create a hub with the given broadcast capacity
    pub fn new(session: Arc<CameraSession>, capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);

        Self {
            session,
            tx,
            participants: AtomicU32::new(0),
        }
    }

    /// Register a participant and activate the feed
    pub fn join(self: &Arc<Self>) -> ControlPeer {
        let count = self.participants.fetch_add(1, Ordering::Relaxed) + 1;
        self.session.set_active(true);

        tracing::info!(participants = count, "Control peer joined, feed activated");

        ControlPeer {
            rx: self.tx.subscribe(),
            hub: Arc::clone(self),
        }
    }

    /// Number of currently registered participants
    pub fn participant_count(&self) -> u32 {
        self.participants.load(Ordering::Relaxed)
    }

    /// Relay a message to every participant, including the sender
    ///
    /// Empty messages are dropped. Returns how many receivers got it.
    pub fn broadcast(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }

        match self.tx.send(text.to_string()) {
            Ok(receivers) => {
                tracing::debug!(receivers, len = text.len(), "Command relayed");
                receivers
            }
            Err(_) => 0,
        }
    }

    fn leave(&self) {
        let remaining = self.participants.fetch_sub(1, Ordering::Relaxed) - 1;
        self.session.set_active(false);

        tracing::info!(
            participants = remaining,
            "Control peer left, feed deactivated"
        );
    }
}

/// One registered control participant
///
/// Dropping the peer unregisters it and deactivates the feed, mirroring a
/// transport-level disconnect.
pub struct ControlPeer {
    hub: Arc<ControlHub>,
    rx: broadcast::Receiver<String>,
}

impl ControlPeer {
    /// Relay a message through the hub
    pub fn broadcast(&self, text: &str) -> usize {
        self.hub.broadcast(text)
    }

    /// Stop the feed on behalf of this peer
    ///
    /// Nothing is broadcast; the transport answers the requester directly.
    pub fn request_disconnect(&self) {
        self.hub.session.set_active(false);
        tracing::info!("Disconnect requested, feed deactivated");
    }

    /// Receive the next relayed message
    ///
    /// `None` once the hub is gone. A lagging peer skips what it missed
    /// and keeps receiving.
    pub async fn recv(&mut self) -> Option<String> {
        loop {
            match self.rx.recv().await {
                Ok(message) => return Some(message),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Control peer lagging, messages dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Receive without waiting; `None` when nothing is pending
    pub fn try_recv(&mut self) -> Option<String> {
        loop {
            match self.rx.try_recv() {
                Ok(message) => return Some(message),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Control peer lagging, messages dropped");
                }
                Err(_) => return None,
            }
        }
    }
}

impl Drop for ControlPeer {
    fn drop(&mut self) {
        self.hub.leave();
    }
}
