//! Toast fan-out to whatever UI surface subscribes.

use studio_core::ports::NotificationPort;
use studio_core::{Toast, ToastLevel};
use tokio::sync::broadcast;
use tracing::{info, warn};

const TOAST_CAPACITY: usize = 64;

/// Broadcasts toasts to subscribers and records them in the log.
///
/// Toasts sent while nobody listens are dropped; they are transient by nature.
pub struct BroadcastNotifier {
    sender: broadcast::Sender<Toast>,
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastNotifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(TOAST_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.sender.subscribe()
    }
}

impl NotificationPort for BroadcastNotifier {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Error | ToastLevel::Warning => {
                warn!(title = %toast.title, message = ?toast.message, "toast")
            }
            ToastLevel::Info | ToastLevel::Success => info!(title = %toast.title, "toast"),
        }
        // Err only means no subscriber right now.
        let _ = self.sender.send(toast);
    }
}
