use crate::notification::Toast;

/// Transient toast messages shown by the UI.
pub trait NotificationPort: Send + Sync {
    fn notify(&self, toast: Toast);
}
