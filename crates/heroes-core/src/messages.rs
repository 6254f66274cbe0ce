//! Append-only message log shown to the user alongside results.

use std::sync::{Arc, Mutex, MutexGuard};

/// Shared, append-only list of user-facing messages.
///
/// Clones share the same underlying list, so the service and the UI can hold
/// their own handles.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, message: impl Into<String>) {
        self.lock().push(message.into());
    }

    /// Snapshot of all messages in insertion order.
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Takes every message logged so far, leaving the log empty. Lets a UI show
    /// each message once while the service keeps logging.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    // A writer that panicked mid-push leaves the Vec intact; keep using it.
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
