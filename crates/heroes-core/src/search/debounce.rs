//! Timer-gated buffer: releases an item once no newer one arrived for a window.

use std::time::Duration;
use tokio::time::Instant;

pub struct Debounce<T> {
    window: Duration,
    /// Latest item and the instant it becomes final.
    pending: Option<(T, Instant)>,
}

impl<T> Debounce<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Buffers `item` submitted at `at`, replacing any pending item and restarting the window.
    pub fn push(&mut self, item: T, at: Instant) {
        self.pending = Some((item, at + self.window));
    }

    /// Releases the pending item immediately, ignoring its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(item, _)| item)
    }

    /// Resolves with the pending item once its window has passed.
    /// Never resolves while nothing is pending. Cancel-safe.
    pub async fn ready(&mut self) -> T {
        let deadline = match &self.pending {
            Some((_, deadline)) => *deadline,
            None => return std::future::pending().await,
        };
        tokio::time::sleep_until(deadline).await;
        match self.pending.take() {
            Some((item, _)) => item,
            None => std::future::pending().await,
        }
    }
}
