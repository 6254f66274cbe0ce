//! Cancel-on-supersede dispatcher: at most one task in flight, newest wins.

use std::future::Future;
use tokio::task::{JoinError, JoinHandle};

pub struct LatestWins<T> {
    in_flight: Option<JoinHandle<T>>,
}

impl<T: Send + 'static> LatestWins<T> {
    pub fn new() -> Self {
        Self { in_flight: None }
    }

    /// Spawns `task`, aborting the previous one if it has not been collected yet.
    /// Returns true when a previous task was superseded.
    pub fn dispatch<F>(&mut self, task: F) -> bool
    where
        F: Future<Output = T> + Send + 'static,
    {
        let superseded = match self.in_flight.take() {
            Some(previous) => {
                previous.abort();
                true
            }
            None => false,
        };
        self.in_flight = Some(tokio::spawn(task));
        superseded
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none()
    }

    /// Resolves with the outcome of the current task. Never resolves when idle.
    /// Cancel-safe.
    pub async fn next(&mut self) -> Result<T, JoinError> {
        let outcome = match self.in_flight.as_mut() {
            Some(handle) => handle.await,
            None => return std::future::pending().await,
        };
        self.in_flight = None;
        outcome
    }
}

impl<T: Send + 'static> Default for LatestWins<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LatestWins<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
