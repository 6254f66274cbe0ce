//! Scripted in-memory transport for unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::{Method, Request, Transport, TransportError};

struct Route {
    outcome: Result<Vec<u8>, u32>,
    delay: Duration,
}

/// Answers requests from a (method, url) table; unknown routes get HTTP 404.
/// Every request is recorded before the (optional) delay.
#[derive(Default)]
pub(crate) struct FakeTransport {
    routes: Mutex<HashMap<(Method, String), Route>>,
    requests: Mutex<Vec<Request>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, method: Method, url: &str, json: &str) {
        self.respond_after(method, url, json, Duration::ZERO);
    }

    pub(crate) fn respond_after(&self, method: Method, url: &str, json: &str, delay: Duration) {
        self.insert(method, url, Ok(json.as_bytes().to_vec()), delay);
    }

    pub(crate) fn fail(&self, method: Method, url: &str, status: u32) {
        self.fail_after(method, url, status, Duration::ZERO);
    }

    pub(crate) fn fail_after(&self, method: Method, url: &str, status: u32, delay: Duration) {
        self.insert(method, url, Err(status), delay);
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    fn insert(&self, method: Method, url: &str, outcome: Result<Vec<u8>, u32>, delay: Duration) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, url.to_string()), Route { outcome, delay });
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: Request) -> Result<Vec<u8>, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        let (outcome, delay) = {
            let routes = self.routes.lock().unwrap();
            match routes.get(&(request.method, request.url.clone())) {
                Some(route) => (route.outcome.clone(), route.delay),
                None => (Err(404), Duration::ZERO),
            }
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        outcome.map_err(|status| TransportError::Status {
            method: request.method,
            url: request.url,
            status,
        })
    }
}
