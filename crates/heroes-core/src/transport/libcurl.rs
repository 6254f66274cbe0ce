//! libcurl-backed transport.
//!
//! Each request uses its own easy handle on tokio's blocking pool. Dropping the
//! returned future raises a cancel flag that the progress callback checks, so
//! libcurl abandons the transfer (within about a second when the server is idle).

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::{Method, Request, Transport, TransportError};

/// Production [`Transport`] built on the `curl` crate.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    timeout: Option<Duration>,
}

impl CurlTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whole-request timeout. `None` (the default) leaves libcurl's own defaults.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Transport for CurlTransport {
    async fn send(&self, request: Request) -> Result<Vec<u8>, TransportError> {
        let timeout = self.timeout;
        let cancel = CancelOnDrop::default();
        let cancelled = Arc::clone(&cancel.0);
        tokio::task::spawn_blocking(move || perform(&request, timeout, &cancelled))
            .await
            .map_err(|e| TransportError::Task(e.to_string()))?
    }
}

/// Raises the shared flag when the owning `send` future goes away, whether it
/// finished or was dropped mid-transfer.
#[derive(Default)]
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Runs one request to completion in the current thread, or until `cancelled`
/// is raised.
fn perform(
    request: &Request,
    timeout: Option<Duration>,
    cancelled: &AtomicBool,
) -> Result<Vec<u8>, TransportError> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(&request.url)?;
    easy.follow_location(true)?;
    if let Some(t) = timeout {
        easy.timeout(t)?;
    }

    match request.method {
        Method::Get => easy.get(true)?,
        Method::Post => easy.post(true)?,
        Method::Put | Method::Delete => easy.custom_request(request.method.as_str())?,
    }

    let mut list = curl::easy::List::new();
    list.append("Accept: application/json")?;
    if let Some(payload) = &request.body {
        list.append("Content-Type: application/json")?;
        // COPYPOSTFIELDS; CUSTOMREQUEST above keeps the verb for PUT.
        easy.post_fields_copy(payload)?;
    }
    easy.http_headers(list)?;
    easy.progress(true)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.progress_function(|_, _, _, _| !cancelled.load(Ordering::Relaxed))?;
        if let Err(e) = transfer.perform() {
            if e.is_aborted_by_callback() {
                tracing::debug!(method = %request.method, url = %request.url, "request cancelled");
            }
            return Err(e.into());
        }
    }

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        return Err(TransportError::Status {
            method: request.method,
            url: request.url.clone(),
            status,
        });
    }

    tracing::debug!(
        method = %request.method,
        url = %request.url,
        status,
        bytes = body.len(),
        "request completed"
    );
    Ok(body)
}
