//! Debounced live search.
//!
//! Raw queries flow through three stages before they reach the record client:
//! [`Debounce`] (quiet window) → [`DistinctUntilChanged`] (skip repeats) →
//! [`LatestWins`] (abort superseded searches). Each accepted query produces
//! exactly one result emission; emissions of superseded queries never appear.

mod debounce;
mod distinct;
mod latest;

pub use debounce::Debounce;
pub use distinct::DistinctUntilChanged;
pub use latest::LatestWins;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::Instant;

use crate::hero::Hero;
use crate::service::HeroService;

/// Quiet window used when the configuration does not set one.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

const RESULTS_CAPACITY: usize = 16;

/// Live search component: feed it every keystroke with [`submit`](Self::submit),
/// read results from any number of [`ResultStream`]s.
///
/// Must be created inside a tokio runtime. Dropping it stops the pipeline and
/// aborts the in-flight search; [`close`](Self::close) finishes gracefully instead.
pub struct HeroSearch {
    terms: Option<mpsc::UnboundedSender<(Instant, String)>>,
    results: broadcast::Sender<Vec<Hero>>,
    pipeline: Option<JoinHandle<()>>,
}

impl HeroSearch {
    pub fn spawn(service: Arc<HeroService>, window: Duration) -> Self {
        let (terms_tx, terms_rx) = mpsc::unbounded_channel();
        let (results_tx, _) = broadcast::channel(RESULTS_CAPACITY);
        let pipeline = tokio::spawn(run_pipeline(
            service,
            window,
            terms_rx,
            results_tx.clone(),
        ));
        Self {
            terms: Some(terms_tx),
            results: results_tx,
            pipeline: Some(pipeline),
        }
    }

    /// Queues a raw query. Never blocks.
    pub fn submit(&self, query: impl Into<String>) {
        let sent = match &self.terms {
            Some(terms) => terms.send((Instant::now(), query.into())).is_ok(),
            None => false,
        };
        if !sent {
            tracing::warn!("search pipeline stopped; query dropped");
        }
    }

    /// New subscriber; sees emissions produced after this call.
    pub fn results(&self) -> ResultStream {
        ResultStream {
            rx: self.results.subscribe(),
        }
    }

    /// Ends input: the pending query is searched without waiting out the window,
    /// the last search is allowed to finish and emit, then every stream closes.
    pub async fn close(mut self) {
        self.terms.take();
        if let Some(pipeline) = self.pipeline.take() {
            if let Err(e) = pipeline.await {
                tracing::warn!("search pipeline failed: {}", e);
            }
        }
    }
}

impl Drop for HeroSearch {
    fn drop(&mut self) {
        if let Some(pipeline) = self.pipeline.take() {
            pipeline.abort();
        }
    }
}

/// One subscriber's view of the result emissions.
pub struct ResultStream {
    rx: broadcast::Receiver<Vec<Hero>>,
}

impl ResultStream {
    /// Next result set. `None` only once the owning [`HeroSearch`] is gone.
    pub async fn next(&mut self) -> Option<Vec<Hero>> {
        loop {
            match self.rx.recv().await {
                Ok(heroes) => return Some(heroes),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "result subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

async fn run_pipeline(
    service: Arc<HeroService>,
    window: Duration,
    mut terms: mpsc::UnboundedReceiver<(Instant, String)>,
    results: broadcast::Sender<Vec<Hero>>,
) {
    let mut debounce = Debounce::new(window);
    let mut distinct = DistinctUntilChanged::new();
    let mut latest = LatestWins::new();

    loop {
        // Queued terms first, so a query already superseded in the queue is never released.
        tokio::select! {
            biased;

            term = terms.recv() => match term {
                Some((at, query)) => debounce.push(query, at),
                None => {
                    if let Some(query) = debounce.flush() {
                        forward(&service, &mut distinct, &mut latest, query);
                    }
                    if !latest.is_idle() {
                        emit(&results, latest.next().await);
                    }
                    break;
                }
            },

            query = debounce.ready() => forward(&service, &mut distinct, &mut latest, query),

            outcome = latest.next() => emit(&results, outcome),
        }
    }

    tracing::debug!("search pipeline stopped");
}

/// Starts a search for `query` unless it repeats the last forwarded one.
fn forward(
    service: &Arc<HeroService>,
    distinct: &mut DistinctUntilChanged<String>,
    latest: &mut LatestWins<Vec<Hero>>,
    query: String,
) {
    let Some(query) = distinct.accept(query) else {
        tracing::trace!("query unchanged; not searching");
        return;
    };
    tracing::debug!(query = %query, "forwarding query");
    let service = Arc::clone(service);
    if latest.dispatch(async move { service.search(&query).await }) {
        tracing::debug!("superseded in-flight search");
    }
}

fn emit(results: &broadcast::Sender<Vec<Hero>>, outcome: Result<Vec<Hero>, JoinError>) {
    let heroes = outcome.unwrap_or_else(|e| {
        tracing::warn!("search task failed: {}", e);
        Vec::new()
    });
    // No subscribers is fine; the emission is simply not observed.
    let _ = results.send(heroes);
}
