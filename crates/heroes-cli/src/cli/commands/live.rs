//! `heroes live` – stdin-driven debounced search.

use anyhow::{Context, Result};
use heroes_core::{HeroSearch, HeroService};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::{print_messages, write_heroes};

/// Counts for one live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LiveStats {
    submitted: usize,
    emissions: usize,
}

pub async fn run_live(service: Arc<HeroService>, window: Duration) -> Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    let stats = run_live_with(service, window, input, io::stdout()).await?;
    tracing::info!(
        "live search finished: {} queries typed, {} result sets",
        stats.submitted,
        stats.emissions
    );
    Ok(())
}

/// Submits every line of `input` and writes each result set to `out`. Service
/// messages are shown (on stderr) after the result set they belong to. Returns
/// once `input` ends and the last query's results are written.
pub(crate) async fn run_live_with<R, W>(
    service: Arc<HeroService>,
    window: Duration,
    input: R,
    mut out: W,
) -> Result<LiveStats>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send + 'static,
{
    let messages = service.messages().clone();
    let search = HeroSearch::spawn(service, window);
    let mut results = search.results();
    let printer = tokio::spawn(async move {
        let mut emissions = 0usize;
        while let Some(heroes) = results.next().await {
            writeln!(out, "--")?;
            write_heroes(&mut out, &heroes)?;
            out.flush()?;
            print_messages(&messages);
            emissions += 1;
        }
        Ok::<_, io::Error>(emissions)
    });

    let mut lines = input.lines();
    let mut submitted = 0usize;
    while let Some(line) = lines.next_line().await.context("read input")? {
        search.submit(line);
        submitted += 1;
    }

    // EOF: search whatever was typed last and wait for its results.
    search.close().await;
    let emissions = printer
        .await
        .context("result printer")?
        .context("write results")?;
    Ok(LiveStats {
        submitted,
        emissions,
    })
}
