// src/checker/dispatch.rs
// =============================================================================
// The dispatcher: runs one probe per URL with at most K in flight.
//
// How it works:
// 1. Create an admission gate (a tokio Semaphore with K permits) that lives
//    only as long as this call, so two batches never share capacity
// 2. Spawn one task per URL onto the process-wide tokio runtime
// 3. Each task waits for a permit, probes, and drops the permit (on every
//    exit path, because dropping the guard releases it)
// 4. Join every task before returning. Results come back in completion
//    order, not input order
//
// Cancellation: if the CancellationToken fires, tasks still waiting for a
// permit give up, in-flight probes are dropped, and the call returns
// CheckError::BatchAborted.
// =============================================================================

use super::http::Probe;
use super::outcome::{Outcome, ProbeResult};
use crate::error::CheckError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub struct Dispatcher {
    prober: Arc<dyn Probe>,
    concurrency: usize,
}

impl Dispatcher {
    /// `concurrency` is clamped to at least 1.
    pub fn new(prober: Arc<dyn Probe>, concurrency: usize) -> Self {
        Self {
            prober,
            concurrency: concurrency.max(1),
        }
    }

    /// Probe every URL, returning exactly one result per URL.
    ///
    /// URLs are expected to be deduplicated already; duplicates are probed
    /// (and reported) once per occurrence.
    pub async fn dispatch(
        &self,
        urls: Vec<String>,
        cancel: &CancellationToken,
    ) -> Result<Vec<ProbeResult>, CheckError> {
        let total = urls.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let gate = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();
        // Which URL each task is probing, so a panicked task is still reported
        let mut pending = HashMap::with_capacity(total);

        for url in urls {
            let gate = Arc::clone(&gate);
            let prober = Arc::clone(&self.prober);
            let cancel = cancel.clone();
            let task_url = url.clone();

            let handle = tasks.spawn(async move {
                let _permit = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return None,
                    permit = gate.acquire_owned() => permit.ok()?,
                };
                debug!(url = %task_url, "admitted");

                let outcome = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return None,
                    outcome = prober.probe(&task_url) => outcome,
                };
                Some(ProbeResult::new(task_url, outcome))
            });
            pending.insert(handle.id(), url);
        }

        let mut results = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, Some(result))) => {
                    pending.remove(&id);
                    results.push(result);
                }
                // Cancelled before it produced anything
                Ok((id, None)) => {
                    pending.remove(&id);
                }
                Err(e) => {
                    let Some(url) = pending.remove(&e.id()) else {
                        continue;
                    };
                    if e.is_cancelled() {
                        continue;
                    }
                    warn!(%url, error = %e, "probe task failed");
                    results.push(ProbeResult::new(
                        url,
                        Outcome::NetworkError(format!("probe task failed: {}", e)),
                    ));
                }
            }
        }

        if cancel.is_cancelled() && results.len() < total {
            warn!(completed = results.len(), total, "batch aborted");
            return Err(CheckError::BatchAborted {
                completed: results.len(),
                total,
            });
        }

        Ok(results)
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a Semaphore and not buffer_unordered(K)?
//    - Both cap concurrency, but the permit makes the cap explicit: a probe
//      holds one for exactly as long as it talks to the network
//    - The gate is created inside dispatch(), never a global
//
// 2. Why spawn instead of just awaiting futures?
//    - Spawned tasks run on every worker thread of the runtime
//    - A panic in one task is caught by the JoinSet instead of unwinding
//      through the whole batch
//
// 3. What is `biased;` in tokio::select!?
//    - Branches are polled top to bottom instead of randomly, so a
//      cancelled batch never starts one more probe
// -----------------------------------------------------------------------------
