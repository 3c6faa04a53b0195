use crossbeam::channel::{Receiver, Sender, bounded};
use tracing::{debug, trace};

use super::cancel::CancellationToken;
use crate::error::{CrackError, Result};

/// Resolve the worker count: the configured value, or one worker per logical
/// CPU (`cpu_count`) when the configuration leaves it at 0.
pub fn resolve_workers(configured: usize, cpu_count: usize) -> usize {
    if configured > 0 {
        configured
    } else {
        cpu_count.max(1)
    }
}

/// Fixed-size set of scoped worker threads sharing one cancellation token.
///
/// Each worker owns exactly one assignment for its whole life. The first
/// worker that reports a result and wins the race to raise the token is the
/// only one whose result comes back; everyone else stops at their next poll.
pub struct WorkerPool<'a> {
    workers: usize,
    cancel: &'a CancellationToken,
    label: &'static str,
}

impl<'a> WorkerPool<'a> {
    pub fn new(workers: usize, cancel: &'a CancellationToken, label: &'static str) -> Self {
        Self {
            workers: workers.max(1),
            cancel,
            label,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run one worker per assignment and block until all of them return.
    ///
    /// `worker_fn` receives the worker id, its assignment and the shared token.
    /// Returns the winning result, or `None` when every worker ran out of work
    /// (or stopped because the token was raised from outside).
    pub fn run<A, R, F>(&self, assignments: Vec<A>, worker_fn: F) -> Result<Option<R>>
    where
        A: Send,
        R: Send,
        F: Fn(usize, A, &CancellationToken) -> Option<R> + Sync,
    {
        if assignments.is_empty() {
            return Ok(None);
        }
        debug_assert!(assignments.len() <= self.workers);
        debug!(
            pool = self.label,
            workers = assignments.len(),
            "starting worker batch"
        );

        // A single slot is enough: only the worker that raises the token sends.
        let (result_tx, result_rx): (Sender<R>, Receiver<R>) = bounded(1);
        let worker_fn = &worker_fn;
        let cancel = self.cancel;

        crossbeam::thread::scope(|s| {
            for (worker_id, assignment) in assignments.into_iter().enumerate() {
                let result_tx = result_tx.clone();

                s.spawn(move |_| {
                    let _guard = PanicGuard { cancel };
                    let Some(result) = worker_fn(worker_id, assignment, cancel) else {
                        trace!(worker_id, "worker finished without a match");
                        return;
                    };

                    if cancel.cancel() {
                        let _ = result_tx.send(result);
                    } else {
                        debug!(worker_id, "match dropped, search was already stopped");
                    }
                });
            }

            // Drop our own sender so the receiver only sees worker sends
            drop(result_tx);
        })
        .map_err(|_| CrackError::WorkerPanic(self.label))?;

        Ok(result_rx.try_recv().ok())
    }
}

/// Raises the token when a worker unwinds, so its siblings stop and the
/// scope can join and report the panic.
struct PanicGuard<'a> {
    cancel: &'a CancellationToken,
}

impl Drop for PanicGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.cancel.cancel();
        }
    }
}
