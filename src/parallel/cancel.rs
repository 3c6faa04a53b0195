use std::sync::atomic::{AtomicBool, Ordering};

/// One-shot stop signal shared by reference across a worker pool.
///
/// Once raised it stays raised. Workers poll it at their own pace, so a
/// raise is observed at the next poll point rather than preemptively.
#[derive(Debug, Default)]
pub struct CancellationToken {
    raised: AtomicBool,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the signal. Returns `true` only for the call that actually
    /// raised it; every later call is a no-op returning `false`.
    pub fn cancel(&self) -> bool {
        self.raised
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_cancelled(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}
