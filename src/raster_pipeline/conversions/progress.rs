//! Progress reporting and cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Receives integer percentage milestones from a running pipeline call.
///
/// Calls arrive synchronously, on the pipeline's thread, in non-decreasing
/// order. `is_cancelled` is polled before each stage.
pub trait ProgressSink {
    fn report(&self, percent: u8);

    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F: Fn(u8)> ProgressSink for F {
    fn report(&self, percent: u8) {
        self(percent)
    }
}

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl ProgressSink for CancellationToken {
    fn report(&self, _percent: u8) {}

    fn is_cancelled(&self) -> bool {
        CancellationToken::is_cancelled(self)
    }
}

/// A progress sink paired with a cancellation token.
pub struct Cancellable<S> {
    sink: S,
    token: CancellationToken,
}

impl<S: ProgressSink> Cancellable<S> {
    pub fn new(sink: S, token: CancellationToken) -> Self {
        Self { sink, token }
    }
}

impl<S: ProgressSink> ProgressSink for Cancellable<S> {
    fn report(&self, percent: u8) {
        self.sink.report(percent);
    }

    fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
