//=========================================================================
// Initialization Lifecycle
//=========================================================================
//
// Shared state machine behind asynchronous debug-service initialization.
//
//   Uninitialized ──begin()──> Initializing ──finish(Ok)──> Initialized
//         ↑                        │
//         └──── (retry) ── Failed <┘ finish(Err)
//
// The worker thread owns one `Arc<Lifecycle>`; every `InitHandle` handed
// out by `init()` holds another and blocks on the condvar until the phase
// leaves `Initializing`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

//=== Internal Dependencies ===============================================

use super::DebugError;

//=== Phase ===============================================================

/// Initialization phase of a debug service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Phase {
    Uninitialized,
    Initializing,
    Initialized,
    /// Last attempt failed; `init()` may be called again.
    Failed(DebugError),
}

//=== Lifecycle ===========================================================

/// Thread-safe phase cell with completion notification.
#[derive(Debug)]
pub(crate) struct Lifecycle {
    phase: Mutex<Phase>,
    changed: Condvar,
}

impl Lifecycle {
    /// Creates a lifecycle in the `Uninitialized` phase.
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            phase: Mutex::new(Phase::Uninitialized),
            changed: Condvar::new(),
        })
    }

    /// Returns the current phase.
    pub(crate) fn phase(&self) -> Phase {
        self.lock().clone()
    }

    /// Moves `Uninitialized`/`Failed` to `Initializing`.
    ///
    /// Returns `false` if an attempt is already running or has succeeded,
    /// in which case the caller must not start another one.
    pub(crate) fn begin(&self) -> bool {
        let mut phase = self.lock();
        match *phase {
            Phase::Initializing | Phase::Initialized => false,
            Phase::Uninitialized | Phase::Failed(_) => {
                *phase = Phase::Initializing;
                true
            }
        }
    }

    /// Records the outcome of the running attempt and wakes all waiters.
    pub(crate) fn finish(&self, result: Result<(), DebugError>) {
        let mut phase = self.lock();
        *phase = match result {
            Ok(()) => Phase::Initialized,
            Err(e) => Phase::Failed(e),
        };
        self.changed.notify_all();
    }

    /// Returns a completion handle observing this lifecycle.
    pub(crate) fn handle(self: &Arc<Self>) -> InitHandle {
        InitHandle {
            lifecycle: Arc::clone(self),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Phase> {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

//=== FinishGuard =========================================================

/// Completes a lifecycle with [`DebugError::WorkerLost`] if dropped before
/// [`complete`](Self::complete) is called (e.g. the worker panicked).
pub(crate) struct FinishGuard {
    lifecycle: Arc<Lifecycle>,
    done: bool,
}

impl FinishGuard {
    pub(crate) fn new(lifecycle: Arc<Lifecycle>) -> Self {
        Self {
            lifecycle,
            done: false,
        }
    }

    pub(crate) fn complete(mut self, result: Result<(), DebugError>) {
        self.done = true;
        self.lifecycle.finish(result);
    }
}

impl Drop for FinishGuard {
    fn drop(&mut self) {
        if !self.done {
            self.lifecycle.finish(Err(DebugError::WorkerLost));
        }
    }
}

//=== InitHandle ==========================================================

/// Awaitable completion of a debug service's `init()`.
///
/// Handles are cheap to clone; every clone observes the same attempt.
/// The phase cell behind a handle stays private to the engine:
///
/// ```compile_fail
/// use lumen_engine::core::debug::Lifecycle;
/// ```
#[derive(Debug, Clone)]
pub struct InitHandle {
    lifecycle: Arc<Lifecycle>,
}

impl InitHandle {
    /// Returns `true` once the attempt has succeeded or failed.
    pub fn is_complete(&self) -> bool {
        !matches!(self.lifecycle.phase(), Phase::Initializing)
    }

    /// Returns the outcome without blocking, or `None` while still running.
    pub fn try_result(&self) -> Option<Result<(), DebugError>> {
        Self::outcome(&self.lifecycle.lock())
    }

    /// Blocks until the attempt completes.
    pub fn wait(&self) -> Result<(), DebugError> {
        let mut phase = self.lifecycle.lock();
        loop {
            if let Some(result) = Self::outcome(&phase) {
                return result;
            }
            phase = self
                .lifecycle
                .changed
                .wait(phase)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Blocks until the attempt completes or `timeout` elapses.
    ///
    /// Returns `None` on timeout.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Result<(), DebugError>> {
        let deadline = Instant::now() + timeout;
        let mut phase = self.lifecycle.lock();
        loop {
            if let Some(result) = Self::outcome(&phase) {
                return Some(result);
            }
            let remaining = deadline.checked_duration_since(Instant::now())?;
            phase = self
                .lifecycle
                .changed
                .wait_timeout(phase, remaining)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    fn outcome(phase: &Phase) -> Option<Result<(), DebugError>> {
        match phase {
            Phase::Initializing => None,
            Phase::Initialized => Some(Ok(())),
            Phase::Failed(e) => Some(Err(e.clone())),
            Phase::Uninitialized => Some(Err(DebugError::NotInitialized)),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn starts_uninitialized() {
        let lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.phase(), Phase::Uninitialized);
    }

    #[test]
    fn begin_only_once_while_running() {
        let lifecycle = Lifecycle::new();
        assert!(lifecycle.begin());
        assert!(!lifecycle.begin());
        assert_eq!(lifecycle.phase(), Phase::Initializing);
    }

    #[test]
    fn begin_refused_after_success() {
        let lifecycle = Lifecycle::new();
        lifecycle.begin();
        lifecycle.finish(Ok(()));
        assert!(!lifecycle.begin());
        assert_eq!(lifecycle.phase(), Phase::Initialized);
    }

    #[test]
    fn begin_allowed_after_failure() {
        let lifecycle = Lifecycle::new();
        lifecycle.begin();
        lifecycle.finish(Err(DebugError::WorkerLost));
        assert!(lifecycle.begin());
    }

    #[test]
    fn handle_pending_until_finish() {
        let lifecycle = Lifecycle::new();
        lifecycle.begin();
        let handle = lifecycle.handle();

        assert!(!handle.is_complete());
        assert_eq!(handle.try_result(), None);
        assert_eq!(handle.wait_timeout(Duration::from_millis(10)), None);

        lifecycle.finish(Ok(()));
        assert!(handle.is_complete());
        assert_eq!(handle.try_result(), Some(Ok(())));
    }

    #[test]
    fn wait_wakes_on_other_thread_finish() {
        let lifecycle = Lifecycle::new();
        lifecycle.begin();
        let handle = lifecycle.handle();

        let worker = Arc::clone(&lifecycle);
        let join = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            worker.finish(Ok(()));
        });

        assert_eq!(handle.wait(), Ok(()));
        join.join().unwrap();
    }

    #[test]
    fn all_clones_see_failure() {
        let lifecycle = Lifecycle::new();
        lifecycle.begin();
        let a = lifecycle.handle();
        let b = a.clone();

        lifecycle.finish(Err(DebugError::NotInitialized));

        assert_eq!(a.wait(), Err(DebugError::NotInitialized));
        assert_eq!(b.wait(), Err(DebugError::NotInitialized));
    }

    #[test]
    fn dropped_guard_reports_worker_lost() {
        let lifecycle = Lifecycle::new();
        lifecycle.begin();
        let handle = lifecycle.handle();

        let guard = FinishGuard::new(Arc::clone(&lifecycle));
        let _ = thread::spawn(move || {
            let _guard = guard;
            panic!("worker crashed");
        })
        .join();

        assert_eq!(handle.wait(), Err(DebugError::WorkerLost));
    }

    #[test]
    fn completed_guard_reports_result() {
        let lifecycle = Lifecycle::new();
        lifecycle.begin();
        FinishGuard::new(Arc::clone(&lifecycle)).complete(Ok(()));
        assert_eq!(lifecycle.phase(), Phase::Initialized);
    }
}
