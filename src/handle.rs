//! One-shot stop handle for the background sampling task.

use tokio_util::sync::CancellationToken;

/// Cancellation handle returned by [`start_sampling`](crate::start_sampling).
///
/// Cloneable; any clone may signal, and all clones observe the same stop
/// state. Signaling is idempotent: exactly one stop is ever delivered to the
/// sampling task, no matter how many times or from how many threads
/// [`signal`](Self::signal) is called.
#[derive(Clone, Debug)]
pub struct StopHandle {
    /// Shared cancellation token, also watched by the sampling task.
    token: CancellationToken,
}

impl StopHandle {
    pub(crate) fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Token clone handed to the sampling task.
    pub(crate) fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Stop the background sampling task.
    ///
    /// Cancellation is cooperative: an in-flight tick finishes, but no new
    /// tick starts once the signal has been observed. Never blocks, never
    /// fails.
    pub fn signal(&self) {
        self.token.cancel();
    }

    /// Whether this handle has already been signaled.
    #[must_use]
    pub fn is_signaled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Repeated signaling is a no-op after the first call.
    #[test]
    fn signal_is_idempotent() {
        let handle = StopHandle::new();
        assert!(!handle.is_signaled());
        for _ in 0..10 {
            handle.signal();
        }
        assert!(handle.is_signaled());
    }

    /// Concurrent signaling from many threads never faults.
    #[test]
    fn signal_from_many_threads() {
        let handle = StopHandle::new();
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let handle = handle.clone();
                std::thread::spawn(move || handle.signal())
            })
            .collect();
        for thread in threads {
            thread.join().unwrap();
        }
        assert!(handle.is_signaled());
    }

    /// Clones observe a signal sent through any one of them.
    #[test]
    fn clones_share_state() {
        let handle = StopHandle::new();
        let clone = handle.clone();
        clone.signal();
        assert!(handle.is_signaled());
    }
}
