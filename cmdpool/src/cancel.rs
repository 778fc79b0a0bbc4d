use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio_util::sync::CancellationToken;

/// A broadcast flag shared by every stage of a run.
///
/// The signal starts open and may only ever move to closed. Every clone
/// observes the same state.
#[derive(Clone, Debug, Default)]
pub struct CancelSignal {
    token: CancellationToken,
    // close guard: `cancel()` does not say which caller closed the token
    closed: Arc<AtomicBool>,
}

impl CancelSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the signal. Returns `true` only for the call that performed the close.
    pub fn close(&self) -> bool {
        if self.closed.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.token.cancel();
        true
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the signal is closed.
    pub async fn closed(&self) {
        self.token.cancelled().await
    }

    /// Returns a guard that closes the signal when dropped.
    pub fn close_on_drop(&self) -> CloseGuard {
        CloseGuard {
            signal: self.clone(),
        }
    }
}

pub struct CloseGuard {
    signal: CancelSignal,
}

impl Drop for CloseGuard {
    fn drop(&mut self) {
        self.signal.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn closes_exactly_once() {
        let signal = CancelSignal::new();
        let other = signal.clone();
        assert!(!other.is_closed());
        assert!(signal.close());
        assert!(!other.close());
        assert!(other.is_closed());
    }

    #[test]
    fn guard_closes_on_drop() {
        let signal = CancelSignal::new();
        {
            let _guard = signal.close_on_drop();
            assert!(!signal.is_closed());
        }
        assert!(signal.is_closed());
    }

    #[tokio::test]
    async fn wakes_every_listener() {
        let signal = CancelSignal::new();
        let listeners: Vec<_> = (0..3)
            .map(|_| {
                let signal = signal.clone();
                tokio::spawn(async move { signal.closed().await })
            })
            .collect();
        signal.close();
        for listener in listeners {
            tokio::time::timeout(Duration::from_secs(1), listener)
                .await
                .expect("listener not woken")
                .expect("listener panicked");
        }
    }
}
