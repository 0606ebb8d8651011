//! Readiness signal for the priority queue
//!
//! The signal is a single-slot mailbox: a `flume` channel bounded to one
//! token. A token means "the queue may hold work". Depositing into a full
//! mailbox is a no-op, so any burst of appends between two consumer wakeups
//! coalesces into a single wakeup.
//!
//! The queue owns both ends of the channel, so the mailbox never disconnects
//! while the queue is alive. Consumers receive a [`Readiness`] handle that
//! wraps a clone of the receiving end; waiting on it consumes the token, and
//! the consumer's following `next()` re-deposits one if work remains.

use flume::{Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError};
use std::time::Duration;

/// Queue-side ends of the mailbox
///
/// Every method here is called with the queue lock held, which is what keeps
/// token presence consistent with the queue contents.
#[derive(Debug)]
pub(crate) struct Mailbox {
    tx: Sender<()>,
    rx: Receiver<()>,
}

impl Mailbox {
    pub(crate) fn new() -> Self {
        let (tx, rx) = flume::bounded(1);
        Self { tx, rx }
    }

    /// Deposit a token unless one is already pending
    ///
    /// Returns true if this call placed the token.
    pub(crate) fn deposit(&self) -> bool {
        match self.tx.try_send(()) {
            Ok(()) => true,
            Err(TrySendError::Full(())) => false,
            // Unreachable while `rx` is held
            Err(TrySendError::Disconnected(())) => false,
        }
    }

    /// Take the pending token, if any
    pub(crate) fn withdraw(&self) -> bool {
        match self.rx.try_recv() {
            Ok(()) => true,
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => false,
        }
    }

    /// Discard every pending token
    pub(crate) fn drain(&self) -> bool {
        let mut drained = false;
        while self.withdraw() {
            drained = true;
        }
        drained
    }

    /// Re-derive token presence from the queue state
    ///
    /// Afterwards exactly one token is pending if `has_items`, none otherwise.
    pub(crate) fn repair(&self, has_items: bool) {
        let had_token = self.drain();
        if has_items {
            self.deposit();
            if !had_token {
                log::debug!("readiness token restored for pending items");
            }
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        !self.rx.is_empty()
    }

    pub(crate) fn readiness(&self) -> Readiness {
        Readiness {
            rx: self.rx.clone(),
        }
    }
}

/// Handle consumers wait on for "queue may be non-empty"
///
/// Waking is advisory: another consumer may take the item first, so a woken
/// consumer must still treat `next()` returning `None` as normal. A wakeup is
/// never missed: any append after the wait begins leaves a token for some
/// waiter.
///
/// The queue imposes no timeout. Combine `wait_async` with a caller-owned
/// cancellation source, or use `wait_timeout`.
///
/// # Example
///
/// ```rust
/// use prioq::queue::{PriorityQueue, Priority};
/// use std::time::Duration;
///
/// let queue = PriorityQueue::new();
/// let ready = queue.signal();
/// queue.append_priority("job", Priority::High);
///
/// assert!(ready.wait_timeout(Duration::from_millis(100)));
/// assert_eq!(queue.next(), Some("job"));
/// ```
#[derive(Debug, Clone)]
pub struct Readiness {
    rx: Receiver<()>,
}

impl Readiness {
    /// Block the current thread until a token arrives
    ///
    /// Returns false if the queue has been dropped.
    pub fn wait(&self) -> bool {
        self.rx.recv().is_ok()
    }

    /// Block until a token arrives or `timeout` elapses
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(()) => true,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Wait for a token without blocking the executor
    ///
    /// Cancel-safe: dropping the future before it completes leaves any
    /// token in place for another waiter, so it can be raced in
    /// `tokio::select!` against a shutdown or timeout branch.
    pub async fn wait_async(&self) -> bool {
        self.rx.recv_async().await.is_ok()
    }

    /// Check for a pending token without consuming it
    pub fn is_ready(&self) -> bool {
        !self.rx.is_empty()
    }
}
