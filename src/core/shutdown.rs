//! Shutdown Coordination
//!
//! Cancellation for long-running queue workloads. The queue never owns
//! cancellation; consumers race their readiness wait against a receiver
//! obtained here.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Broadcasts a single "stop" notification to every subscriber
#[derive(Clone)]
pub struct ShutdownCoordinator {
    shutdown_tx: broadcast::Sender<()>,
    shutdown_requested: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(8);
        let coordinator = Self {
            shutdown_tx,
            shutdown_requested: Arc::new(AtomicBool::new(false)),
        };
        (coordinator, shutdown_rx)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    pub fn trigger_shutdown(&self) {
        // Release pairs with the Acquire load in is_shutdown_requested
        self.shutdown_requested.store(true, Ordering::Release);
        let _ = self.shutdown_tx.send(());
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::Acquire)
    }

    /// Wait until shutdown is triggered
    ///
    /// Returns immediately if it already was, so a subscriber created after
    /// the broadcast still observes it.
    pub async fn wait(&self, rx: &mut broadcast::Receiver<()>) {
        if self.is_shutdown_requested() {
            return;
        }
        let _ = rx.recv().await;
    }

    /// Run `future_fn` with process signals wired to this coordinator
    ///
    /// Must be called inside a tokio runtime.
    pub async fn guard<F, Fut, R, E>(future_fn: F) -> Result<R, E>
    where
        F: FnOnce(Self) -> Fut,
        Fut: std::future::Future<Output = Result<R, E>>,
    {
        let (coordinator, _rx) = Self::new();
        setup_signal_handlers(coordinator.clone());
        future_fn(coordinator).await
    }
}

/// First signal requests shutdown; a second one exits immediately
fn setup_signal_handlers(coordinator: ShutdownCoordinator) {
    let signal_count = Arc::new(AtomicUsize::new(0));

    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }

        use tokio::signal::unix::{signal, SignalKind};
        for kind in [SignalKind::interrupt(), SignalKind::terminate()] {
            let coordinator = coordinator.clone();
            let signal_count = Arc::clone(&signal_count);
            tokio::spawn(async move {
                if let Ok(mut sig) = signal(kind) {
                    while sig.recv().await.is_some() {
                        on_signal(&coordinator, &signal_count);
                    }
                }
            });
        }
    }

    #[cfg(not(unix))]
    {
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                on_signal(&coordinator, &signal_count);
            }
        });
    }
}

fn on_signal(coordinator: &ShutdownCoordinator, signal_count: &AtomicUsize) {
    let prev = signal_count.fetch_add(1, Ordering::AcqRel);
    if prev >= 1 {
        log::warn!("second interrupt received; exiting");
        std::process::exit(130);
    }
    log::info!("interrupt received; stopping consumers");
    coordinator.trigger_shutdown();
}
