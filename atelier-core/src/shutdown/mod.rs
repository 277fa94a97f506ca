//! Graceful shutdown coordinator

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tracing::{error, info, warn};

/// Shutdown signal
#[derive(Debug, Clone, Copy)]
pub enum ShutdownSignal {
    Graceful,
    Immediate,
}

/// Shutdown state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownState {
    Running,
    ShuttingDown,
    Shutdown,
}

/// Graceful shutdown coordinator
///
/// Components subscribe for the shutdown signal; the server drains open
/// connections within the configured timeout once the signal fires.
pub struct ShutdownCoordinator {
    state: Arc<RwLock<ShutdownState>>,
    shutdown_tx: broadcast::Sender<ShutdownSignal>,
    timeout: Duration,
}

impl ShutdownCoordinator {
    /// Create a new shutdown coordinator
    pub fn new(timeout: Duration) -> Self {
        let (shutdown_tx, _) = broadcast::channel(16);

        Self {
            state: Arc::new(RwLock::new(ShutdownState::Running)),
            shutdown_tx,
            timeout,
        }
    }

    /// Drain timeout for in-flight work
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Subscribe to shutdown notifications
    pub fn subscribe(&self) -> broadcast::Receiver<ShutdownSignal> {
        self.shutdown_tx.subscribe()
    }

    /// Initiate graceful shutdown
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown");

        let mut state = self.state.write().await;
        if *state != ShutdownState::Running {
            warn!("Shutdown already in progress");
            return;
        }

        *state = ShutdownState::ShuttingDown;
        drop(state);

        if let Err(e) = self.shutdown_tx.send(ShutdownSignal::Graceful) {
            error!("Failed to send shutdown signal: {}", e);
        }

        let mut state = self.state.write().await;
        *state = ShutdownState::Shutdown;
        info!("Shutdown complete");
    }

    /// Initiate immediate shutdown, skipping the drain phase
    pub async fn shutdown_immediately(&self) {
        warn!("Initiating immediate shutdown");

        let mut state = self.state.write().await;
        *state = ShutdownState::Shutdown;
        drop(state);

        if let Err(e) = self.shutdown_tx.send(ShutdownSignal::Immediate) {
            error!("Failed to send immediate shutdown signal: {}", e);
        }
    }

    /// Check if shutdown is in progress
    pub async fn is_shutting_down(&self) -> bool {
        let state = self.state.read().await;
        *state == ShutdownState::ShuttingDown || *state == ShutdownState::Shutdown
    }

    /// Get current state
    pub async fn state(&self) -> ShutdownState {
        *self.state.read().await
    }

    /// Wait for shutdown signal
    pub async fn wait_for_shutdown(&self) {
        let mut rx = self.subscribe();
        let _ = rx.recv().await;
    }
}

/// Install signal handlers for graceful shutdown
#[cfg(unix)]
pub fn install_signal_handlers(coordinator: Arc<ShutdownCoordinator>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm = signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
        let mut sigint = signal(SignalKind::interrupt()).expect("Failed to install SIGINT handler");

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM");
                coordinator.shutdown().await;
            }
            _ = sigint.recv() => {
                info!("Received SIGINT");
                coordinator.shutdown().await;
            }
        }
    });
}

/// Install signal handlers for graceful shutdown (Windows)
#[cfg(windows)]
pub fn install_signal_handlers(coordinator: Arc<ShutdownCoordinator>) {
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C");
        coordinator.shutdown().await;
    });
}
