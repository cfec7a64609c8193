//! Scheduled refresh of the monitored symbol.
//!
//! One loop owns the cadence: wait for the interval tick, a manual trigger
//! or shutdown; fetch on a blocking thread; analyze once; swap the shared
//! snapshot. Only one fetch is ever in flight. Triggers that arrive during
//! a fetch collapse into a single extra cycle.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify, RwLock};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::domain::error::TickwatchError;
use crate::domain::monitor::MonitorSnapshot;
use crate::ports::data_port::DataPort;

pub type SharedSnapshot = Arc<RwLock<MonitorSnapshot>>;

pub fn new_shared_snapshot(symbol: &str) -> SharedSnapshot {
    Arc::new(RwLock::new(MonitorSnapshot::new(symbol)))
}

/// Controls a running [`RefreshTask`]. Dropping it also stops the task.
pub struct RefreshHandle {
    trigger: Arc<Notify>,
    shutdown: watch::Sender<bool>,
}

impl RefreshHandle {
    /// Request a refresh as soon as the current cycle (if any) finishes.
    pub fn trigger(&self) {
        self.trigger.notify_one();
    }

    pub fn trigger_handle(&self) -> Arc<Notify> {
        self.trigger.clone()
    }

    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }
}

pub struct RefreshTask {
    data_port: Arc<dyn DataPort + Send + Sync>,
    symbol: String,
    interval: Duration,
    snapshot: SharedSnapshot,
    trigger: Arc<Notify>,
    shutdown: watch::Receiver<bool>,
}

impl RefreshTask {
    pub fn new(
        data_port: Arc<dyn DataPort + Send + Sync>,
        symbol: impl Into<String>,
        interval: Duration,
        snapshot: SharedSnapshot,
    ) -> (Self, RefreshHandle) {
        let trigger = Arc::new(Notify::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = Self {
            data_port,
            symbol: symbol.into(),
            interval,
            snapshot,
            trigger: trigger.clone(),
            shutdown: shutdown_rx,
        };
        let handle = RefreshHandle {
            trigger,
            shutdown: shutdown_tx,
        };
        (task, handle)
    }

    /// Run until shutdown. The first tick fires immediately.
    pub async fn run(self) {
        let mut shutdown = self.shutdown.clone();
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            symbol = %self.symbol,
            interval_secs = self.interval.as_secs(),
            "refresh task started"
        );

        loop {
            tokio::select! {
                _ = shutdown_requested(&mut shutdown) => break,
                _ = ticker.tick() => {}
                _ = self.trigger.notified() => {
                    debug!(symbol = %self.symbol, "manual refresh requested");
                    ticker.reset();
                }
            }

            tokio::select! {
                _ = shutdown_requested(&mut shutdown) => break,
                _ = self.refresh_once() => {}
            }
        }

        info!(symbol = %self.symbol, "refresh task stopped");
    }

    /// Fetch, analyze and publish one snapshot.
    pub async fn refresh_once(&self) {
        let port = self.data_port.clone();
        let symbol = self.symbol.clone();
        let outcome = tokio::task::spawn_blocking(move || port.fetch_intraday(&symbol))
            .await
            .unwrap_or_else(|e| {
                Err(TickwatchError::Data {
                    reason: format!("refresh worker failed: {}", e),
                })
            });

        let now = Utc::now();
        let mut snapshot = self.snapshot.write().await;
        match outcome {
            Ok(bars) => {
                snapshot.apply_success(bars, now);
                match &snapshot.result {
                    Some(result) => info!(
                        symbol = %self.symbol,
                        bars = snapshot.bars.len(),
                        signal = %result.signal,
                        confidence = result.indicators.confidence,
                        "snapshot updated"
                    ),
                    None => warn!(symbol = %self.symbol, "provider returned no bars"),
                }
            }
            Err(e) => {
                match e {
                    TickwatchError::RateLimited { .. } => {
                        warn!(symbol = %self.symbol, error = %e, "refresh rate limited")
                    }
                    _ => error!(symbol = %self.symbol, error = %e, "refresh failed"),
                }
                snapshot.apply_failure(&e, now);
            }
        }
    }
}

/// Resolves once shutdown is requested or the handle is gone.
async fn shutdown_requested(rx: &mut watch::Receiver<bool>) {
    if rx.wait_for(|stop| *stop).await.is_err() {
        debug!("refresh handle dropped");
    }
}
