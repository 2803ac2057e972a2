//! Refresh loop - Keeps a widget's snapshot current
//!
//! Loads once on mount, then re-fetches at a fixed interval and on manual
//! request. Runs as one tokio task owned by the widget.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{interval, MissedTickBehavior};

use crate::application::stats_widget::{ReadyState, WidgetState};
use crate::application::StatsService;
use crate::domain::TenantScope;
use crate::ports::MemberRepository;

/// Background refresh period of a mounted widget
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// Shortest accepted refresh period; tokio rejects a zero interval
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(1);

/// Message shown when the initial load fails
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load family tree statistics";

/// Refresh configuration
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Interval between background refreshes
    pub interval: Duration,
    /// User-facing message for the error state
    pub error_message: String,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REFRESH_INTERVAL,
            error_message: LOAD_ERROR_MESSAGE.to_string(),
        }
    }
}

impl RefreshConfig {
    /// Set the refresh period, raised to `MIN_REFRESH_INTERVAL` if shorter
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_REFRESH_INTERVAL);
        self
    }

    fn period(&self) -> Duration {
        self.interval.max(MIN_REFRESH_INTERVAL)
    }
}

pub(crate) struct RefreshLoop<R: MemberRepository> {
    service: StatsService<R>,
    scope: TenantScope,
    config: RefreshConfig,
    state: watch::Sender<WidgetState>,
    requests: mpsc::UnboundedReceiver<()>,
    version: u64,
}

impl<R: MemberRepository + 'static> RefreshLoop<R> {
    pub(crate) fn new(
        service: StatsService<R>,
        scope: TenantScope,
        config: RefreshConfig,
        state: watch::Sender<WidgetState>,
        requests: mpsc::UnboundedReceiver<()>,
    ) -> Self {
        Self {
            service,
            scope,
            config,
            state,
            requests,
            version: 0,
        }
    }

    /// Start the loop (runs in background until aborted)
    pub(crate) fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    async fn run(mut self) {
        tracing::info!(
            tenant = %self.scope,
            "📊 Stats widget mounted (refresh interval: {:?})",
            self.config.interval
        );

        self.load().await;

        let mut ticker = interval(self.config.period());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Skip the first immediate tick
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // The error state only recovers on a manual request
                    let in_error = matches!(*self.state.borrow(), WidgetState::Error { .. });
                    if in_error {
                        continue;
                    }
                    tracing::debug!(tenant = %self.scope, "🔄 Scheduled refresh");
                    self.load().await;
                }
                request = self.requests.recv() => {
                    if request.is_none() {
                        break;
                    }
                    tracing::debug!(tenant = %self.scope, "🔄 Manual refresh");
                    self.load().await;
                    ticker.reset();
                }
            }
        }

        tracing::info!(tenant = %self.scope, "Stats widget refresh loop stopped");
    }

    async fn load(&mut self) {
        let previous = self.state.borrow().clone();

        if matches!(previous, WidgetState::Error { .. }) {
            self.state.send_replace(WidgetState::Loading);
        }

        match self.service.fetch_snapshot(&self.scope, self.version + 1).await {
            Ok(snapshot) => {
                self.version = snapshot.version;
                self.state.send_replace(WidgetState::Ready(ReadyState {
                    snapshot: Arc::new(snapshot),
                    last_refresh_error: None,
                }));
            }
            Err(e) => match previous {
                WidgetState::Ready(ready) => {
                    tracing::warn!(tenant = %self.scope, error = %e, "Refresh failed, keeping previous snapshot");
                    self.state.send_replace(WidgetState::Ready(ReadyState {
                        snapshot: ready.snapshot,
                        last_refresh_error: Some(e.to_string()),
                    }));
                }
                WidgetState::Loading | WidgetState::Error { .. } => {
                    tracing::error!(tenant = %self.scope, error = %e, "Failed to load family statistics");
                    self.state.send_replace(WidgetState::Error {
                        message: self.config.error_message.clone(),
                        cause: e.to_string(),
                    });
                }
            },
        }
    }
}
