//! Stats Widget - Self-refreshing family statistics for one tenant
//!
//! States: `Loading` (awaiting the first fetch), `Error` (the fetch failed;
//! only a manual refresh retries) and `Ready` (a snapshot is present).
//! The widget owns its refresh task: dropping or unmounting it aborts the
//! task together with any fetch still in flight.

use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::application::refresh::{RefreshConfig, RefreshLoop};
use crate::application::{ReportCache, StatsService};
use crate::domain::{export_members, DomainError, Member, Snapshot, StatKind, StatsReport, TenantScope};
use crate::ports::{Clock, ExportSink, MemberRepository};

/// Snapshot held by a ready widget
#[derive(Debug, Clone)]
pub struct ReadyState {
    pub snapshot: Arc<Snapshot>,
    /// Set when the latest background refresh failed and `snapshot` is the
    /// last good one
    pub last_refresh_error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum WidgetState {
    Loading,
    Error { message: String, cause: String },
    Ready(ReadyState),
}

impl WidgetState {
    pub fn is_ready(&self) -> bool {
        matches!(self, WidgetState::Ready(_))
    }

    pub fn snapshot(&self) -> Option<&Arc<Snapshot>> {
        match self {
            WidgetState::Ready(ready) => Some(&ready.snapshot),
            _ => None,
        }
    }
}

/// A mounted stats widget
pub struct StatsWidget {
    state: watch::Receiver<WidgetState>,
    requests: mpsc::UnboundedSender<()>,
    task: Option<JoinHandle<()>>,
    cache: Mutex<ReportCache>,
    clock: Arc<dyn Clock>,
}

impl StatsWidget {
    /// Mount the widget: start loading `scope` and refreshing it in the
    /// background. Must be called from within a tokio runtime.
    pub fn mount<R: MemberRepository + 'static>(
        service: StatsService<R>,
        scope: TenantScope,
        config: RefreshConfig,
    ) -> Self {
        let (state_tx, state_rx) = watch::channel(WidgetState::Loading);
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let clock = service.clock().clone();

        let task = RefreshLoop::new(service, scope, config, state_tx, request_rx).start();

        Self {
            state: state_rx,
            requests: request_tx,
            task: Some(task),
            cache: Mutex::new(ReportCache::new()),
            clock,
        }
    }

    /// Current state
    pub fn state(&self) -> WidgetState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<WidgetState> {
        self.state.clone()
    }

    /// Ask for an immediate re-fetch. Returns false once the widget has stopped.
    pub fn refresh(&self) -> bool {
        self.requests.send(()).is_ok()
    }

    /// Statistics for the current snapshot, computed at most once per
    /// snapshot and day. `None` unless ready.
    pub fn report(&self) -> Option<Arc<StatsReport>> {
        let snapshot = self.state.borrow().snapshot().cloned()?;
        Some(self.report_for(&snapshot))
    }

    fn report_for(&self, snapshot: &Snapshot) -> Arc<StatsReport> {
        let mut cache = self
            .cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        cache.get_or_compute(snapshot, self.clock.today())
    }

    /// Export one statistic's bucket from the current snapshot.
    ///
    /// The rows are exactly the members counted by the displayed report.
    pub fn export(&self, kind: StatKind, sink: &dyn ExportSink) -> Result<String, DomainError> {
        let snapshot = self
            .state
            .borrow()
            .snapshot()
            .cloned()
            .ok_or_else(|| DomainError::Validation("statistics are not loaded yet".to_string()))?;

        let report = self.report_for(&snapshot);
        let positions = report
            .get(kind)
            .and_then(|stat| stat.positions.as_deref())
            .ok_or(DomainError::NotExportable(kind))?;

        let members: Vec<&Member> = snapshot.graph.members_at(positions).collect();
        let export = export_members(kind.label(), &members, report.computed_for);
        sink.deliver(&export)
    }

    /// Number of reports computed so far
    pub fn report_computations(&self) -> u64 {
        self.cache
            .lock()
            .map(|cache| cache.computations())
            .unwrap_or_default()
    }

    /// Tear the widget down, stopping the refresh timer and any pending fetch
    pub fn unmount(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("Stats widget unmounted");
        }
    }
}

impl Drop for StatsWidget {
    fn drop(&mut self) {
        self.stop();
    }
}
