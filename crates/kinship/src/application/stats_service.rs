//! Stats Application Service (Use Case)
//!
//! Fetches a snapshot and derives statistics or exports from it.

use std::sync::Arc;

use crate::domain::{
    compute_report, export_statistic, DomainError, Snapshot, StatKind, StatsReport, TenantScope,
};
use crate::ports::{Clock, ExportSink, MemberRepository};

/// Application service for family statistics
pub struct StatsService<R: MemberRepository> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: MemberRepository> Clone for StatsService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<R: MemberRepository> StatsService<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Fetch a fresh snapshot for `scope`, tagged with `version`
    pub async fn fetch_snapshot(&self, scope: &TenantScope, version: u64) -> Result<Snapshot, DomainError> {
        let members = self.repo.fetch_members(scope).await?;

        tracing::info!(tenant = %scope, version, members = members.len(), "Fetched family snapshot");

        Ok(Snapshot::new(version, scope.clone(), members))
    }

    /// Fetch and compute every statistic for today
    pub async fn report(&self, scope: &TenantScope) -> Result<(Snapshot, StatsReport), DomainError> {
        let snapshot = self.fetch_snapshot(scope, 1).await?;
        let report = compute_report(&snapshot.graph, snapshot.version, self.clock.today());
        Ok((snapshot, report))
    }

    /// Fetch, render one statistic's bucket as CSV and hand it to `sink`
    pub async fn export(
        &self,
        scope: &TenantScope,
        kind: StatKind,
        sink: &dyn ExportSink,
    ) -> Result<String, DomainError> {
        if !kind.is_exportable() {
            return Err(DomainError::NotExportable(kind));
        }

        let snapshot = self.fetch_snapshot(scope, 1).await?;
        let export = export_statistic(kind, &snapshot.graph, self.clock.today())?;
        sink.deliver(&export)
    }
}
