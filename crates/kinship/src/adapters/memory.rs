//! In-memory adapters

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{CsvExport, DomainError, Member, TenantScope};
use crate::ports::{ExportSink, MemberRepository};

/// Member repository backed by a map of tenant -> members
///
/// Unknown tenants yield an empty snapshot. A failure message can be set to
/// make every fetch fail with `DomainError::Network`.
#[derive(Debug, Default)]
pub struct InMemoryMemberRepository {
    tenants: RwLock<HashMap<TenantScope, Vec<Member>>>,
    failure: RwLock<Option<String>>,
    fetches: AtomicUsize,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_members(scope: TenantScope, members: Vec<Member>) -> Self {
        let mut tenants = HashMap::new();
        tenants.insert(scope, members);
        Self {
            tenants: RwLock::new(tenants),
            ..Self::default()
        }
    }

    /// Replace the members of a tenant
    pub async fn set_members(&self, scope: TenantScope, members: Vec<Member>) {
        self.tenants.write().await.insert(scope, members);
    }

    /// Make subsequent fetches fail (`Some`) or succeed again (`None`)
    pub async fn set_failure(&self, message: Option<String>) {
        *self.failure.write().await = message;
    }

    /// Number of fetches served so far, failed ones included
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn fetch_members(&self, scope: &TenantScope) -> Result<Vec<Member>, DomainError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.failure.read().await.as_ref() {
            return Err(DomainError::network(message.clone()));
        }

        Ok(self.tenants.read().await.get(scope).cloned().unwrap_or_default())
    }
}

/// Export sink that keeps every delivered export in memory
#[derive(Debug, Default)]
pub struct BufferExportSink {
    exports: Mutex<Vec<CsvExport>>,
}

impl BufferExportSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exports(&self) -> Vec<CsvExport> {
        self.exports
            .lock()
            .map(|exports| exports.clone())
            .unwrap_or_default()
    }
}

impl ExportSink for BufferExportSink {
    fn deliver(&self, export: &CsvExport) -> Result<String, DomainError> {
        self.exports
            .lock()
            .map_err(|e| DomainError::Export(e.to_string()))?
            .push(export.clone());
        Ok(format!("memory://{}", export.filename))
    }
}
