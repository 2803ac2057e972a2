//! JSON file adapter
//!
//! Reads a saved response of the member endpoint (a bare JSON array) from
//! disk. The tenant scope is ignored: one file holds one tenant.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::{DomainError, Member, TenantScope};
use crate::ports::MemberRepository;

#[derive(Debug, Clone)]
pub struct JsonFileMemberRepository {
    path: PathBuf,
}

impl JsonFileMemberRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Parse a member endpoint body. The endpoint returns the array directly.
pub fn parse_members(body: &str) -> Result<Vec<Member>, DomainError> {
    serde_json::from_str(body).map_err(|e| DomainError::MalformedData(e.to_string()))
}

#[async_trait]
impl MemberRepository for JsonFileMemberRepository {
    async fn fetch_members(&self, _scope: &TenantScope) -> Result<Vec<Member>, DomainError> {
        let body = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::network(format!("Failed to read {}: {e}", self.path.display()))
        })?;

        let members = parse_members(&body)?;
        tracing::debug!(path = %self.path.display(), count = members.len(), "Loaded members from file");
        Ok(members)
    }
}
