//! Member Repository Port
//!
//! Read-only access to the members of one tenant. Authoring happens in
//! another system; this side only ever fetches whole snapshots.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Member, TenantScope};

/// Repository interface for family members
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Fetch every member of `scope` in one request.
    ///
    /// Returns an empty vector when the tenant has no members. Transport
    /// failures and non-2xx responses surface as `DomainError::Network`.
    async fn fetch_members(&self, scope: &TenantScope) -> Result<Vec<Member>, DomainError>;
}

