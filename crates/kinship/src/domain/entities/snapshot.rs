//! Snapshot - One immutable fetch of a tenant's family tree

use chrono::{DateTime, Utc};

use crate::domain::entities::Member;
use crate::domain::services::FamilyGraph;
use crate::domain::value_objects::TenantScope;

/// Snapshot - all members of a tenant as returned by one fetch
///
/// Never mutated; a refresh replaces it with a new snapshot carrying a
/// higher `version`.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub version: u64,
    pub tenant: TenantScope,
    pub fetched_at: DateTime<Utc>,
    pub graph: FamilyGraph,
}

impl Snapshot {
    pub fn new(version: u64, tenant: TenantScope, members: Vec<Member>) -> Self {
        Self {
            version,
            tenant,
            fetched_at: Utc::now(),
            graph: FamilyGraph::new(members),
        }
    }

    pub fn members(&self) -> &[Member] {
        self.graph.members()
    }
}
