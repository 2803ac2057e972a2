//! TenantScope - Opaque identifier partitioning data to one organization

use serde::{Deserialize, Serialize};

/// Tenant / client scope passed through to the member repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantScope(String);

impl TenantScope {
    pub fn new(scope: impl Into<String>) -> Self {
        Self(scope.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TenantScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TenantScope {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
