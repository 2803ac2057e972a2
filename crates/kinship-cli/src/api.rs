//! HTTP adapter for the member endpoint

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use kinship::adapters::parse_members;
use kinship::{DomainError, Member, MemberRepository, TenantScope};

/// Fetches member snapshots from the tenant-scoped stats endpoint
pub struct HttpMemberRepository {
    client: Client,
    base_url: String,
    stats_path: String,
    api_key: Option<String>,
}

impl HttpMemberRepository {
    /// Create a new API client
    pub fn new(
        base_url: &str,
        stats_path: &str,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("kinship-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            stats_path: stats_path.to_string(),
            api_key: api_key.map(|key| key.to_string()),
        })
    }

    /// Endpoint URL for a tenant
    pub fn stats_url(&self, scope: &TenantScope) -> String {
        let path = self
            .stats_path
            .replace("{tenant}", &urlencoding::encode(scope.as_str()));
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl MemberRepository for HttpMemberRepository {
    async fn fetch_members(&self, scope: &TenantScope) -> Result<Vec<Member>, DomainError> {
        let url = self.stats_url(scope);
        tracing::debug!(%url, "Fetching family members");

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", api_key));
        }

        let resp = request
            .send()
            .await
            .map_err(|e| DomainError::network(format!("Failed to connect to {}: {}", url, e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::http_status(
                status.as_u16(),
                format!("API error ({}): {}", status, body),
            ));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| DomainError::network(format!("Failed to read response: {}", e)))?;

        parse_members(&body)
    }
}
