//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

use crate::domain::value_objects::StatKind;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// Transport failure or non-2xx response while fetching a snapshot
    #[error("Network error: {message}")]
    Network {
        status: Option<u16>,
        message: String,
    },

    #[error("Malformed member data: {0}")]
    MalformedData(String),

    #[error("Statistic '{0}' has no member bucket to export")]
    NotExportable(StatKind),

    #[error("Unknown statistic: {0}")]
    UnknownStatistic(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn network<T: Into<String>>(message: T) -> Self {
        Self::Network {
            status: None,
            message: message.into(),
        }
    }

    pub fn http_status<T: Into<String>>(status: u16, message: T) -> Self {
        Self::Network {
            status: Some(status),
            message: message.into(),
        }
    }
}
