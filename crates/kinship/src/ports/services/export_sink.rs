//! Export Sink Port
//!
//! Destination for rendered CSV exports (a download directory, a buffer).

use crate::domain::{errors::DomainError, CsvExport};

pub trait ExportSink: Send + Sync {
    /// Deliver the export. Returns a human-readable location of the result.
    fn deliver(&self, export: &CsvExport) -> Result<String, DomainError>;
}
