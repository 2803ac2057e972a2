//! Directory export sink - writes CSV exports as files

use std::fs;
use std::path::PathBuf;

use kinship::{CsvExport, DomainError, ExportSink};

pub struct DirectoryExportSink {
    dir: PathBuf,
}

impl DirectoryExportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ExportSink for DirectoryExportSink {
    fn deliver(&self, export: &CsvExport) -> Result<String, DomainError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| DomainError::Export(format!("Failed to create {:?}: {}", self.dir, e)))?;

        let path = self.dir.join(&export.filename);
        fs::write(&path, export.content.as_bytes())
            .map_err(|e| DomainError::Export(format!("Failed to write {:?}: {}", path, e)))?;

        tracing::info!(path = %path.display(), bytes = export.content.len(), "CSV export written");
        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_file_named_after_export() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectoryExportSink::new(dir.path().join("exports"));
        let export = CsvExport {
            filename: "no_photo_members.csv".to_string(),
            mime_type: kinship::CSV_MIME_TYPE,
            content: kinship::CSV_HEADER.to_string(),
        };

        let location = sink.deliver(&export).unwrap();
        let written = fs::read_to_string(dir.path().join("exports").join("no_photo_members.csv")).unwrap();
        assert_eq!(written, "Full Name,Gender,Birth Date,Age");
        assert!(location.ends_with("no_photo_members.csv"));
    }
}
