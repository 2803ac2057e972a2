//! Memoized statistics for the current snapshot

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{compute_report, Snapshot, StatsReport};

/// Holds the last computed report, keyed by snapshot version and day.
///
/// Rendering the same snapshot twice on the same day reuses the report.
#[derive(Debug, Default)]
pub struct ReportCache {
    key: Option<(u64, NaiveDate)>,
    report: Option<Arc<StatsReport>>,
    computations: u64,
}

impl ReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&mut self, snapshot: &Snapshot, today: NaiveDate) -> Arc<StatsReport> {
        let key = (snapshot.version, today);
        if let (Some(cached_key), Some(report)) = (self.key, &self.report) {
            if cached_key == key {
                return report.clone();
            }
        }

        let report = Arc::new(compute_report(&snapshot.graph, snapshot.version, today));
        self.key = Some(key);
        self.report = Some(report.clone());
        self.computations += 1;
        report
    }

    /// How many times a report was actually computed
    pub fn computations(&self) -> u64 {
        self.computations
    }
}
