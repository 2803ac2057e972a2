//! Application Layer
//!
//! Use cases on top of the domain: one-shot statistics and exports
//! (`StatsService`) and the long-lived, self-refreshing stats widget
//! (`StatsWidget`).

mod refresh;
mod report_cache;
mod stats_service;
mod stats_widget;

pub use refresh::{RefreshConfig, DEFAULT_REFRESH_INTERVAL, LOAD_ERROR_MESSAGE, MIN_REFRESH_INTERVAL};
pub use report_cache::ReportCache;
pub use stats_service::StatsService;
pub use stats_widget::{ReadyState, StatsWidget, WidgetState};
