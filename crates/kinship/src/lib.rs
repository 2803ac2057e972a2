//! Kinship Domain Library
//!
//! Family-tree statistics over a read-only snapshot of a tenant's members.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure entities and computations
//!   - `entities/`: Member, Relationship, Snapshot
//!   - `value_objects/`: Gender, RelationshipType, StatKind, TenantScope
//!   - `services/`: relationship graph, tree depth, demographics, CSV export
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Member snapshot access
//!   - `services/`: Clock and export sink
//!
//! - **Application** (`application/`): One-shot statistics service and the
//!   self-refreshing stats widget
//!
//! - **Adapters** (`adapters/`): In-memory and JSON-file implementations
//!
//! # Usage
//!
//! ```rust,ignore
//! use kinship::{StatsService, StatsWidget, RefreshConfig, TenantScope};
//!
//! let service = StatsService::new(repo, Arc::new(SystemClock));
//! let widget = StatsWidget::mount(service, TenantScope::new("acme"), RefreshConfig::default());
//! ```

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use application::{
    ReadyState, RefreshConfig, ReportCache, StatsService, StatsWidget, WidgetState,
    DEFAULT_REFRESH_INTERVAL, LOAD_ERROR_MESSAGE, MIN_REFRESH_INTERVAL,
};
pub use domain::{
    age_in_years, bucket, compute_report, compute_statistic, export_filename, export_members, export_statistic,
    format_export_date, generation_level, render_csv, tree_depth, CsvExport, DomainError,
    FamilyGraph, Gender, Member, MemberId, Relationship, RelationshipType, Snapshot, StatKind,
    Statistic, StatsReport, TenantScope, CSV_HEADER, CSV_MIME_TYPE,
};
pub use ports::{Clock, ExportSink, FixedClock, MemberRepository, SystemClock};
