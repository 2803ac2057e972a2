//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain and application layers
//! interact with external systems (member endpoint, clock, export target).
//!
//! Implementations live in `adapters/` and in the CLI crate.

pub mod repositories;
pub mod services;

// Re-exports
pub use repositories::*;
pub use services::*;
