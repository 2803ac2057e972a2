//! Repository Ports
//!
//! Abstract interfaces for read-only data access.

mod member_repository;

pub use member_repository::*;
