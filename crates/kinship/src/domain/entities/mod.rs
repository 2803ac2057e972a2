//! Domain Entities
//!
//! - Member: one person in the family tree, with outgoing relationship edges
//! - Snapshot: one immutable fetch of every member of a tenant

mod member;
mod snapshot;

pub use member::*;
pub use snapshot::*;
