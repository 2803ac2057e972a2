//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod gender;
mod relationship_type;
mod stat_kind;
mod tenant_scope;

pub use gender::*;
pub use relationship_type::*;
pub use stat_kind::*;
pub use tenant_scope::*;
