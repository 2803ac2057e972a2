//! Adapters
//!
//! Local implementations of the ports: an in-memory repository for tests and
//! offline use, a JSON file repository, and a buffering export sink.

mod file;
mod memory;

pub use file::{parse_members, JsonFileMemberRepository};
pub use memory::{BufferExportSink, InMemoryMemberRepository};
