//! Service Ports
//!
//! Interfaces for the environment the statistics run in.

mod clock;
mod export_sink;

pub use clock::*;
pub use export_sink::*;
