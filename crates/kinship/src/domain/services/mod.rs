//! Domain Services
//!
//! Stateless computations over a snapshot: ages, graph traversal, tree
//! depth, demographic buckets and CSV rendering.

mod age;
mod csv_export;
mod demographics;
mod depth;
mod graph;

pub use age::*;
pub use csv_export::*;
pub use demographics::*;
pub use depth::*;
pub use graph::*;
