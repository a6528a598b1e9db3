//! Configuration types
//!
//! Immutable, board-agnostic configuration passed into the driver, link and
//! node constructors. Every struct has a `Default` reproducing the values the
//! deployed nodes use.

pub mod link;
pub mod node;
pub mod sensor;

pub use link::*;
pub use node::*;
pub use sensor::*;
