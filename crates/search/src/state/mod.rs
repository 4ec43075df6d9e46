//! State primitives for the shared statistics tree.
//!
//! This module defines:
//! - Turn (which role acts)
//! - Body (the game-body contract a hidden state satisfies)
//! - Estimate and Entry (per-action running statistics)
//! - Node and Tree (the arena-backed, message-keyed tree)

mod body;
mod entry;
mod estimate;
mod node;
mod tree;
mod turn;

pub use body::*;
pub use entry::*;
pub use estimate::*;
pub use node::*;
pub use tree::*;
pub use turn::*;
