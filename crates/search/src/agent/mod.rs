//! The tree/root manager a real episode runner talks to.
//!
//! - [`Manager`] — owns the tree, the approximator and the priors for one agent
//! - [`Metrics`] — running counters with periodic checkpoint lines

mod manager;
mod metrics;

pub use manager::*;
pub use metrics::*;
