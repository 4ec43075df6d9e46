//! Hidden-state sampling.
//!
//! - [`Sampler`] — anything that draws one hidden state per call
//! - [`Belief`] — weighted empirical distribution over hidden states

mod belief;
mod sampler;

pub use belief::*;
pub use sampler::*;
