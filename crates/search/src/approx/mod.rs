//! Off-tree function approximation.
//!
//! Beyond the tree frontier, action values come from a learned function
//! of the hidden state. It is trained from two buffered streams:
//!
//! | Stream         | Source                                  | Loss                            |
//! |----------------|-----------------------------------------|---------------------------------|
//! | [`Regression`] | Grown entries, off-tree returns, queries, root shifts | Count-weighted squared error |
//! | [`Witness`]    | Real opponent messages                  | Negative log mixture likelihood |
//!
//! The concrete [`Perceptron`] is a one-hidden-layer `ndarray` network
//! trained with momentum SGD; [`Rollout`] turns its predictions into actions.

mod approximator;
mod perceptron;
mod replay;
mod rollout;
mod sample;

pub use approximator::*;
pub use perceptron::*;
pub use replay::*;
pub use rollout::*;
pub use sample::*;
