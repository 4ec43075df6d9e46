//! Simulated self-play between two ephemeral players sharing one tree.
//!
//! | Piece          | Role                                                   |
//! |----------------|--------------------------------------------------------|
//! | [`Selection`]  | On-tree action choice (range-normalized UCB)           |
//! | [`Seat`]       | Who sits where: hidden state, growth and trace flags   |
//! | [`Player`]     | Per-episode state: on/off-tree, growth budget, history |
//! | [`Trajectory`] | Decisions and rewards, folded back into the tree       |
//! | [`SelfPlay`]   | Runs one episode to termination                        |

mod player;
mod selection;
mod selfplay;
mod trajectory;

pub use player::*;
pub use selection::*;
pub use selfplay::*;
pub use trajectory::*;
