//! Self-play tree search for two-player games of incomplete information.
//!
//! Each player holds a private hidden state. Both players share one
//! statistics tree keyed by the public message history; at every node
//! the acting player's statistics are keyed by its own hidden state,
//! and the other player's visits are tallied into a belief.
//!
//! # Module Structure
//!
//! - `state` — Game-body contract, statistics (Estimate, Entry), Node, Tree
//! - `belief` — Weighted hidden-state sampling
//! - `approx` — Off-tree function approximator and its training buffers
//! - `search` — Selection rule, simulated players, trajectories, self-play driver
//! - `agent` — Tree/root manager exposed to a real episode runner
//! - `pennies` — Asymmetric matching pennies reference implementation
//!
//! # Data Flow
//!
//! ```text
//! Manager ──draws──▶ Belief/priors ──seats──▶ SelfPlay ──grows──▶ Tree
//!    │                                          │                  │
//!    └──queries──────────── Entry ◀─────────────┘                  │
//!    └──witness/regress──▶ Approximator ◀──bootstrap/rollout───────┘
//! ```

mod agent;
mod approx;
mod belief;
mod config;
mod error;
mod pennies;
mod search;
mod state;

pub use agent::*;
pub use approx::*;
pub use belief::*;
pub use config::*;
pub use error::*;
pub use pennies::*;
pub use search::*;
pub use state::*;
