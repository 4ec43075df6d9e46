//! Core type aliases and tuning constants for incognito.
//!
//! This crate provides the foundational types and default parameters
//! shared by the search engine and anything driving it.
#![allow(dead_code)]

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Rewards, discounted returns, and action-value estimates.
pub type Utility = f32;
/// Belief weights, policy probabilities, and sampling distributions.
pub type Probability = f32;
/// Temperature parameters and log-likelihood losses.
pub type Entropy = f32;
/// Index into a body's fixed action set.
pub type Action = usize;

// ============================================================================
// SELF-PLAY
// Discounting and sample thresholds for growing the statistics tree.
// ============================================================================
/// Per-decision discount applied when folding rewards into returns.
pub const DISCOUNT: Utility = 0.95;
/// Total samples the root must hold before a query is answered.
pub const MIN_ROOT_SAMPLES: u32 = 1024;
/// Total samples a queried entry must hold before it is returned.
pub const MIN_ENTRY_SAMPLES: u32 = 128;
/// Default seed for the manager's random source.
pub const SEED: u64 = 0x5EED;

// ============================================================================
// OFF-TREE ROLLOUTS
// Policy applied to approximator predictions once a player falls off-tree.
// ============================================================================
/// Softmax temperature for off-tree rollouts and the opponent-behavior model.
/// Higher T → more uniform; lower T → closer to greedy.
pub const ROLLOUT_TEMPERATURE: Entropy = 0.5;

// ============================================================================
// APPROXIMATOR
// One-hidden-layer network trained with momentum SGD on buffered samples.
// ============================================================================
/// Width of the hidden layer.
pub const HIDDEN_WIDTH: usize = 32;
/// Step size of the momentum optimizer.
pub const LEARNING_RATE: f32 = 1e-3;
/// Momentum coefficient (fraction of previous velocity retained).
pub const MOMENTUM: f32 = 0.9;
/// Assumed variance of a single sampled return in the regression loss.
pub const ASSUMED_VARIANCE: f32 = 1.0;
/// Weight of the message-likelihood loss relative to the regression loss.
pub const MESSAGE_WEIGHT: f32 = 0.1;
/// New buffered samples required before a training round runs.
pub const TRAINING_THRESHOLD: usize = 256;
/// Gradient steps taken per training round.
pub const TRAINING_STEPS: usize = 8;
/// Length of each replay ring buffer.
pub const REPLAY_CAPACITY: usize = 4096;
/// Scale of uniform initialization for first-layer weights.
pub const INIT_SCALE: f32 = 0.5;

// ============================================================================
// REFERENCE GAME
// Asymmetric matching pennies: matching on heads pays more than on tails.
// ============================================================================
/// Matcher's payoff when both coins show heads.
pub const PENNIES_HEADS: Utility = 3.0;
/// Matcher's payoff when both coins show tails.
pub const PENNIES_TAILS: Utility = 1.0;
/// Matcher's payoff on a mismatch.
pub const PENNIES_MISS: Utility = -1.0;

// ============================================================================
// OBSERVABILITY
// ============================================================================
/// Interval between progress log messages during self-play.
pub const TRAINING_LOG_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);
