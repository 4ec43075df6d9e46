use thiserror::Error;

/// Failures surfaced to whoever drives a [`Manager`](crate::Manager).
///
/// Only [`Error::OffTree`] can arise from a well-formed game body;
/// the rest indicate a caller or configuration mistake.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The real game produced a message that self-play never simulated
    /// from the current root. The hypotheses backing the tree are exhausted
    /// and no recovery is attempted.
    #[error("no child for message {message} at the root, real play left the tree")]
    OffTree { message: String },

    #[error("belief has no support")]
    EmptyBelief,

    #[error("belief weights rejected: {0}")]
    Weights(String),

    #[error("no live tree, call start_episode first")]
    NoEpisode,
}

/// Convenience Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
