use super::*;
use incognito_core::Utility;

/// A trainable map from hidden-state features to an action-value vector.
///
/// Predictions are read during self-play episodes; observations may be
/// pushed at any time; `train` must only be called between episodes so
/// an update never interleaves with a bootstrap read.
pub trait Approximator {
    /// Predicted action values, one per action.
    fn predict(&self, features: &[f32]) -> Vec<Utility>;
    /// Buffers a tree entry as a regression target.
    fn regress(&mut self, sample: Regression);
    /// Buffers a real opponent message with the belief it was sent under.
    fn witness(&mut self, sample: Witness);
    /// Runs a training round if enough new samples are buffered.
    fn train(&mut self) -> Option<Loss>;
}
