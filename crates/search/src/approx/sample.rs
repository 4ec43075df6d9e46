use crate::Body;
use crate::Entry;
use crate::Mask;
use incognito_core::Action;
use incognito_core::Entropy;
use incognito_core::Probability;
use incognito_core::Utility;

/// A tree entry recorded as a regression target.
///
/// Slots with more samples pull the approximator harder: the gradient
/// for action `a` is `count[a] · (prediction[a] − mean[a]) / variance`.
#[derive(Debug, Clone, PartialEq)]
pub struct Regression {
    pub features: Vec<f32>,
    pub counts: Vec<u32>,
    pub means: Vec<Utility>,
}

impl<B> From<(&B, &Entry)> for Regression
where
    B: Body,
{
    fn from((hidden, entry): (&B, &Entry)) -> Self {
        Self {
            features: hidden.features(),
            counts: entry.counts(),
            means: entry.means(),
        }
    }
}

impl Regression {
    /// A single sampled return for the action taken at an off-tree
    /// decision. Every other slot carries zero weight.
    pub fn taken(features: Vec<f32>, width: usize, action: Action, value: Utility) -> Self {
        let mut counts = vec![0; width];
        let mut means = vec![0.; width];
        counts[action] = 1;
        means[action] = value;
        Self {
            features,
            counts,
            means,
        }
    }
}

/// One hypothesis about the opponent's hidden state when it sent a message.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub features: Vec<f32>,
    pub legal: Mask,
    /// The action this hypothesis must have taken to send the message.
    pub action: Action,
    /// Prior weight of this hypothesis in the belief.
    pub weight: Probability,
}

/// A real opponent message together with the belief it was sent under.
///
/// Model: the opponent drew a hidden state from the belief, chose an
/// action by softmax over its own predicted action values, and that
/// action deterministically produced the message. The loss is the
/// negative log of the belief-weighted probability of the message.
#[derive(Debug, Clone, PartialEq)]
pub struct Witness {
    pub candidates: Vec<Candidate>,
}

impl Witness {
    /// Builds a witness from `(hidden state, weight)` hypotheses.
    ///
    /// Hypotheses that could not have sent `message` are dropped.
    /// Returns `None` if none remain, since the message then carries
    /// no usable evidence.
    pub fn observe<B>(belief: &[(B, Probability)], message: &B::Message) -> Option<Self>
    where
        B: Body,
    {
        let candidates = belief
            .iter()
            .filter(|(_, weight)| *weight > 0.)
            .filter_map(|(hidden, weight)| {
                hidden.attribute(message).map(|action| Candidate {
                    features: hidden.features(),
                    legal: hidden.legal(),
                    action,
                    weight: *weight,
                })
            })
            .filter(|candidate| candidate.legal[candidate.action])
            .collect::<Vec<_>>();
        match candidates.len() {
            0 => None,
            _ => Some(Self { candidates }),
        }
    }
}

/// Mean losses of one training round.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Loss {
    pub regression: Utility,
    pub likelihood: Entropy,
}

impl std::fmt::Display for Loss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "regression {:.4}  likelihood {:.4}", self.regression, self.likelihood)
    }
}
