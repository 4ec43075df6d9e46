use super::*;
use crate::Error;
use incognito_core::Probability;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::SmallRng;

/// Weighted empirical distribution over hidden states.
///
/// Weights need not be normalized. Each draw returns one support element
/// with probability proportional to its weight, independently of earlier
/// draws, so a single belief serves every episode of a self-play batch.
#[derive(Debug, Clone)]
pub struct Belief<B> {
    support: Vec<B>,
    weights: Vec<Probability>,
    index: WeightedIndex<Probability>,
}

impl<B> Belief<B> {
    /// Builds a belief from parallel support and weight sequences.
    ///
    /// Fails on an empty support, and on weights the sampler rejects
    /// (negative, non-finite, or all zero).
    pub fn new(support: Vec<B>, weights: Vec<Probability>) -> Result<Self, Error> {
        assert!(support.len() == weights.len(), "support and weights differ in length");
        if support.is_empty() {
            return Err(Error::EmptyBelief);
        }
        let index = WeightedIndex::new(weights.iter().copied())
            .map_err(|e| Error::Weights(e.to_string()))?;
        Ok(Self {
            support,
            weights,
            index,
        })
    }
    pub fn len(&self) -> usize {
        self.support.len()
    }
    pub fn is_empty(&self) -> bool {
        self.support.is_empty()
    }
    /// Iterates `(hidden state, normalized probability)`.
    pub fn iter(&self) -> impl Iterator<Item = (&B, Probability)> {
        let mass = self.weights.iter().sum::<Probability>();
        self.support
            .iter()
            .zip(self.weights.iter())
            .map(move |(b, w)| (b, w / mass))
    }
}

impl<B> TryFrom<Vec<(B, Probability)>> for Belief<B> {
    type Error = Error;
    fn try_from(pairs: Vec<(B, Probability)>) -> Result<Self, Error> {
        let (support, weights) = pairs.into_iter().unzip();
        Self::new(support, weights)
    }
}

impl<B> Sampler<B> for Belief<B>
where
    B: Clone,
{
    fn sample(&self, rng: &mut SmallRng) -> B {
        self.support[self.index.sample(rng)].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn empty_support_is_an_error() {
        let belief = Belief::<u8>::new(vec![], vec![]);
        assert!(matches!(belief, Err(Error::EmptyBelief)));
    }

    #[test]
    fn zero_weights_are_an_error() {
        let belief = Belief::new(vec!['a', 'b'], vec![0., 0.]);
        assert!(matches!(belief, Err(Error::Weights(_))));
    }

    #[test]
    fn draws_follow_weights() {
        let ref mut rng = SmallRng::seed_from_u64(7);
        let belief = Belief::try_from(vec![('a', 1.), ('b', 3.), ('c', 0.)]).unwrap();
        let n = 40_000;
        let b = (0..n).filter(|_| belief.sample(rng) == 'b').count();
        let c = (0..n).filter(|_| belief.sample(rng) == 'c').count();
        assert!((b as f32 / n as f32 - 0.75).abs() < 0.02, "b drawn {}", b);
        assert_eq!(c, 0);
    }

    #[test]
    fn iter_normalizes() {
        let belief = Belief::new(vec![1, 2], vec![2., 6.]).unwrap();
        let probs = belief.iter().map(|(_, p)| p).collect::<Vec<_>>();
        assert_eq!(probs, vec![0.25, 0.75]);
    }
}
