use crate::Mask;
use incognito_core::Action;
use incognito_core::Entropy;
use incognito_core::Probability;
use incognito_core::Utility;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::SmallRng;
use serde::Deserialize;
use serde::Serialize;

/// Policy applied to predicted action values once a player is off-tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Rollout {
    /// Highest predicted value, ties broken uniformly.
    Greedy,
    /// Sample proportionally to `exp(value / temperature)`.
    Softmax { temperature: Entropy },
}

impl Rollout {
    pub fn choose(&self, values: &[Utility], legal: &Mask, rng: &mut SmallRng) -> Action {
        match self {
            Self::Greedy => argmax(values, legal, rng),
            Self::Softmax { temperature } => {
                let policy = softmax(values, legal, *temperature);
                WeightedIndex::new(policy)
                    .expect("softmax over a legal action is positive")
                    .sample(rng)
            }
        }
    }
}

/// Softmax over legal actions; illegal actions get zero probability.
pub fn softmax(values: &[Utility], legal: &Mask, temperature: Entropy) -> Vec<Probability> {
    let max = values
        .iter()
        .zip(legal)
        .filter(|(_, l)| **l)
        .map(|(v, _)| *v)
        .fold(Utility::NEG_INFINITY, Utility::max);
    assert!(max.is_finite(), "softmax needs a legal action with a finite value");
    let exps = values
        .iter()
        .zip(legal)
        .map(|(v, l)| if *l { ((v - max) / temperature).exp() } else { 0. })
        .collect::<Vec<_>>();
    let sum = exps.iter().sum::<Probability>();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Argmax over legal actions with uniform reservoir tie-breaking.
pub fn argmax(values: &[Utility], legal: &Mask, rng: &mut SmallRng) -> Action {
    let mut best = None;
    let mut ties = 0;
    for (action, value) in values.iter().enumerate().filter(|(a, _)| legal[*a]) {
        match best {
            Some((_, top)) if *value < top => continue,
            Some((_, top)) if *value == top => {
                ties += 1;
                if rng.random_range(0..ties) == 0 {
                    best = Some((action, *value));
                }
            }
            _ => {
                ties = 1;
                best = Some((action, *value));
            }
        }
    }
    best.map(|(action, _)| action)
        .expect("decision point with no legal action")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn softmax_masks_and_normalizes() {
        let p = softmax(&[0., 100., 0.], &vec![true, false, true], 1.);
        assert_eq!(p[1], 0.);
        assert!((p[0] - 0.5).abs() < 1e-6);
        assert!((p.iter().sum::<f32>() - 1.).abs() < 1e-6);
    }

    #[test]
    fn softmax_sharpens_when_cold() {
        let warm = softmax(&[1., 0.], &vec![true, true], 10.);
        let cold = softmax(&[1., 0.], &vec![true, true], 0.1);
        assert!(cold[0] > warm[0]);
        assert!(cold[0] > 0.99);
    }

    #[test]
    fn argmax_breaks_ties_uniformly() {
        let ref mut rng = SmallRng::seed_from_u64(1);
        let legal = vec![true, true, false, true];
        let values = [2., 2., 9., 2.];
        let mut seen = [0usize; 4];
        (0..3000).for_each(|_| seen[argmax(&values, &legal, rng)] += 1);
        assert_eq!(seen[2], 0);
        assert!(seen.iter().enumerate().filter(|(a, _)| *a != 2).all(|(_, n)| *n > 800));
    }

    #[test]
    fn greedy_ignores_illegal_maximum() {
        let ref mut rng = SmallRng::seed_from_u64(1);
        let choice = Rollout::Greedy.choose(&[5., 1., 0.], &vec![false, true, true], rng);
        assert_eq!(choice, 1);
    }
}
