use incognito_core::Probability;
use incognito_core::Utility;

/// A running estimate of one action's expected discounted return.
///
/// The count never decreases. The mean is only meaningful once the
/// count is at least one.
///
/// With `decay = None` the mean is the plain sample average. With
/// `decay = Some(α)` the step size is floored at α, so the estimate
/// becomes an exponentially weighted average once `1/n < α`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Estimate {
    count: u32,
    mean: Utility,
}

impl Estimate {
    pub fn count(&self) -> u32 {
        self.count
    }
    /// The current estimate, `None` before the first sample.
    pub fn mean(&self) -> Option<Utility> {
        match self.count {
            0 => None,
            _ => Some(self.mean),
        }
    }
    /// Folds one sampled return into the estimate.
    pub fn add(&mut self, sample: Utility, decay: Option<Probability>) {
        self.count += 1;
        let step = 1. / self.count as Utility;
        let step = decay.map_or(step, |alpha| step.max(alpha));
        self.mean += step * (sample - self.mean);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_average() {
        let mut estimate = Estimate::default();
        assert_eq!(estimate.mean(), None);
        [1., 2., 3., 6.]
            .into_iter()
            .for_each(|x| estimate.add(x, None));
        assert_eq!(estimate.count(), 4);
        assert!((estimate.mean().unwrap() - 3.).abs() < 1e-6);
    }

    #[test]
    fn decay_weights_recent_samples() {
        let mut plain = Estimate::default();
        let mut recent = Estimate::default();
        for x in (0..64).map(|_| 0.).chain((0..16).map(|_| 1.)) {
            plain.add(x, None);
            recent.add(x, Some(0.1));
        }
        assert!(recent.mean().unwrap() > plain.mean().unwrap());
        assert_eq!(recent.count(), plain.count());
    }
}
