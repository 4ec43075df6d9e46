use super::*;
use incognito_core::Action;
use incognito_core::Probability;
use incognito_core::Utility;

/// Per-(node, hidden state) statistics: one [`Estimate`] per action.
///
/// Slots for illegal actions are never sampled and keep a zero count.
/// A freshly grown entry is bootstrapped with one sample per legal
/// action taken from the approximator's prediction, so it starts from
/// an informed prior instead of being statistically blank.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    legal: Mask,
    slots: Vec<Estimate>,
}

impl Entry {
    /// An entry with no samples in any slot.
    pub fn empty(legal: Mask) -> Self {
        assert!(legal.iter().any(|l| *l), "decision point with no legal action");
        let slots = vec![Estimate::default(); legal.len()];
        Self { legal, slots }
    }
    /// Seeds every legal slot with one sample of `prediction`.
    pub fn bootstrap(legal: Mask, prediction: &[Utility]) -> Self {
        let mut entry = Self::empty(legal);
        for (action, value) in prediction.iter().enumerate() {
            if entry.legal[action] {
                entry.slots[action].add(*value, None);
            }
        }
        entry
    }
    pub fn legal(&self) -> &Mask {
        &self.legal
    }
    pub fn slots(&self) -> &[Estimate] {
        &self.slots
    }
    pub fn slot(&self, action: Action) -> &Estimate {
        &self.slots[action]
    }
    /// Number of action slots (the body's `ACTIONS`).
    pub fn width(&self) -> usize {
        self.slots.len()
    }
    /// Folds a sampled return into one action's estimate.
    pub fn add(&mut self, action: Action, sample: Utility, decay: Option<Probability>) {
        debug_assert!(self.legal[action], "sampled an illegal action");
        self.slots[action].add(sample, decay);
    }
    /// Sum of sample counts across all actions.
    pub fn total(&self) -> u32 {
        self.slots.iter().map(Estimate::count).sum()
    }
    /// Per-action sample counts.
    pub fn counts(&self) -> Vec<u32> {
        self.slots.iter().map(Estimate::count).collect()
    }
    /// Action-value vector. Unsampled or illegal slots are `NEG_INFINITY`.
    pub fn values(&self) -> Vec<Utility> {
        self.slots
            .iter()
            .map(|s| s.mean().unwrap_or(Utility::NEG_INFINITY))
            .collect()
    }
    /// Means with unsampled slots read as zero, for training targets.
    pub fn means(&self) -> Vec<Utility> {
        self.slots.iter().map(|s| s.mean().unwrap_or(0.)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_samples_legal_slots_once() {
        let entry = Entry::bootstrap(vec![true, false, true], &[0.5, 9., -1.]);
        assert_eq!(entry.counts(), vec![1, 0, 1]);
        assert_eq!(entry.total(), 2);
        assert_eq!(entry.values(), vec![0.5, Utility::NEG_INFINITY, -1.]);
        assert_eq!(entry.means(), vec![0.5, 0., -1.]);
    }

    #[test]
    #[should_panic(expected = "no legal action")]
    fn bootstrap_rejects_empty_mask() {
        Entry::bootstrap(vec![false, false], &[0., 0.]);
    }
}
