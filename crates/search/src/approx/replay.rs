use std::collections::VecDeque;

/// Bounded ring buffer of training samples.
///
/// Pushing into a full buffer evicts the oldest sample. `fresh` counts
/// pushes since the last `settle`, which is how the approximator decides
/// whether enough new data has arrived to train again.
#[derive(Debug, Clone)]
pub struct Replay<T> {
    buffer: VecDeque<T>,
    capacity: usize,
    fresh: usize,
}

impl<T> Replay<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "replay buffer needs room for one sample");
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
            fresh: 0,
        }
    }
    pub fn push(&mut self, sample: T) {
        if self.buffer.len() == self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(sample);
        self.fresh += 1;
    }
    pub fn len(&self) -> usize {
        self.buffer.len()
    }
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
    /// Samples pushed since the last `settle`.
    pub fn fresh(&self) -> usize {
        self.fresh
    }
    pub fn settle(&mut self) {
        self.fresh = 0;
    }
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_when_full() {
        let mut replay = Replay::new(3);
        (0..5).for_each(|i| replay.push(i));
        assert_eq!(replay.len(), 3);
        assert_eq!(replay.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(replay.fresh(), 5);
        replay.settle();
        assert_eq!(replay.fresh(), 0);
        assert_eq!(replay.len(), 3);
    }
}
