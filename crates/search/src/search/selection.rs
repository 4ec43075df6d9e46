use crate::*;
use incognito_core::Action;
use incognito_core::Utility;
use rand::Rng;
use rand::rngs::SmallRng;

/// Chooses an action at an on-tree decision point.
pub trait Selection {
    fn select(&self, entry: &Entry, rng: &mut SmallRng) -> Action;
}

/// Upper-confidence selection with a range-normalized exploration bonus.
///
/// - Any legal action with zero samples is chosen first, uniformly.
/// - Otherwise maximize `mean + scale · √(2 ln N) / √n`, where `N` is the
///   entry's total sample count, `n` the action's count, and `scale` the
///   spread (max − min) of legal means at this entry.
///
/// Scaling by the observed spread keeps the bonus commensurate with the
/// node's own rewards instead of a fixed constant. Ties are broken
/// uniformly by reservoir sampling.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ucb;

impl Selection for Ucb {
    fn select(&self, entry: &Entry, rng: &mut SmallRng) -> Action {
        let legal = entry.legal();
        if let Some(action) = unexplored(entry, rng) {
            return action;
        }
        let means = entry
            .slots()
            .iter()
            .map(|s| s.mean().unwrap_or(Utility::NEG_INFINITY))
            .collect::<Vec<_>>();
        let (lo, hi) = means
            .iter()
            .zip(legal)
            .filter(|(_, l)| **l)
            .fold((Utility::INFINITY, Utility::NEG_INFINITY), |(lo, hi), (m, _)| {
                (lo.min(*m), hi.max(*m))
            });
        let scale = hi - lo;
        let bonus = scale * (2. * (entry.total() as Utility).ln()).sqrt();
        let scores = means
            .iter()
            .zip(entry.slots())
            .map(|(mean, slot)| match slot.count() {
                0 => Utility::NEG_INFINITY,
                n => mean + bonus / (n as Utility).sqrt(),
            })
            .collect::<Vec<_>>();
        argmax(&scores, legal, rng)
    }
}

/// A uniformly chosen legal action with no samples, if any remain.
fn unexplored(entry: &Entry, rng: &mut SmallRng) -> Option<Action> {
    let mut pick = None;
    let mut seen = 0;
    for (action, slot) in entry.slots().iter().enumerate() {
        if entry.legal()[action] && slot.count() == 0 {
            seen += 1;
            if rng.random_range(0..seen) == 0 {
                pick = Some(action);
            }
        }
    }
    pick
}
