use super::*;
use incognito_core::Probability;
use incognito_core::Utility;
use std::collections::BTreeMap;

/// Statistics held at one public position of the shared tree.
///
/// - `active` — entries for the player about to act, keyed by its hidden state
/// - `visits` — traced visit tally of the acting player's hidden states
/// - `passive` — visit tally of the other player's hidden states
///
/// Beliefs come from the two tallies, never from entry sample counts:
/// pinned episodes add samples to entries but leave no traces.
///
/// Children are not stored here: the [`Tree`] owns them as message-labelled
/// edges of its arena, so "parent exclusively owns children" is enforced by
/// the graph and not by pointers.
#[derive(Debug, Clone)]
pub struct Node<B>
where
    B: Body,
{
    active: BTreeMap<B, Entry>,
    visits: BTreeMap<B, u32>,
    passive: BTreeMap<B, u32>,
}

impl<B> Default for Node<B>
where
    B: Body,
{
    fn default() -> Self {
        Self {
            active: BTreeMap::new(),
            visits: BTreeMap::new(),
            passive: BTreeMap::new(),
        }
    }
}

impl<B> Node<B>
where
    B: Body,
{
    /// Looks up the entry for `hidden`.
    ///
    /// If absent and `grow` is set, creates one bootstrapped from
    /// `prediction` and flags it as created. If absent and growth is
    /// disallowed, returns `None`: the caller has fallen off-tree.
    pub fn value_entry<F>(
        &mut self,
        hidden: &B,
        grow: bool,
        prediction: F,
    ) -> Option<(&mut Entry, bool)>
    where
        F: FnOnce() -> Vec<Utility>,
    {
        match (self.active.contains_key(hidden), grow) {
            (true, _) => self.active.get_mut(hidden).map(|e| (e, false)),
            (false, false) => None,
            (false, true) => {
                let entry = Entry::bootstrap(hidden.legal(), &prediction());
                Some((self.active.entry(hidden.clone()).or_insert(entry), true))
            }
        }
    }
    /// Read-only entry lookup.
    pub fn entry(&self, hidden: &B) -> Option<&Entry> {
        self.active.get(hidden)
    }
    pub fn entry_mut(&mut self, hidden: &B) -> Option<&mut Entry> {
        self.active.get_mut(hidden)
    }
    /// Counts one traced visit of the acting player's hidden state,
    /// whether or not an entry exists for it.
    pub fn record_active_visit(&mut self, hidden: &B) {
        *self.visits.entry(hidden.clone()).or_insert(0) += 1;
    }
    /// Counts one visit of the non-acting player's hidden state.
    pub fn record_passive_visit(&mut self, hidden: &B) {
        *self.passive.entry(hidden.clone()).or_insert(0) += 1;
    }
    pub fn entries(&self) -> impl Iterator<Item = (&B, &Entry)> {
        self.active.iter()
    }
    pub fn visits(&self) -> impl Iterator<Item = (&B, &u32)> {
        self.visits.iter()
    }
    pub fn tally(&self) -> impl Iterator<Item = (&B, &u32)> {
        self.passive.iter()
    }
    /// Total samples across every entry at this node.
    pub fn total(&self) -> u32 {
        self.active.values().map(Entry::total).sum()
    }
    /// `(hidden state, weight)` pairs for the acting player,
    /// weighted by traced visit count.
    pub fn active_belief(&self) -> Vec<(B, Probability)> {
        self.visits
            .iter()
            .map(|(b, n)| (b.clone(), *n as Probability))
            .collect()
    }
    /// `(hidden state, weight)` pairs for the passive player,
    /// weighted by visit count.
    pub fn passive_belief(&self) -> Vec<(B, Probability)> {
        self.passive
            .iter()
            .map(|(b, n)| (b.clone(), *n as Probability))
            .collect()
    }
}

impl<B> std::fmt::Display for Node<B>
where
    B: Body,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} entries, {} samples, {} visits, {} passive",
            self.active.len(),
            self.total(),
            self.visits.values().sum::<u32>(),
            self.passive.values().sum::<u32>()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pennies;

    #[test]
    fn grows_only_when_allowed() {
        let mut node = Node::<Pennies>::default();
        let ref hidden = Pennies::first();
        assert!(node.value_entry(hidden, false, || unreachable!()).is_none());
        let (entry, created) = node.value_entry(hidden, true, || vec![0.25, -0.25]).unwrap();
        assert!(created);
        assert_eq!(entry.values(), vec![0.25, -0.25]);
        let (_, created) = node.value_entry(hidden, true, || unreachable!()).unwrap();
        assert!(!created);
        let (_, created) = node.value_entry(hidden, false, || unreachable!()).unwrap();
        assert!(!created);
    }

    #[test]
    fn passive_visits_accumulate() {
        let mut node = Node::<Pennies>::default();
        let ref hidden = Pennies::second();
        node.record_passive_visit(hidden);
        node.record_passive_visit(hidden);
        assert_eq!(node.passive_belief(), vec![(hidden.clone(), 2.)]);
        assert!(node.active_belief().is_empty());
    }

    #[test]
    fn active_belief_ignores_entry_samples() {
        let mut node = Node::<Pennies>::default();
        let ref hidden = Pennies::first();
        let (entry, _) = node.value_entry(hidden, true, || vec![0., 0.]).unwrap();
        (0..50).for_each(|_| entry.add(0, 1., None));
        assert!(node.active_belief().is_empty());
        node.record_active_visit(hidden);
        assert_eq!(node.active_belief(), vec![(hidden.clone(), 1.)]);
        assert_eq!(node.total(), 52);
    }
}
