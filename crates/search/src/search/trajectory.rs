use crate::*;
use incognito_core::Action;
use incognito_core::Probability;
use incognito_core::Utility;
use petgraph::graph::NodeIndex;

/// One decision made by a simulated player.
///
/// `node` is `Some` only for on-tree decisions, which are the ones
/// that receive a sample during back-propagation.
#[derive(Debug, Clone)]
pub struct Decision<B> {
    pub node: Option<NodeIndex>,
    pub hidden: B,
    pub action: Action,
    /// Whether this decision grew the entry it was made from.
    pub grown: bool,
    /// Rewards earned from this decision until the player's next one.
    pub reward: Utility,
}

impl<B> Decision<B> {
    pub fn on_tree(&self) -> bool {
        self.node.is_some()
    }
}

/// A player's decisions over one episode, in play order.
#[derive(Debug, Clone)]
pub struct Trajectory<B>(Vec<Decision<B>>);

impl<B> Default for Trajectory<B> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<B> Trajectory<B>
where
    B: Body,
{
    pub fn push(&mut self, decision: Decision<B>) {
        self.0.push(decision);
    }
    /// Credits a reward to the latest decision. Rewards that arrive
    /// before the player's first decision belong to no action.
    pub fn reward(&mut self, reward: Utility) {
        if let Some(last) = self.0.last_mut() {
            last.reward += reward;
        }
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn decisions(&self) -> &[Decision<B>] {
        &self.0
    }
    /// Discounted return from each decision onward, in play order:
    /// walking back from the terminal, `cumulative = reward + discount · cumulative`.
    pub fn returns(&self, discount: Utility) -> Vec<Utility> {
        let mut returns = self
            .0
            .iter()
            .rev()
            .scan(0., |cumulative, decision| {
                *cumulative = decision.reward + discount * *cumulative;
                Some(*cumulative)
            })
            .collect::<Vec<_>>();
        returns.reverse();
        returns
    }
    /// Back-propagates into the tree: every on-tree decision adds its
    /// discounted return as one sample of the action it took. Off-tree
    /// decisions only contribute through the returns of earlier ones.
    pub fn credit(&self, tree: &mut Tree<B>, discount: Utility, decay: Option<Probability>) {
        for (decision, value) in self.0.iter().zip(self.returns(discount)) {
            if let Some(node) = decision.node {
                tree.at_mut(node)
                    .entry_mut(&decision.hidden)
                    .expect("on-tree decision keeps its entry for the episode")
                    .add(decision.action, value, decay);
            }
        }
    }
    /// Regression targets left by this episode, read after `credit`:
    /// every off-tree decision as one sample of the action it took, and
    /// every entry grown this episode as it stands after its first backup.
    pub fn regressions(&self, tree: &Tree<B>, discount: Utility) -> Vec<Regression> {
        self.0
            .iter()
            .zip(self.returns(discount))
            .filter_map(|(decision, value)| match decision.node {
                None => Some(Regression::taken(
                    decision.hidden.features(),
                    B::ACTIONS,
                    decision.action,
                    value,
                )),
                Some(node) if decision.grown => tree
                    .at(node)
                    .entry(&decision.hidden)
                    .map(|entry| Regression::from((&decision.hidden, entry))),
                Some(_) => None,
            })
            .collect()
    }
    /// Return from the first decision, zero if the player never acted.
    pub fn value(&self, discount: Utility) -> Utility {
        self.returns(discount).first().copied().unwrap_or(0.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pennies;

    fn decision(reward: Utility) -> Decision<Pennies> {
        Decision {
            node: None,
            hidden: Pennies::first(),
            action: 0,
            grown: false,
            reward,
        }
    }

    #[test]
    fn returns_fold_discount_backwards() {
        let mut trajectory = Trajectory::default();
        trajectory.reward(100.);
        [1., 2., 3.].into_iter().map(decision).for_each(|d| trajectory.push(d));
        trajectory.reward(1.);
        let returns = trajectory.returns(0.5);
        assert_eq!(returns, vec![1. + 0.5 * 2. + 0.25 * 4., 2. + 0.5 * 4., 4.]);
        assert_eq!(trajectory.value(0.5), returns[0]);
    }

    #[test]
    fn off_tree_decisions_become_single_samples() {
        let tree = Tree::<Pennies>::new(Turn::First);
        let mut trajectory = Trajectory::default();
        trajectory.push(Decision {
            action: 1,
            ..decision(2.)
        });
        trajectory.push(decision(4.));
        let samples = trajectory.regressions(&tree, 0.5);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].counts, vec![0, 1]);
        assert_eq!(samples[0].means, vec![0., 4.]);
        assert_eq!(samples[1].counts, vec![1, 0]);
        assert_eq!(samples[1].means, vec![4., 0.]);
        assert_eq!(samples[0].features, Pennies::first().features());
    }

    #[test]
    fn empty_trajectory_is_worth_nothing() {
        assert_eq!(Trajectory::<Pennies>::default().value(0.9), 0.);
    }
}
