use crate::*;
use incognito_core::Utility;
use petgraph::graph::NodeIndex;
use rand::rngs::SmallRng;

/// Summary of one simulated episode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Episode {
    /// Entries created in the tree.
    pub created: usize,
    /// Message exchanges until termination.
    pub plies: usize,
    /// Discounted return from each role's first decision, by [`Turn::index`].
    pub returns: [Utility; 2],
    /// Regression targets for the approximator, from both players.
    pub samples: Vec<Regression>,
}

/// Drives simulated episodes between two ephemeral players over one tree.
///
/// The driver is the sole mutator of the tree for the duration of an
/// episode. The approximator is only read here: its training samples
/// are handed back in the [`Episode`] for the owner to buffer and train
/// on between episodes.
pub struct SelfPlay<'a, B, A, S>
where
    B: Body,
    A: Approximator,
    S: Selection,
{
    tree: &'a mut Tree<B>,
    approximator: &'a A,
    selection: &'a S,
    config: &'a Config,
}

impl<'a, B, A, S> SelfPlay<'a, B, A, S>
where
    B: Body,
    A: Approximator,
    S: Selection,
{
    pub fn new(tree: &'a mut Tree<B>, approximator: &'a A, selection: &'a S, config: &'a Config) -> Self {
        Self {
            tree,
            approximator,
            selection,
            config,
        }
    }

    /// Plays one episode from the root and back-propagates both players.
    ///
    /// `seats` are indexed by role; the tree's mover acts first.
    pub fn episode(&mut self, seats: [Seat<B>; 2], rng: &mut SmallRng) -> Episode {
        let mut players = seats.map(Player::from);
        let mut node = Some(self.tree.root());
        let mut turn = self.tree.mover();
        let mut created = 0;
        let mut plies = 0;
        loop {
            let (a, p) = (turn.index(), turn.other().index());
            if let Some(index) = node {
                if players[a].trace() {
                    self.tree.at_mut(index).record_active_visit(players[a].body());
                }
                if players[p].trace() {
                    self.tree.at_mut(index).record_passive_visit(players[p].body());
                }
            }
            let (decision, fresh) = self.decide(node, &mut players[a], rng);
            created += fresh as usize;
            let (message, reward) = players[a].body_mut().act(decision.action);
            players[a].trajectory_mut().push(decision);
            players[a].trajectory_mut().reward(reward);
            let reward = players[p].body_mut().hear(&message);
            players[p].trajectory_mut().reward(reward);
            plies += 1;
            node = match (node, players.iter().any(Player::on_tree)) {
                (Some(index), true) => self.tree.child(index, &message, true),
                _ => None,
            };
            if players.iter().any(|player| player.body().terminal()) {
                break;
            }
            turn = turn.other();
        }
        let discount = self.config.discount;
        for player in players.iter() {
            player
                .trajectory()
                .credit(self.tree, discount, self.config.decay);
        }
        let tree = &*self.tree;
        let samples = players
            .iter()
            .flat_map(|p| p.trajectory().regressions(tree, discount))
            .collect();
        Episode {
            created,
            plies,
            returns: players.each_ref().map(|p| p.trajectory().value(discount)),
            samples,
        }
    }

    /// Chooses the acting player's action, on-tree if it still can be.
    ///
    /// The second value is whether this decision grew a new entry, which
    /// spends the player's growth budget. A lookup that finds no entry and
    /// may not grow one sends the player off-tree for good.
    fn decide(
        &mut self,
        node: Option<NodeIndex>,
        player: &mut Player<B>,
        rng: &mut SmallRng,
    ) -> (Decision<B>, bool) {
        let hidden = player.body().clone();
        let approximator = self.approximator;
        let selection = self.selection;
        let lookup = match (node, player.on_tree()) {
            (Some(index), true) => self
                .tree
                .at_mut(index)
                .value_entry(&hidden, player.budget(), || approximator.predict(&hidden.features()))
                .map(|(entry, fresh)| (index, selection.select(entry, rng), fresh)),
            _ => None,
        };
        match lookup {
            Some((index, action, fresh)) => {
                if fresh {
                    player.spend();
                }
                let decision = Decision {
                    node: Some(index),
                    hidden,
                    action,
                    grown: fresh,
                    reward: 0.,
                };
                (decision, fresh)
            }
            None => {
                player.fall();
                let values = approximator.predict(&hidden.features());
                let action = self.config.rollout.choose(&values, &hidden.legal(), rng);
                let decision = Decision {
                    node: None,
                    hidden,
                    action,
                    grown: false,
                    reward: 0.,
                };
                (decision, false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use incognito_core::Action;
    use rand::SeedableRng;

    /// Both players press the only button in turn for eight plies.
    /// The first mover earns 1, 2, 3, 4 on its four presses.
    #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
    struct Clock {
        first: bool,
        ply: u8,
    }

    impl Clock {
        fn new(first: bool) -> Self {
            Self { first, ply: 0 }
        }
    }

    impl Body for Clock {
        type Message = u8;
        const ACTIONS: usize = 1;
        const FEATURES: usize = 1;
        fn turn(&self) -> Turn {
            Turn::from(self.first)
        }
        fn legal(&self) -> Mask {
            vec![true]
        }
        fn act(&mut self, _: Action) -> (u8, Utility) {
            self.ply += 1;
            let reward = match self.first {
                true => ((self.ply + 1) / 2) as Utility,
                false => 0.,
            };
            (self.ply, reward)
        }
        fn hear(&mut self, message: &u8) -> Utility {
            self.ply = *message;
            0.
        }
        fn terminal(&self) -> bool {
            self.ply >= 8
        }
        fn features(&self) -> Vec<f32> {
            vec![self.ply as f32]
        }
        fn attribute(&self, _: &u8) -> Option<Action> {
            Some(0)
        }
    }

    struct Flat;

    impl Approximator for Flat {
        fn predict(&self, _: &[f32]) -> Vec<Utility> {
            vec![0.]
        }
        fn regress(&mut self, _: Regression) {}
        fn witness(&mut self, _: Witness) {}
        fn train(&mut self) -> Option<Loss> {
            None
        }
    }

    fn seats() -> [Seat<Clock>; 2] {
        [Seat::drawn(Clock::new(true)), Seat::drawn(Clock::new(false))]
    }

    #[test]
    fn discount_folds_from_terminal() {
        let config = Config {
            discount: 0.9,
            ..Config::default()
        };
        let ref mut rng = SmallRng::seed_from_u64(0);
        let mut tree = Tree::new(Turn::First);
        let episode = SelfPlay::new(&mut tree, &Flat, &Ucb, &config).episode(seats(), rng);
        let expected = 1. + 0.9 * 2. + 0.81 * 3. + 0.729 * 4.;
        assert_eq!(episode.plies, 8);
        assert!((episode.returns[0] - expected).abs() < 1e-4, "{:?}", episode);
        assert_eq!(episode.returns[1], 0.);
        let entry = tree.head().entry(&Clock::new(true)).expect("root entry grown");
        assert_eq!(entry.counts(), vec![2]);
        assert!((entry.slot(0).mean().unwrap() - expected / 2.).abs() < 1e-4);
        assert_eq!(episode.samples.len(), 8, "two grown entries, six off-tree decisions");
        assert_eq!(episode.samples[0].counts, vec![2]);
        assert_eq!(episode.samples.iter().filter(|s| s.counts == vec![1]).count(), 6);
    }

    #[test]
    fn growth_is_one_entry_per_player_per_episode() {
        let config = Config::default();
        let ref mut rng = SmallRng::seed_from_u64(0);
        let mut tree = Tree::new(Turn::First);
        for k in 1..=6 {
            let episode = SelfPlay::new(&mut tree, &Flat, &Ucb, &config).episode(seats(), rng);
            assert!(episode.created <= 2, "episode {} grew {}", k, episode.created);
            assert_eq!(tree.entries(), (2 * k).min(8));
        }
    }

    #[test]
    fn pinned_seats_leave_no_trace() {
        let config = Config::default();
        let ref mut rng = SmallRng::seed_from_u64(0);
        let mut tree = Tree::new(Turn::First);
        let seats = [Seat::drawn(Clock::new(true)), Seat::pinned(Clock::new(false))];
        SelfPlay::new(&mut tree, &Flat, &Ucb, &config).episode(seats, rng);
        assert_eq!(tree.head().tally().count(), 0);
        assert_eq!(tree.head().visits().count(), 1);
        let below = tree.follow(tree.root(), &1).expect("first exchange node");
        assert_eq!(tree.at(below).tally().count(), 1);
        assert_eq!(tree.at(below).visits().count(), 0);
        assert!(tree.at(below).entry(&Clock { first: false, ply: 1 }).is_some());
    }

    #[test]
    fn traces_outlive_the_growth_budget() {
        let config = Config::default();
        let ref mut rng = SmallRng::seed_from_u64(0);
        let mut tree = Tree::new(Turn::First);
        SelfPlay::new(&mut tree, &Flat, &Ucb, &config).episode(seats(), rng);
        let deep = [1, 2]
            .iter()
            .try_fold(tree.root(), |node, ply| tree.follow(node, ply))
            .expect("second first-mover node");
        assert_eq!(tree.at(deep).entries().count(), 0, "budget already spent");
        assert_eq!(tree.at(deep).visits().count(), 1);
    }

    #[test]
    fn players_without_growth_stay_off_tree() {
        let config = Config::default();
        let ref mut rng = SmallRng::seed_from_u64(0);
        let mut tree = Tree::new(Turn::First);
        let seats = [
            Seat {
                grow: false,
                ..Seat::drawn(Clock::new(true))
            },
            Seat {
                grow: false,
                ..Seat::drawn(Clock::new(false))
            },
        ];
        let episode = SelfPlay::new(&mut tree, &Flat, &Ucb, &config).episode(seats, rng);
        assert_eq!(episode.created, 0);
        assert_eq!(tree.entries(), 0);
        assert_eq!(tree.n(), 2, "one node for the second mover, then nothing");
        assert_eq!(episode.samples.len(), 8, "every decision was off-tree");
        assert!(episode.samples.iter().all(|s| s.counts == vec![1]));
    }
}
