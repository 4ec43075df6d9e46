use crate::*;
use incognito_core::Utility;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::sync::Arc;

/// Shared, reentrant prior over one role's initial hidden state.
pub type Prior<B> = Arc<dyn Sampler<B> + Send + Sync>;

/// Owns one agent's search state across a real episode.
///
/// The tree lives from `start_episode` until `end_episode` or a fatal
/// off-tree shift. The approximator, the priors and the random source
/// live as long as the manager, so learning carries across episodes.
///
/// # Lifecycle
///
/// - `start_episode(first)` — Fresh tree, self-play from the priors
/// - `on_own_move(message)` — Shift the root along our own message
/// - `on_opponent_message(message)` — Learn from the message, then shift
/// - `query(hidden)` — Action values for our real hidden state
/// - `end_episode()` — Drop the tree
///
/// Operations on one manager are serialized by `&mut self`. Independent
/// managers share nothing but their priors and can run on separate threads.
pub struct Manager<B, A = Perceptron, S = Ucb>
where
    B: Body,
    A: Approximator,
    S: Selection,
{
    config: Config,
    approximator: A,
    selection: S,
    priors: [Prior<B>; 2],
    tree: Option<Tree<B>>,
    hero: Turn,
    rng: SmallRng,
    metrics: Metrics,
}

impl<B> Manager<B, Perceptron, Ucb>
where
    B: Body,
{
    /// A manager with a [`Perceptron`] approximator and [`Ucb`] selection.
    pub fn new(config: Config, priors: [Prior<B>; 2]) -> Self {
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let approximator = Perceptron::of::<B>(config.hyper.clone(), &mut rng);
        Self {
            config,
            approximator,
            selection: Ucb,
            priors,
            tree: None,
            hero: Turn::First,
            rng,
            metrics: Metrics::default(),
        }
    }
}

impl<B, A, S> Manager<B, A, S>
where
    B: Body,
    A: Approximator,
    S: Selection,
{
    pub fn with(config: Config, approximator: A, selection: S, priors: [Prior<B>; 2]) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(config.seed),
            config,
            approximator,
            selection,
            priors,
            tree: None,
            hero: Turn::First,
            metrics: Metrics::default(),
        }
    }

    /// Discards any old tree, plants a new root and grows it from the priors
    /// until the root holds `min_root_samples`.
    pub fn start_episode(&mut self, first: bool) -> Result<()> {
        self.hero = Turn::from(first);
        self.tree = Some(Tree::new(Turn::First));
        log::info!("{:<32}{:<32}", "starting episode", format!("playing {}", self.hero));
        let min = self.config.min_root_samples;
        self.simulate(None, |tree| tree.head().total() >= min)?;
        Ok(())
    }

    /// Shifts the root along a message we sent.
    pub fn on_own_move(&mut self, message: &B::Message) -> Result<()> {
        self.shift(message)
    }

    /// Records the message against the current belief over the opponent,
    /// then shifts the root along it.
    pub fn on_opponent_message(&mut self, message: &B::Message) -> Result<()> {
        let tree = self.tree.as_ref().ok_or(Error::NoEpisode)?;
        match Witness::observe(&tree.head().active_belief(), message) {
            Some(witness) => self.approximator.witness(witness),
            None => log::warn!("{:<32}{:<32}", "uninformative message", format!("{:?}", message)),
        }
        self.shift(message)
    }

    /// Action values for `hidden`. Illegal actions read `NEG_INFINITY`.
    ///
    /// # Panics
    ///
    /// In debug builds, if `hidden` does not belong to the role acting
    /// at the root.
    ///
    /// Tops the root up to `min_root_samples` first, then runs targeted
    /// episodes pinned to `hidden` until its entry holds `min_entry_samples`.
    /// A root no traced episode has reached yet is grown from `hidden` alone.
    pub fn query(&mut self, hidden: &B) -> Result<Vec<Utility>> {
        let tree = self.tree.as_ref().ok_or(Error::NoEpisode)?;
        debug_assert!(
            hidden.turn() == tree.mover(),
            "queried {:?} while {} acts at the root",
            hidden,
            tree.mover()
        );
        let min_root = self.config.min_root_samples;
        let min_entry = self.config.min_entry_samples;
        let seed = match tree.head().visits().next() {
            Some(_) => None,
            None => Some(hidden),
        };
        self.simulate(seed, |tree| tree.head().total() >= min_root)?;
        self.simulate(Some(hidden), |tree| {
            tree.head().entry(hidden).map_or(0, Entry::total) >= min_entry
        })?;
        let tree = self.tree.as_ref().ok_or(Error::NoEpisode)?;
        let values = match tree.head().entry(hidden) {
            Some(entry) => {
                self.approximator.regress(Regression::from((hidden, entry)));
                entry.values()
            }
            None => self
                .approximator
                .predict(&hidden.features())
                .into_iter()
                .zip(hidden.legal())
                .map(|(v, legal)| if legal { v } else { Utility::NEG_INFINITY })
                .collect(),
        };
        log::debug!("{:<32}{:<32}", "answered query", format!("{:?}", values));
        Ok(values)
    }

    /// Discards the tree. A no-op if there is none.
    pub fn end_episode(&mut self) {
        if let Some(tree) = self.tree.take() {
            log::info!("{:<32}{:<32}", "ending episode", format!("{} nodes", tree.n()));
        }
    }

    pub fn hero(&self) -> Turn {
        self.hero
    }
    pub fn tree(&self) -> Option<&Tree<B>> {
        self.tree.as_ref()
    }
    /// The root entry for `hidden`, if self-play has grown one.
    pub fn entry(&self, hidden: &B) -> Option<&Entry> {
        self.tree.as_ref()?.head().entry(hidden)
    }
    pub fn approximator(&self) -> &A {
        &self.approximator
    }
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Harvests the root's entries into the regression buffer, then
    /// advances the root. Real play leaving the tree is fatal: the tree
    /// is dropped and later operations fail until the next episode.
    fn shift(&mut self, message: &B::Message) -> Result<()> {
        let tree = self.tree.as_mut().ok_or(Error::NoEpisode)?;
        for (hidden, entry) in tree.head().entries() {
            self.approximator.regress(Regression::from((hidden, entry)));
        }
        match tree.shift(message) {
            Ok(_) => {
                self.metrics.add_shift();
                log::info!(
                    "{:<32}{:<32}",
                    format!("shifted root {:?}", message),
                    format!("depth {} nodes {}", tree.depth(), tree.n())
                );
                Ok(())
            }
            Err(e) => {
                log::error!("{}", e);
                self.tree = None;
                Err(e)
            }
        }
    }

    /// Who the acting or passive role at the root is believed to be.
    /// At the initial root these are the priors; below it, the traced
    /// visit tallies of the root.
    fn sampler(&self, role: Turn) -> Result<Prior<B>> {
        let tree = self.tree.as_ref().ok_or(Error::NoEpisode)?;
        if tree.depth() == 0 {
            return Ok(self.priors[role.index()].clone());
        }
        let pairs = match role == tree.mover() {
            true => tree.head().active_belief(),
            false => tree.head().passive_belief(),
        };
        Ok(Arc::new(Belief::try_from(pairs)?))
    }

    /// Runs episodes from the root until `done` holds, buffering each
    /// episode's regression targets and training the approximator between
    /// episodes. With `pinned`, the mover is seated at that hidden state
    /// and leaves no traces.
    fn simulate<F>(&mut self, pinned: Option<&B>, done: F) -> Result<usize>
    where
        F: Fn(&Tree<B>) -> bool,
    {
        let mover = self.tree.as_ref().ok_or(Error::NoEpisode)?.mover();
        let (active, trace) = match pinned {
            Some(hidden) => {
                let hidden = hidden.clone();
                let pin: Prior<B> = Arc::new(move |_: &mut SmallRng| hidden.clone());
                (pin, false)
            }
            None => (self.sampler(mover)?, true),
        };
        let passive = self.sampler(mover.other())?;
        let tree = self.tree.as_mut().ok_or(Error::NoEpisode)?;
        let mut count = 0;
        while !done(tree) {
            let actor = Seat {
                body: active.sample(&mut self.rng),
                grow: true,
                trace,
            };
            let other = Seat::drawn(passive.sample(&mut self.rng));
            let seats = match mover {
                Turn::First => [actor, other],
                Turn::Second => [other, actor],
            };
            let mut episode = SelfPlay::new(tree, &self.approximator, &self.selection, &self.config)
                .episode(seats, &mut self.rng);
            for sample in std::mem::take(&mut episode.samples) {
                self.approximator.regress(sample);
            }
            self.metrics.record(&episode);
            if let Some(loss) = self.approximator.train() {
                self.metrics.add_round();
                log::debug!("{:<32}{:<32}", "trained approximator", loss.to_string());
            }
            if let Some(line) = self.metrics.checkpoint() {
                log::debug!("{}", line);
            }
            count += 1;
        }
        log::debug!(
            "{:<32}{:<32}",
            format!("self-play {}", if trace { "open" } else { "pinned" }),
            format!("{} episodes", count)
        );
        Ok(count)
    }
}
