use super::Turn;
use incognito_core::Action;
use incognito_core::Utility;

/// Legal-action mask over a body's fixed action set.
pub type Mask = Vec<bool>;

/// One player's hidden state, as supplied by a game body.
///
/// A body carries the player's private information plus whatever public
/// history it needs to compute legal actions and rewards. Bodies are used
/// as map keys in the tree, so a body must never be mutated in place
/// once keyed: the engine clones before acting or hearing.
///
/// # Exchange Protocol
///
/// Each ply, the acting body calls `act(action)` and produces a message
/// and an immediate reward; the other body then calls `hear(message)` and
/// receives its own reward. An episode ends after any exchange in which
/// either body reports `terminal()`. Bodies must guarantee termination.
///
/// # Requirements
///
/// - `Ord` + `Eq` — Usable as ordered map keys
/// - `Clone` — Snapshotted at every decision
/// - `Send` + `Sync` + `'static` — Independent agents may run on separate threads
pub trait Body
where
    Self: Clone + Ord + Eq,
    Self: std::fmt::Debug,
    Self: Send + Sync + 'static,
{
    /// Public message exchanged between the players.
    type Message: Clone + Ord + Eq + std::fmt::Debug + Send + Sync;

    /// Size of the fixed action set.
    const ACTIONS: usize;
    /// Length of the numeric encoding returned by `features()`.
    const FEATURES: usize;

    /// The role this hidden state belongs to.
    fn turn(&self) -> Turn;
    /// Which actions are legal now. Length `ACTIONS`.
    fn legal(&self) -> Mask;
    /// Takes an own action, returning the message sent and the reward earned.
    fn act(&mut self, action: Action) -> (Self::Message, Utility);
    /// Receives the opponent's message, returning the reward earned.
    fn hear(&mut self, message: &Self::Message) -> Utility;
    /// Whether this player's game is over.
    fn terminal(&self) -> bool;
    /// Fixed-length numeric encoding for the approximator. Length `FEATURES`.
    fn features(&self) -> Vec<f32>;
    /// The action this state would have taken to emit `message`, if it
    /// could have emitted it at all and the message identifies the action.
    fn attribute(&self, message: &Self::Message) -> Option<Action>;

    /// Legal action indices.
    fn choices(&self) -> Vec<Action> {
        self.legal()
            .into_iter()
            .enumerate()
            .filter(|(_, legal)| *legal)
            .map(|(action, _)| action)
            .collect()
    }
}
