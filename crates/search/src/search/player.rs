use crate::*;

/// How one role is seated for a simulated episode.
///
/// - `grow` — may create (at most one) new entry this episode
/// - `trace` — records its hidden state into passive tallies
///
/// A player pinned to its real hidden state must not leave traces:
/// those tallies model what the opponent believes, and the opponent
/// never sees the real state.
#[derive(Debug, Clone)]
pub struct Seat<B> {
    pub body: B,
    pub grow: bool,
    pub trace: bool,
}

impl<B> Seat<B> {
    /// A seat drawn from a belief: grows and leaves traces.
    pub fn drawn(body: B) -> Self {
        Self {
            body,
            grow: true,
            trace: true,
        }
    }
    /// A seat pinned to a known hidden state: grows, leaves no traces.
    pub fn pinned(body: B) -> Self {
        Self {
            body,
            grow: true,
            trace: false,
        }
    }
}

/// A simulated player's state within one episode.
#[derive(Debug, Clone)]
pub struct Player<B> {
    body: B,
    trace: bool,
    budget: bool,
    on_tree: bool,
    trajectory: Trajectory<B>,
}

impl<B> From<Seat<B>> for Player<B> {
    fn from(seat: Seat<B>) -> Self {
        Self {
            body: seat.body,
            trace: seat.trace,
            budget: seat.grow,
            on_tree: true,
            trajectory: Trajectory::default(),
        }
    }
}

impl<B> Player<B>
where
    B: Body,
{
    pub fn body(&self) -> &B {
        &self.body
    }
    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }
    pub fn trace(&self) -> bool {
        self.trace
    }
    /// Whether this player may still create an entry.
    pub fn budget(&self) -> bool {
        self.budget
    }
    pub fn spend(&mut self) {
        self.budget = false;
    }
    pub fn on_tree(&self) -> bool {
        self.on_tree
    }
    /// Once off-tree, a player stays off for the rest of the episode.
    pub fn fall(&mut self) {
        self.on_tree = false;
    }
    pub fn trajectory(&self) -> &Trajectory<B> {
        &self.trajectory
    }
    pub fn trajectory_mut(&mut self) -> &mut Trajectory<B> {
        &mut self.trajectory
    }
}
