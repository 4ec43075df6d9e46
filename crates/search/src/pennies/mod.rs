//! Asymmetric matching pennies as a minimal self-play test case.
//!
//! The first mover seals a coin, the second mover shows one in the open,
//! then the first mover must reveal what it sealed. The first mover wins
//! on a match and loses on a mismatch, with heads/heads paying more:
//!
//! | P1 \ P2 | Heads | Tails |
//! |---------|-------|-------|
//! | Heads   | +3    | −1    |
//! | Tails   | −1    | +1    |
//!
//! Each player mixes heads with probability 1/3 at equilibrium, so every
//! first-mover action is worth +1/3 and every second-mover action −1/3.
//! The second mover cannot see the sealed coin, so it has a single hidden
//! state per public history, while the first mover's state carries its coin.
//!
//! # File Structure
//!
//! - [`Coin`] — the two actions
//! - [`Signal`] — public messages: Sealed, Shown(coin), Revealed(coin)
//! - [`Pennies`] — one player's hidden state, implementing [`Body`](crate::Body)

mod coin;
mod game;
mod signal;

pub use coin::*;
pub use game::*;
pub use signal::*;
