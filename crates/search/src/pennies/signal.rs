use super::*;

/// Public message of one pennies exchange.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Signal {
    /// The first mover committed to a coin without showing it.
    Sealed,
    /// The second mover's coin, in the open.
    Shown(Coin),
    /// The first mover's sealed coin, opened.
    Revealed(Coin),
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sealed => write!(f, "sealed"),
            Self::Shown(coin) => write!(f, "shown {}", coin),
            Self::Revealed(coin) => write!(f, "revealed {}", coin),
        }
    }
}
