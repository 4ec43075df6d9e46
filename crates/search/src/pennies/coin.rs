use incognito_core::Action;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Coin {
    Heads,
    Tails,
}

impl Coin {
    pub fn all() -> [Self; 2] {
        [Self::Heads, Self::Tails]
    }
}

impl From<Coin> for Action {
    fn from(coin: Coin) -> Self {
        match coin {
            Coin::Heads => 0,
            Coin::Tails => 1,
        }
    }
}

impl From<Action> for Coin {
    fn from(action: Action) -> Self {
        match action {
            0 => Self::Heads,
            1 => Self::Tails,
            _ => unreachable!("pennies has two actions"),
        }
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Heads => write!(f, "H"),
            Self::Tails => write!(f, "T"),
        }
    }
}
