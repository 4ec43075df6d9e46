/// One of the two roles in a game.
///
/// `First` sends the first message of every real episode.
/// The role acting at a tree node alternates with depth.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Turn {
    First,
    Second,
}

impl Turn {
    pub fn other(&self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
    /// Position of this role in `[T; 2]` arrays.
    pub fn index(&self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
    pub fn both() -> [Self; 2] {
        [Self::First, Self::Second]
    }
}

impl From<bool> for Turn {
    /// `true` means "moves first".
    fn from(first: bool) -> Self {
        if first { Self::First } else { Self::Second }
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First => write!(f, "P1"),
            Self::Second => write!(f, "P2"),
        }
    }
}
