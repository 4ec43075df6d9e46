use super::*;
use crate::Belief;
use crate::Body;
use crate::Mask;
use crate::Prior;
use crate::Result;
use crate::Turn;
use incognito_core::*;
use rand::rngs::SmallRng;
use std::sync::Arc;

/// One player's view of a pennies game.
///
/// `own` is the coin this player committed to. `seen` is the last coin
/// it saw from the opponent. Neither is known to the opponent until the
/// matching message is sent. A `dealt` player has no choice: its only
/// legal coin was fixed by the prior it was drawn from.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pennies {
    turn: Turn,
    dealt: Option<Coin>,
    heard: bool,
    own: Option<Coin>,
    seen: Option<Coin>,
    done: bool,
}

impl Pennies {
    /// The first mover before sealing.
    pub fn first() -> Self {
        Self::new(Turn::First)
    }
    /// The second mover before anything was sealed.
    pub fn second() -> Self {
        Self::new(Turn::Second)
    }
    /// A player whose coin is fixed in advance.
    pub fn dealt(turn: Turn, coin: Coin) -> Self {
        Self {
            dealt: Some(coin),
            ..Self::new(turn)
        }
    }
    fn new(turn: Turn) -> Self {
        Self {
            turn,
            dealt: None,
            heard: false,
            own: None,
            seen: None,
            done: false,
        }
    }
    pub fn own(&self) -> Option<Coin> {
        self.own
    }
    /// Matcher's payoff for a pair of coins.
    pub fn payoff(sealed: Coin, shown: Coin) -> Utility {
        match (sealed, shown) {
            (Coin::Heads, Coin::Heads) => PENNIES_HEADS,
            (Coin::Tails, Coin::Tails) => PENNIES_TAILS,
            _ => PENNIES_MISS,
        }
    }
    /// Probability of heads at the mixed equilibrium, for either role.
    pub fn equilibrium() -> Probability {
        (PENNIES_TAILS - PENNIES_MISS) / (PENNIES_HEADS + PENNIES_TAILS - 2. * PENNIES_MISS)
    }
    /// The matcher's value at the mixed equilibrium.
    pub fn value() -> Utility {
        (PENNIES_HEADS * PENNIES_TAILS - PENNIES_MISS * PENNIES_MISS)
            / (PENNIES_HEADS + PENNIES_TAILS - 2. * PENNIES_MISS)
    }
    /// Free priors: each role draws the undecided player.
    pub fn priors() -> [Prior<Self>; 2] {
        [
            Arc::new(|_: &mut SmallRng| Self::first()),
            Arc::new(|_: &mut SmallRng| Self::second()),
        ]
    }
    /// Dealt players whose coins follow the equilibrium mix.
    pub fn mixed(turn: Turn) -> Result<Belief<Self>> {
        let heads = Self::equilibrium();
        Belief::new(
            Coin::all().map(|coin| Self::dealt(turn, coin)).to_vec(),
            vec![heads, 1. - heads],
        )
    }
    fn one_hot(coin: Option<Coin>) -> [f32; 2] {
        match coin {
            Some(Coin::Heads) => [1., 0.],
            Some(Coin::Tails) => [0., 1.],
            None => [0., 0.],
        }
    }
}

impl Body for Pennies {
    type Message = Signal;
    const ACTIONS: usize = 2;
    const FEATURES: usize = 8;

    fn turn(&self) -> Turn {
        self.turn
    }
    fn legal(&self) -> Mask {
        match (self.turn, self.own) {
            (_, None) => match self.dealt {
                Some(coin) => Coin::all().map(|c| c == coin).to_vec(),
                None => vec![true, true],
            },
            (Turn::First, Some(coin)) => Coin::all().map(|c| c == coin).to_vec(),
            (Turn::Second, Some(_)) => vec![false, false],
        }
    }
    fn act(&mut self, action: Action) -> (Signal, Utility) {
        let coin = Coin::from(action);
        match (self.turn, self.own) {
            (Turn::First, None) => {
                self.own = Some(coin);
                (Signal::Sealed, 0.)
            }
            (Turn::First, Some(sealed)) => {
                debug_assert!(sealed == coin, "revealed a coin that was never sealed");
                self.done = true;
                (Signal::Revealed(sealed), 0.)
            }
            (Turn::Second, None) => {
                self.own = Some(coin);
                (Signal::Shown(coin), 0.)
            }
            (Turn::Second, Some(_)) => unreachable!("second mover acts once"),
        }
    }
    fn hear(&mut self, message: &Signal) -> Utility {
        self.heard = true;
        match (self.turn, message, self.own) {
            (Turn::Second, Signal::Sealed, _) => 0.,
            (Turn::First, Signal::Shown(shown), Some(sealed)) => {
                self.seen = Some(*shown);
                Self::payoff(sealed, *shown)
            }
            (Turn::Second, Signal::Revealed(sealed), Some(shown)) => {
                self.seen = Some(*sealed);
                self.done = true;
                -Self::payoff(*sealed, shown)
            }
            _ => unreachable!("out of order message {:?} for {:?}", message, self),
        }
    }
    fn terminal(&self) -> bool {
        self.done
    }
    fn features(&self) -> Vec<f32> {
        let role = match self.turn {
            Turn::First => 1.,
            Turn::Second => 0.,
        };
        let heard = if self.heard { 1. } else { 0. };
        [role, heard]
            .into_iter()
            .chain(Self::one_hot(self.dealt))
            .chain(Self::one_hot(self.own))
            .chain(Self::one_hot(self.seen))
            .collect()
    }
    fn attribute(&self, message: &Signal) -> Option<Action> {
        match (self.turn, message, self.own) {
            (Turn::Second, Signal::Shown(coin), None) if self.dealt.is_none_or(|d| d == *coin) => {
                Some(Action::from(*coin))
            }
            (Turn::First, Signal::Revealed(coin), Some(sealed)) if *coin == sealed => {
                Some(Action::from(*coin))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Pennies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let show = |coin: Option<Coin>| coin.map(|c| c.to_string()).unwrap_or("-".into());
        write!(f, "{}[{}|{}]", self.turn, show(self.own), show(self.seen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Plays one full game and returns each player's total reward.
    fn play(sealed: Coin, shown: Coin) -> [Utility; 2] {
        let mut p1 = Pennies::first();
        let mut p2 = Pennies::second();
        let mut totals = [0.; 2];
        let (message, r) = p1.act(Action::from(sealed));
        totals[0] += r;
        totals[1] += p2.hear(&message);
        let (message, r) = p2.act(Action::from(shown));
        totals[1] += r;
        totals[0] += p1.hear(&message);
        assert!(!p1.terminal() && !p2.terminal());
        assert_eq!(p1.legal(), Coin::all().map(|c| c == sealed).to_vec());
        let (message, r) = p1.act(Action::from(sealed));
        assert_eq!(message, Signal::Revealed(sealed));
        totals[0] += r;
        totals[1] += p2.hear(&message);
        assert!(p1.terminal() && p2.terminal());
        totals
    }

    #[test]
    fn payoffs_are_zero_sum() {
        assert_eq!(play(Coin::Heads, Coin::Heads), [3., -3.]);
        assert_eq!(play(Coin::Tails, Coin::Tails), [1., -1.]);
        assert_eq!(play(Coin::Heads, Coin::Tails), [-1., 1.]);
        assert_eq!(play(Coin::Tails, Coin::Heads), [-1., 1.]);
    }

    #[test]
    fn equilibrium_makes_both_coins_indifferent() {
        let mix = [1. / 3., 2. / 3.];
        for coin in Coin::all() {
            let value = Coin::all()
                .iter()
                .zip(mix)
                .map(|(other, p)| p * Pennies::payoff(coin, *other))
                .sum::<Utility>();
            assert!((value - 1. / 3.).abs() < 1e-6, "{} worth {}", coin, value);
        }
    }

    #[test]
    fn attribution_follows_who_could_send() {
        let mut p1 = Pennies::first();
        let p2 = Pennies::second();
        assert_eq!(p1.attribute(&Signal::Sealed), None);
        assert_eq!(p2.attribute(&Signal::Shown(Coin::Tails)), Some(1));
        assert_eq!(p1.attribute(&Signal::Shown(Coin::Tails)), None);
        p1.act(Action::from(Coin::Heads));
        assert_eq!(p1.attribute(&Signal::Revealed(Coin::Heads)), Some(0));
        assert_eq!(p1.attribute(&Signal::Revealed(Coin::Tails)), None);
    }

    #[test]
    fn equilibrium_constants_match_payoffs() {
        assert!((Pennies::equilibrium() - 1. / 3.).abs() < 1e-6);
        assert!((Pennies::value() - 1. / 3.).abs() < 1e-6);
    }

    #[test]
    fn dealt_players_have_one_coin() {
        let p2 = Pennies::dealt(Turn::Second, Coin::Tails);
        assert_eq!(p2.legal(), vec![false, true]);
        assert_eq!(p2.attribute(&Signal::Shown(Coin::Heads)), None);
        assert_eq!(p2.attribute(&Signal::Shown(Coin::Tails)), Some(1));
        let mixed = Pennies::mixed(Turn::First).unwrap();
        let weights = mixed.iter().map(|(_, p)| p).collect::<Vec<_>>();
        assert!((weights[0] - 1. / 3.).abs() < 1e-6);
    }

    #[test]
    fn features_distinguish_sealed_coins() {
        let mut heads = Pennies::first();
        let mut tails = Pennies::first();
        heads.act(Action::from(Coin::Heads));
        tails.act(Action::from(Coin::Tails));
        assert_eq!(heads.features().len(), Pennies::FEATURES);
        assert_ne!(heads.features(), tails.features());
        assert_ne!(heads, tails);
    }
}
