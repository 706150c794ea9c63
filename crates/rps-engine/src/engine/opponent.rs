use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::Move;

/// Probability that the medium opponent counters the player's previous move.
const MEDIUM_COUNTER_PROBABILITY: f64 = 0.6;

/// How hard the computer tries to beat the player.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Returns the next difficulty, wrapping from `Hard` back to `Easy`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }
}

/// Chooses the computer's move.
///
/// Difficulty is a bias over the fixed counter table ([`Move::counter`]):
///
/// - **Easy**: uniformly random
/// - **Medium**: counters the player's previous move 60% of the time
/// - **Hard**: counters the player's move when it repeats the previous one
///
/// The only memory the policy needs, the player's previous move, is passed in
/// by the caller on every call.
///
/// # Example
///
/// ```
/// use rps_engine::{Difficulty, Move, OpponentPolicy};
///
/// let mut policy = OpponentPolicy::with_seed(42);
/// let reply = policy.next_move(Difficulty::Hard, Move::Rock, Some(Move::Rock));
/// assert_eq!(reply, Move::Paper);
/// ```
#[derive(Debug, Clone)]
pub struct OpponentPolicy {
    rng: Pcg32,
}

impl Default for OpponentPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl OpponentPolicy {
    /// Creates a policy seeded from the thread-local generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but reproducible.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Picks the computer's move for the current round.
    ///
    /// # Arguments
    ///
    /// * `difficulty` - Active difficulty
    /// * `current` - The move the player throws this round
    /// * `previous` - The player's move in the previous round, `None` before the first round
    pub fn next_move(
        &mut self,
        difficulty: Difficulty,
        current: Move,
        previous: Option<Move>,
    ) -> Move {
        match difficulty {
            Difficulty::Easy => self.random_move(),
            Difficulty::Medium => match previous {
                Some(previous) if self.rng.random_bool(MEDIUM_COUNTER_PROBABILITY) => {
                    previous.counter()
                }
                _ => self.random_move(),
            },
            Difficulty::Hard => match previous {
                Some(previous) if previous == current => current.counter(),
                _ => self.random_move(),
            },
        }
    }

    fn random_move(&mut self) -> Move {
        self.rng.random()
    }
}
