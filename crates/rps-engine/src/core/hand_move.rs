use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Serialize};

/// A hand sign thrown by either side of a round.
///
/// The three signs form a single dominance cycle:
///
/// ```text
/// Rock ──beats──▶ Scissors ──beats──▶ Paper ──beats──▶ Rock
/// ```
///
/// # Example
///
/// ```
/// use rps_engine::Move;
///
/// assert_eq!(Move::Rock.beats(), Move::Scissors);
/// assert_eq!(Move::Rock.counter(), Move::Paper);
/// assert_eq!("paper".parse::<Move>().ok(), Some(Move::Paper));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Self; 3] = [Self::Rock, Self::Paper, Self::Scissors];

    /// Returns the move that this move defeats.
    #[must_use]
    pub const fn beats(self) -> Self {
        match self {
            Self::Rock => Self::Scissors,
            Self::Paper => Self::Rock,
            Self::Scissors => Self::Paper,
        }
    }

    /// Returns the move that defeats this move.
    #[must_use]
    pub const fn counter(self) -> Self {
        match self {
            Self::Rock => Self::Paper,
            Self::Paper => Self::Scissors,
            Self::Scissors => Self::Rock,
        }
    }

    /// Position of this move in [`Move::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Rock => 0,
            Self::Paper => 1,
            Self::Scissors => 2,
        }
    }
}

/// Uniform distribution over the three moves, so that `rng.random::<Move>()` works.
impl Distribution<Move> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Move {
        Move::ALL[rng.random_range(0..Move::ALL.len())]
    }
}
