use std::fmt;

use crate::{Move, RoundOutcome};

/// Spoken phrases announced during a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Phrase {
    #[display("Go!")]
    Go,
    #[display("{_0}")]
    Move(Move),
    #[display("Two")]
    Two,
    #[display("One")]
    One,
}

/// Discrete sound and speech events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Cue {
    Click,
    Win,
    Lose,
    Draw,
    Say(Phrase),
}

impl Cue {
    #[must_use]
    pub const fn for_outcome(outcome: RoundOutcome) -> Self {
        match outcome {
            RoundOutcome::PlayerWins => Self::Win,
            RoundOutcome::ComputerWins => Self::Lose,
            RoundOutcome::Draw => Self::Draw,
        }
    }
}

/// Receives cues from the session.
///
/// Emission is fire-and-forget: implementations must return immediately and
/// must not report failures back to the game. A missing audio device is not an
/// error from the game's point of view.
pub trait CueSink: fmt::Debug {
    fn emit(&mut self, cue: Cue);
}

/// Discards every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCueSink;

impl CueSink for NullCueSink {
    fn emit(&mut self, _cue: Cue) {}
}
