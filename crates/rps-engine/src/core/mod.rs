//! Hand signs and the rules that decide a round.

pub use self::{hand_move::*, outcome::*};

mod hand_move;
mod outcome;
