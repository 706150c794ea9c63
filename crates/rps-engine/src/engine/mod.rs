//! Session logic: everything that changes over the course of a game.
//!
//! - [`SessionController`] - The phase state machine driven by commands and ticks
//! - [`OpponentPolicy`] - Difficulty-dependent choice of the computer's move
//! - [`ScoreRecord`] / [`ScoreStore`] - Cumulative scores and their durable storage
//! - [`GestureRecognizer`] - Seam to the classifier that reads the player's hand
//! - [`CueSink`] - Fire-and-forget sound and speech events
//!
//! # Round Flow
//!
//! ```text
//!            manual move / locked gesture
//!   Waiting ─────────────────────────────▶ Countdown
//!      ▲                                       │ countdown elapsed
//!      │ result elapsed                        ▼
//!   Result ◀──────────────────────────── (Resolving)
//! ```
//!
//! `Training` is entered from `Waiting` with the training toggle, and `Paused`
//! is reachable from every phase. Leaving `Paused` always lands in `Waiting`.

pub use self::{cue::*, opponent::*, recognizer::*, score::*, session::*, settings::*};

mod cue;
mod opponent;
mod recognizer;
mod score;
mod session;
mod settings;
