//! Game engine for gesture-driven Rock-Paper-Scissors.
//!
//! - [`core`] - Hand signs and round resolution
//! - [`engine`] - Opponent policy, score keeping, and the session state machine
//! - [`persist`] - JSON artifact helpers shared by the score store and the classifier

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
pub mod persist;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("image region has zero area")]
pub struct EmptyRegionError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("not enough samples to train: {count} collected, at least {required} required")]
pub struct InsufficientSamplesError {
    pub count: usize,
    pub required: usize,
}
