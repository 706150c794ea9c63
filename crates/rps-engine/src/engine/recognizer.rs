use std::{fmt, ops::Index};

use image::RgbImage;

use crate::{EmptyRegionError, InsufficientSamplesError, Move, persist::PersistError};

/// Number of collected training samples per label.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SampleCounts([usize; 3]);

impl SampleCounts {
    #[must_use]
    pub const fn new(counts: [usize; 3]) -> Self {
        Self(counts)
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.0[0] + self.0[1] + self.0[2]
    }

    pub fn increment(&mut self, label: Move) {
        self.0[label.index()] += 1;
    }
}

impl Index<Move> for SampleCounts {
    type Output = usize;

    fn index(&self, label: Move) -> &Self::Output {
        &self.0[label.index()]
    }
}

/// Summary of a successful training run.
#[derive(Debug)]
pub struct TrainReport {
    /// Number of samples the new model was fitted on.
    pub sample_count: usize,
    /// Set when the model was trained but could not be written to disk.
    ///
    /// The trained model stays live in memory either way.
    pub save_error: Option<PersistError>,
}

/// Reads a hand sign from an image region and learns from labeled examples.
///
/// The session controller drives the recognizer exclusively from its own
/// thread, so sample collection and training never interleave.
pub trait GestureRecognizer: fmt::Debug {
    /// Returns whether a trained model is live.
    fn is_trained(&self) -> bool;

    /// Returns the number of collected samples per label.
    fn sample_counts(&self) -> SampleCounts;

    /// Adds a labeled example. Has no effect on predictions until [`Self::train`].
    fn add_sample(&mut self, region: &RgbImage, label: Move) -> Result<(), EmptyRegionError>;

    /// Refits the model over every collected sample.
    ///
    /// Fails without touching the current model when too few samples exist.
    fn train(&mut self) -> Result<TrainReport, InsufficientSamplesError>;

    /// Predicts the sign shown in `region`.
    ///
    /// Returns `None` when no model is trained or the region is empty.
    fn predict(&self, region: &RgbImage) -> Option<Move>;
}
