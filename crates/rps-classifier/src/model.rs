use std::path::Path;

use rps_engine::{
    Move,
    persist::{self, PersistError},
};
use serde::{Deserialize, Serialize};

use crate::{FeatureExtractor, MIN_TRAINING_SAMPLES};

/// A labeled feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub label: Move,
    pub features: Vec<f32>,
}

/// k-nearest-neighbor model.
///
/// Fitting stores the samples as they are. Prediction ranks every stored sample
/// by squared Euclidean distance to the query, with equal distances ordered by
/// insertion, and takes a majority vote over the `k` nearest. When no label
/// has a strict majority, the vote goes to the tied label whose closest
/// neighbor is nearest. With `k = 3` and three different labels this is the
/// nearest neighbor's label.
#[derive(Debug, Clone, PartialEq)]
pub struct KnnModel {
    k: usize,
    samples: Vec<Sample>,
}

impl KnnModel {
    /// Fits a model on a copy of `samples`.
    ///
    /// Later changes to the caller's sample set do not affect the model.
    #[must_use]
    pub fn fit(samples: &[Sample], k: usize) -> Self {
        Self {
            k: k.max(1),
            samples: samples.to_vec(),
        }
    }

    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Returns the majority label among the nearest samples, or `None` if the
    /// model holds no samples.
    #[must_use]
    pub fn predict(&self, features: &[f32]) -> Option<Move> {
        let mut ranked: Vec<(f32, usize)> = self
            .samples
            .iter()
            .enumerate()
            .map(|(i, sample)| (squared_distance(&sample.features, features), i))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        ranked.truncate(self.k);

        // votes[label] = (count, rank of nearest neighbor with that label)
        let mut votes: [(usize, usize); 3] = [(0, usize::MAX); 3];
        for (rank, &(_, i)) in ranked.iter().enumerate() {
            let vote = &mut votes[self.samples[i].label.index()];
            vote.0 += 1;
            vote.1 = vote.1.min(rank);
        }

        Move::ALL
            .into_iter()
            .filter(|m| votes[m.index()].0 > 0)
            .max_by(|a, b| {
                let (a_count, a_rank) = votes[a.index()];
                let (b_count, b_rank) = votes[b.index()];
                a_count
                    .cmp(&b_count)
                    .then_with(|| b_rank.cmp(&a_rank))
            })
    }
}

fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// On-disk form of a trained model.
///
/// Samples are stored in insertion order so that a reloaded model breaks
/// distance ties exactly like the one that was saved.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelFile {
    pub version: u32,
    pub width: u32,
    pub height: u32,
    pub k: usize,
    pub samples: Vec<Sample>,
}

impl ModelFile {
    pub const VERSION: u32 = 1;

    #[must_use]
    pub fn new(extractor: &FeatureExtractor, model: &KnnModel) -> Self {
        Self {
            version: Self::VERSION,
            width: extractor.width(),
            height: extractor.height(),
            k: model.k(),
            samples: model.samples().to_vec(),
        }
    }

    /// Reads a model file, checking that it matches `extractor`.
    ///
    /// Returns `Ok(None)` when the file does not exist. A file with fewer
    /// than [`MIN_TRAINING_SAMPLES`] samples is rejected, since no training
    /// run could have produced it.
    pub fn read(path: &Path, extractor: &FeatureExtractor) -> Result<Option<Self>, PersistError> {
        let Some(file) = persist::read_json_file::<Self, _>(path)? else {
            return Ok(None);
        };
        let incompatible = |reason: String| PersistError::Incompatible {
            path: path.to_owned(),
            reason,
        };
        if file.version != Self::VERSION {
            return Err(incompatible(format!(
                "unsupported version {} (expected {})",
                file.version,
                Self::VERSION
            )));
        }
        if (file.width, file.height) != (extractor.width(), extractor.height()) {
            return Err(incompatible(format!(
                "features are {}x{}, expected {}x{}",
                file.width,
                file.height,
                extractor.width(),
                extractor.height()
            )));
        }
        let expected_len = extractor.feature_len();
        if let Some(sample) = file.samples.iter().find(|s| s.features.len() != expected_len) {
            return Err(incompatible(format!(
                "{} sample has {} features, expected {expected_len}",
                sample.label,
                sample.features.len()
            )));
        }
        if file.k == 0 {
            return Err(incompatible("k must be at least 1".to_owned()));
        }
        if file.samples.len() < MIN_TRAINING_SAMPLES {
            return Err(incompatible(format!(
                "{} samples, at least {MIN_TRAINING_SAMPLES} required",
                file.samples.len()
            )));
        }
        Ok(Some(file))
    }

    pub fn write(&self, path: &Path) -> Result<(), PersistError> {
        persist::write_json_file(path, self)
    }
}
