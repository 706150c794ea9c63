use std::path::{Path, PathBuf};

use image::RgbImage;
use rps_engine::{
    EmptyRegionError, GestureRecognizer, InsufficientSamplesError, Move, SampleCounts,
    TrainReport, persist::PersistError,
};

use crate::{FeatureExtractor, KnnModel, ModelFile, Sample};

/// Number of neighbors consulted by each prediction.
pub const NEIGHBORS: usize = 3;

/// Fewest samples [`GestureClassifier`] will train on.
pub const MIN_TRAINING_SAMPLES: usize = 3;

/// Gesture classifier trained online from labeled image regions.
///
/// Samples accumulate in an append-only set. Training fits a fresh
/// [`KnnModel`] over a snapshot of the whole set and replaces the live model,
/// so samples added afterwards have no effect until the next training run.
///
/// When a model path is configured, every successful training run writes the
/// model file, and [`Self::load`] restores both the model and the sample set
/// it was fitted on.
#[derive(Debug, Default)]
pub struct GestureClassifier {
    extractor: FeatureExtractor,
    samples: Vec<Sample>,
    model: Option<KnnModel>,
    model_path: Option<PathBuf>,
}

impl GestureClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_model_path(self, path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: Some(path.into()),
            ..self
        }
    }

    #[must_use]
    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Restores the model and its samples from the model file.
    ///
    /// Returns `Ok(false)` when no model path is configured or the file does
    /// not exist yet. On error the classifier is left untouched.
    pub fn load(&mut self) -> Result<bool, PersistError> {
        let Some(path) = &self.model_path else {
            return Ok(false);
        };
        let Some(file) = ModelFile::read(path, &self.extractor)? else {
            log::info!("no model at {}, starting untrained", path.display());
            return Ok(false);
        };
        log::info!(
            "loaded model from {} ({} samples)",
            path.display(),
            file.samples.len()
        );
        self.model = Some(KnnModel::fit(&file.samples, file.k));
        self.samples = file.samples;
        Ok(true)
    }

    /// Writes the live model to the model file.
    ///
    /// Does nothing when untrained or when no model path is configured.
    pub fn save(&self) -> Result<(), PersistError> {
        let (Some(model), Some(path)) = (&self.model, &self.model_path) else {
            return Ok(());
        };
        ModelFile::new(&self.extractor, model).write(path)?;
        log::info!("saved model to {}", path.display());
        Ok(())
    }
}

impl GestureRecognizer for GestureClassifier {
    fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    fn sample_counts(&self) -> SampleCounts {
        let mut counts = SampleCounts::default();
        for sample in &self.samples {
            counts.increment(sample.label);
        }
        counts
    }

    fn add_sample(&mut self, region: &RgbImage, label: Move) -> Result<(), EmptyRegionError> {
        let features = self.extractor.extract(region)?;
        self.samples.push(Sample { label, features });
        log::debug!("added {label} sample ({} total)", self.samples.len());
        Ok(())
    }

    fn train(&mut self) -> Result<TrainReport, InsufficientSamplesError> {
        let count = self.samples.len();
        if count < MIN_TRAINING_SAMPLES {
            return Err(InsufficientSamplesError {
                count,
                required: MIN_TRAINING_SAMPLES,
            });
        }
        self.model = Some(KnnModel::fit(&self.samples, NEIGHBORS));
        log::info!("trained model on {count} samples");

        let save_error = self.save().err();
        if let Some(e) = &save_error {
            log::warn!("failed to save model: {e}");
        }
        Ok(TrainReport {
            sample_count: count,
            save_error,
        })
    }

    fn predict(&self, region: &RgbImage) -> Option<Move> {
        let model = self.model.as_ref()?;
        let features = self.extractor.extract(region).ok()?;
        model.predict(&features)
    }
}
