//! Online-trainable hand sign classifier.
//!
//! - [`FeatureExtractor`] - Turns an image region into a fixed-length intensity vector
//! - [`KnnModel`] - k-nearest-neighbor model over labeled feature vectors
//! - [`GestureClassifier`] - Sample collection, training, and model persistence
//!
//! [`GestureClassifier`] implements [`rps_engine::GestureRecognizer`], which is
//! how the session controller talks to it.

pub use self::{classifier::*, feature::*, model::*};

mod classifier;
mod feature;
mod model;
