use std::path::PathBuf;

use anyhow::Context as _;
use rps_classifier::GestureClassifier;
use rps_engine::GestureRecognizer as _;

use crate::{command::play::DEFAULT_MODEL_PATH, logging};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ClassifyArg {
    /// Image showing a single hand sign
    image: PathBuf,
    /// Trained gesture model (JSON)
    #[clap(long, default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,
}

pub(crate) fn run(arg: &ClassifyArg) -> anyhow::Result<()> {
    let ClassifyArg { image, model } = arg;

    logging::init_stderr()?;
    let mut classifier = GestureClassifier::new().with_model_path(model);
    let loaded = classifier
        .load()
        .with_context(|| format!("Failed to load model: {}", model.display()))?;
    anyhow::ensure!(loaded, "no trained model at {}", model.display());

    let region = image::open(image)
        .with_context(|| format!("Failed to decode image: {}", image.display()))?
        .into_rgb8();
    match classifier.predict(&region) {
        Some(m) => println!("{m}"),
        None => println!("unknown"),
    }
    Ok(())
}
