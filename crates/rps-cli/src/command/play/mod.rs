use std::path::PathBuf;

use anyhow::Context as _;
use rps_classifier::GestureClassifier;
use rps_engine::{Difficulty, JsonScoreStore, SessionConfig, SessionController, Theme};

use crate::{
    command::play::app::PlayApp,
    cue::ChannelCueSink,
    frame::{DirectoryFrameSource, FileFrameSource, FrameSource, RegionSampler, Roi},
    logging,
    tui::Runtime,
};

mod app;
mod keymap;

pub(super) const DEFAULT_MODEL_PATH: &str = "./data/model.json";
pub(super) const DEFAULT_SCORE_PATH: &str = "./data/scores.json";
const DEFAULT_LOG_PATH: &str = "./data/rps.log";
const DEFAULT_TICKS_PER_IMAGE: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub(crate) struct PlayArg {
    /// Trained gesture model (JSON), loaded at startup and rewritten on training
    #[clap(long, default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,
    /// Score file (JSON), loaded at startup and rewritten after every round
    #[clap(long, default_value = DEFAULT_SCORE_PATH)]
    scores: PathBuf,
    /// Image file used as the camera; re-read whenever it changes
    #[clap(long, conflicts_with = "frame_dir")]
    frame: Option<PathBuf>,
    /// Directory of images shown one after another as the camera
    #[clap(long)]
    frame_dir: Option<PathBuf>,
    /// Ticks each image of --frame-dir stays on screen
    #[clap(long, default_value_t = DEFAULT_TICKS_PER_IMAGE)]
    ticks_per_image: u64,
    /// Mirror camera frames horizontally
    #[clap(long)]
    mirror: bool,
    /// Left edge of the hand region, in frame pixels
    #[clap(long, default_value_t = Roi::DEFAULT.x)]
    roi_x: u32,
    /// Top edge of the hand region, in frame pixels
    #[clap(long, default_value_t = Roi::DEFAULT.y)]
    roi_y: u32,
    /// Side length of the square hand region, in frame pixels
    #[clap(long, default_value_t = Roi::DEFAULT.size)]
    roi_size: u32,
    /// Game ticks per second
    #[clap(long, default_value_t = SessionConfig::DEFAULT_TICK_RATE)]
    tick_rate: u64,
    /// Starting difficulty (easy, medium, hard)
    #[clap(long, default_value = "easy")]
    difficulty: Difficulty,
    /// Starting color scheme (dark, light)
    #[clap(long, default_value = "dark")]
    theme: Theme,
    /// Program that speaks a phrase given as its last argument (e.g. "espeak")
    #[clap(long)]
    speech_command: Option<String>,
    /// Log file; the terminal is taken by the game while it runs
    #[clap(long, default_value = DEFAULT_LOG_PATH)]
    log_file: PathBuf,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            model: PathBuf::from(DEFAULT_MODEL_PATH),
            scores: PathBuf::from(DEFAULT_SCORE_PATH),
            frame: None,
            frame_dir: None,
            ticks_per_image: DEFAULT_TICKS_PER_IMAGE,
            mirror: false,
            roi_x: Roi::DEFAULT.x,
            roi_y: Roi::DEFAULT.y,
            roi_size: Roi::DEFAULT.size,
            tick_rate: SessionConfig::DEFAULT_TICK_RATE,
            difficulty: Difficulty::default(),
            theme: Theme::default(),
            speech_command: None,
            log_file: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        model,
        scores,
        frame,
        frame_dir,
        ticks_per_image,
        mirror,
        roi_x,
        roi_y,
        roi_size,
        tick_rate,
        difficulty,
        theme,
        speech_command,
        log_file,
    } = arg;

    logging::init_file(log_file)?;
    log::info!("starting game session");

    let frames: Option<Box<dyn FrameSource>> = match (frame, frame_dir) {
        (Some(path), _) => Some(Box::new(FileFrameSource::new(path))),
        (None, Some(dir)) => Some(Box::new(
            DirectoryFrameSource::open(dir, *ticks_per_image)
                .with_context(|| format!("Failed to open frame directory: {}", dir.display()))?,
        )),
        (None, None) => {
            log::info!("no frame source given, gesture input disabled");
            None
        }
    };
    let sampler = RegionSampler {
        roi: Roi {
            x: *roi_x,
            y: *roi_y,
            size: *roi_size,
        },
        mirror: *mirror,
    };

    let mut classifier = GestureClassifier::new().with_model_path(model);
    if let Err(e) = classifier.load() {
        log::warn!("ignoring unusable model: {e}");
    }

    let config = SessionConfig {
        tick_rate: (*tick_rate).max(1),
        ..SessionConfig::default()
    };
    let session = SessionController::new(
        config,
        Box::new(classifier),
        Box::new(JsonScoreStore::new(scores)),
        Box::new(ChannelCueSink::spawn(speech_command.clone())),
    )
    .with_difficulty(*difficulty)
    .with_theme(*theme);

    let mut app = PlayApp::new(session, frames, sampler);
    Runtime::new().run(&mut app)?;

    log::info!("game session ended after {} ticks", app.ticks());
    Ok(())
}
