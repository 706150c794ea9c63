use clap::{Parser, Subcommand};

use self::{classify::ClassifyArg, play::PlayArg, scores::ScoresArg};

mod classify;
mod play;
mod scores;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play Rock-Paper-Scissors against the computer (default)
    Play(#[clap(flatten)] PlayArg),
    /// Print the stored scores as JSON, or reset them
    Scores(#[clap(flatten)] ScoresArg),
    /// Predict the hand sign shown in an image file
    Classify(#[clap(flatten)] ClassifyArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or_else(|| Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Scores(arg) => scores::run(&arg)?,
        Mode::Classify(arg) => classify::run(&arg)?,
    }
    Ok(())
}
