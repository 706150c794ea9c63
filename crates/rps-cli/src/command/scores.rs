use std::{
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use rps_engine::{JsonScoreStore, ScoreRecord, ScoreStore as _, persist};

use crate::{command::play::DEFAULT_SCORE_PATH, logging};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScoresArg {
    /// Score file (JSON)
    #[clap(long, default_value = DEFAULT_SCORE_PATH)]
    scores: PathBuf,
    /// Write the scores to this file instead of stdout
    #[clap(long)]
    output: Option<PathBuf>,
    /// Reset every counter and clear the leaderboard
    #[clap(long, conflicts_with = "output")]
    reset: bool,
}

pub(crate) fn run(arg: &ScoresArg) -> anyhow::Result<()> {
    let ScoresArg {
        scores,
        output,
        reset,
    } = arg;

    logging::init_stderr()?;
    if *reset {
        reset_scores(scores)
    } else {
        export_scores(scores, output.as_deref())
    }
}

fn reset_scores(scores: &Path) -> anyhow::Result<()> {
    JsonScoreStore::new(scores)
        .save(&ScoreRecord::new())
        .with_context(|| format!("Failed to reset scores: {}", scores.display()))?;
    log::info!("reset scores in {}", scores.display());
    Ok(())
}

fn export_scores(scores: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let record = JsonScoreStore::new(scores)
        .load()
        .with_context(|| format!("Failed to load scores: {}", scores.display()))?;
    if let Some(path) = output {
        persist::write_json_file(path, &record)?;
        log::info!("wrote scores to {}", path.display());
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &record).context("Failed to write scores")?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rps_engine::RoundOutcome;

    use super::*;

    #[test]
    fn test_export_and_reset() {
        let dir = tempfile::tempdir().unwrap();
        let scores = dir.path().join("scores.json");
        let mut record = ScoreRecord::new();
        record.record_round(RoundOutcome::PlayerWins, Utc::now());
        JsonScoreStore::new(&scores).save(&record).unwrap();

        let exported = dir.path().join("export.json");
        export_scores(&scores, Some(&exported)).unwrap();
        let copy: ScoreRecord =
            serde_json::from_str(&std::fs::read_to_string(&exported).unwrap()).unwrap();
        assert_eq!(copy, record);

        reset_scores(&scores).unwrap();
        assert_eq!(JsonScoreStore::new(&scores).load().unwrap(), ScoreRecord::new());
    }

    #[test]
    fn test_export_without_scores_prints_zeroed_record() {
        let dir = tempfile::tempdir().unwrap();
        let exported = dir.path().join("export.json");
        export_scores(&dir.path().join("absent.json"), Some(&exported)).unwrap();
        let copy: ScoreRecord =
            serde_json::from_str(&std::fs::read_to_string(&exported).unwrap()).unwrap();
        assert_eq!(copy, ScoreRecord::new());
    }
}
