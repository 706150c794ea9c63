use std::{fmt, path::PathBuf};

use chrono::{DateTime, SubsecRound as _, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    RoundOutcome,
    persist::{self, PersistError},
};

/// Maximum number of entries kept on the leaderboard.
pub const LEADERBOARD_CAPACITY: usize = 5;

/// A leaderboard line: the player's score after a round and when it was reached.
///
/// `time` is stored as fractional seconds since the Unix epoch, with
/// microsecond precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub score: u32,
    #[serde(with = "epoch_seconds")]
    pub time: DateTime<Utc>,
}

/// Serde adapter for leaderboard times.
///
/// Writes a float of seconds since the epoch. Reads either that or an
/// RFC 3339 string.
mod epoch_seconds {
    use chrono::{DateTime, SubsecRound as _, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Stored {
        Seconds(f64),
        Text(DateTime<Utc>),
    }

    #[expect(clippy::cast_precision_loss)]
    pub(super) fn serialize<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let seconds = time.timestamp() as f64 + f64::from(time.timestamp_subsec_micros()) / 1e6;
        serializer.serialize_f64(seconds)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Stored::deserialize(deserializer)? {
            Stored::Seconds(seconds) => from_seconds(seconds)
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {seconds}"))),
            Stored::Text(time) => Ok(time.trunc_subsecs(6)),
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    fn from_seconds(seconds: f64) -> Option<DateTime<Utc>> {
        if !seconds.is_finite() {
            return None;
        }
        DateTime::from_timestamp_micros((seconds * 1e6).round() as i64)
    }
}

/// Cumulative scores carried across sessions.
///
/// # Invariants
///
/// - `high_score` only increases, and only when `player_score` strictly exceeds it
/// - The leaderboard holds at most [`LEADERBOARD_CAPACITY`] entries, sorted by
///   descending score with ties broken by descending time
///
/// Missing fields in a stored record deserialize to zero, so partially written
/// or older files still load. Call [`Self::normalized`] after loading to
/// re-establish the leaderboard ordering.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use rps_engine::{RoundOutcome, ScoreRecord};
///
/// let mut record = ScoreRecord::new();
/// record.record_round(RoundOutcome::PlayerWins, Utc::now());
///
/// assert_eq!(record.player_score(), 1);
/// assert_eq!(record.high_score(), 1);
/// assert_eq!(record.total_wins(), 1);
/// assert_eq!(record.leaderboard().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRecord {
    player_score: u32,
    computer_score: u32,
    high_score: u32,
    total_wins: u32,
    total_losses: u32,
    leaderboard: Vec<LeaderboardEntry>,
}

impl ScoreRecord {
    /// Creates a record with every counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            player_score: 0,
            computer_score: 0,
            high_score: 0,
            total_wins: 0,
            total_losses: 0,
            leaderboard: Vec::new(),
        }
    }

    #[must_use]
    pub const fn player_score(&self) -> u32 {
        self.player_score
    }

    #[must_use]
    pub const fn computer_score(&self) -> u32 {
        self.computer_score
    }

    #[must_use]
    pub const fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub const fn total_wins(&self) -> u32 {
        self.total_wins
    }

    #[must_use]
    pub const fn total_losses(&self) -> u32 {
        self.total_losses
    }

    #[must_use]
    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    /// Applies the outcome of one round.
    ///
    /// Updates the win/loss counters, raises the high score if it was beaten,
    /// and inserts the player's current score into the leaderboard.
    pub fn record_round(&mut self, outcome: RoundOutcome, at: DateTime<Utc>) {
        match outcome {
            RoundOutcome::PlayerWins => {
                self.player_score += 1;
                self.total_wins += 1;
            }
            RoundOutcome::ComputerWins => {
                self.computer_score += 1;
                self.total_losses += 1;
            }
            RoundOutcome::Draw => {}
        }
        if self.player_score > self.high_score {
            self.high_score = self.player_score;
        }
        self.insert_leaderboard(self.player_score, at);
    }

    /// Inserts an entry and truncates the leaderboard to its capacity.
    ///
    /// `time` is truncated to microseconds, the precision it is stored with.
    pub fn insert_leaderboard(&mut self, score: u32, time: DateTime<Utc>) {
        let time = time.trunc_subsecs(6);
        self.leaderboard.push(LeaderboardEntry { score, time });
        self.sort_leaderboard();
    }

    /// Re-establishes the ordering and capacity invariants on a loaded record.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.high_score = self.high_score.max(self.player_score);
        self.sort_leaderboard();
        self
    }

    fn sort_leaderboard(&mut self) {
        self.leaderboard
            .sort_by(|a, b| b.score.cmp(&a.score).then_with(|| b.time.cmp(&a.time)));
        self.leaderboard.truncate(LEADERBOARD_CAPACITY);
    }
}

/// Durable storage for the [`ScoreRecord`].
///
/// The session controller is the single writer: it loads once at startup and
/// saves after every resolved round.
pub trait ScoreStore: fmt::Debug {
    /// Loads the stored record, or a zeroed one if nothing has been stored yet.
    fn load(&mut self) -> Result<ScoreRecord, PersistError>;

    /// Replaces the stored record.
    fn save(&mut self, record: &ScoreRecord) -> Result<(), PersistError>;
}

/// Stores the score record as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&mut self) -> Result<ScoreRecord, PersistError> {
        let record: Option<ScoreRecord> = persist::read_json_file(&self.path)?;
        match record {
            Some(record) => {
                log::info!("loaded scores from {}", self.path.display());
                Ok(record.normalized())
            }
            None => {
                log::info!("no score file at {}, starting fresh", self.path.display());
                Ok(ScoreRecord::new())
            }
        }
    }

    fn save(&mut self, record: &ScoreRecord) -> Result<(), PersistError> {
        persist::write_json_file(&self.path, record)
    }
}
