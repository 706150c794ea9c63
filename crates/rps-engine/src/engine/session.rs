use std::time::Duration;

use chrono::Utc;
use image::RgbImage;

use crate::{
    Cue, CueSink, Difficulty, GestureRecognizer, Move, OpponentPolicy, Phrase, RoundOutcome,
    SampleCounts, ScoreRecord, ScoreStore, SessionConfig, Theme, TrainReport,
};

/// Move used when a trained classifier cannot read the hand at resolution time.
pub const FALLBACK_MOVE: Move = Move::Rock;

const WAITING_STATUS: &str = "Show your hand or pick a move";
const TRAINING_STATUS: &str = "Training: add samples for each sign, then train";

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum SessionPhase {
    Waiting,
    Training,
    Countdown,
    /// Transient phase inside the tick that ends the countdown.
    Resolving,
    Result,
    Paused,
}

/// Player commands accepted by [`SessionController::handle_command`].
///
/// Commands that make no sense in the current phase are ignored, e.g.
/// `SampleLabel` outside `Training` or `ManualMove` during a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ManualMove(Move),
    /// Start a round with the sign the classifier currently sees.
    LockGesture,
    ToggleTraining,
    SampleLabel(Move),
    TrainNow,
    TogglePause,
    CycleDifficulty,
    CycleTheme,
    ShowHelp,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub player: Move,
    pub computer: Move,
    pub outcome: RoundOutcome,
}

/// The game's state machine.
///
/// Owns every piece of mutable session state: the phase and its timer, the
/// captured player choice, the previous round's player move, difficulty,
/// theme and scores. Collaborators are injected as trait objects so that the
/// controller can be driven without a camera, a disk or a speaker.
///
/// The controller is advanced by the caller once per tick:
///
/// 1. [`Self::handle_command`] with at most one command
/// 2. [`Self::tick`] with the current region of interest
///
/// Both take the region as `Option` because the frame source may be
/// temporarily unavailable.
#[derive(Debug)]
pub struct SessionController {
    config: SessionConfig,
    recognizer: Box<dyn GestureRecognizer>,
    store: Box<dyn ScoreStore>,
    cues: Box<dyn CueSink>,
    policy: OpponentPolicy,
    phase: SessionPhase,
    phase_ticks: u64,
    player_choice: Option<Move>,
    last_player_move: Option<Move>,
    last_round: Option<RoundResult>,
    live_prediction: Option<Move>,
    countdown_announced: Option<Phrase>,
    difficulty: Difficulty,
    theme: Theme,
    help_ticks: u64,
    scores: ScoreRecord,
    scores_writable: bool,
    status: String,
    is_exiting: bool,
}

impl SessionController {
    /// Creates a controller in the `Waiting` phase.
    ///
    /// Scores are loaded from `store` here. A load failure is logged and the
    /// session starts from zero without ever saving, so an unreadable score
    /// file is left as it is.
    pub fn new(
        config: SessionConfig,
        recognizer: Box<dyn GestureRecognizer>,
        mut store: Box<dyn ScoreStore>,
        cues: Box<dyn CueSink>,
    ) -> Self {
        let (scores, scores_writable, status) = match store.load() {
            Ok(scores) => (scores, true, WAITING_STATUS.to_owned()),
            Err(e) => {
                log::warn!("could not load scores, starting from zero without saving: {e}");
                (
                    ScoreRecord::new(),
                    false,
                    format!("Scores unavailable, not saving: {e}"),
                )
            }
        };
        Self {
            config,
            recognizer,
            store,
            cues,
            policy: OpponentPolicy::new(),
            phase: SessionPhase::Waiting,
            phase_ticks: 0,
            player_choice: None,
            last_player_move: None,
            last_round: None,
            live_prediction: None,
            countdown_announced: None,
            difficulty: Difficulty::default(),
            theme: Theme::default(),
            help_ticks: 0,
            scores,
            scores_writable,
            status,
            is_exiting: false,
        }
    }

    #[must_use]
    pub fn with_policy(self, policy: OpponentPolicy) -> Self {
        Self { policy, ..self }
    }

    #[must_use]
    pub fn with_difficulty(self, difficulty: Difficulty) -> Self {
        Self { difficulty, ..self }
    }

    #[must_use]
    pub fn with_theme(self, theme: Theme) -> Self {
        Self { theme, ..self }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The move captured when the current round was started.
    #[must_use]
    pub fn player_choice(&self) -> Option<Move> {
        self.player_choice
    }

    /// The player's move in the most recently resolved round.
    #[must_use]
    pub fn last_player_move(&self) -> Option<Move> {
        self.last_player_move
    }

    #[must_use]
    pub fn last_round(&self) -> Option<&RoundResult> {
        self.last_round.as_ref()
    }

    /// What the classifier sees in the live region while waiting.
    #[must_use]
    pub fn live_prediction(&self) -> Option<Move> {
        self.live_prediction
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn scores(&self) -> &ScoreRecord {
        &self.scores
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn is_trained(&self) -> bool {
        self.recognizer.is_trained()
    }

    #[must_use]
    pub fn sample_counts(&self) -> SampleCounts {
        self.recognizer.sample_counts()
    }

    #[must_use]
    pub fn is_help_visible(&self) -> bool {
        self.help_ticks > 0
    }

    #[must_use]
    pub fn should_exit(&self) -> bool {
        self.is_exiting
    }

    /// Time left before the round resolves, while counting down.
    #[must_use]
    pub fn countdown_remaining(&self) -> Option<Duration> {
        self.phase
            .is_countdown()
            .then(|| self.config.countdown.saturating_sub(self.phase_elapsed()))
    }

    /// Fraction of the countdown already elapsed, in `[0.0, 1.0]`.
    #[must_use]
    pub fn countdown_progress(&self) -> Option<f64> {
        self.phase.is_countdown().then(|| {
            let total = self.config.countdown.as_secs_f64();
            if total > 0.0 {
                (self.phase_elapsed().as_secs_f64() / total).min(1.0)
            } else {
                1.0
            }
        })
    }

    fn phase_elapsed(&self) -> Duration {
        self.config.ticks_to_duration(self.phase_ticks)
    }

    /// Applies one player command.
    ///
    /// `region` is the current region of interest, used by gesture locking and
    /// sample collection.
    pub fn handle_command(&mut self, command: Command, region: Option<&RgbImage>) {
        self.cues.emit(Cue::Click);
        match command {
            Command::Quit => self.is_exiting = true,
            Command::TogglePause => self.toggle_pause(),
            Command::CycleDifficulty => {
                self.difficulty = self.difficulty.next();
                self.status = format!("Difficulty: {}", self.difficulty);
            }
            Command::CycleTheme => self.theme = self.theme.next(),
            Command::ShowHelp => {
                self.help_ticks = if self.is_help_visible() {
                    0
                } else {
                    self.config.duration_to_ticks(self.config.help)
                };
            }
            Command::ToggleTraining => self.toggle_training(),
            Command::SampleLabel(label) if self.phase.is_training() => {
                self.add_sample(region, label);
            }
            Command::TrainNow if self.phase.is_training() => self.train(),
            Command::ManualMove(choice) if self.phase.is_waiting() => {
                self.start_countdown(choice, Phrase::Move(choice));
            }
            Command::LockGesture if self.phase.is_waiting() => {
                match region.and_then(|region| self.recognizer.predict(region)) {
                    Some(choice) => self.start_countdown(choice, Phrase::Go),
                    None => self.status = "No gesture detected".to_owned(),
                }
            }
            _ => log::trace!("ignoring {command:?} while {}", self.phase),
        }
    }

    /// Advances the session by one tick.
    pub fn tick(&mut self, region: Option<&RgbImage>) {
        self.help_ticks = self.help_ticks.saturating_sub(1);
        self.phase_ticks += 1;
        let elapsed = self.phase_elapsed();

        match self.phase {
            SessionPhase::Waiting => {
                self.live_prediction = match region {
                    Some(region) if self.recognizer.is_trained() => {
                        self.recognizer.predict(region)
                    }
                    _ => None,
                };
            }
            SessionPhase::Countdown => {
                if elapsed >= self.config.countdown {
                    self.resolve_round(region);
                } else {
                    self.announce_countdown(self.config.countdown - elapsed);
                }
            }
            SessionPhase::Result => {
                if elapsed >= self.config.result {
                    self.return_to_waiting();
                }
            }
            SessionPhase::Training | SessionPhase::Resolving | SessionPhase::Paused => {}
        }
    }

    fn enter(&mut self, phase: SessionPhase) {
        log::debug!("phase {} -> {phase}", self.phase);
        self.phase = phase;
        self.phase_ticks = 0;
        self.live_prediction = None;
    }

    fn return_to_waiting(&mut self) {
        self.enter(SessionPhase::Waiting);
        self.player_choice = None;
        WAITING_STATUS.clone_into(&mut self.status);
    }

    fn toggle_pause(&mut self) {
        // Resuming never restores the phase that was interrupted.
        if self.phase.is_paused() {
            self.return_to_waiting();
        } else {
            self.enter(SessionPhase::Paused);
            "Paused".clone_into(&mut self.status);
        }
    }

    fn toggle_training(&mut self) {
        match self.phase {
            SessionPhase::Waiting => {
                self.enter(SessionPhase::Training);
                TRAINING_STATUS.clone_into(&mut self.status);
            }
            SessionPhase::Training => self.return_to_waiting(),
            _ => log::trace!("training toggle ignored while {}", self.phase),
        }
    }

    fn start_countdown(&mut self, choice: Move, phrase: Phrase) {
        self.enter(SessionPhase::Countdown);
        self.player_choice = Some(choice);
        self.countdown_announced = None;
        self.status = format!("You chose {choice}");
        self.cues.emit(Cue::Say(phrase));
    }

    fn announce_countdown(&mut self, remaining: Duration) {
        let phrase = if remaining > Duration::from_secs(1) {
            Phrase::Two
        } else {
            Phrase::One
        };
        if self.countdown_announced != Some(phrase) {
            self.countdown_announced = Some(phrase);
            self.cues.emit(Cue::Say(phrase));
        }
    }

    fn resolve_round(&mut self, region: Option<&RgbImage>) {
        self.enter(SessionPhase::Resolving);

        let player = if self.recognizer.is_trained() {
            region
                .and_then(|region| self.recognizer.predict(region))
                .unwrap_or(FALLBACK_MOVE)
        } else {
            self.player_choice.unwrap_or(FALLBACK_MOVE)
        };
        let computer = self
            .policy
            .next_move(self.difficulty, player, self.last_player_move);
        let outcome = RoundOutcome::resolve(player, computer);

        self.scores.record_round(outcome, Utc::now());
        self.last_player_move = Some(player);
        self.last_round = Some(RoundResult {
            player,
            computer,
            outcome,
        });
        self.cues.emit(Cue::for_outcome(outcome));
        log::info!(
            "round: player {player}, computer {computer} ({}): {outcome}",
            self.difficulty
        );

        let saved = if self.scores_writable {
            self.store
                .save(&self.scores)
                .inspect_err(|e| log::warn!("failed to save scores: {e}"))
                .is_ok()
        } else {
            false
        };
        self.status = if saved {
            outcome.to_string()
        } else {
            format!("{outcome} (scores not saved)")
        };
        self.enter(SessionPhase::Result);
    }

    fn add_sample(&mut self, region: Option<&RgbImage>, label: Move) {
        let Some(region) = region else {
            "No frame available for a sample".clone_into(&mut self.status);
            return;
        };
        match self.recognizer.add_sample(region, label) {
            Ok(()) => {
                let counts = self.recognizer.sample_counts();
                self.status = format!("Added {label} sample ({} total)", counts[label]);
            }
            Err(e) => {
                log::warn!("sample rejected: {e}");
                self.status = format!("Sample rejected: {e}");
            }
        }
    }

    fn train(&mut self) {
        match self.recognizer.train() {
            Ok(TrainReport {
                sample_count,
                save_error,
            }) => {
                self.cues.emit(Cue::Win);
                self.status = match save_error {
                    None => format!("Model trained on {sample_count} samples"),
                    Some(e) => {
                        log::warn!("model trained but not saved: {e}");
                        format!("Model trained on {sample_count} samples (not saved)")
                    }
                };
            }
            Err(e) => {
                log::info!("training skipped: {e}");
                self.status = format!("Training failed: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, io, path::PathBuf, rc::Rc};

    use super::*;
    use crate::{EmptyRegionError, InsufficientSamplesError, persist::PersistError};

    const COUNTDOWN_TICKS: u64 = 20;
    const RESULT_TICKS: u64 = 15;

    /// Recognizer whose predictions are set by the test.
    #[derive(Debug, Default)]
    struct StubRecognizer {
        trained: bool,
        prediction: Option<Move>,
        counts: SampleCounts,
    }

    impl StubRecognizer {
        fn trained(prediction: Option<Move>) -> Self {
            Self {
                trained: true,
                prediction,
                counts: SampleCounts::default(),
            }
        }
    }

    impl GestureRecognizer for StubRecognizer {
        fn is_trained(&self) -> bool {
            self.trained
        }

        fn sample_counts(&self) -> SampleCounts {
            self.counts
        }

        fn add_sample(&mut self, _region: &RgbImage, label: Move) -> Result<(), EmptyRegionError> {
            self.counts.increment(label);
            Ok(())
        }

        fn train(&mut self) -> Result<TrainReport, InsufficientSamplesError> {
            let count = self.counts.total();
            if count < 3 {
                return Err(InsufficientSamplesError { count, required: 3 });
            }
            self.trained = true;
            Ok(TrainReport {
                sample_count: count,
                save_error: None,
            })
        }

        fn predict(&self, _region: &RgbImage) -> Option<Move> {
            self.prediction.filter(|_| self.trained)
        }
    }

    /// Score store that keeps every saved record.
    #[derive(Debug, Clone, Default)]
    struct SharedStore {
        saved: Rc<RefCell<Vec<ScoreRecord>>>,
        fail: bool,
        fail_load: bool,
    }

    impl ScoreStore for SharedStore {
        fn load(&mut self) -> Result<ScoreRecord, PersistError> {
            if self.fail_load {
                return Err(PersistError::Parse {
                    path: PathBuf::from("scores.json"),
                    source: serde_json::from_str::<ScoreRecord>("{").unwrap_err(),
                });
            }
            Ok(self.saved.borrow().last().cloned().unwrap_or_default())
        }

        fn save(&mut self, record: &ScoreRecord) -> Result<(), PersistError> {
            if self.fail {
                return Err(PersistError::Write {
                    path: PathBuf::from("scores.json"),
                    source: io::Error::other("disk full"),
                });
            }
            self.saved.borrow_mut().push(record.clone());
            Ok(())
        }
    }

    #[derive(Debug, Clone, Default)]
    struct RecordingCues(Rc<RefCell<Vec<Cue>>>);

    impl CueSink for RecordingCues {
        fn emit(&mut self, cue: Cue) {
            self.0.borrow_mut().push(cue);
        }
    }

    struct Harness {
        controller: SessionController,
        store: SharedStore,
        cues: RecordingCues,
        region: RgbImage,
    }

    impl Harness {
        fn new(recognizer: StubRecognizer) -> Self {
            Self::with_store(recognizer, SharedStore::default())
        }

        fn with_store(recognizer: StubRecognizer, store: SharedStore) -> Self {
            let config = SessionConfig {
                tick_rate: 10,
                ..SessionConfig::default()
            };
            let cues = RecordingCues::default();
            let controller = SessionController::new(
                config,
                Box::new(recognizer),
                Box::new(store.clone()),
                Box::new(cues.clone()),
            )
            .with_policy(OpponentPolicy::with_seed(3));
            Self {
                controller,
                store,
                cues,
                region: RgbImage::new(8, 8),
            }
        }

        fn command(&mut self, command: Command) {
            self.controller.handle_command(command, Some(&self.region));
        }

        fn ticks(&mut self, n: u64) {
            for _ in 0..n {
                self.controller.tick(Some(&self.region));
            }
        }

        fn play_round(&mut self, choice: Move) -> RoundResult {
            self.command(Command::ManualMove(choice));
            self.ticks(COUNTDOWN_TICKS);
            let round = *self.controller.last_round().unwrap();
            self.ticks(RESULT_TICKS);
            round
        }
    }

    #[test]
    fn test_starts_waiting() {
        let h = Harness::new(StubRecognizer::default());
        assert_eq!(h.controller.phase(), SessionPhase::Waiting);
        assert_eq!(h.controller.player_choice(), None);
        assert_eq!(h.controller.last_player_move(), None);
    }

    #[test]
    fn test_manual_move_starts_countdown() {
        for choice in Move::ALL {
            let mut h = Harness::new(StubRecognizer::default());
            h.command(Command::ManualMove(choice));
            assert_eq!(h.controller.phase(), SessionPhase::Countdown);
            assert_eq!(h.controller.player_choice(), Some(choice));
        }
    }

    #[test]
    fn test_manual_move_during_countdown_is_ignored() {
        let mut h = Harness::new(StubRecognizer::default());
        h.command(Command::ManualMove(Move::Rock));
        h.ticks(3);
        h.command(Command::ManualMove(Move::Paper));
        h.command(Command::ManualMove(Move::Scissors));
        assert_eq!(h.controller.phase(), SessionPhase::Countdown);
        assert_eq!(h.controller.player_choice(), Some(Move::Rock));
    }

    #[test]
    fn test_countdown_resolves_when_elapsed() {
        let mut h = Harness::new(StubRecognizer::default());
        h.command(Command::ManualMove(Move::Scissors));

        h.ticks(COUNTDOWN_TICKS - 1);
        assert_eq!(h.controller.phase(), SessionPhase::Countdown);
        assert!(h.controller.countdown_remaining().unwrap() > Duration::ZERO);
        assert!(h.store.saved.borrow().is_empty());

        h.ticks(1);
        assert_eq!(h.controller.phase(), SessionPhase::Result);
        let round = *h.controller.last_round().unwrap();
        assert_eq!(round.player, Move::Scissors);
        assert_eq!(round.outcome, RoundOutcome::resolve(round.player, round.computer));
        assert_eq!(h.controller.last_player_move(), Some(Move::Scissors));
        assert_eq!(h.store.saved.borrow().len(), 1);
        assert_eq!(h.store.saved.borrow()[0], *h.controller.scores());
    }

    #[test]
    fn test_result_expires_into_waiting() {
        let mut h = Harness::new(StubRecognizer::default());
        h.command(Command::ManualMove(Move::Paper));
        h.ticks(COUNTDOWN_TICKS);

        h.ticks(RESULT_TICKS - 1);
        assert_eq!(h.controller.phase(), SessionPhase::Result);
        assert_eq!(h.controller.player_choice(), Some(Move::Paper));

        h.ticks(1);
        assert_eq!(h.controller.phase(), SessionPhase::Waiting);
        assert_eq!(h.controller.player_choice(), None);
    }

    #[test]
    fn test_scores_follow_outcomes() {
        let mut h = Harness::new(StubRecognizer::default());
        let mut wins = 0;
        let mut losses = 0;
        for _ in 0..12 {
            match h.play_round(Move::Rock).outcome {
                RoundOutcome::PlayerWins => wins += 1,
                RoundOutcome::ComputerWins => losses += 1,
                RoundOutcome::Draw => {}
            }
        }
        let scores = h.controller.scores();
        assert_eq!(scores.total_wins(), wins);
        assert_eq!(scores.total_losses(), losses);
        assert_eq!(scores.player_score(), wins);
        assert_eq!(scores.computer_score(), losses);
        assert!(scores.high_score() >= scores.player_score());
        assert_eq!(h.store.saved.borrow().len(), 12);
    }

    #[test]
    fn test_hard_opponent_counters_repeated_rock() {
        let mut h = Harness::new(StubRecognizer::default());
        h.controller = h.controller.with_difficulty(Difficulty::Hard);
        h.play_round(Move::Rock);
        let second = h.play_round(Move::Rock);
        assert_eq!(second.computer, Move::Paper);
        assert_eq!(second.outcome, RoundOutcome::ComputerWins);
    }

    #[test]
    fn test_trained_classifier_overrides_manual_choice() {
        let mut h = Harness::new(StubRecognizer::trained(Some(Move::Scissors)));
        let round = h.play_round(Move::Rock);
        assert_eq!(round.player, Move::Scissors);
    }

    #[test]
    fn test_unknown_prediction_falls_back_to_default_move() {
        let mut h = Harness::new(StubRecognizer::trained(None));
        let round = h.play_round(Move::Paper);
        assert_eq!(round.player, FALLBACK_MOVE);
    }

    #[test]
    fn test_lock_gesture_requires_prediction() {
        let mut h = Harness::new(StubRecognizer::default());
        h.command(Command::LockGesture);
        assert_eq!(h.controller.phase(), SessionPhase::Waiting);

        let mut h = Harness::new(StubRecognizer::trained(Some(Move::Paper)));
        h.command(Command::LockGesture);
        assert_eq!(h.controller.phase(), SessionPhase::Countdown);
        assert_eq!(h.controller.player_choice(), Some(Move::Paper));
    }

    #[test]
    fn test_lock_gesture_without_frame_stays_waiting() {
        let mut h = Harness::new(StubRecognizer::trained(Some(Move::Paper)));
        h.controller.handle_command(Command::LockGesture, None);
        assert_eq!(h.controller.phase(), SessionPhase::Waiting);
    }

    #[test]
    fn test_live_prediction_while_waiting() {
        let mut h = Harness::new(StubRecognizer::trained(Some(Move::Rock)));
        assert_eq!(h.controller.live_prediction(), None);
        h.ticks(1);
        assert_eq!(h.controller.live_prediction(), Some(Move::Rock));
    }

    #[test]
    fn test_training_mode_routes_samples_and_training() {
        let mut h = Harness::new(StubRecognizer::default());

        // Ignored outside training
        h.command(Command::SampleLabel(Move::Rock));
        h.command(Command::TrainNow);
        assert_eq!(h.controller.sample_counts().total(), 0);

        h.command(Command::ToggleTraining);
        assert_eq!(h.controller.phase(), SessionPhase::Training);

        h.command(Command::SampleLabel(Move::Rock));
        h.command(Command::SampleLabel(Move::Paper));
        h.command(Command::TrainNow);
        assert!(!h.controller.is_trained());
        assert!(h.controller.status().starts_with("Training failed"));

        h.command(Command::SampleLabel(Move::Scissors));
        h.command(Command::TrainNow);
        assert!(h.controller.is_trained());
        assert_eq!(h.controller.sample_counts().total(), 3);

        // Manual moves do nothing while training
        h.command(Command::ManualMove(Move::Rock));
        assert_eq!(h.controller.phase(), SessionPhase::Training);

        h.command(Command::ToggleTraining);
        assert_eq!(h.controller.phase(), SessionPhase::Waiting);
    }

    #[test]
    fn test_sample_without_frame_is_not_recorded() {
        let mut h = Harness::new(StubRecognizer::default());
        h.command(Command::ToggleTraining);
        h.controller
            .handle_command(Command::SampleLabel(Move::Rock), None);
        assert_eq!(h.controller.sample_counts().total(), 0);
    }

    #[test]
    fn test_training_toggle_ignored_during_round() {
        let mut h = Harness::new(StubRecognizer::default());
        h.command(Command::ManualMove(Move::Rock));
        h.command(Command::ToggleTraining);
        assert_eq!(h.controller.phase(), SessionPhase::Countdown);
    }

    /// Resuming from pause always lands in `Waiting`, whatever phase was
    /// interrupted. This is the intended behavior, not a lost state.
    #[test]
    fn test_resume_from_pause_always_lands_in_waiting() {
        let mut h = Harness::new(StubRecognizer::default());
        h.command(Command::ManualMove(Move::Rock));
        h.ticks(5);

        h.command(Command::TogglePause);
        assert_eq!(h.controller.phase(), SessionPhase::Paused);
        h.ticks(COUNTDOWN_TICKS * 2);
        assert_eq!(h.controller.phase(), SessionPhase::Paused);
        assert!(h.store.saved.borrow().is_empty());

        h.command(Command::TogglePause);
        assert_eq!(h.controller.phase(), SessionPhase::Waiting);
        assert_eq!(h.controller.player_choice(), None);

        h.command(Command::ToggleTraining);
        h.command(Command::TogglePause);
        assert_eq!(h.controller.phase(), SessionPhase::Paused);
        h.command(Command::TogglePause);
        assert_eq!(h.controller.phase(), SessionPhase::Waiting);
    }

    #[test]
    fn test_pause_from_result() {
        let mut h = Harness::new(StubRecognizer::default());
        h.command(Command::ManualMove(Move::Rock));
        h.ticks(COUNTDOWN_TICKS);
        h.command(Command::TogglePause);
        assert_eq!(h.controller.phase(), SessionPhase::Paused);
    }

    #[test]
    fn test_save_failure_does_not_block_transitions() {
        let store = SharedStore {
            fail: true,
            ..SharedStore::default()
        };
        let mut h = Harness::with_store(StubRecognizer::default(), store);
        h.command(Command::ManualMove(Move::Rock));
        h.ticks(COUNTDOWN_TICKS);
        assert_eq!(h.controller.phase(), SessionPhase::Result);
        assert!(h.controller.status().contains("not saved"));
        assert_eq!(h.controller.last_player_move(), Some(Move::Rock));

        h.ticks(RESULT_TICKS);
        assert_eq!(h.controller.phase(), SessionPhase::Waiting);
    }

    #[test]
    fn test_unreadable_scores_are_never_overwritten() {
        let store = SharedStore {
            fail_load: true,
            ..SharedStore::default()
        };
        let mut h = Harness::with_store(StubRecognizer::default(), store);
        assert!(h.controller.status().contains("not saving"));

        let round = h.play_round(Move::Rock);
        assert!(h.store.saved.borrow().is_empty());
        assert_eq!(h.controller.scores().leaderboard().len(), 1);
        assert_eq!(round.player, Move::Rock);
    }

    #[test]
    fn test_starting_theme() {
        let mut h = Harness::new(StubRecognizer::default());
        h.controller = h.controller.with_theme(Theme::Light);
        assert_eq!(h.controller.theme(), Theme::Light);
        h.command(Command::CycleTheme);
        assert_eq!(h.controller.theme(), Theme::Dark);
    }

    #[test]
    fn test_global_commands() {
        let mut h = Harness::new(StubRecognizer::default());
        h.command(Command::ManualMove(Move::Rock));

        h.command(Command::CycleDifficulty);
        assert_eq!(h.controller.difficulty(), Difficulty::Medium);
        h.command(Command::CycleTheme);
        assert_eq!(h.controller.theme(), Theme::Light);
        assert_eq!(h.controller.phase(), SessionPhase::Countdown);

        assert!(!h.controller.should_exit());
        h.command(Command::Quit);
        assert!(h.controller.should_exit());
    }

    #[test]
    fn test_help_overlay_expires() {
        let mut h = Harness::new(StubRecognizer::default());
        h.command(Command::ShowHelp);
        assert!(h.controller.is_help_visible());
        h.ticks(49);
        assert!(h.controller.is_help_visible());
        h.ticks(1);
        assert!(!h.controller.is_help_visible());

        h.command(Command::ShowHelp);
        h.command(Command::ShowHelp);
        assert!(!h.controller.is_help_visible());
    }

    #[test]
    fn test_round_cues() {
        let mut h = Harness::new(StubRecognizer::default());
        let round = h.play_round(Move::Paper);
        let cues = h.cues.0.borrow();
        assert_eq!(
            &cues[..4],
            &[
                Cue::Click,
                Cue::Say(Phrase::Move(Move::Paper)),
                Cue::Say(Phrase::Two),
                Cue::Say(Phrase::One),
            ]
        );
        assert_eq!(cues[4], Cue::for_outcome(round.outcome));
        assert_eq!(cues.len(), 5);
    }

    #[test]
    fn test_scores_loaded_at_startup() {
        let store = SharedStore::default();
        let mut previous = ScoreRecord::new();
        previous.record_round(RoundOutcome::PlayerWins, Utc::now());
        store.saved.borrow_mut().push(previous.clone());

        let h = Harness::with_store(StubRecognizer::default(), store);
        assert_eq!(h.controller.scores(), &previous);
    }
}
