use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Color scheme selected by the player.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
    derive_more::IsVariant,
)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Timing of the session state machine.
///
/// The controller advances by whole ticks, and elapsed time within a phase is
/// derived from the tick count and [`Self::tick_rate`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Ticks per second.
    pub tick_rate: u64,
    /// Time between locking in a move and resolving the round.
    pub countdown: Duration,
    /// Time the round result stays on screen.
    pub result: Duration,
    /// Time the help overlay stays on screen.
    pub help: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_rate: Self::DEFAULT_TICK_RATE,
            countdown: Duration::from_millis(2000),
            result: Duration::from_millis(1500),
            help: Duration::from_secs(5),
        }
    }
}

impl SessionConfig {
    pub const DEFAULT_TICK_RATE: u64 = 30;

    /// Converts a tick count into elapsed time.
    #[must_use]
    pub fn ticks_to_duration(&self, ticks: u64) -> Duration {
        const NANOS_PER_SEC: u64 = 1_000_000_000;
        let rate = self.tick_rate.max(1);
        let secs = ticks / rate;
        let nanos = (ticks % rate) * NANOS_PER_SEC / rate;
        Duration::new(secs, u32::try_from(nanos).unwrap_or(0))
    }

    /// Smallest tick count whose elapsed time reaches `duration`.
    #[must_use]
    pub fn duration_to_ticks(&self, duration: Duration) -> u64 {
        let rate = u128::from(self.tick_rate.max(1));
        let ticks = (duration.as_nanos() * rate).div_ceil(1_000_000_000);
        u64::try_from(ticks).unwrap_or(u64::MAX)
    }
}
