use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Produces ticks at a fixed interval, renders when dirty, and forwards
/// terminal events in between.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Duration,
    next_tick: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            next_tick: Instant::now() + tick_interval,
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Duration) {
        self.tick_interval = interval;
        self.next_tick = Instant::now() + interval;
    }

    /// Blocks until the next tick is due, a render is needed, or a terminal
    /// event arrives.
    pub(super) fn next(&mut self) -> std::io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if now >= self.next_tick {
                // Schedule from the previous deadline so that ticks do not
                // drift, but never try to catch up on a backlog.
                self.next_tick = (self.next_tick + self.tick_interval).max(now);
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if !event::poll(self.next_tick.saturating_duration_since(now))? {
                continue;
            }
            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_before_first_tick() {
        let mut events = EventLoop::new(Duration::from_secs(60));
        assert!(events.next().unwrap().is_render());
    }

    #[test]
    fn test_overdue_tick_comes_first() {
        let mut events = EventLoop::new(Duration::ZERO);
        assert!(events.next().unwrap().is_tick());
        assert!(events.next().unwrap().is_tick());
    }
}
